//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub tree: Rect,
    pub info: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Tree on the left, summary panel on the right, status and help lines below
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(main_chunks[0]);

    MainLayout {
        tree: horizontal_chunks[0],
        info: horizontal_chunks[1],
        status: main_chunks[1],
        help: main_chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup() {
        let popup = centered_popup(Rect::new(0, 0, 100, 40), 50, 10);
        assert_eq!(popup, Rect::new(25, 15, 50, 10));

        let clamped = centered_popup(Rect::new(0, 0, 30, 6), 50, 10);
        assert_eq!(clamped, Rect::new(0, 0, 30, 6));
    }

    #[test]
    fn test_main_layout_reserves_bottom_lines() {
        let layout = calculate_main_layout(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.help.height, 1);
        assert_eq!(layout.tree.height, 28);
        assert_eq!(layout.tree.width + layout.info.width, 100);
    }
}
