//! Help dialog component
//!
//! Lists the keyboard shortcuts. Scroll position lives in `Modal::Help`.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

#[derive(Default)]
pub struct HelpDialog;

impl HelpDialog {
    /// Largest useful scroll offset for a dialog of `height` rows
    pub fn max_scroll(height: u16) -> usize {
        build_help_content()
            .len()
            .saturating_sub(height.saturating_sub(2) as usize)
    }

    pub fn draw_with_offset(&mut self, frame: &mut Frame, area: Rect, scroll_offset: usize) -> Result<()> {
        frame.render_widget(Clear, area);

        let margin = 4;
        let dialog_area = Rect::new(
            margin,
            margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let content = build_help_content();
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;
        let offset = scroll_offset.min(Self::max_scroll(dialog_area.height));

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_with_offset(frame, area, 0)
    }
}

fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.len() + 2)),
            Style::default().fg(Color::DarkGray),
        )));
    };

    let add_shortcut = |lines: &mut Vec<Line<'static>>, key: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:12}", key),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description.to_string(), Style::default().fg(Color::White)),
        ]));
    };

    add_section(&mut lines, "Navigation");
    add_shortcut(&mut lines, "j / ↓", "Move to next component");
    add_shortcut(&mut lines, "k / ↑", "Move to previous component");
    add_shortcut(&mut lines, "g / Home", "Jump to first component");
    add_shortcut(&mut lines, "G / End", "Jump to last component");

    add_section(&mut lines, "Editing");
    add_shortcut(&mut lines, "a / Enter", "Add child under selected component");
    add_shortcut(&mut lines, "A", "Add root component");

    add_section(&mut lines, "Add Component Dialog");
    add_shortcut(&mut lines, "Tab", "Switch between Name and Quantity");
    add_shortcut(&mut lines, "Enter", "Add (requires a name)");
    add_shortcut(&mut lines, "Esc", "Cancel and discard input");

    add_section(&mut lines, "General");
    add_shortcut(&mut lines, "?", "Show this help");
    add_shortcut(&mut lines, "q", "Quit");
    add_shortcut(&mut lines, "Ctrl+c", "Quit immediately");

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press q, Esc, or ? to close",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_help_keys() {
        let mut dialog = HelpDialog;
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(dialog.handle_key_event(key(KeyCode::Char('?'))).unwrap(), Some(Action::CloseModal));
        assert_eq!(dialog.handle_key_event(key(KeyCode::Down)).unwrap(), Some(Action::ScrollDown));
    }

    #[test]
    fn test_max_scroll() {
        let total = build_help_content().len();
        assert_eq!(HelpDialog::max_scroll(200), 0);
        assert_eq!(HelpDialog::max_scroll(12), total - 10);
    }
}
