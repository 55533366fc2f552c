//! BOM tree view - indented, selectable list of components
//!
//! Rows come from [`Forest::render`], so the selection index always maps back
//! to a [`BomPath`] captured from what is on screen.

use crate::action::Action;
use crate::component::Component;
use crate::model::{BomPath, BomRow, Forest};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub const EMPTY_MESSAGE: &str = "No components yet.";

pub struct TreeViewComponent {
    pub list_state: ListState,
    /// Spaces per nesting level
    pub indent_width: u16,
}

impl Default for TreeViewComponent {
    fn default() -> Self {
        Self::new(2)
    }
}

impl TreeViewComponent {
    pub fn new(indent_width: u16) -> Self {
        Self {
            list_state: ListState::default(),
            indent_width,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Path of the highlighted row
    pub fn selected_path(&self, forest: &Forest) -> Option<BomPath> {
        let index = self.selected()?;
        forest.render().into_iter().nth(index).map(|row| row.path)
    }

    /// Highlight the row at `path`, keeping the current selection if absent
    pub fn select_path(&mut self, forest: &Forest, path: &BomPath) {
        if let Some(index) = forest.render().iter().position(|row| &row.path == path) {
            self.list_state.select(Some(index));
        }
    }

    pub fn next(&mut self, row_count: usize) {
        if row_count == 0 {
            self.list_state.select(None);
            return;
        }
        let index = match self.list_state.selected() {
            Some(i) if i + 1 < row_count => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(index));
    }

    pub fn previous(&mut self, row_count: usize) {
        if row_count == 0 {
            self.list_state.select(None);
            return;
        }
        let index = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(index));
    }

    pub fn select_first(&mut self, row_count: usize) {
        self.list_state
            .select(if row_count > 0 { Some(0) } else { None });
    }

    pub fn select_last(&mut self, row_count: usize) {
        self.list_state.select(row_count.checked_sub(1));
    }

    fn row_line(&self, row: &BomRow<'_>) -> Line<'static> {
        let indent = " ".repeat(self.indent_width as usize * row.depth);
        let marker = if row.node.is_leaf() { "• " } else { "▾ " };
        let name_style = if row.depth == 0 {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        Line::from(vec![
            Span::raw(indent),
            Span::styled(marker, Style::default().fg(Color::DarkGray)),
            Span::styled(row.node.label(), name_style),
        ])
    }

    /// Draw the tree for `forest`
    pub fn draw_with_forest(&mut self, frame: &mut Frame, area: Rect, forest: &Forest) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" BOM Tree ({}) ", forest.len()))
            .border_style(Style::default().fg(Color::DarkGray));

        if forest.is_empty() {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                EMPTY_MESSAGE,
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            frame.render_widget(paragraph, area);
            return Ok(());
        }

        let items: Vec<ListItem> = forest
            .render()
            .iter()
            .map(|row| ListItem::new(self.row_line(row)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
        Ok(())
    }
}

impl Component for TreeViewComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Char('a') | KeyCode::Enter => Some(Action::AddChild),
            KeyCode::Char('A') => Some(Action::AddRoot),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the forest, see draw_with_forest
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::bom::BomNode;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_navigation_clamps() {
        let mut view = TreeViewComponent::new(2);
        view.next(3);
        assert_eq!(view.selected(), Some(0));
        view.next(3);
        view.next(3);
        view.next(3);
        assert_eq!(view.selected(), Some(2));
        view.previous(3);
        assert_eq!(view.selected(), Some(1));
        view.select_first(3);
        assert_eq!(view.selected(), Some(0));
        view.previous(3);
        assert_eq!(view.selected(), Some(0));
        view.select_last(3);
        assert_eq!(view.selected(), Some(2));
        view.select_last(0);
        assert_eq!(view.selected(), None);
    }

    #[test]
    fn test_selected_path_follows_render_order() {
        let forest = Forest::demo();
        let mut view = TreeViewComponent::new(2);
        view.list_state.select(Some(3));
        assert_eq!(view.selected_path(&forest), Some(BomPath::from(vec![0, 1, 0])));

        view.select_path(&forest, &BomPath::from(vec![0, 0]));
        assert_eq!(view.selected(), Some(1));

        view.select_path(&forest, &BomPath::from(vec![7]));
        assert_eq!(view.selected(), Some(1));
    }

    #[test]
    fn test_key_bindings() {
        let mut view = TreeViewComponent::default();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(view.handle_key_event(key(KeyCode::Char('a'))).unwrap(), Some(Action::AddChild));
        assert_eq!(view.handle_key_event(key(KeyCode::Char('A'))).unwrap(), Some(Action::AddRoot));
        assert_eq!(view.handle_key_event(key(KeyCode::Down)).unwrap(), Some(Action::NextItem));
        assert_eq!(
            view.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .unwrap(),
            Some(Action::ForceQuit)
        );
        assert_eq!(view.handle_key_event(key(KeyCode::Char('z'))).unwrap(), None);
    }

    #[test]
    fn test_draw_indents_rows() {
        let forest = Forest::demo();
        let mut view = TreeViewComponent::new(2);
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();

        terminal
            .draw(|frame| {
                let area = frame.area();
                view.draw_with_forest(frame, area, &forest).unwrap();
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("BOM Tree (4)"));
        assert!(text.contains("▾ Garment"));
        assert!(text.contains("  • Body (x1)"));
        assert!(text.contains("    • Cuff (x2)"));
    }

    #[test]
    fn test_draw_empty_forest() {
        let forest = Forest::new();
        let mut view = TreeViewComponent::new(2);
        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();

        terminal
            .draw(|frame| {
                let area = frame.area();
                view.draw_with_forest(frame, area, &forest).unwrap();
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains(EMPTY_MESSAGE));

        let forest = forest.insert(&BomPath::root(), BomNode::new("Frame")).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                view.draw_with_forest(frame, area, &forest).unwrap();
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("• Frame"));
    }
}
