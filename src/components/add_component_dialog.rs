//! Add-component dialog
//!
//! Two fields, `Name` and `Quantity (optional)`. Enter only commits while the
//! name is filled in; otherwise the `Add` hint is dimmed and Enter is ignored.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{ComponentForm, FormField};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

#[derive(Default)]
pub struct AddComponentDialog {
    /// Mirrors `ComponentForm::is_valid` for the pending form
    pub commit_enabled: bool,
}

impl AddComponentDialog {
    /// Refresh key handling state from the pending form
    pub fn sync(&mut self, form: &ComponentForm) {
        self.commit_enabled = form.is_valid();
    }

    /// Popup title for an insertion under `parent` (`None` at root)
    pub fn title(parent: Option<&str>) -> String {
        match parent {
            Some(name) => format!(" Add Component under {} ", name),
            None => " Add Component at root ".to_string(),
        }
    }

    fn field_widget<'a>(label: &'a str, value: &'a str, placeholder: &'a str, focused: bool) -> Paragraph<'a> {
        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let text = if value.is_empty() {
            Span::styled(placeholder, Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(value, Style::default().fg(Color::White))
        };
        Paragraph::new(Line::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", label))
                .border_style(Style::default().fg(border)),
        )
    }

    pub fn draw_with_form(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        form: &ComponentForm,
        parent: Option<&str>,
    ) -> Result<()> {
        self.sync(form);

        let popup_area = centered_popup(area, 50, 12);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Self::title(parent))
            .title_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Name
                Constraint::Length(3), // Quantity
                Constraint::Min(1),    // Hints
            ])
            .split(inner);

        let name_focused = form.focus == FormField::Name;
        frame.render_widget(
            Self::field_widget("Name", &form.name, "Component name", name_focused),
            chunks[0],
        );
        frame.render_widget(
            Self::field_widget("Quantity (optional)", &form.quantity, "e.g. 2", !name_focused),
            chunks[1],
        );

        let add_style = if self.commit_enabled {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let hints = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", add_style),
            Span::styled("Add  ", add_style),
            Span::styled(
                " Tab ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Next field  "),
            Span::styled(
                " Esc ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Cancel"),
        ]));
        frame.render_widget(hints, chunks[2]);

        let field_area = if name_focused { chunks[0] } else { chunks[1] };
        let text_width = form.focused_text().width() as u16;
        let max_x = field_area.x + field_area.width.saturating_sub(2);
        frame.set_cursor_position(((field_area.x + 1 + text_width).min(max_x), field_area.y + 1));

        Ok(())
    }
}

impl Component for AddComponentDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter if self.commit_enabled => Some(Action::ConfirmModal),
            KeyCode::Enter => None,
            KeyCode::Tab | KeyCode::BackTab => Some(Action::FormNextField),
            KeyCode::Backspace => Some(Action::FormBackspace),
            KeyCode::Char(_)
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                None
            }
            KeyCode::Char(c) => Some(Action::FormInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the pending form, see draw_with_form
        Ok(())
    }
}
