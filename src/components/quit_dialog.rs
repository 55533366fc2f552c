//! Quit confirmation dialog component
//!
//! The forest only lives in memory, so the prompt spells out how much work
//! quitting throws away.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::Forest;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct QuitDialog;

impl QuitDialog {
    /// Warning line for a forest of `component_count` nodes
    pub fn warning(component_count: usize) -> String {
        match component_count {
            0 => "Nothing to lose, the BOM is empty.".to_string(),
            1 => "1 component will be discarded.".to_string(),
            n => format!("{} components will be discarded.", n),
        }
    }

    pub fn draw_with_forest(&mut self, frame: &mut Frame, area: Rect, forest: &Forest) -> Result<()> {
        let popup_area = centered_popup(area, 46, 9);
        frame.render_widget(Clear, popup_area);

        let key_style = |color| Style::default().fg(color).add_modifier(Modifier::BOLD);
        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Quit bom-tui?",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                Self::warning(forest.len()),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" y ", key_style(Color::Green)),
                Span::raw("Quit  "),
                Span::styled(" n/Esc ", key_style(Color::Red)),
                Span::raw("Keep editing"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Discard BOM? ")
                    .title_style(key_style(Color::Yellow)),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

impl Component for QuitDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::ForceQuit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the forest, see draw_with_forest
        Ok(())
    }
}
