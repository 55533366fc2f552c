//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components. All
//! changes to the bill of materials go through the [`BomEditor`].

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, AddComponentDialog, HelpDialog, HomeRenderContext, QuitDialog,
    TreeViewComponent,
};
use crate::config::Config;
use crate::error::BomError;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{BomEditor, BomPath, Forest};
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long a status or error message stays on screen
const STATUS_TTL: Duration = Duration::from_secs(4);

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App {
    /// Forest and pending insertion
    pub editor: BomEditor,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message and when it was set
    pub error: Option<(String, Instant)>,

    /// Status message and when it was set
    pub status_message: Option<(String, Instant)>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub tree: TreeViewComponent,
    pub add_dialog: AddComponentDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn with_config(config: Config) -> App {
        let forest = if config.seed_demo_data {
            Forest::demo()
        } else {
            Forest::new()
        };

        App {
            editor: BomEditor::new(forest),
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            tree: TreeViewComponent::new(config.indent_width),
            add_dialog: AddComponentDialog::default(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog,
        }
    }

    fn row_count(&self) -> usize {
        self.editor.forest().len()
    }

    fn open_insertion_point(&mut self, target: BomPath) {
        self.status_message = None;
        self.error = None;
        let reopening = self.editor.is_awaiting_input();
        self.editor.open_insertion_point(target);
        if !reopening {
            self.modals.push(Modal::AddComponent);
        }
    }

    fn commit_insertion(&mut self) {
        match self.editor.commit() {
            Ok(committed) => {
                self.modals.pop();
                self.tree.select_path(self.editor.forest(), &committed.path);
                self.status_message = Some((committed.describe(), Instant::now()));
            }
            // Commit stays disabled until a name is typed
            Err(BomError::EmptyName) => {}
            Err(err) => {
                warn!(%err, "insertion failed");
                self.modals.pop();
                self.editor.cancel();
                self.set_error(err.to_string());
            }
        }
    }

    fn close_modal(&mut self) {
        if let Some(Modal::AddComponent) = self.modals.pop() {
            self.editor.cancel();
        }
    }

    fn scroll_help(&mut self, down: bool) {
        if let Some(Modal::Help { scroll_offset }) = self.modals.top_mut() {
            *scroll_offset = if down {
                scroll_offset.saturating_add(1)
            } else {
                scroll_offset.saturating_sub(1)
            };
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some((message.into(), Instant::now()));
    }

    /// Drop status and error messages older than [`STATUS_TTL`]
    fn expire_messages(&mut self) {
        for message in [&mut self.status_message, &mut self.error] {
            if message
                .as_ref()
                .is_some_and(|(_, set_at)| set_at.elapsed() >= STATUS_TTL)
            {
                *message = None;
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        let rows = self.row_count();
        self.tree.select_first(rows);
        info!(components = rows, "bom editor started");
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.modals.top() {
            Some(Modal::QuitConfirm) => self.quit_dialog.handle_key_event(key),
            Some(Modal::Help { .. }) => self.help_dialog.handle_key_event(key),
            Some(Modal::AddComponent) => {
                if let Some(form) = self.editor.form() {
                    self.add_dialog.sync(form);
                }
                self.add_dialog.handle_key_event(key)
            }
            None => self.tree.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!(%action, "dispatch");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.expire_messages(),
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                info!("quitting");
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Tree Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem | Action::PrevItem | Action::FirstItem | Action::LastItem => {
                let rows = self.row_count();
                match action {
                    Action::NextItem => self.tree.next(rows),
                    Action::PrevItem => self.tree.previous(rows),
                    Action::FirstItem => self.tree.select_first(rows),
                    _ => self.tree.select_last(rows),
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Editing
            // ─────────────────────────────────────────────────────────────────
            Action::AddChild => {
                // With nothing to select, the only possible parent is the root
                let target = self
                    .tree
                    .selected_path(self.editor.forest())
                    .unwrap_or_default();
                self.open_insertion_point(target);
            }
            Action::AddRoot => self.open_insertion_point(BomPath::root()),
            Action::FormInput(c) => {
                if let Some(form) = self.editor.form_mut() {
                    form.push_char(c);
                }
            }
            Action::FormBackspace => {
                if let Some(form) = self.editor.form_mut() {
                    form.backspace();
                }
            }
            Action::FormNextField => {
                if let Some(form) = self.editor.form_mut() {
                    form.toggle_focus();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => self.modals.push(Modal::Help { scroll_offset: 0 }),
            Action::CloseModal => self.close_modal(),
            Action::ConfirmModal => {
                if self.modals.top() == Some(&Modal::AddComponent) {
                    self.commit_insertion();
                }
            }
            Action::ScrollDown => self.scroll_help(true),
            Action::ScrollUp => self.scroll_help(false),
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = HomeRenderContext {
            forest: self.editor.forest(),
            status_message: self.status_message.as_ref().map(|(text, _)| text.as_str()),
            error: self.error.as_ref().map(|(text, _)| text.as_str()),
        };
        draw_home_screen(frame, area, &mut self.tree, &ctx)?;

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => {
                self.quit_dialog
                    .draw_with_forest(frame, area, self.editor.forest())?
            }
            Modal::AddComponent => {
                let parent = self.editor.target_name();
                if let Some(form) = self.editor.form() {
                    self.add_dialog.draw_with_form(frame, area, form, parent)?;
                }
            }
            Modal::Help { scroll_offset } => {
                // Keep the stored offset in range so scrolling back up is immediate
                let max_scroll = HelpDialog::max_scroll(area.height.saturating_sub(8));
                let offset = (*scroll_offset).min(max_scroll);
                if let Some(Modal::Help { scroll_offset }) = self.modals.top_mut() {
                    *scroll_offset = offset;
                }
                self.help_dialog.draw_with_offset(frame, area, offset)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn app(seed_demo_data: bool) -> App {
        let mut app = App::with_config(Config {
            seed_demo_data,
            ..Config::default()
        });
        app.init().unwrap();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        let mut action = app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
        while let Some(a) = action {
            action = app.update(a).unwrap();
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn status(app: &App) -> Option<&str> {
        app.status_message.as_ref().map(|(text, _)| text.as_str())
    }

    fn labels(app: &App) -> Vec<(String, usize)> {
        app.editor
            .forest()
            .render()
            .into_iter()
            .map(|row| (row.node.label(), row.depth))
            .collect()
    }

    #[test]
    fn test_add_child_through_dialog() {
        let mut app = app(true);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.modals.top(), Some(&Modal::AddComponent));
        assert_eq!(app.editor.target(), Some(&BomPath::from(vec![0])));

        type_text(&mut app, "Collar");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "1");
        press(&mut app, KeyCode::Enter);

        assert!(app.modals.top().is_none());
        assert_eq!(status(&app), Some("Added Collar under Garment"));
        assert_eq!(labels(&app).last(), Some(&("Collar (x1)".to_string(), 1)));
        assert_eq!(
            app.tree.selected_path(app.editor.forest()),
            Some(BomPath::from(vec![0, 2]))
        );
    }

    #[test]
    fn test_enter_without_name_keeps_dialog_open() {
        let mut app = app(true);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.modals.top(), Some(&Modal::AddComponent));
        assert!(app.editor.is_awaiting_input());
        assert_eq!(app.editor.forest().len(), 4);
    }

    #[test]
    fn test_escape_cancels_insertion() {
        let mut app = app(true);

        press(&mut app, KeyCode::Char('A'));
        type_text(&mut app, "Trim");
        press(&mut app, KeyCode::Esc);

        assert!(app.modals.top().is_none());
        assert!(!app.editor.is_awaiting_input());
        assert_eq!(app.editor.forest(), &Forest::demo());
    }

    #[test]
    fn test_add_root_into_empty_forest() {
        let mut app = app(false);
        assert_eq!(app.tree.selected(), None);

        // Adding a "child" with nothing selected targets the root
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.editor.target(), Some(&BomPath::root()));
        type_text(&mut app, "Frame");
        press(&mut app, KeyCode::Enter);

        assert_eq!(labels(&app), vec![("Frame".to_string(), 0)]);
        assert_eq!(status(&app), Some("Added Frame at root"));
        assert_eq!(app.tree.selected(), Some(0));
    }

    #[test]
    fn test_add_under_nested_selection() {
        let mut app = app(true);

        press(&mut app, KeyCode::Char('G'));
        assert_eq!(
            app.tree.selected_path(app.editor.forest()),
            Some(BomPath::from(vec![0, 1, 0]))
        );
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Button");
        press(&mut app, KeyCode::Enter);

        assert_eq!(labels(&app).last(), Some(&("Button".to_string(), 3)));
    }

    #[test]
    fn test_quit_flow() {
        let mut app = app(true);

        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        press(&mut app, KeyCode::Char('n'));
        assert!(app.modals.top().is_none());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_q_is_text_inside_dialog() {
        let mut app = app(true);

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "q");

        assert_eq!(app.modals.top(), Some(&Modal::AddComponent));
        assert_eq!(app.editor.form().unwrap().name, "q");
    }

    #[test]
    fn test_help_scrolls_and_closes() {
        let mut app = app(true);

        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.modals.top(), Some(&Modal::Help { scroll_offset: 2 }));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.modals.top(), Some(&Modal::Help { scroll_offset: 1 }));

        press(&mut app, KeyCode::Esc);
        assert!(app.modals.top().is_none());
    }

    #[test]
    fn test_messages_expire_on_tick() {
        let mut app = app(true);
        let stale = Instant::now() - STATUS_TTL;

        app.set_error("Logging disabled");
        app.update(Action::Tick).unwrap();
        assert!(app.error.is_some());

        app.error = Some(("Logging disabled".to_string(), stale));
        app.status_message = Some(("Added Collar under Garment".to_string(), stale));
        app.update(Action::Tick).unwrap();
        assert!(app.error.is_none());
        assert!(status(&app).is_none());
    }

    #[test]
    fn test_reopening_dialog_keeps_single_modal() {
        let mut app = app(true);

        press(&mut app, KeyCode::Char('a'));
        app.update(Action::AddRoot).unwrap();

        assert_eq!(app.editor.target(), Some(&BomPath::root()));
        app.modals.pop();
        assert!(app.modals.top().is_none());
    }

    #[test]
    fn test_draw_with_dialog_open() {
        let mut app = app(true);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Collar");

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.draw(frame, area).unwrap();
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Add Component under Garment"));
        assert!(text.contains("Collar"));
    }
}
