//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod add_component_dialog;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod quit_dialog;
pub mod summary;
pub mod tree_view;

pub use add_component_dialog::AddComponentDialog;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use summary::render_summary;
pub use tree_view::TreeViewComponent;
