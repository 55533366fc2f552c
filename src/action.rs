//! Action enum - All possible application actions
//!
//! Components turn key events into Actions; the App applies them to the
//! editor and modal stack.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick with no input
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Tree Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextItem,
    PrevItem,
    FirstItem,
    LastItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the add-component dialog under the selected node
    AddChild,
    /// Open the add-component dialog for a new top-level component
    AddRoot,
    /// Type a character into the focused form field
    FormInput(char),
    /// Delete the last character of the focused form field
    FormBackspace,
    /// Move focus to the other form field
    FormNextField,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    /// Close the current modal, discarding any pending input
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,
    ScrollUp,
    ScrollDown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::AddChild => write!(f, "AddChild"),
            Action::AddRoot => write!(f, "AddRoot"),
            Action::FormInput(c) => write!(f, "FormInput('{}')", c),
            Action::FormBackspace => write!(f, "FormBackspace"),
            Action::FormNextField => write!(f, "FormNextField"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
        }
    }
}
