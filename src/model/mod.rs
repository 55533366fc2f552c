//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `Forest` / `BomNode` / `BomPath` - the bill-of-materials tree
//! - `BomEditor` - forest owner and add-component state machine
//! - `ComponentForm` - pending dialog input
//! - `ModalStack` - Modal overlay management

pub mod bom;
pub mod editor;
pub mod form;
pub mod modal;

pub use bom::{BomPath, BomRow, Forest};
pub use editor::BomEditor;
pub use form::{ComponentForm, FormField};
