//! Domain errors for the BOM editor

use crate::model::bom::BomPath;
use thiserror::Error;

/// Errors raised by forest insertion and the editor state machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BomError {
    /// Commit attempted while the component name is empty
    #[error("component name is required")]
    EmptyName,

    /// An index along the path does not resolve to an existing node
    #[error("no component at path {path}")]
    PathNotFound { path: BomPath },

    /// Commit attempted with no insertion point open
    #[error("no insertion point is open")]
    NoPendingInsertion,
}
