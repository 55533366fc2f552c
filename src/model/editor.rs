//! BOM editor - owns the forest and the pending-insertion state machine
//!
//! ```text
//! Idle ──open_insertion_point──▶ AwaitingInput ──commit──▶ Idle (forest replaced)
//!                                      │
//!                                      └──cancel──▶ Idle (input discarded)
//! ```

use super::bom::{BomPath, Forest};
use super::form::ComponentForm;
use crate::error::BomError;
use tracing::{debug, info};

/// Where the editor is in the add-component flow
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InsertionState {
    #[default]
    Idle,
    AwaitingInput {
        target: BomPath,
        form: ComponentForm,
    },
}

/// Outcome of a successful commit, used for the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub name: String,
    pub parent: Option<String>,
    /// Path of the newly inserted node
    pub path: BomPath,
}

impl Committed {
    pub fn describe(&self) -> String {
        match &self.parent {
            Some(parent) => format!("Added {} under {}", self.name, parent),
            None => format!("Added {} at root", self.name),
        }
    }
}

#[derive(Debug, Default)]
pub struct BomEditor {
    forest: Forest,
    state: InsertionState,
}

impl BomEditor {
    pub fn new(forest: Forest) -> Self {
        Self {
            forest,
            state: InsertionState::Idle,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn is_awaiting_input(&self) -> bool {
        matches!(self.state, InsertionState::AwaitingInput { .. })
    }

    pub fn target(&self) -> Option<&BomPath> {
        match &self.state {
            InsertionState::AwaitingInput { target, .. } => Some(target),
            InsertionState::Idle => None,
        }
    }

    pub fn form(&self) -> Option<&ComponentForm> {
        match &self.state {
            InsertionState::AwaitingInput { form, .. } => Some(form),
            InsertionState::Idle => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut ComponentForm> {
        match &mut self.state {
            InsertionState::AwaitingInput { form, .. } => Some(form),
            InsertionState::Idle => None,
        }
    }

    /// Name of the node new components will be added under, `None` at root
    pub fn target_name(&self) -> Option<&str> {
        self.target()
            .and_then(|target| self.forest.get(target))
            .map(|node| node.name.as_str())
    }

    /// Choose where the next insert goes and start with an empty form
    ///
    /// Replaces any pending target and input.
    pub fn open_insertion_point(&mut self, target: BomPath) {
        debug!(%target, "insertion point opened");
        self.state = InsertionState::AwaitingInput {
            target,
            form: ComponentForm::new(),
        };
    }

    /// Apply the pending form to the forest and return to idle
    ///
    /// An invalid form leaves both the forest and the pending input as they
    /// were.
    pub fn commit(&mut self) -> Result<Committed, BomError> {
        let (target, form) = match &self.state {
            InsertionState::AwaitingInput { target, form } => (target, form),
            InsertionState::Idle => return Err(BomError::NoPendingInsertion),
        };

        let node = form.to_node().inspect_err(|err| {
            debug!(%target, %err, "insertion refused");
        })?;
        let forest = self.forest.insert(target, node.clone())?;

        let index = if target.is_root() {
            forest.root_count() - 1
        } else {
            forest
                .get(target)
                .map(|parent| parent.children.len() - 1)
                .unwrap_or_default()
        };
        let committed = Committed {
            name: node.name,
            parent: self.forest.get(target).map(|parent| parent.name.clone()),
            path: target.child(index),
        };

        info!(path = %committed.path, name = %committed.name, "component added");
        self.forest = forest;
        self.state = InsertionState::Idle;
        Ok(committed)
    }

    /// Discard the pending input and return to idle
    pub fn cancel(&mut self) {
        if let InsertionState::AwaitingInput { target, .. } = &self.state {
            debug!(%target, "insertion cancelled");
        }
        self.state = InsertionState::Idle;
    }
}
