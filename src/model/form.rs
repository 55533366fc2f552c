//! Pending input for the "Add Component" dialog

use super::bom::BomNode;
use crate::error::BomError;

/// Which form field receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Quantity,
}

impl FormField {
    pub fn toggle(&self) -> FormField {
        match self {
            FormField::Name => FormField::Quantity,
            FormField::Quantity => FormField::Name,
        }
    }
}

/// Raw text of the add-component form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentForm {
    pub name: String,
    pub quantity: String,
    pub focus: FormField,
}

impl ComponentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    pub fn focused_text(&self) -> &str {
        match self.focus {
            FormField::Name => &self.name,
            FormField::Quantity => &self.quantity,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Quantity => &mut self.quantity,
        }
    }

    /// Whether the commit action is enabled
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }

    /// Parsed quantity; malformed or zero input means "not tracked"
    pub fn parsed_quantity(&self) -> Option<u32> {
        self.quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|quantity| *quantity > 0)
    }

    /// Build the node this form describes
    pub fn to_node(&self) -> Result<BomNode, BomError> {
        if !self.is_valid() {
            return Err(BomError::EmptyName);
        }
        Ok(BomNode {
            name: self.name.clone(),
            quantity: self.parsed_quantity(),
            children: Vec::new(),
        })
    }
}
