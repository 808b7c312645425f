// --- File: crates/slotbot_booking/src/screen.rs ---
use crate::action::Action;

/// A labelled button that triggers an [`Action`] when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Platform-neutral reply: message text plus rows of buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub text: String,
    pub rows: Vec<Vec<Button>>,
}

impl Screen {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, buttons: Vec<Button>) -> Self {
        self.rows.push(buttons);
        self
    }

    /// Appends a row holding a single button.
    pub fn button(self, label: impl Into<String>, action: Action) -> Self {
        self.row(vec![Button::new(label, action)])
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.rows.iter().flatten().map(|b| &b.action)
    }

    pub fn has_action(&self, action: &Action) -> bool {
        self.actions().any(|a| a == action)
    }
}
