//! Modal configuration types.

use crate::status::ModalStatus;

/// Per-modal configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalConfig {
    /// Display name, used in log output.
    pub name: &'static str,

    /// State the modal starts in.
    pub initial: ModalStatus,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            name: "modal",
            initial: ModalStatus::Closed,
        }
    }
}

impl ModalConfig {
    /// Create a new config with the given name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Set the initial state.
    pub fn initial(mut self, initial: impl Into<ModalStatus>) -> Self {
        self.initial = initial.into();
        self
    }

    /// Start the modal open.
    pub fn open(self) -> Self {
        self.initial(ModalStatus::Open)
    }
}
