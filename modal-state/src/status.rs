//! The two states a modal can be in.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Whether a modal surface is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ModalStatus {
    /// Shown.
    Open,
    /// Hidden.
    #[default]
    Closed,
}

impl ModalStatus {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// The state `on_toggle` moves to from this one.
    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

impl From<bool> for ModalStatus {
    fn from(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }
}

impl From<ModalStatus> for bool {
    fn from(status: ModalStatus) -> Self {
        status.is_open()
    }
}

impl fmt::Display for ModalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Error returned when text does not name a modal status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid modal status '{input}': expected 'open' or 'closed'")]
pub struct ParseStatusError {
    /// The rejected input, trimmed.
    pub input: String,
}

impl FromStr for ModalStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        match input.to_ascii_lowercase().as_str() {
            "open" | "opened" | "true" | "1" | "on" => Ok(Self::Open),
            "closed" | "close" | "false" | "0" | "off" => Ok(Self::Closed),
            _ => Err(ParseStatusError {
                input: input.to_string(),
            }),
        }
    }
}
