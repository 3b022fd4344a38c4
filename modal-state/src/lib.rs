//! Toggleable open/closed state for modal UI surfaces.
//!
//! [`ModalState`] is the component-facing type. It sits on a batched
//! [`State`] cell which a [`Scheduler`] commits once per tick before
//! re-rendering.

pub mod config;
pub mod modal;
pub mod scheduler;
pub mod state;
pub mod status;
pub mod wakeup;

pub use config::ModalConfig;
pub use modal::{Callback, ModalControls, ModalState};
pub use scheduler::{Flow, Scheduler};
pub use state::{State, StateId};
pub use status::{ModalStatus, ParseStatusError};

pub mod prelude {
    pub use crate::config::ModalConfig;
    pub use crate::modal::{Callback, ModalControls, ModalState};
    pub use crate::scheduler::{Flow, Scheduler};
    pub use crate::state::State;
    pub use crate::status::ModalStatus;
}
