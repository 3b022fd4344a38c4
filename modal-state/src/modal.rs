//! Open/close/toggle state for modal surfaces.
//!
//! [`ModalState`] owns a single boolean and exposes the transitions a dialog,
//! drawer or popover needs. Transitions go through a batched [`State`], so a
//! burst of calls between two renders is applied in order at the next tick.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::config::ModalConfig;
use crate::state::State;
use crate::status::ModalStatus;

/// Zero-argument callback bound to a modal.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Toggleable visibility state for a modal.
///
/// Reads return the last committed value. `on_open`, `on_close` and
/// `on_toggle` are queued and take effect when the owning scheduler ticks
/// (or when [`ModalState::commit`] is called directly).
///
/// # Example
///
/// ```
/// use modal_state::ModalState;
///
/// let modal = ModalState::default();
/// modal.on_toggle();
/// modal.on_toggle();
/// modal.on_toggle();
/// modal.commit();
/// assert!(modal.is_open());
/// ```
#[derive(Clone, Debug)]
pub struct ModalState {
    name: &'static str,
    open: State<bool>,
}

impl ModalState {
    /// Create a modal state starting open or closed.
    pub fn new(initial: bool) -> Self {
        Self::with_config(ModalConfig::default().initial(initial))
    }

    pub fn with_config(config: ModalConfig) -> Self {
        debug!("{}: created {}", config.name, config.initial);
        Self {
            name: config.name,
            open: State::new(config.initial.is_open()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the modal is open as of the last commit.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn status(&self) -> ModalStatus {
        self.is_open().into()
    }

    /// Open the modal. Opening an open modal is a no-op apart from the
    /// redraw it requests.
    pub fn on_open(&self) {
        debug!("{}: open requested", self.name);
        self.open.set(true);
    }

    /// Close the modal. Closing a closed modal is a no-op apart from the
    /// redraw it requests.
    pub fn on_close(&self) {
        debug!("{}: close requested", self.name);
        self.open.set(false);
    }

    /// Flip the modal.
    ///
    /// The flip is evaluated at commit time against the value left by every
    /// earlier queued transition, never against the value visible now.
    pub fn on_toggle(&self) {
        debug!("{}: toggle requested", self.name);
        self.open.update(|open| !open);
    }

    /// Apply queued transitions immediately.
    ///
    /// Only needed when no scheduler owns this modal.
    pub fn commit(&self) -> bool {
        self.open.commit()
    }

    /// The underlying cell, for attaching to a scheduler.
    pub fn state(&self) -> &State<bool> {
        &self.open
    }

    /// Snapshot the modal for one render pass.
    pub fn controls(&self) -> ModalControls {
        let open = self.clone();
        let close = self.clone();
        let toggle = self.clone();
        ModalControls {
            is_open: self.is_open(),
            on_open: Arc::new(move || open.on_open()),
            on_close: Arc::new(move || close.on_close()),
            on_toggle: Arc::new(move || toggle.on_toggle()),
        }
    }
}

impl Default for ModalState {
    fn default() -> Self {
        Self::new(false)
    }
}

/// What a render pass gets from a [`ModalState`]: the visibility at render
/// time plus callbacks to hand to buttons and key bindings.
///
/// `is_open` is fixed when the controls are taken. The callbacks stay bound
/// to the live modal, so calling them from an old snapshot is still correct.
#[derive(Clone)]
pub struct ModalControls {
    pub is_open: bool,
    pub on_open: Callback,
    pub on_close: Callback,
    pub on_toggle: Callback,
}

impl fmt::Debug for ModalControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalControls")
            .field("is_open", &self.is_open)
            .finish_non_exhaustive()
    }
}

