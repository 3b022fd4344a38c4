//! Render/update cycle for state cells.
//!
//! The scheduler owns the receiving end of the wakeup channel. Attached cells
//! send a wakeup whenever an update is queued; the scheduler collapses the
//! buffered wakeups, commits every cell once and re-renders if anything
//! changed.

use log::{debug, info, trace, warn};

use crate::state::{State, StateId, WeakState};
use crate::wakeup::{self, WakeupReceiver, WakeupSender};

/// Returned by the render callback to keep the loop going or stop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Type-erased, non-owning view of an attached cell.
trait Tracked: Send + Sync {
    fn id(&self) -> StateId;
    fn is_alive(&self) -> bool;
    fn commit(&self) -> bool;
    fn clear_dirty(&self);
    fn install_wakeup(&self, sender: WakeupSender);
}

impl<T: Send + Sync + 'static> Tracked for WeakState<T> {
    fn id(&self) -> StateId {
        WeakState::id(self)
    }

    fn is_alive(&self) -> bool {
        self.upgrade().is_some()
    }

    fn commit(&self) -> bool {
        self.upgrade().is_some_and(|state| state.commit())
    }

    fn clear_dirty(&self) {
        if let Some(state) = self.upgrade() {
            state.clear_dirty();
        }
    }

    fn install_wakeup(&self, sender: WakeupSender) {
        if let Some(state) = self.upgrade() {
            state.install_wakeup(sender);
        }
    }
}

/// Batches queued updates into ticks and drives re-rendering.
///
/// The scheduler does not keep its cells alive. A cell dropped by its owner
/// is forgotten at the next tick, and once every attached cell is gone a
/// running loop ends on its own.
pub struct Scheduler {
    cells: Vec<Box<dyn Tracked>>,
    /// Handed out by `attach`; given up when the loop starts so the channel
    /// can close.
    wakeup_tx: Option<WakeupSender>,
    wakeup_rx: WakeupReceiver,
    ticks: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        let (wakeup_tx, wakeup_rx) = wakeup::channel();
        Self {
            cells: Vec::new(),
            wakeup_tx: Some(wakeup_tx),
            wakeup_rx,
            ticks: 0,
        }
    }

    /// Take ownership of committing `state`.
    ///
    /// Updates queued on any handle to the cell from now on wake this
    /// scheduler. A cell belongs to one scheduler at a time: attaching it
    /// elsewhere redirects its wakeups there, and this scheduler would only
    /// pick up its updates as a side effect of other wakeups. Attaching the
    /// same cell twice is a no-op.
    pub fn attach<T>(&mut self, state: &State<T>)
    where
        T: Send + Sync + 'static,
    {
        if self.cells.iter().any(|cell| cell.id() == state.id()) {
            return;
        }
        let sender = self.sender();
        if let Some(previous) = state.install_wakeup(sender.clone())
            && !previous.same_channel(&sender)
        {
            warn!(
                "scheduler: {} was attached to another scheduler, which will no longer be woken for it",
                state.id()
            );
        }
        debug!("scheduler: attached {}", state.id());
        self.cells.push(Box::new(state.downgrade()));
    }

    /// The sender for new cells, opening a fresh channel if a previous run
    /// already gave ours up.
    fn sender(&mut self) -> WakeupSender {
        if let Some(tx) = &self.wakeup_tx {
            return tx.clone();
        }
        let (tx, rx) = wakeup::channel();
        self.wakeup_rx = rx;
        for cell in &self.cells {
            cell.install_wakeup(tx.clone());
        }
        self.wakeup_tx = Some(tx.clone());
        tx
    }

    /// Number of attached cells that are still alive.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of ticks that applied at least one update.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Commit every attached cell.
    ///
    /// Returns `true` if any cell applied an update.
    pub fn tick(&mut self) -> bool {
        self.cells.retain(|cell| {
            let alive = cell.is_alive();
            if !alive {
                debug!("scheduler: {} dropped", cell.id());
            }
            alive
        });

        let mut changed = false;
        for cell in &self.cells {
            if cell.commit() {
                trace!("scheduler: {} changed", cell.id());
                changed = true;
            }
        }
        if changed {
            self.ticks += 1;
        }
        changed
    }

    fn clear_dirty(&self) {
        for cell in &self.cells {
            cell.clear_dirty();
        }
    }

    /// Run the render loop.
    ///
    /// Renders once up front, then sleeps until a cell queues an update.
    /// Each wakeup commits all pending updates in one tick and renders again
    /// if anything changed. During `render`, [`State::is_dirty`] tells which
    /// cells changed in that tick; the flags are cleared afterwards.
    ///
    /// Stops when `render` returns [`Flow::Exit`] or an error, or when the
    /// wakeup channel closes because every attached cell has been dropped.
    pub async fn run<F, E>(&mut self, mut render: F) -> Result<(), E>
    where
        F: FnMut() -> Result<Flow, E>,
    {
        // From here on only the cells hold senders.
        self.wakeup_tx = None;
        info!("scheduler: starting with {} cell(s)", self.len());

        self.tick();
        let flow = render();
        self.clear_dirty();
        if flow? == Flow::Exit {
            info!("scheduler: exit requested");
            return Ok(());
        }

        loop {
            if self.wakeup_rx.recv().await.is_none() {
                debug!("scheduler: wakeup channel closed");
                return Ok(());
            }
            let collapsed = self.wakeup_rx.drain();
            trace!("scheduler: wakeup ({} collapsed)", collapsed);

            if !self.tick() {
                continue;
            }
            let flow = render();
            self.clear_dirty();
            if flow? == Flow::Exit {
                info!("scheduler: exit requested after {} tick(s)", self.ticks);
                return Ok(());
            }
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
