use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use log::trace;

use crate::wakeup::{WakeupHandle, WakeupSender};

/// Unique identifier for a [`State`] cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(usize);

impl StateId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__state_{}", self.0)
    }
}

/// A queued change, applied at the next commit.
enum Update<T> {
    /// Replace the value outright.
    Replace(T),
    /// Derive the next value from the value current at commit time.
    Apply(Box<dyn FnOnce(&T) -> T + Send>),
}

impl<T> Update<T> {
    fn apply(self, current: &T) -> T {
        match self {
            Update::Replace(value) => value,
            Update::Apply(f) => f(current),
        }
    }
}

/// Storage shared by every handle to one cell.
struct Shared<T> {
    /// Committed value. Reads clone the `Arc` and release the lock before
    /// touching the value, so user code never runs under this lock.
    value: RwLock<Arc<T>>,
    queue: Mutex<VecDeque<Update<T>>>,
    /// Serializes commits so each batch folds over the previous one.
    commit: Mutex<()>,
    dirty: AtomicBool,
    wakeup: WakeupHandle,
}

/// Reactive state cell with batched updates.
///
/// Writes never touch the value directly. `set` and `update` queue a change
/// and wake the owning scheduler, which applies every queued change in order
/// on its next tick. Reads always see the last committed value, so handlers
/// that run within one tick observe a consistent snapshot.
///
/// Because `update` closures are evaluated at commit time against the value
/// produced by all earlier queued changes, `update(|v| !v)` issued twice in
/// one tick flips twice. `set(!get())` issued twice does not: both calls
/// read the same committed value.
///
/// Cloning is cheap and yields another handle to the same cell.
///
/// # Example
///
/// ```
/// use modal_state::State;
///
/// let count = State::new(0);
/// count.update(|v| v + 1);
/// count.update(|v| v + 1);
/// assert_eq!(count.get(), 0);
///
/// count.commit();
/// assert_eq!(count.get(), 2);
/// ```
pub struct State<T> {
    id: StateId,
    shared: Arc<Shared<T>>,
}

impl<T> State<T> {
    /// Create a new state with the given value
    pub fn new(value: T) -> Self {
        Self {
            id: StateId::new(),
            shared: Arc::new(Shared {
                value: RwLock::new(Arc::new(value)),
                queue: Mutex::new(VecDeque::new()),
                commit: Mutex::new(()),
                dirty: AtomicBool::new(false),
                wakeup: WakeupHandle::new(),
            }),
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Get a clone of the committed value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        T::clone(&self.snapshot())
    }

    /// Borrow the committed value
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.snapshot();
        f(value.as_ref())
    }

    fn snapshot(&self) -> Arc<T> {
        let guard = self
            .shared
            .value
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Number of updates waiting for the next commit
    pub fn pending(&self) -> usize {
        self.shared
            .queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Queue a replacement value
    pub fn set(&self, value: T) {
        self.enqueue(Update::Replace(value));
    }

    /// Queue an update computed from the value current at commit time.
    ///
    /// The closure runs without any lock on this cell held, so it may read
    /// the cell or queue further updates; those land in the next batch. It
    /// must not call [`State::commit`] on the same cell.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T + Send + 'static,
    {
        self.enqueue(Update::Apply(Box::new(f)));
    }

    fn enqueue(&self, update: Update<T>) {
        self.shared
            .queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(update);
        trace!("{}: update queued", self.id);
        self.shared.wakeup.send();
    }

    /// Apply every queued update in order.
    ///
    /// Returns `true` if at least one update was applied. The dirty flag is
    /// raised whenever an update was applied, even if the resulting value
    /// equals the previous one.
    pub fn commit(&self) -> bool {
        let _commit = self
            .shared
            .commit
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let batch: Vec<Update<T>> = self
            .shared
            .queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .drain(..)
            .collect();
        if batch.is_empty() {
            return false;
        }

        let applied = batch.len();
        let mut current = self.snapshot();
        for update in batch {
            current = Arc::new(update.apply(&current));
        }
        *self
            .shared
            .value
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = current;

        self.shared.dirty.store(true, Ordering::SeqCst);
        trace!("{}: committed {} update(s)", self.id, applied);
        true
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the state has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.shared.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.shared.dirty.store(false, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Scheduler wiring
    // -------------------------------------------------------------------------

    /// Install the sender used to wake the owning scheduler, returning the
    /// sender it replaced.
    pub fn install_wakeup(&self, sender: WakeupSender) -> Option<WakeupSender> {
        self.shared.wakeup.install(sender)
    }

    /// A handle that does not keep the cell alive.
    pub(crate) fn downgrade(&self) -> WeakState<T> {
        WeakState {
            id: self.id,
            shared: Arc::downgrade(&self.shared),
        }
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Non-owning handle held by a scheduler.
pub(crate) struct WeakState<T> {
    id: StateId,
    shared: Weak<Shared<T>>,
}

impl<T> WeakState<T> {
    pub(crate) fn id(&self) -> StateId {
        self.id
    }

    pub(crate) fn upgrade(&self) -> Option<State<T>> {
        self.shared.upgrade().map(|shared| State {
            id: self.id,
            shared,
        })
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with(|value| {
            f.debug_struct("State")
                .field("id", &self.id)
                .field("value", value)
                .field("pending", &self.pending())
                .field("dirty", &self.is_dirty())
                .finish()
        })
    }
}
