//! Wakeup channel for passive rendering.
//!
//! The scheduler blocks while nothing is pending. Whenever a [`State`] queues
//! an update it sends a wakeup through this channel so the scheduler commits
//! the batch and re-renders.
//!
//! Senders live inside the cells themselves, so the channel closes once every
//! attached cell has been dropped and the scheduler has given up its own copy.
//!
//! [`State`]: crate::state::State

use std::sync::Mutex;

use tokio::sync::mpsc;

/// Buffered signals beyond this are dropped; one pending signal is enough
/// to guarantee a render.
const CAPACITY: usize = 16;

/// Sender half of the wakeup channel.
#[derive(Clone, Debug)]
pub struct WakeupSender {
    tx: mpsc::Sender<()>,
}

impl WakeupSender {
    /// Send a wakeup signal.
    ///
    /// Non-blocking. A full channel or a dropped receiver is ignored.
    pub fn send(&self) {
        let _ = self.tx.try_send(());
    }

    /// Whether both senders wake the same receiver.
    pub fn same_channel(&self, other: &WakeupSender) -> bool {
        self.tx.same_channel(&other.tx)
    }
}

/// Receiver half of the wakeup channel.
#[derive(Debug)]
pub struct WakeupReceiver {
    rx: mpsc::Receiver<()>,
}

impl WakeupReceiver {
    /// Wait for a wakeup signal.
    ///
    /// Returns `None` once every sender is gone and the buffer is empty.
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    /// Drain all pending wakeup signals, returning how many were dropped.
    ///
    /// Multiple buffered wakeups collapse into a single render.
    pub fn drain(&mut self) -> usize {
        let mut drained = 0;
        while self.rx.try_recv().is_ok() {
            drained += 1;
        }
        drained
    }
}

/// Create a new wakeup channel pair.
pub fn channel() -> (WakeupSender, WakeupReceiver) {
    let (tx, rx) = mpsc::channel(CAPACITY);
    (WakeupSender { tx }, WakeupReceiver { rx })
}

/// Slot for the sender of the scheduler that owns a cell.
///
/// Embedded in the cell's shared storage rather than shared on its own, so
/// the sender is dropped together with the last handle to the cell.
#[derive(Debug, Default)]
pub struct WakeupHandle {
    slot: Mutex<Option<WakeupSender>>,
}

impl WakeupHandle {
    /// Create a new empty handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a wakeup sender, returning the one it replaced.
    pub fn install(&self, sender: WakeupSender) -> Option<WakeupSender> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(sender)
    }

    /// Whether a sender has been installed.
    pub fn is_installed(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    /// Send a wakeup signal if a sender is installed.
    pub fn send(&self) {
        let guard = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(sender) = guard.as_ref() {
            sender.send();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poison(handle: &WakeupHandle) {
        std::thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = handle.slot.lock();
                    panic!("poison wakeup slot");
                })
                .join();
        });
        assert!(handle.slot.is_poisoned());
    }

    #[test]
    fn test_poisoned_handle_still_sends() {
        let (tx, mut rx) = channel();
        let handle = WakeupHandle::new();
        handle.install(tx);
        poison(&handle);

        assert!(handle.is_installed());
        handle.send();
        assert_eq!(rx.drain(), 1);
    }

    #[test]
    fn test_poisoned_handle_accepts_install() {
        let handle = WakeupHandle::new();
        poison(&handle);

        let (tx, mut rx) = channel();
        assert!(handle.install(tx).is_none());
        handle.send();
        assert_eq!(rx.drain(), 1);
    }
}
