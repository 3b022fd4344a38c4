use modal_state::State;
use modal_state::wakeup::{WakeupHandle, channel};

#[tokio::test]
async fn test_send_and_recv() {
    let (tx, mut rx) = channel();
    tx.send();
    assert_eq!(rx.recv().await, Some(()));
}

#[tokio::test]
async fn test_recv_none_after_senders_dropped() {
    let (tx, mut rx) = channel();
    drop(tx);
    assert_eq!(rx.recv().await, None);
}

#[test]
fn test_drain_collapses_signals() {
    let (tx, mut rx) = channel();
    for _ in 0..3 {
        tx.send();
    }
    assert_eq!(rx.drain(), 3);
    assert_eq!(rx.drain(), 0);
}

#[test]
fn test_full_channel_drops_signals() {
    let (tx, mut rx) = channel();
    for _ in 0..100 {
        tx.send();
    }
    assert_eq!(rx.drain(), 16);
}

#[test]
fn test_handle_without_sender_is_noop() {
    let handle = WakeupHandle::new();
    assert!(!handle.is_installed());
    handle.send();
}

#[test]
fn test_handle_forwards_after_install() {
    let (tx, mut rx) = channel();
    let handle = WakeupHandle::new();
    assert!(handle.install(tx).is_none());
    assert!(handle.is_installed());
    handle.send();
    assert_eq!(rx.drain(), 1);
}

#[test]
fn test_install_returns_replaced_sender() {
    let (first, mut first_rx) = channel();
    let (second, mut second_rx) = channel();
    let handle = WakeupHandle::new();
    handle.install(first.clone());

    let previous = handle.install(second.clone()).unwrap();
    assert!(previous.same_channel(&first));
    assert!(!previous.same_channel(&second));

    handle.send();
    assert_eq!(first_rx.drain(), 0);
    assert_eq!(second_rx.drain(), 1);
}

#[test]
fn test_state_sends_wakeup_per_update() {
    let (tx, mut rx) = channel();
    let state = State::new(false);
    state.install_wakeup(tx);

    state.set(true);
    state.update(|v| !v);
    assert_eq!(rx.drain(), 2);

    // Committing does not wake anyone.
    state.commit();
    assert_eq!(rx.drain(), 0);
}

#[tokio::test]
async fn test_channel_closes_with_last_state_handle() {
    let (tx, mut rx) = channel();
    let state = State::new(0);
    state.install_wakeup(tx);
    let other = state.clone();

    drop(state);
    other.set(1);
    assert_eq!(rx.recv().await, Some(()));

    drop(other);
    assert_eq!(rx.recv().await, None);
}
