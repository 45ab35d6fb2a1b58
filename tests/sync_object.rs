/*!
 * Sync Object Integration Tests
 *
 * Wake delivery, broadcast stickiness, single-consumption and shutdown
 * semantics across threads.
 */

use ringflow::SyncObject;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_signal_releases_blocked_waiter() {
    let sync = Arc::new(SyncObject::new(false));
    let sync_clone = sync.clone();

    let handle = thread::spawn(move || {
        let start = Instant::now();
        sync_clone.wait();
        start.elapsed()
    });

    thread::sleep(Duration::from_millis(50));
    sync.signal();

    let elapsed = handle.join().unwrap();
    assert!(elapsed < Duration::from_secs(1));
}

#[test]
fn test_broadcast_releases_all_waiters() {
    let sync = Arc::new(SyncObject::new(false));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let sync_clone = sync.clone();
            thread::spawn(move || sync_clone.wait())
        })
        .collect();

    thread::sleep(Duration::from_millis(100));
    sync.broadcast();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_shutdown_releases_waiters_and_is_terminal() {
    let sync = Arc::new(SyncObject::new(false));
    let sync_clone = sync.clone();

    let handle = thread::spawn(move || sync_clone.wait());

    thread::sleep(Duration::from_millis(50));
    sync.shutdown();
    handle.join().unwrap();

    // After shutdown no waiter ever blocks again
    for _ in 0..3 {
        let start = Instant::now();
        sync.wait();
        assert!(start.elapsed() < Duration::from_millis(100));
    }
    assert!(sync.is_stopped());
}

#[test]
fn test_broadcast_is_sticky_for_late_waiters() {
    let sync = SyncObject::new(false);
    sync.broadcast();

    // A late-arriving waiter observes the signaled state immediately
    for _ in 0..3 {
        let start = Instant::now();
        sync.wait();
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}

#[test]
fn test_signal_is_single_consumption() {
    let sync = SyncObject::new(false);
    sync.signal();

    // First waiter consumes the signal without blocking
    let start = Instant::now();
    sync.wait();
    assert!(start.elapsed() < Duration::from_millis(100));

    // The next waiter blocks again until the timeout
    let start = Instant::now();
    sync.wait_timed(Duration::from_millis(100));
    assert!(start.elapsed() >= Duration::from_millis(100));
}

#[test]
fn test_wait_timed_returns_after_timeout_without_signal() {
    let sync = SyncObject::new(false);

    let start = Instant::now();
    sync.wait_timed(Duration::from_millis(50));
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(50));
    assert!(elapsed < Duration::from_secs(2));
}

#[test]
fn test_wait_timed_wakes_early_on_signal() {
    let sync = Arc::new(SyncObject::new(false));
    let sync_clone = sync.clone();

    let handle = thread::spawn(move || {
        let start = Instant::now();
        sync_clone.wait_timed(Duration::from_secs(5));
        start.elapsed()
    });

    thread::sleep(Duration::from_millis(50));
    sync.signal();

    let elapsed = handle.join().unwrap();
    assert!(elapsed < Duration::from_secs(5));
}

#[test]
fn test_start_gate_pattern() {
    // Workers block on a gate, the driver broadcasts once, everyone proceeds
    let gate = Arc::new(SyncObject::new(false));
    let released = Arc::new(AtomicBool::new(false));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let gate = gate.clone();
            let released = released.clone();
            thread::spawn(move || {
                gate.wait();
                assert!(released.load(Ordering::Acquire), "gate opened too early");
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(100));
    released.store(true, Ordering::Release);
    gate.broadcast();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_initial_signaled_state_is_consumed_once() {
    let sync = SyncObject::new(true);

    let start = Instant::now();
    sync.wait();
    assert!(start.elapsed() < Duration::from_millis(100));

    // The initial state is not a broadcast, so it is consumed
    let start = Instant::now();
    sync.wait_timed(Duration::from_millis(100));
    assert!(start.elapsed() >= Duration::from_millis(100));
}
