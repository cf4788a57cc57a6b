// src/channel/bounded.rs
// =============================================================================
// A fixed-capacity, blocking, multi-producer multi-consumer FIFO channel.
//
// How it works:
// 1. All items live in one VecDeque guarded by a Mutex
// 2. Senders wait on `not_full` while the queue holds `capacity` items
// 3. Receivers wait on `not_empty` while the queue is empty and still open
// 4. Dropping the last Sender (or calling close()) closes the channel:
//    receivers drain whatever is left and then get `None`
// 5. Dropping the last Receiver disconnects the channel: senders get their
//    item back in a SendError instead of blocking forever
//
// Rust concepts:
// - Mutex + Condvar: The classic "monitor" for blocking handoff
// - Arc: Shared ownership of the queue between all handles
// - Drop: Closing happens automatically when handles go out of scope
// =============================================================================

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use thiserror::Error;
use tracing::warn;

/// Returned by [`Sender::send`] when the channel is closed or every
/// [`Receiver`] has been dropped. The rejected item is handed back.
#[derive(Error, PartialEq, Eq)]
#[error("sending on a closed channel")]
pub struct SendError<T>(pub T);

// Written by hand so `SendError<T>` is Debug for any T (URLs or otherwise)
impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SendError { .. }")
    }
}

// State shared by every Sender and Receiver clone
struct Shared<T> {
    state: Mutex<State<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

struct State<T> {
    queue: VecDeque<T>,
    senders: usize,
    receivers: usize,
    closed: bool,
    // Largest queue length ever observed
    peak: usize,
}

impl<T> Shared<T> {
    // A poisoned lock means another thread panicked while holding it. Every
    // critical section below leaves the queue consistent, so the state is
    // still usable: log it, clear the flag and carry on.
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("work channel lock was poisoned by a panicked thread; recovering");
            self.state.clear_poison();
            poisoned.into_inner()
        })
    }

    fn wait<'a>(
        &self,
        condvar: &Condvar,
        guard: MutexGuard<'a, State<T>>,
    ) -> MutexGuard<'a, State<T>> {
        condvar.wait(guard).unwrap_or_else(|poisoned| {
            warn!("work channel wait was interrupted by a panicked thread; recovering");
            self.state.clear_poison();
            poisoned.into_inner()
        })
    }

    fn close(&self) {
        let mut state = self.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        drop(state);
        // Wake everyone: receivers must see the closure, senders must fail
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    fn len(&self) -> usize {
        self.lock().queue.len()
    }

    fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn peak_len(&self) -> usize {
        self.lock().peak
    }
}

/// Creates a bounded channel holding at most `capacity` items.
///
/// # Panics
///
/// Panics if `capacity` is zero. `CheckConfig::validate` rejects that
/// value before a channel is ever built.
pub fn bounded<T>(capacity: usize) -> (Sender<T>, Receiver<T>) {
    assert!(capacity > 0, "channel capacity must be at least 1");

    let shared = Arc::new(Shared {
        state: Mutex::new(State {
            queue: VecDeque::with_capacity(capacity),
            senders: 1,
            receivers: 1,
            closed: false,
            peak: 0,
        }),
        not_empty: Condvar::new(),
        not_full: Condvar::new(),
        capacity,
    });

    (
        Sender {
            shared: Arc::clone(&shared),
        },
        Receiver { shared },
    )
}

/// The producing half of a [`bounded`] channel.
///
/// Clone it to get more producers. The channel closes when the last clone
/// is dropped.
pub struct Sender<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Sender<T> {
    /// Enqueues `item`, blocking while the channel is full.
    ///
    /// Fails (handing the item back) if the channel has been closed or if
    /// no receiver is left to take it.
    pub fn send(&self, item: T) -> Result<(), SendError<T>> {
        let shared = &self.shared;
        let mut state = shared.lock();

        loop {
            if state.closed || state.receivers == 0 {
                return Err(SendError(item));
            }
            if state.queue.len() < shared.capacity {
                break;
            }
            state = shared.wait(&shared.not_full, state);
        }

        state.queue.push_back(item);
        state.peak = state.peak.max(state.queue.len());
        drop(state);

        shared.not_empty.notify_one();
        Ok(())
    }

    /// Closes the channel for every handle. Items already queued are still
    /// delivered. Calling it more than once is harmless.
    pub fn close(&self) {
        self.shared.close();
    }

    pub fn len(&self) -> usize {
        self.shared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }

    /// The most items the channel has held at once.
    pub fn peak_len(&self) -> usize {
        self.shared.peak_len()
    }
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        self.shared.lock().senders += 1;
        Sender {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Drop for Sender<T> {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.senders -= 1;
        let last = state.senders == 0;
        drop(state);

        if last {
            self.shared.close();
        }
    }
}

/// The consuming half of a [`bounded`] channel.
///
/// Clone it to hand one receiver to each worker; every item is delivered to
/// exactly one of them.
pub struct Receiver<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Receiver<T> {
    /// Dequeues the oldest item, blocking while the channel is empty.
    ///
    /// Returns `None` once the channel is closed and fully drained. That is
    /// the shutdown signal for consumers.
    pub fn recv(&self) -> Option<T> {
        let shared = &self.shared;
        let mut state = shared.lock();

        loop {
            if let Some(item) = state.queue.pop_front() {
                drop(state);
                shared.not_full.notify_one();
                return Some(item);
            }
            if state.closed {
                return None;
            }
            state = shared.wait(&shared.not_empty, state);
        }
    }

    /// Dequeues an item only if one is ready right now.
    pub fn try_recv(&self) -> Option<T> {
        let item = self.shared.lock().queue.pop_front();
        if item.is_some() {
            self.shared.not_full.notify_one();
        }
        item
    }

    pub fn len(&self) -> usize {
        self.shared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }

    /// The most items the channel has held at once.
    pub fn peak_len(&self) -> usize {
        self.shared.peak_len()
    }
}

impl<T> Clone for Receiver<T> {
    fn clone(&self) -> Self {
        self.shared.lock().receivers += 1;
        Receiver {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Drop for Receiver<T> {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.receivers -= 1;
        let last = state.receivers == 0;
        drop(state);

        // Blocked senders would otherwise wait for a consumer that never comes
        if last {
            self.shared.not_full.notify_all();
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Condvar?
//    - A Condvar lets a thread sleep until another thread says "something
//      changed". wait() releases the lock while sleeping and re-takes it
//      before returning.
//    - Wakeups can be spurious, which is why every wait sits in a loop that
//      re-checks the condition.
//
// 2. Why two Condvars?
//    - Senders wait for space (`not_full`), receivers wait for items
//      (`not_empty`). Separate queues of sleepers mean a push never wakes a
//      sender by mistake.
//
// 3. Why close by dropping?
//    - When the producer's Sender goes out of scope the channel closes on its
//      own, even if the producer returned early or panicked.
//    - Consumers see `None` only after every queued item is gone, so closing
//      never loses work.
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{mpsc, Barrier};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_items_come_out_in_order() {
        let (tx, rx) = bounded(4);
        for i in 0..4 {
            tx.send(i).expect("channel open");
        }
        assert_eq!(rx.len(), 4);

        let received: Vec<_> = (0..4).filter_map(|_| rx.recv()).collect();
        assert_eq!(received, vec![0, 1, 2, 3]);
        assert!(rx.is_empty());
    }

    #[test]
    fn test_recv_returns_none_after_last_sender_dropped() {
        let (tx, rx) = bounded(2);
        tx.send("a").expect("channel open");
        drop(tx);

        assert!(rx.is_closed());
        // Queued items survive the close
        assert_eq!(rx.recv(), Some("a"));
        assert_eq!(rx.recv(), None);
        assert_eq!(rx.recv(), None);
    }

    #[test]
    fn test_cloned_sender_keeps_channel_open() {
        let (tx, rx) = bounded::<u8>(1);
        let tx2 = tx.clone();
        drop(tx);
        assert!(!rx.is_closed());
        drop(tx2);
        assert!(rx.is_closed());
    }

    #[test]
    fn test_send_blocks_while_full() {
        let (tx, rx) = bounded(1);
        tx.send(1).expect("channel open");

        let (done_tx, done_rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            tx.send(2).expect("channel open");
            done_tx.send(()).expect("done");
        });

        // The second send cannot finish until something is taken out
        assert!(done_rx.recv_timeout(Duration::from_millis(100)).is_err());
        assert_eq!(rx.recv(), Some(1));
        done_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("blocked send should complete after recv");
        assert_eq!(rx.recv(), Some(2));
        handle.join().expect("sender thread panicked");
    }

    #[test]
    fn test_recv_wakes_on_close() {
        let (tx, rx) = bounded::<String>(2);
        let (ready_tx, ready_rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            ready_tx.send(()).expect("ready");
            done_tx.send(rx.recv().is_none()).expect("done");
        });

        ready_rx.recv_timeout(Duration::from_secs(1)).expect("ready");
        tx.close();

        let closed = done_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("receiver should wake on close");
        assert!(closed);
        handle.join().expect("receiver thread panicked");
    }

    #[test]
    fn test_send_fails_after_close() {
        let (tx, _rx) = bounded(2);
        tx.close();
        tx.close();
        assert_eq!(tx.send(7), Err(SendError(7)));
    }

    #[test]
    fn test_blocked_send_fails_when_receivers_dropped() {
        let (tx, rx) = bounded(1);
        tx.send(1).expect("channel open");

        let (done_tx, done_rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            done_tx.send(tx.send(2)).expect("done");
        });

        assert!(done_rx.recv_timeout(Duration::from_millis(100)).is_err());
        drop(rx);

        let result = done_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("blocked send should give up once receivers are gone");
        assert_eq!(result, Err(SendError(2)));
        handle.join().expect("sender thread panicked");
    }

    #[test]
    fn test_try_recv_does_not_block() {
        let (tx, rx) = bounded(1);
        assert_eq!(rx.try_recv(), None);
        tx.send('x').expect("channel open");
        assert_eq!(rx.try_recv(), Some('x'));
    }

    #[test]
    fn test_each_item_delivered_exactly_once() {
        let total = 500;
        let consumers = 4;
        let (tx, rx) = bounded(8);
        let barrier = Arc::new(Barrier::new(consumers));
        let (seen_tx, seen_rx) = mpsc::channel();

        let mut handles = Vec::new();
        for _ in 0..consumers {
            let rx = rx.clone();
            let barrier = Arc::clone(&barrier);
            let seen_tx = seen_tx.clone();
            handles.push(thread::spawn(move || {
                barrier.wait();
                while let Some(item) = rx.recv() {
                    seen_tx.send(item).expect("seen");
                }
            }));
        }
        drop(rx);
        drop(seen_tx);

        for i in 0..total {
            tx.send(i).expect("channel open");
        }
        drop(tx);

        for handle in handles {
            handle.join().expect("consumer thread panicked");
        }

        let mut seen = HashSet::new();
        for item in seen_rx.iter() {
            assert!(seen.insert(item), "item {item} delivered twice");
        }
        assert_eq!(seen.len(), total);
    }

    #[test]
    fn test_peak_never_exceeds_capacity() {
        let capacity = 3;
        let (tx, rx) = bounded(capacity);

        let producer = thread::spawn(move || {
            for i in 0..50 {
                tx.send(i).expect("channel open");
            }
        });

        // A slow consumer keeps the producer pressed against the bound
        let mut received = 0;
        while rx.recv().is_some() {
            thread::sleep(Duration::from_millis(1));
            received += 1;
        }
        producer.join().expect("producer thread panicked");

        assert_eq!(received, 50);
        assert_eq!(rx.capacity(), capacity);
        assert!(rx.peak_len() <= capacity);
        assert!(rx.peak_len() >= 1);
    }

    #[test]
    #[should_panic(expected = "capacity must be at least 1")]
    fn test_zero_capacity_panics() {
        let _ = bounded::<u8>(0);
    }
}
