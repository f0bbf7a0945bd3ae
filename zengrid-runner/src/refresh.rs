//! Cancellable auto-refresh timer.
//!
//! The dashboard's auto-refresh is a timer thread with an explicit stop
//! signal, not a sleep on the render thread. The callback runs on the
//! timer thread; callers hand it something cheap, typically a channel
//! send that wakes the worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Polling granularity for the stop flag.
const STOP_POLL: Duration = Duration::from_millis(50);

/// A repeating timer that can be stopped promptly.
pub struct RefreshTimer {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTimer {
    /// Start ticking. `on_tick` fires once per interval until `stop` is
    /// called or the timer is dropped.
    pub fn start(interval: Duration, on_tick: impl Fn() + Send + 'static) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();

        let handle = thread::Builder::new()
            .name("zengrid-refresh".into())
            .spawn(move || {
                let mut deadline = Instant::now() + interval;
                loop {
                    if flag.load(Ordering::Relaxed) {
                        break;
                    }
                    if Instant::now() >= deadline {
                        on_tick();
                        deadline = Instant::now() + interval;
                    }
                    thread::sleep(STOP_POLL.min(interval));
                }
            })
            .expect("failed to spawn refresh timer thread");

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Signal the timer to stop and wait for the thread to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn fires_then_stops() {
        let (tx, rx) = mpsc::channel();
        let mut timer = RefreshTimer::start(Duration::from_millis(20), move || {
            let _ = tx.send(());
        });

        // At least one tick lands within a generous deadline.
        rx.recv_timeout(Duration::from_secs(2))
            .expect("timer should tick");

        timer.stop();
        // Drain anything in flight, then confirm silence.
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut timer = RefreshTimer::start(Duration::from_secs(3600), || {});
        timer.stop();
        timer.stop();
    }

    #[test]
    fn drop_stops_the_thread() {
        let (tx, rx) = mpsc::channel();
        {
            let _timer = RefreshTimer::start(Duration::from_millis(10), move || {
                let _ = tx.send(());
            });
            let _ = rx.recv_timeout(Duration::from_secs(2));
        }
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }
}
