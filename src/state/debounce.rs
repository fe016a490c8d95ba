//! Trailing-edge debounce.
//!
//! DESIGN
//! ======
//! [`Debouncer`] is the deterministic core: callers pass the current instant
//! and it reports when the last value has been quiet for the window.
//! [`spawn_debouncer`] drives the same core from a tokio task, rescheduling
//! its single timer on every update so only the last timer fires.
//!
//! Closing the input flushes a pending value immediately rather than losing
//! the last keystroke.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

const OUTPUT_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace any pending value and restart the window at `now`.
    pub fn push_at(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// When the pending value becomes due, if there is one.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.window)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Emit the pending value once the window has elapsed since the last push.
    pub fn poll_at(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.take(),
            _ => None,
        }
    }

    /// Emit the pending value regardless of the window.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

/// Input side of a spawned debouncer.
#[derive(Debug, Clone)]
pub struct DebounceInput<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> DebounceInput<T> {
    /// Returns `false` once the debounce task has stopped.
    pub fn push(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

/// Spawn a task that forwards the last value pushed after `window` of quiet.
///
/// The task ends when every [`DebounceInput`] is dropped or the receiver is
/// closed.
pub fn spawn_debouncer<T: Send + 'static>(window: Duration) -> (DebounceInput<T>, mpsc::Receiver<T>, JoinHandle<()>) {
    let (in_tx, mut in_rx) = mpsc::unbounded_channel::<T>();
    let (out_tx, out_rx) = mpsc::channel::<T>(OUTPUT_CAPACITY);

    let handle = tokio::spawn(async move {
        let mut core = Debouncer::new(window);
        loop {
            let received = match core.deadline() {
                Some(deadline) => tokio::select! {
                    maybe_value = in_rx.recv() => maybe_value,
                    () = tokio::time::sleep_until(deadline) => {
                        if let Some(value) = core.poll_at(Instant::now()) {
                            if out_tx.send(value).await.is_err() {
                                break;
                            }
                        }
                        continue;
                    }
                    () = out_tx.closed() => break,
                },
                None => tokio::select! {
                    maybe_value = in_rx.recv() => maybe_value,
                    () = out_tx.closed() => break,
                },
            };

            if let Some(value) = received {
                core.push_at(value, Instant::now());
            } else {
                if let Some(value) = core.take() {
                    let _ = out_tx.send(value).await;
                }
                debug!("debounce input closed");
                break;
            }
        }
    });

    (DebounceInput { tx: in_tx }, out_rx, handle)
}

#[cfg(test)]
#[path = "debounce_test.rs"]
mod tests;
