//! Once-a-second countdown refresh for a mounted card.
//!
//! Each ticker owns one Tokio task. Dropping the ticker (the card leaving
//! the screen) aborts the task, so no timer outlives its card.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::trace;

use crate::countdown::{self, COUNTDOWN_INTERVAL};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Publishes the countdown text of one expiry every [`COUNTDOWN_INTERVAL`].
///
/// Must be created inside a Tokio runtime.
pub struct CountdownTicker {
    clock: Clock,
    tx: Arc<watch::Sender<String>>,
    rx: watch::Receiver<String>,
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    /// Tick against the system clock.
    pub fn spawn(expiry: Option<String>) -> Self {
        Self::with_clock(expiry, Utc::now)
    }

    /// Tick against a custom wall clock.
    pub fn with_clock<C>(expiry: Option<String>, clock: C) -> Self
    where
        C: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        let clock: Clock = Arc::new(clock);
        let initial = countdown::remaining_text(clock(), expiry.as_deref());
        let (tx, rx) = watch::channel(initial);
        let tx = Arc::new(tx);
        let handle = spawn_loop(expiry, clock.clone(), tx.clone());
        Self {
            clock,
            tx,
            rx,
            handle,
        }
    }

    /// A receiver that sees every refresh.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }

    /// The text published last.
    pub fn current(&self) -> String {
        self.rx.borrow().clone()
    }

    /// Restart against a new expiry; the old timer is cancelled first.
    pub fn set_expiry(&mut self, expiry: Option<String>) {
        self.handle.abort();
        self.tx
            .send_replace(countdown::remaining_text((self.clock)(), expiry.as_deref()));
        self.handle = spawn_loop(expiry, self.clock.clone(), self.tx.clone());
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn spawn_loop(
    expiry: Option<String>,
    clock: Clock,
    tx: Arc<watch::Sender<String>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(COUNTDOWN_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; the initial text is already published.
        interval.tick().await;
        loop {
            interval.tick().await;
            let text = countdown::remaining_text(clock(), expiry.as_deref());
            trace!(%text, "countdown tick");
            tx.send_replace(text);
        }
    })
}
