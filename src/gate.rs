//! Start gate with a short loading transition.
//!
//! The delay runs as a spawned tokio task that reports back over a channel.
//! The gate owns the task: cancelling, resetting or dropping the gate aborts
//! it, and every signal carries a ticket so a late delivery from an earlier
//! start can never flip a newer gate to ready.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Default length of the loading transition.
pub const DEFAULT_LOADING_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    Idle,
    Loading,
    Ready,
}

#[derive(Debug)]
pub struct StartGate {
    phase: GatePhase,
    delay: Duration,
    ticket: u64,
    pending: Option<JoinHandle<()>>,
    signal_tx: mpsc::UnboundedSender<u64>,
    signal_rx: mpsc::UnboundedReceiver<u64>,
}

impl StartGate {
    pub fn new(delay: Duration) -> Self {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        Self {
            phase: GatePhase::Idle,
            delay,
            ticket: 0,
            pending: None,
            signal_tx,
            signal_rx,
        }
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Begin loading. Ignored unless the gate is idle.
    ///
    /// Outside a tokio runtime there is nothing to schedule the delay on,
    /// so the gate opens immediately.
    pub fn start(&mut self) {
        if self.phase != GatePhase::Idle {
            debug!(phase = ?self.phase, "start ignored");
            return;
        }

        let Ok(handle) = Handle::try_current() else {
            warn!("no async runtime available, skipping loading delay");
            self.phase = GatePhase::Ready;
            return;
        };

        self.ticket += 1;
        self.phase = GatePhase::Loading;

        let ticket = self.ticket;
        let delay = self.delay;
        let signal_tx = self.signal_tx.clone();
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = signal_tx.send(ticket);
        }));
        debug!(ticket, delay_ms = delay.as_millis() as u64, "loading started");
    }

    /// Apply any delivered timer signals and return the resulting phase.
    pub fn poll(&mut self) -> GatePhase {
        while let Ok(ticket) = self.signal_rx.try_recv() {
            if self.phase == GatePhase::Loading && ticket == self.ticket {
                self.phase = GatePhase::Ready;
                self.pending = None;
                debug!(ticket, "gate ready");
            } else {
                debug!(ticket, current = self.ticket, "stale gate signal discarded");
            }
        }
        self.phase
    }

    /// Abort a pending load and return to idle. Returns whether anything was cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.phase != GatePhase::Loading {
            return false;
        }
        self.abort_pending();
        self.phase = GatePhase::Idle;
        debug!(ticket = self.ticket, "loading cancelled");
        true
    }

    /// Return to idle from any phase.
    pub fn reset(&mut self) {
        self.abort_pending();
        self.phase = GatePhase::Idle;
    }

    fn abort_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
        // Invalidate anything already sitting in the channel.
        self.ticket += 1;
    }
}

impl Default for StartGate {
    fn default() -> Self {
        Self::new(DEFAULT_LOADING_DELAY)
    }
}

impl Drop for StartGate {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}
