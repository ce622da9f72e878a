//! Cooperative pause gate.
//!
//! Built on a tokio watch channel: the controlling side flips a flag,
//! the processing side awaits it between units. Watch semantics make a
//! resume issued before the pause was ever observed a clean no-op, so
//! rapid pause/resume sequences cannot lose a wakeup.

use tokio::sync::watch;

/// Controlling side of the pause gate.
#[derive(Debug)]
pub struct PauseGate {
    tx: watch::Sender<bool>,
}

/// Processing side of the pause gate.
#[derive(Debug)]
pub struct PauseWatch {
    rx: watch::Receiver<bool>,
}

/// Create a connected gate pair, initially unpaused.
pub fn pause_pair() -> (PauseGate, PauseWatch) {
    let (tx, rx) = watch::channel(false);
    (PauseGate { tx }, PauseWatch { rx })
}

impl PauseGate {
    pub fn pause(&self) {
        let _ = self.tx.send(true);
    }

    pub fn resume(&self) {
        let _ = self.tx.send(false);
    }

    pub fn is_paused(&self) -> bool {
        *self.tx.borrow()
    }
}

impl PauseWatch {
    /// Wait until the gate is open.
    ///
    /// Returns immediately when unpaused. If the gate side is dropped
    /// while paused, the wait ends rather than hanging forever.
    pub async fn wait_if_paused(&mut self) {
        while *self.rx.borrow_and_update() {
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}
