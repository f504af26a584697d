//! Single-shot deferred message used for the player overlay auto-hide.
//!
//! Arming replaces (aborts) whatever was pending, so at most one expiry is
//! ever outstanding.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct OverlayTimer {
    hide_after: Duration,
    pending: Option<JoinHandle<()>>,
}

impl OverlayTimer {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            hide_after,
            pending: None,
        }
    }

    /// Deliver `message` on `tx` after the hide delay, cancelling any earlier one.
    pub fn arm<M: Send + 'static>(&mut self, tx: mpsc::Sender<M>, message: M) {
        self.cancel();
        let delay = self.hide_after;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(message).await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for OverlayTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rearm_replaces_pending() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = OverlayTimer::new(Duration::from_millis(30));
        timer.arm(tx.clone(), 1u64);
        timer.arm(tx.clone(), 2u64);

        let got = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await.unwrap();
        assert_eq!(got, Some(2));
        let extra = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(extra.is_err());
    }

    #[tokio::test]
    async fn test_cancel() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = OverlayTimer::new(Duration::from_millis(20));
        timer.arm(tx, 7u64);
        timer.cancel();
        let got = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
        // Sender was moved into the aborted task, so the channel closes.
        assert!(matches!(got, Err(_) | Ok(None)));
    }
}
