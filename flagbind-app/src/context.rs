//! Invocation context handed to every handler.

use std::sync::Arc;

use tokio::sync::watch;

/// Data shared by one process invocation.
///
/// Cloning is cheap; all clones observe the same cancellation.
#[derive(Debug, Clone)]
pub struct Context {
    app_path: Arc<str>,
    cancel: watch::Receiver<bool>,
}

impl Context {
    pub(crate) fn new(app_path: impl Into<Arc<str>>, cancel: watch::Receiver<bool>) -> Self {
        Self {
            app_path: app_path.into(),
            cancel,
        }
    }

    /// Path of the running program, as given in `argv[0]`.
    pub fn app_path(&self) -> &str {
        &self.app_path
    }

    /// Whether an interrupt has cancelled this invocation.
    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Resolve once the invocation is cancelled.
    ///
    /// Also resolves when the dispatcher has finished, since no
    /// cancellation can follow.
    pub async fn cancelled(&self) {
        let mut cancel = self.cancel.clone();
        let _ = cancel.wait_for(|cancelled| *cancelled).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn cancellation_reaches_clones() {
        let (tx, rx) = watch::channel(false);
        let ctx = Context::new("/usr/bin/tool", rx);
        let clone = ctx.clone();

        assert_eq!(clone.app_path(), "/usr/bin/tool");
        assert!(!clone.is_cancelled());

        let waiter = tokio::spawn(async move { clone.cancelled().await });
        tx.send_replace(true);

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("cancellation not observed")
            .unwrap();
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_resolves_when_dispatcher_is_gone() {
        let (tx, rx) = watch::channel(false);
        let ctx = Context::new("tool", rx);
        drop(tx);

        tokio::time::timeout(Duration::from_secs(1), ctx.cancelled())
            .await
            .expect("cancelled() did not resolve");
        assert!(!ctx.is_cancelled());
    }
}
