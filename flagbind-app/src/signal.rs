//! Interrupt handling.

use std::future::Future;
use std::sync::Mutex;

use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Future that resolves on the first SIGINT or SIGTERM.
///
/// The process-wide handler can only be installed once; if installing it
/// fails the returned future never resolves.
pub fn shutdown_signal() -> impl Future<Output = ()> {
    let (tx, rx) = oneshot::channel::<()>();
    let tx = Mutex::new(Some(tx));

    let installed = ctrlc::set_handler(move || {
        if let Some(tx) = tx.lock().ok().and_then(|mut slot| slot.take()) {
            let _ = tx.send(());
        }
    });

    async move {
        match installed {
            Ok(()) => {
                if rx.await.is_ok() {
                    debug!("received interrupt signal");
                    return;
                }
            }
            Err(e) => warn!("failed to install signal handler: {}", e),
        }
        std::future::pending::<()>().await
    }
}
