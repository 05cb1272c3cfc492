//! Ctrl-C handling.

use log::{info, warn};
use tokio_util::sync::CancellationToken;

/// Returns a token that is cancelled on the first Ctrl-C.
///
/// Batch runs stop before their next URL; the server drains and exits.
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received, finishing current work before stopping");
                token.cancel();
            }
            Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
        }
    });
    cancel
}
