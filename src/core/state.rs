//! Process-wide shutdown state.
//!
//! Ctrl+C never interrupts a pass in flight. The first press marks the
//! run as shutting down so the locale driver stops before the next
//! locale; a second press exits immediately.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Setup the global Ctrl+C handler. Call once at program start
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if SHUTDOWN.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        crate::log!("warning"; "finishing current locale, press Ctrl+C again to abort");
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}
