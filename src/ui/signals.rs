use crate::error::{ExtractorError, Result};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Interrupt state shared with the Ctrl+C handler. The extraction loop polls
/// it between copies, so a copy in progress always finishes.
#[derive(Clone, Debug, Default)]
pub struct GracefulShutdown {
    interrupts: Arc<AtomicU8>,
}

impl GracefulShutdown {
    /// Installs the process-wide Ctrl+C handler. The first interrupt asks the
    /// run to stop after the current file; the second exits with status 1.
    pub fn install() -> Result<Self> {
        let shutdown = Self::detached();
        let interrupts = Arc::clone(&shutdown.interrupts);

        ctrlc::set_handler(move || {
            if interrupts.fetch_add(1, Ordering::SeqCst) == 0 {
                eprintln!("\n⏹️  Stopping after the current file... (press Ctrl+C again to force exit)");
            } else {
                eprintln!("\n💀 Force stopping...");
                std::process::exit(1);
            }
        })
        .map_err(|e| ExtractorError::Config {
            message: format!("Failed to set signal handler: {}", e),
        })?;

        Ok(shutdown)
    }

    /// A flag with no signal handler behind it; only `request_shutdown` trips it.
    pub fn detached() -> Self {
        Self {
            interrupts: Arc::new(AtomicU8::new(0)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.interrupts.load(Ordering::SeqCst) == 0
    }

    pub fn check_shutdown(&self) -> Result<()> {
        if self.is_running() {
            Ok(())
        } else {
            Err(ExtractorError::Cancelled)
        }
    }

    pub fn request_shutdown(&self) {
        // saturate at 1 so a programmatic request never counts as a force exit
        let _ = self
            .interrupts
            .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_flag_starts_running() {
        let shutdown = GracefulShutdown::detached();
        assert!(shutdown.is_running());
        assert!(shutdown.check_shutdown().is_ok());
    }

    #[test]
    fn test_request_shutdown_cancels() {
        let shutdown = GracefulShutdown::detached();
        shutdown.request_shutdown();
        shutdown.request_shutdown();

        assert!(!shutdown.is_running());
        assert!(matches!(
            shutdown.check_shutdown(),
            Err(ExtractorError::Cancelled)
        ));
        assert_eq!(shutdown.interrupts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let shutdown = GracefulShutdown::detached();
        let handle = shutdown.clone();

        handle.request_shutdown();
        assert!(!shutdown.is_running());
    }
}
