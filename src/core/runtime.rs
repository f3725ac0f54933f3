//! libvips process-wide lifecycle.

use tracing::debug;

use crate::core::RuntimeConfig;
use crate::utils::{VipsError, VipsResult};

/// Keeps libvips initialised while alive.
///
/// `VipsApp` starts libvips' thread pool and global state on creation and
/// shuts it down on drop. libvips cannot be restarted after shutdown, so
/// start one `Runtime` per process and keep it until the last [`Image`]
/// has been released.
///
/// [`Image`]: crate::Image
pub struct Runtime {
    app: libvips::VipsApp,
}

impl Runtime {
    /// Initialises libvips with `config`.
    pub fn start(config: &RuntimeConfig) -> VipsResult<Self> {
        let app = libvips::VipsApp::new(&config.name, config.leak_check)
            .map_err(|e| VipsError::failed_to_start(format!("{e}")))?;

        // 0 = let libvips decide based on available CPU cores
        app.concurrency_set(config.concurrency);
        debug!(
            "libvips initialized as '{}' (concurrency: {})",
            config.name,
            app.concurency_get()
        );

        Ok(Self { app })
    }

    /// Worker threads libvips will use per pipeline.
    pub fn concurrency(&self) -> i32 {
        self.app.concurency_get()
    }
}
