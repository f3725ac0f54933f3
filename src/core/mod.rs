//! Process-level types.
//!
//! - [`RuntimeConfig`]: settings for starting libvips
//! - [`Runtime`]: guard that keeps libvips initialised

mod config;
#[cfg(feature = "vips")]
mod runtime;

pub use config::RuntimeConfig;
#[cfg(feature = "vips")]
pub use runtime::Runtime;
