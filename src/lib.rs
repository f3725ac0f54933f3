// Module declarations in dependency order
pub mod utils;
pub mod options;
pub mod core;
#[cfg(feature = "vips")]
pub mod processing;

// Public exports for external consumers
pub use crate::core::RuntimeConfig;
#[cfg(feature = "vips")]
pub use crate::core::Runtime;
pub use options::{OptionSet, Options, encode, encode_options};
#[cfg(feature = "vips")]
pub use processing::libvips::Image;
pub use utils::{EncodeError, VipsError, VipsResult};
