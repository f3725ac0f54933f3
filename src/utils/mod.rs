pub mod error;

pub use error::{EncodeError, UnknownNick, VipsError, VipsResult};
