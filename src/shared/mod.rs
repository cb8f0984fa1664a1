pub mod error;
pub mod result;
pub mod security;

pub use error::{DepTreeError, ExitCode};
pub use result::Result;
