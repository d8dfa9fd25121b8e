// Feature Board Core - Domain Logic & Ports
// NO infrastructure dependencies (Hexagonal Architecture)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{AppError, ErrorKind, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
