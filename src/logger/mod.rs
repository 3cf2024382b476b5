//! The `logger` module is a simple utility that requires manual verification.
//! Handlers and services log through the `tracing` macros re-exported here.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
