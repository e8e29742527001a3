//! Logging utilities.
//!
//! Library crates only emit through the `log` facade. Hosts call
//! [`init_logging`] once to install an `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
