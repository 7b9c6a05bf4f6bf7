//! Logger setup for hosts and demos.
//!
//! Everything in the crate logs through the `log` facade; this only installs
//! the `env_logger` backend.

mod init;

pub use init::{LoggingConfig, init_logging};
