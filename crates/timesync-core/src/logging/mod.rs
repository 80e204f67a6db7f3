//! Logging utilities.
//!
//! Centralizes logger initialization. Library code only talks to the `log`
//! facade; `env_logger` is installed here for hosts that want it.

mod init;

pub use init::{init_logging, LoggingConfig};
