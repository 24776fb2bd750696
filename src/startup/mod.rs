//! Process startup: configuration and logging.
//!
//! # Components
//!
//! - [`config`] - Startup configuration and environment overrides
//! - [`logging`] - Tracing subscriber setup
//!
//! # Usage
//!
//! ```ignore
//! use slapjack::startup::{init_logging, StartupConfig};
//!
//! init_logging();
//! let config = StartupConfig::from_env();
//! ```

pub mod config;
pub mod logging;

pub use config::StartupConfig;
pub use logging::{init_logging, init_test_logging};
