//! CLI module.
//!
//! The dispatcher runs before the game starts and handles the flags that do
//! something other than play:
//!
//! ```ignore
//! use slapjack::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(command, &config) {
//!     return result;
//! }
//! // No CLI command, play
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use version::{usage, version_line, VERSION};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use crate::startup::StartupConfig;
use crate::storage::PersistenceStore;

/// Run a CLI command if applicable.
///
/// * `None` - the command is `Play`
/// * `Some(Ok(()))` - a CLI command executed successfully
/// * `Some(Err(e))` - a CLI command failed
pub fn run_cli_command(command: CliCommand, config: &StartupConfig) -> Option<Result<()>> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Some(Ok(()))
        }
        CliCommand::Help => {
            println!("{}", usage());
            Some(Ok(()))
        }
        CliCommand::Reset => Some(handle_reset_command(config)),
        CliCommand::Play => None,
    }
}

/// Wipe the saved deck in `config.data_dir`.
pub fn handle_reset_command(config: &StartupConfig) -> Result<()> {
    PersistenceStore::open(&config.data_dir)
        .wipe()
        .wrap_err_with(|| format!("failed to reset {}", config.data_dir.display()))?;
    println!("Saved deck removed.");
    Ok(())
}
