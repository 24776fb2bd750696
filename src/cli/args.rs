//! Command-line argument parsing.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Delete the saved deck and exit
    Reset,
    /// Play the game (default)
    Play,
}

/// Parse command-line arguments and return the appropriate command.
///
/// The first recognised flag wins; unknown arguments are ignored.
///
/// # Examples
///
/// ```
/// use slapjack::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["slapjack".to_string(), "--reset".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Reset);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    for arg in args.skip(1) {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--reset" => return CliCommand::Reset,
            other => tracing::debug!("Ignoring argument {:?}", other),
        }
    }
    CliCommand::Play
}
