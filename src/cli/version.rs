//! Version and usage text.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line version string.
pub fn version_line() -> String {
    format!("slapjack {}", VERSION)
}

/// Usage text for `--help`.
pub fn usage() -> String {
    format!(
        "{}
Slap the jacks as the deck is dealt.

USAGE:
    slapjack [--reset | --version | --help]

OPTIONS:
    --reset        Delete the saved deck and exit
    -V, --version  Print version
    -h, --help     Print this help

COMMANDS (one per line on stdin):
    start      begin a new game
    slap       slap the current card (an empty line also slaps)
    pause      pause the game
    resume     resume a paused game
    dismiss    clear the final score
    background pause as if the app lost focus
    status     show the current state
    quit       exit

ENVIRONMENT:
    SLAPJACK_API_URL     deck API root
    SLAPJACK_DATA_DIR    where the saved deck lives (default ~/.slapjack)
    SLAPJACK_TICK_MS     milliseconds between cards (default 1000)
    SLAPJACK_PROBE_SECS  seconds between connectivity checks (default 5)
    SLAPJACK_OFFLINE     skip connectivity checks
    SLAPJACK_LOG         log filter (default info)",
        version_line()
    )
}
