//! Session state enums.

use serde::Serialize;

/// Where the game is in its lifecycle.
///
/// ```text
/// Idle -> NewGameReady -> Running <-> Paused
///                           |
///                        GameOver -> NewGameReady
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GamePhase {
    /// No deck ready yet (startup, or an exhausted deck being reset)
    #[default]
    Idle,
    /// Full deck, waiting for the player to start
    NewGameReady,
    /// Drawing a card every tick
    Running,
    /// Mid-game with the timer stopped
    Paused,
    /// Deck exhausted; final tally shown while the deck resets
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::NewGameReady => "new game ready",
            GamePhase::Running => "running",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game over",
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pause indicator for the collaborator.
///
/// `Inactive` means there is no game to pause, which is different from a
/// game that was paused mid-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PauseState {
    Inactive,
    Running,
    Paused,
}

impl From<GamePhase> for PauseState {
    fn from(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Running => PauseState::Running,
            GamePhase::Paused => PauseState::Paused,
            GamePhase::Idle | GamePhase::NewGameReady | GamePhase::GameOver => {
                PauseState::Inactive
            }
        }
    }
}
