//! Messages into and events out of the session.

use tokio::sync::oneshot;

use super::types::{GamePhase, PauseState};
use crate::error::ServiceError;
use crate::models::{Card, Deck, Tally};
use crate::traits::DrawnCard;

/// Player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Begin drawing from a fresh deck
    StartGame,
    /// Stop the timer
    Pause,
    /// Restart the timer after a pause
    Resume,
    /// Claim the current card
    Slap,
    /// Clear the final tally after a game
    DismissGameOver,
    /// The application lost the foreground
    Background,
}

impl SessionCommand {
    /// Parse a command word as typed by the player.
    pub fn parse(word: &str) -> Option<Self> {
        match word.trim().to_ascii_lowercase().as_str() {
            "start" | "new" => Some(SessionCommand::StartGame),
            "pause" | "p" => Some(SessionCommand::Pause),
            "resume" | "r" => Some(SessionCommand::Resume),
            "slap" | "s" | "" => Some(SessionCommand::Slap),
            "dismiss" | "ok" => Some(SessionCommand::DismissGameOver),
            "background" | "bg" => Some(SessionCommand::Background),
            _ => None,
        }
    }
}

/// Everything the control task reacts to.
#[derive(Debug)]
pub enum SessionMessage {
    /// Player input
    Command(SessionCommand),
    /// Timer fired; carries the epoch of the timer that sent it
    Tick(u64),
    /// A spawned draw resolved
    DrawFinished {
        generation: u64,
        result: Result<DrawnCard, ServiceError>,
    },
    /// A spawned new-game reset resolved
    ResetFinished(Deck),
    /// Reachability changed
    Connectivity(bool),
    /// Report the current state
    Snapshot(oneshot::Sender<SessionSnapshot>),
    /// Stop the control loop
    Shutdown,
}

impl From<SessionCommand> for SessionMessage {
    fn from(command: SessionCommand) -> Self {
        SessionMessage::Command(command)
    }
}

/// Notifications for the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The shown card changed; `None` shows the card back
    CardChanged(Option<Card>),
    /// The displayed remaining count changed
    RemainingChanged(u8),
    /// The phase changed
    StateChanged(GamePhase),
    /// The deck ran out; final score
    GameOver(Tally),
    /// Start or resume refused because the deck service is unreachable
    ResumeRefused,
}

/// Point-in-time view of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub pause_state: PauseState,
    pub deck_id: String,
    pub cards_remaining: u8,
    pub current_card: Option<Card>,
    pub tally: Tally,
    pub connected: bool,
}
