//! The game session state machine.
//!
//! A [`GameSession`] is owned by a single control task. Everything that
//! changes it arrives as a [`SessionMessage`] on `message_rx`: player
//! commands, timer ticks, results of spawned remote calls and connectivity
//! changes. Remote calls run in spawned tasks and never touch the deck
//! directly; they report back through `message_tx`.

mod handlers;
pub mod messages;
pub mod timer;
pub mod types;

pub use messages::{SessionCommand, SessionEvent, SessionMessage, SessionSnapshot};
pub use types::{GamePhase, PauseState};

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::deck::DeckLifecycleManager;
use crate::error::LifecycleError;
use crate::models::{Card, Deck, Tally};

/// Default time between draws.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Session state owned by the control task.
pub struct GameSession {
    manager: DeckLifecycleManager,
    deck: Deck,
    phase: GamePhase,
    /// Card on screen; `None` shows the card back
    current_card: Option<Card>,
    /// Final tally, shown until dismissed
    final_tally: Option<Tally>,
    connected: bool,
    draw_in_flight: bool,
    reset_in_flight: bool,
    /// Bumped on every new game; draw results from older games are dropped
    generation: u64,
    /// Bumped whenever the timer stops or restarts; stale ticks are dropped
    timer_epoch: u64,
    timer: Option<JoinHandle<()>>,
    tick_interval: Duration,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
    /// Receiver for session messages (taken by [`run`](Self::run))
    pub message_rx: Option<mpsc::UnboundedReceiver<SessionMessage>>,
    /// Sender for session messages (clone this to pass to async tasks)
    pub message_tx: mpsc::UnboundedSender<SessionMessage>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("deck", &self.deck.id())
            .field("phase", &self.phase)
            .field("remaining", &self.deck.cards_remaining())
            .field("connected", &self.connected)
            .field("draw_in_flight", &self.draw_in_flight)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Acquire the deck and build a session around it.
    ///
    /// This is the only point where startup waits on the deck service.
    pub async fn bootstrap(
        manager: DeckLifecycleManager,
        tick_interval: Duration,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SessionEvent>), LifecycleError> {
        let deck = manager.acquire_deck().await?;
        Ok(Self::new(manager, deck, tick_interval))
    }

    /// Build a session for an already acquired deck.
    ///
    /// A full deck starts in `NewGameReady`. A deck part-way through a game
    /// restores to `Paused` showing the last drawn card. An empty deck stays
    /// `Idle` while it is reset in the background, so this must be called
    /// inside a Tokio runtime.
    ///
    /// The initial state, card and count are emitted as events straight away.
    pub fn new(
        manager: DeckLifecycleManager,
        deck: Deck,
        tick_interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut session = Self {
            manager,
            deck,
            phase: GamePhase::Idle,
            current_card: None,
            final_tally: None,
            connected: true,
            draw_in_flight: false,
            reset_in_flight: false,
            generation: 0,
            timer_epoch: 0,
            timer: None,
            tick_interval,
            event_tx,
            message_rx: Some(message_rx),
            message_tx,
        };
        session.restore();
        (session, event_rx)
    }

    fn restore(&mut self) {
        if self.deck.is_exhausted() {
            tracing::info!("Deck {} is empty, resetting before the first game", self.deck.id());
            self.spawn_reset();
        } else if self.deck.is_mid_game() {
            self.current_card = self
                .deck
                .last_card
                .clone()
                .or_else(|| self.manager.store().last_card());
            tracing::info!(
                "Restoring game on deck {} with {} cards remaining",
                self.deck.id(),
                self.deck.cards_remaining()
            );
            self.phase = GamePhase::Paused;
        } else {
            self.phase = GamePhase::NewGameReady;
        }

        self.emit(SessionEvent::StateChanged(self.phase));
        self.emit(SessionEvent::CardChanged(self.current_card.clone()));
        self.emit(SessionEvent::RemainingChanged(self.deck.cards_remaining()));
    }

    /// Drain `message_rx` until [`SessionMessage::Shutdown`] arrives.
    ///
    /// Returns the session so the caller can inspect the final state.
    pub async fn run(mut self) -> Self {
        let Some(mut message_rx) = self.message_rx.take() else {
            tracing::error!("Session message receiver already taken");
            return self;
        };

        tracing::info!("Session started on deck {}", self.deck.id());
        while let Some(msg) = message_rx.recv().await {
            if !self.handle_message(msg) {
                break;
            }
        }

        self.stop_timer();
        tracing::info!("Session stopped");
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Three-way pause indicator derived from the phase.
    pub fn pause_state(&self) -> PauseState {
        PauseState::from(self.phase)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.current_card.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_draw_in_flight(&self) -> bool {
        self.draw_in_flight
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Final tally of the last game, until it is dismissed.
    pub fn final_tally(&self) -> Option<Tally> {
        self.final_tally
    }

    pub fn manager(&self) -> &DeckLifecycleManager {
        &self.manager
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            pause_state: self.pause_state(),
            deck_id: self.deck.id().to_string(),
            cards_remaining: self.deck.cards_remaining(),
            current_card: self.current_card.clone(),
            tally: self.manager.tally(&self.deck),
            connected: self.connected,
        }
    }

    fn emit(&self, event: SessionEvent) {
        // Nobody listening is fine; the session keeps running headless.
        let _ = self.event_tx.send(event);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            tracing::debug!("Session {} -> {}", self.phase, phase);
            self.phase = phase;
            self.emit(SessionEvent::StateChanged(phase));
        }
    }

    fn start_timer(&mut self) {
        self.stop_timer();
        self.timer = Some(timer::spawn_tick_timer(
            self.message_tx.clone(),
            self.tick_interval,
            self.timer_epoch,
        ));
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
        self.timer_epoch += 1;
    }

    fn spawn_reset(&mut self) {
        if self.reset_in_flight {
            return;
        }
        self.reset_in_flight = true;
        self.generation += 1;
        self.draw_in_flight = false;

        let manager = self.manager.clone();
        let deck = self.deck.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let deck = manager.reset_for_new_game(deck).await;
            let _ = tx.send(SessionMessage::ResetFinished(deck));
        });
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}
