//! Message handling for the GameSession.

use super::{GamePhase, GameSession, SessionCommand, SessionEvent, SessionMessage};
use crate::error::ServiceError;
use crate::traits::DrawnCard;

impl GameSession {
    /// Handle one incoming message.
    ///
    /// Returns `false` once the session should stop.
    pub fn handle_message(&mut self, msg: SessionMessage) -> bool {
        match msg {
            SessionMessage::Command(command) => self.handle_command(command),
            SessionMessage::Tick(epoch) => {
                if epoch == self.timer_epoch {
                    self.tick();
                } else {
                    tracing::trace!("Dropping tick from stopped timer {}", epoch);
                }
            }
            SessionMessage::DrawFinished { generation, result } => {
                self.handle_draw_finished(generation, result)
            }
            SessionMessage::ResetFinished(deck) => {
                self.reset_in_flight = false;
                self.deck = deck;
                if self.final_tally.is_none() {
                    self.emit(SessionEvent::RemainingChanged(self.deck.cards_remaining()));
                }
                if matches!(self.phase, GamePhase::Idle | GamePhase::GameOver) {
                    self.set_phase(GamePhase::NewGameReady);
                }
            }
            SessionMessage::Connectivity(connected) => self.handle_connectivity(connected),
            SessionMessage::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            SessionMessage::Shutdown => return false,
        }
        true
    }

    /// Apply a player command.
    pub fn handle_command(&mut self, command: SessionCommand) {
        tracing::debug!("Command {:?} in phase {}", command, self.phase);
        match command {
            SessionCommand::StartGame => {
                if self.phase != GamePhase::NewGameReady {
                    return;
                }
                if !self.connected {
                    tracing::info!("Not starting a game while offline");
                    self.emit(SessionEvent::ResumeRefused);
                    return;
                }
                self.clear_final_tally();
                self.set_phase(GamePhase::Running);
                self.start_timer();
            }
            SessionCommand::Pause | SessionCommand::Background => self.pause(),
            SessionCommand::Resume => {
                if self.phase != GamePhase::Paused {
                    return;
                }
                if !self.connected {
                    tracing::info!("Not resuming while offline");
                    self.emit(SessionEvent::ResumeRefused);
                    return;
                }
                self.set_phase(GamePhase::Running);
                self.start_timer();
            }
            SessionCommand::Slap => self.slap(),
            SessionCommand::DismissGameOver => {
                if self.final_tally.is_some() {
                    self.clear_final_tally();
                    self.emit(SessionEvent::RemainingChanged(self.deck.cards_remaining()));
                }
            }
        }
    }

    /// Advance the game by one tick.
    ///
    /// Draws the next card unless a draw is still pending. An empty deck
    /// ends the game instead.
    pub fn tick(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        if self.draw_in_flight {
            tracing::trace!("Draw still pending, skipping tick");
            return;
        }
        if self.deck.is_exhausted() {
            self.game_over();
            return;
        }

        self.draw_in_flight = true;
        let generation = self.generation;
        let manager = self.manager.clone();
        let deck = self.deck.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = manager.request_draw(&deck).await;
            let _ = tx.send(SessionMessage::DrawFinished { generation, result });
        });
    }

    fn pause(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.stop_timer();
        self.set_phase(GamePhase::Paused);
    }

    fn slap(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        let Some(card) = self.current_card.as_mut() else {
            return;
        };
        if !self.manager.record_slap(&mut self.deck, card) {
            tracing::debug!("Card already slapped");
            return;
        }

        self.tick();
        self.start_timer();
    }

    fn handle_draw_finished(&mut self, generation: u64, result: Result<DrawnCard, ServiceError>) {
        if generation != self.generation {
            tracing::debug!("Dropping draw result from an earlier game");
            return;
        }
        self.draw_in_flight = false;

        // Applied even when paused: pausing only stops the timer.
        match result {
            Ok(drawn) => {
                let card = self.manager.apply_draw(&mut self.deck, drawn);
                self.current_card = Some(card);
                self.emit(SessionEvent::CardChanged(self.current_card.clone()));
                self.emit(SessionEvent::RemainingChanged(self.deck.cards_remaining()));
            }
            // The next tick ends the game.
            Err(ServiceError::Exhausted { .. }) => {
                self.manager.mark_exhausted(&mut self.deck);
                self.emit(SessionEvent::RemainingChanged(0));
            }
            Err(_) => {}
        }
    }

    fn handle_connectivity(&mut self, connected: bool) {
        if self.connected == connected {
            return;
        }
        self.connected = connected;
        if connected {
            tracing::info!("Deck service reachable again");
        } else {
            tracing::warn!("Deck service unreachable, pausing");
            self.pause();
        }
    }

    fn game_over(&mut self) {
        self.stop_timer();
        let tally = self.manager.tally(&self.deck);
        tracing::info!(
            "Game over on deck {}: {} jacks, {} other",
            self.deck.id(),
            tally.jacks,
            tally.other
        );
        self.final_tally = Some(tally);
        self.set_phase(GamePhase::GameOver);
        self.emit(SessionEvent::GameOver(tally));
        self.spawn_reset();
    }

    fn clear_final_tally(&mut self) {
        self.final_tally = None;
        if self.current_card.take().is_some() {
            self.emit(SessionEvent::CardChanged(None));
        }
    }
}
