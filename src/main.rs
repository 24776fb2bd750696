use slapjack::adapters::{DeckApiClient, ReqwestHttpClient};
use slapjack::cli::{parse_args, run_cli_command};
use slapjack::deck::DeckLifecycleManager;
use slapjack::reachability::spawn_reachability_monitor;
use slapjack::session::{GameSession, SessionCommand, SessionEvent, SessionMessage};
use slapjack::startup::{init_logging, StartupConfig};
use slapjack::storage::PersistenceStore;

use color_eyre::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    let config = StartupConfig::from_env();

    // Handle --version, --help and --reset before touching the network
    if let Some(result) = run_cli_command(parse_args(std::env::args()), &config) {
        return result;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(play(config))
}

async fn play(config: StartupConfig) -> Result<()> {
    let http = ReqwestHttpClient::with_timeout(config.request_timeout);
    let service = DeckApiClient::new(http).with_base_url(&config.api_base_url);
    let store = Arc::new(PersistenceStore::open(&config.data_dir));
    let manager = DeckLifecycleManager::new(Arc::new(service), store).with_ttl(config.deck_ttl);

    println!("Getting a deck...");
    let (session, events) = match GameSession::bootstrap(manager, config.tick_interval).await {
        Ok(started) => started,
        Err(e) => {
            eprintln!("{}", e.user_message());
            eprintln!("{}", e.recovery_hint());
            return Err(e.into());
        }
    };

    let session_tx = session.message_tx.clone();
    let monitor = if config.offline {
        tracing::info!("Offline mode, not polling reachability");
        None
    } else {
        Some(spawn_reachability_monitor(
            session_tx.clone(),
            &config.api_base_url,
            config.reachability_interval,
            config.request_timeout,
        ))
    };

    let printer = tokio::spawn(print_events(events, session.manager().clone()));
    let session_task = tokio::spawn(session.run());

    println!("Type 'start' to play, 'help' for commands.");
    read_commands(&session_tx).await;

    let _ = session_tx.send(SessionMessage::Shutdown);
    let session = session_task.await?;
    if let Some(monitor) = monitor {
        monitor.abort();
    }

    let deck = session.deck();
    tracing::info!(
        "Leaving deck {} with {} cards remaining",
        deck.id(),
        deck.cards_remaining()
    );
    drop(session);
    let _ = printer.await;
    Ok(())
}

/// Forward stdin lines to the session until quit, end of input or Ctrl-C.
async fn read_commands(session_tx: &mpsc::UnboundedSender<SessionMessage>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Failed to read input: {}", e);
                break;
            }
        };

        match line.trim() {
            "quit" | "q" | "exit" => break,
            "help" | "?" => println!("{}", slapjack::cli::usage()),
            "status" => print_status(session_tx).await,
            word => match SessionCommand::parse(word) {
                Some(command) => {
                    if session_tx.send(command.into()).is_err() {
                        break;
                    }
                }
                None => println!("Unknown command: {}", word),
            },
        }
    }
}

async fn print_status(session_tx: &mpsc::UnboundedSender<SessionMessage>) {
    let (reply_tx, reply_rx) = oneshot::channel();
    if session_tx.send(SessionMessage::Snapshot(reply_tx)).is_err() {
        return;
    }
    let Ok(snapshot) = reply_rx.await else {
        return;
    };

    println!(
        "{} | deck {} | {} cards left | jacks {} other {} | {}",
        snapshot.phase,
        snapshot.deck_id,
        snapshot.cards_remaining,
        snapshot.tally.jacks,
        snapshot.tally.other,
        if snapshot.connected { "online" } else { "offline" }
    );
    if let Some(card) = snapshot.current_card {
        println!("showing {}", card.label());
    }
}

async fn print_events(
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
    manager: DeckLifecycleManager,
) {
    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::CardChanged(None) => println!("[card back]"),
            SessionEvent::CardChanged(Some(card)) => {
                println!("{}", card.label());
                // Off the event loop
                let manager = manager.clone();
                tokio::spawn(async move {
                    let image = manager.image_for_card(Some(&card)).await;
                    tracing::debug!("Image for {}: {}", card.label(), image.describe());
                });
            }
            SessionEvent::RemainingChanged(remaining) => println!("{} cards left", remaining),
            SessionEvent::StateChanged(phase) => println!("== {} ==", phase),
            SessionEvent::GameOver(tally) => {
                println!(
                    "Game over! You slapped {} jacks and {} other cards.",
                    tally.jacks, tally.other
                );
                println!("Type 'dismiss' to clear the score.");
            }
            SessionEvent::ResumeRefused => {
                println!("No connection to the deck service. Check your internet connection and try again.")
            }
        }
    }
}
