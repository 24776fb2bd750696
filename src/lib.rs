//! Slapjack - a slap-the-jack card game driven by a remote deck service.
//!
//! This library exposes modules for use by the binary and integration tests.
//!
//! - [`deck`] acquires, renews and draws from the single active deck
//! - [`session`] runs the game state machine on one control task
//! - [`storage`] persists the deck between runs
//! - [`reachability`] pauses the game when the deck service goes away

pub mod adapters;
pub mod cli;
pub mod deck;
pub mod error;
pub mod models;
pub mod reachability;
pub mod session;
pub mod startup;
pub mod storage;
pub mod traits;
