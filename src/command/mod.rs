//! Command handlers.
//!
//! Each protocol verb is a [`CommandHandler`] registered with the
//! [`Dispatcher`](crate::Dispatcher) under its keyword. A handler has three
//! entry points: `prepare` when the local player issues the command,
//! `on_command` when the peer issues it, and `on_response` when the peer
//! answers a command the local player issued. The shared [`GameState`] is
//! passed in explicitly on every call.

use alloc::string::String;
use alloc::vec::Vec;

use crate::coordinate::Coordinate;
use crate::error::ProtocolError;
use crate::game::GameState;
use crate::protocol::Event;
use crate::response::{FireOutcome, ResponseCode};
use crate::ship::Ship;

pub mod fire;
pub mod quit;

pub use fire::FireCommand;
pub use quit::QuitCommand;

/// What the peer's answer to a local request amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Acknowledged,
    Fired(FireReport),
}

/// Outcome of a local FIRE, as recorded on the shadow board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireReport {
    pub target: Coordinate,
    pub outcome: FireOutcome,
    /// Shadow ship struck, after damage.
    pub ship: Option<Ship>,
}

/// A local request whose response has been processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub keyword: &'static str,
    pub result: Result<Reply, ProtocolError>,
}

/// Everything the dispatch of one inbound line asks the session to do.
#[derive(Debug, Default)]
pub struct Effects {
    /// Lines to write to the peer, in order.
    pub outbound: Vec<String>,
    pub events: Vec<Event>,
    pub completion: Option<Completion>,
    /// Close the transport once `outbound` is flushed.
    pub close: bool,
}

pub trait CommandHandler: Send {
    fn keyword(&self) -> &'static str;

    /// Validate a locally issued command and record it as outstanding.
    /// Returns the argument to put on the wire. Must not change `game` on
    /// failure.
    fn prepare(
        &mut self,
        game: &mut GameState,
        argument: Option<&str>,
    ) -> Result<Option<String>, ProtocolError>;

    /// Handle the command sent by the peer. Any reply goes into `effects`;
    /// an error is answered by the dispatcher with the error's code.
    fn on_command(
        &mut self,
        game: &mut GameState,
        argument: Option<&str>,
        effects: &mut Effects,
    ) -> Result<(), ProtocolError>;

    /// Handle the peer's answer to the outstanding local command. The
    /// outstanding request is consumed whether or not this succeeds.
    fn on_response(
        &mut self,
        game: &mut GameState,
        code: ResponseCode,
        text: &str,
        effects: &mut Effects,
    ) -> Result<Reply, ProtocolError>;

    /// Whether `code` is a plausible answer to this command.
    fn expects(&self, code: ResponseCode) -> bool;

    /// Drop the outstanding request after an undecodable answer.
    fn cancel(&mut self, _game: &mut GameState) {}
}
