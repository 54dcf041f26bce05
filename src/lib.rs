#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod bitboard;
mod board;
pub mod command;
mod common;
mod config;
mod coordinate;
mod dispatcher;
mod error;
mod game;
mod player;
pub mod protocol;
mod response;
mod ship;
#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod player_node;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError, GridMask};
pub use board::*;
pub use command::{CommandHandler, Completion, Effects, FireCommand, FireReport, QuitCommand, Reply};
pub use common::*;
pub use config::*;
pub use coordinate::*;
pub use dispatcher::*;
pub use error::*;
pub use game::*;
pub use player::*;
pub use protocol::Event;
pub use response::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with};
#[cfg(feature = "std")]
pub use player_node::PlayerNode;
#[cfg(feature = "std")]
pub use session::{Events, Session, SessionHandle};
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpLineTransport, LineTransport};
