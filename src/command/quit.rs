//! QUIT: end the connection. Accepted in any phase and on any turn.

use alloc::format;
use alloc::string::String;

use log::info;

use super::{CommandHandler, Effects, Reply};
use crate::error::ProtocolError;
use crate::game::GameState;
use crate::protocol::{response_line, Event};
use crate::response::ResponseCode;

pub const KEYWORD: &str = "QUIT";

#[derive(Debug, Default)]
pub struct QuitCommand {
    awaiting_ack: bool,
}

impl QuitCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandHandler for QuitCommand {
    fn keyword(&self) -> &'static str {
        KEYWORD
    }

    fn prepare(
        &mut self,
        _game: &mut GameState,
        _argument: Option<&str>,
    ) -> Result<Option<String>, ProtocolError> {
        if self.awaiting_ack {
            return Err(ProtocolError::sequence(KEYWORD, "QUIT already sent"));
        }
        self.awaiting_ack = true;
        Ok(None)
    }

    fn on_command(
        &mut self,
        game: &mut GameState,
        _argument: Option<&str>,
        effects: &mut Effects,
    ) -> Result<(), ProtocolError> {
        let code = ResponseCode::ConnectionClosing;
        effects
            .outbound
            .push(response_line(code, code.default_text()));
        effects.close = true;
        effects.events.push(Event::PeerQuit);
        game.finish();
        info!("peer quit");
        Ok(())
    }

    fn on_response(
        &mut self,
        game: &mut GameState,
        code: ResponseCode,
        _text: &str,
        effects: &mut Effects,
    ) -> Result<Reply, ProtocolError> {
        self.awaiting_ack = false;
        // Quitting is unconditional: the connection closes even if the
        // acknowledgement is wrong.
        effects.close = true;
        game.finish();
        if code != ResponseCode::ConnectionClosing {
            return Err(ProtocolError::sequence(
                KEYWORD,
                format!(
                    "expected {} acknowledging QUIT, got {}",
                    ResponseCode::ConnectionClosing,
                    code
                ),
            ));
        }
        Ok(Reply::Acknowledged)
    }

    fn expects(&self, code: ResponseCode) -> bool {
        code == ResponseCode::ConnectionClosing
    }

    fn cancel(&mut self, _game: &mut GameState) {
        self.awaiting_ack = false;
    }
}
