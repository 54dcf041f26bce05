//! Command registry and inbound-line dispatcher.
//!
//! The dispatcher holds no game logic. It decides which handler may consume
//! a line: commands go to the handler registered for their keyword,
//! responses go to a handler with a local request outstanding. Responses are
//! never answered on the wire, so a confused peer cannot start an error
//! ping-pong.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use log::{debug, warn};

use crate::command::{CommandHandler, Completion, Effects, FireCommand, QuitCommand};
use crate::error::ProtocolError;
use crate::game::GameState;
use crate::protocol::{command_line, decode_code, parse_line, response_line, Event, Line};

pub struct Dispatcher {
    handlers: Vec<Box<dyn CommandHandler>>,
    /// Handlers with a local request outstanding, oldest first.
    awaiting: VecDeque<usize>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::standard()
    }
}

impl Dispatcher {
    /// Dispatcher with no commands registered.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            awaiting: VecDeque::new(),
        }
    }

    /// Dispatcher with FIRE and QUIT registered.
    pub fn standard() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(Box::new(FireCommand::new()));
        dispatcher.register(Box::new(QuitCommand::new()));
        dispatcher
    }

    /// Register `handler`, replacing any handler with the same keyword.
    pub fn register(&mut self, handler: Box<dyn CommandHandler>) {
        match self.find(handler.keyword()) {
            Some(idx) => {
                self.awaiting.retain(|&i| i != idx);
                self.handlers[idx] = handler;
            }
            None => self.handlers.push(handler),
        }
    }

    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.iter().map(|h| h.keyword())
    }

    /// Whether any local request is still waiting for its response.
    pub fn is_awaiting(&self) -> bool {
        !self.awaiting.is_empty()
    }

    /// Validate a locally entered command line and record it as outstanding.
    /// Returns the handler's keyword and the line to send.
    pub fn issue(
        &mut self,
        game: &mut GameState,
        line: &str,
    ) -> Result<(&'static str, String), ProtocolError> {
        let (keyword, argument) = match parse_line(line) {
            Some(Line::Command { keyword, argument }) => (keyword, argument),
            Some(Line::Response { code, .. }) => {
                return Err(ProtocolError::syntax(code, "responses cannot be issued"));
            }
            None => return Err(ProtocolError::syntax("(empty)", "no command given")),
        };
        let idx = self
            .find(keyword)
            .ok_or_else(|| ProtocolError::UnknownCommand(keyword.to_string()))?;
        let handler = &mut self.handlers[idx];
        let wire_argument = handler.prepare(game, argument)?;
        let keyword = handler.keyword();
        self.awaiting.push_back(idx);
        let out = command_line(keyword, wire_argument.as_deref());
        debug!("-> {}", out);
        Ok((keyword, out))
    }

    /// Process one inbound line. Handler invocations for a connection must
    /// be serialized through a single dispatcher.
    pub fn dispatch(&mut self, game: &mut GameState, line: &str) -> Effects {
        let mut effects = Effects::default();
        debug!("<- {}", line);
        match parse_line(line) {
            None => debug!("ignoring blank line"),
            Some(Line::Command { keyword, argument }) => match self.find(keyword) {
                Some(idx) => {
                    if let Err(e) = self.handlers[idx].on_command(game, argument, &mut effects) {
                        reject(e, &mut effects);
                    }
                }
                None => reject(ProtocolError::UnknownCommand(keyword.to_string()), &mut effects),
            },
            Some(Line::Response { code, text }) => {
                self.route_response(game, code, text, &mut effects)
            }
        }
        for out in &effects.outbound {
            debug!("-> {}", out);
        }
        effects
    }

    fn route_response(&mut self, game: &mut GameState, raw: &str, text: &str, effects: &mut Effects) {
        let decoded = decode_code(raw);
        let slot = match &decoded {
            Ok(code) => self
                .awaiting
                .iter()
                .position(|&i| self.handlers[i].expects(*code)),
            Err(_) => None,
        }
        .or_else(|| (!self.awaiting.is_empty()).then_some(0));

        let Some(idx) = slot.and_then(|pos| self.awaiting.remove(pos)) else {
            let err = ProtocolError::sequence(raw, "response received while no command is awaiting one");
            warn!("{}", err);
            effects.events.push(Event::ProtocolViolation(err));
            return;
        };

        let handler = &mut self.handlers[idx];
        let result = match decoded {
            Ok(code) => handler.on_response(game, code, text, effects),
            Err(e) => {
                handler.cancel(game);
                Err(e)
            }
        };
        effects.completion = Some(Completion {
            keyword: handler.keyword(),
            result,
        });
    }

    fn find(&self, keyword: &str) -> Option<usize> {
        self.handlers
            .iter()
            .position(|h| h.keyword().eq_ignore_ascii_case(keyword))
    }
}

/// Answer a failed inbound command with its error code.
fn reject(err: ProtocolError, effects: &mut Effects) {
    warn!("rejecting command: {}", err);
    effects
        .outbound
        .push(response_line(err.code(), &err.to_string()));
    effects.events.push(Event::ProtocolViolation(err));
}
