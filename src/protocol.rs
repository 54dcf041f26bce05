//! Line grammar of the wire protocol and the events the engine raises.
//!
//! ```text
//! command  = KEYWORD [ SP argument ]
//! response = CODE [ SP free-text ]
//! ```
//!
//! A line whose first token is all ASCII digits is a response, anything else
//! is a command. Surrounding whitespace is ignored.

use alloc::format;
use alloc::string::{String, ToString};

use crate::coordinate::Coordinate;
use crate::error::ProtocolError;
use crate::response::ResponseCode;
use crate::ship::Ship;

/// One inbound line, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Command {
        keyword: &'a str,
        argument: Option<&'a str>,
    },
    /// `code` is the raw digit run; it may name no known code.
    Response {
        code: &'a str,
        text: &'a str,
    },
}

/// Split `line` into head token and trimmed remainder (`None` if empty).
pub fn split_head(line: &str) -> (&str, Option<&str>) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => {
            let rest = rest.trim();
            (head, (!rest.is_empty()).then_some(rest))
        }
        None => (line, None),
    }
}

/// Classify a line; `None` for a blank line.
pub fn parse_line(line: &str) -> Option<Line<'_>> {
    let (head, rest) = split_head(line);
    if head.is_empty() {
        return None;
    }
    if head.bytes().all(|b| b.is_ascii_digit()) {
        return Some(Line::Response {
            code: head,
            text: rest.unwrap_or(""),
        });
    }
    Some(Line::Command {
        keyword: head,
        argument: rest,
    })
}

/// Map the digits of a response line onto the code table.
pub fn decode_code(raw: &str) -> Result<ResponseCode, ProtocolError> {
    let value = raw
        .parse::<u16>()
        .map_err(|_| ProtocolError::syntax(raw, "response code out of range"))?;
    ResponseCode::try_from(value).map_err(|e| ProtocolError::syntax(raw, e.to_string()))
}

pub fn command_line(keyword: &str, argument: Option<&str>) -> String {
    match argument {
        Some(arg) if !arg.is_empty() => format!("{} {}", keyword, arg),
        _ => String::from(keyword),
    }
}

pub fn response_line(code: ResponseCode, text: &str) -> String {
    if text.is_empty() {
        format!("{}", code)
    } else {
        format!("{} {}", code, text)
    }
}

/// Notification from the engine to the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The peer fired at the local board; `ship` is the ship struck, after damage.
    TakenFire {
        target: Coordinate,
        ship: Option<Ship>,
    },
    /// Free text the peer attached to a FIRE.
    TakenFireMessage(String),
    /// The peer answered a local FIRE; `ship` is the shadow ship struck, after damage.
    FireResponse {
        target: Coordinate,
        ship: Option<Ship>,
    },
    /// The peer sent QUIT.
    PeerQuit,
    /// A protocol violation was detected while processing an inbound line.
    ProtocolViolation(ProtocolError),
}
