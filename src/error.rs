//! Protocol-level failures.
//!
//! These are distinct from transport I/O failures, which travel as
//! `anyhow::Error`. Every variant maps to the response code sent to the peer
//! when the failure happens while answering one of its commands.

use alloc::string::String;

use crate::response::ResponseCode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// Malformed or unparsable argument.
    #[error("{command}: {reason}")]
    Syntax { command: String, reason: String },
    /// Ordering or state-consistency violation.
    #[error("{command}: {reason}")]
    Sequence { command: String, reason: String },
    #[error("{command}: argument missing")]
    ArgumentMissing { command: String },
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// The peer answered a local request with an error code.
    #[error("{command} rejected by peer: {code} {text}")]
    Rejected {
        command: String,
        code: ResponseCode,
        text: String,
    },
}

impl ProtocolError {
    pub fn syntax(command: impl Into<String>, reason: impl Into<String>) -> Self {
        ProtocolError::Syntax {
            command: command.into(),
            reason: reason.into(),
        }
    }

    pub fn sequence(command: impl Into<String>, reason: impl Into<String>) -> Self {
        ProtocolError::Sequence {
            command: command.into(),
            reason: reason.into(),
        }
    }

    pub fn argument_missing(command: impl Into<String>) -> Self {
        ProtocolError::ArgumentMissing {
            command: command.into(),
        }
    }

    /// Response code reporting this error on the wire.
    pub fn code(&self) -> ResponseCode {
        match self {
            ProtocolError::Syntax { .. } | ProtocolError::UnknownCommand(_) => {
                ResponseCode::SyntaxError
            }
            ProtocolError::Sequence { .. } => ResponseCode::SequenceError,
            ProtocolError::ArgumentMissing { .. } => ResponseCode::ArgumentMissing,
            ProtocolError::Rejected { code, .. } => *code,
        }
    }

    /// Whether the input can simply be corrected and retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ProtocolError::Syntax { .. }
                | ProtocolError::ArgumentMissing { .. }
                | ProtocolError::UnknownCommand(_)
        )
    }
}
