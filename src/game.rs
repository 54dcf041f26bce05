//! Match state shared by every command handler: phase, turn ownership, and
//! the two boards.

use alloc::format;

use crate::board::Board;
use crate::error::ProtocolError;

/// Phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Boards are being set up; no shots allowed.
    Idle,
    InGame,
    /// A win was detected or a player quit.
    Finished,
}

/// How a finished match ended from the local player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchResult {
    Won,
    Lost,
    /// Ended by QUIT before either fleet was destroyed.
    Abandoned,
}

#[derive(Debug, Clone)]
pub struct GameState {
    phase: Phase,
    is_locals_turn: bool,
    local: Board,
    remote: Board,
}

impl GameState {
    /// New match in `Idle`. `local` is authoritative, `remote` a shadow.
    pub fn new(local: Board, remote: Board) -> Self {
        Self {
            phase: Phase::Idle,
            is_locals_turn: false,
            local,
            remote,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the local player may fire next.
    pub fn is_locals_turn(&self) -> bool {
        self.is_locals_turn
    }

    pub fn local_board(&self) -> &Board {
        &self.local
    }

    pub fn remote_board(&self) -> &Board {
        &self.remote
    }

    /// Move from `Idle` to `InGame`; `local_first` decides who fires first.
    pub fn start(&mut self, local_first: bool) -> Result<(), ProtocolError> {
        self.require_phase(Phase::Idle, "START")?;
        self.phase = Phase::InGame;
        self.is_locals_turn = local_first;
        Ok(())
    }

    /// Enter `Finished`. Returns `false` if the match had already ended.
    pub fn finish(&mut self) -> bool {
        if self.phase == Phase::Finished {
            return false;
        }
        self.phase = Phase::Finished;
        true
    }

    /// Outcome of a finished match, `None` while it is still running.
    pub fn result(&self) -> Option<MatchResult> {
        if self.phase != Phase::Finished {
            return None;
        }
        Some(if self.remote.all_sunk() {
            MatchResult::Won
        } else if self.local.all_sunk() {
            MatchResult::Lost
        } else {
            MatchResult::Abandoned
        })
    }

    pub fn require_phase(&self, phase: Phase, command: &str) -> Result<(), ProtocolError> {
        if self.phase != phase {
            return Err(ProtocolError::sequence(
                command,
                format!("not allowed while {:?}, requires {:?}", self.phase, phase),
            ));
        }
        Ok(())
    }

    /// Fail unless turn ownership is `local` (true: local may fire).
    pub fn require_turn(&self, local: bool, command: &str) -> Result<(), ProtocolError> {
        if self.is_locals_turn != local {
            let owner = if self.is_locals_turn { "local" } else { "remote" };
            return Err(ProtocolError::sequence(
                command,
                format!("out of turn, it is the {} player's turn", owner),
            ));
        }
        Ok(())
    }

    pub(crate) fn set_locals_turn(&mut self, local: bool) {
        self.is_locals_turn = local;
    }

    pub(crate) fn local_board_mut(&mut self) -> &mut Board {
        &mut self.local
    }

    pub(crate) fn remote_board_mut(&mut self) -> &mut Board {
        &mut self.remote
    }
}
