//! FIRE: the only command that moves the match forward.
//!
//! `FIRE <coord> [message]` is answered with exactly one outcome code. Turn
//! ownership flips on both sides: the defender gains the turn after
//! answering, the shooter loses it once the answer is processed.

use alloc::format;
use alloc::string::{String, ToString};

use log::{info, warn};

use super::{CommandHandler, Effects, FireReport, Reply};
use crate::common::{BoardError, ShotOutcome};
use crate::coordinate::Coordinate;
use crate::error::ProtocolError;
use crate::game::{GameState, Phase};
use crate::protocol::{response_line, split_head, Event};
use crate::response::{Category, FireOutcome, ResponseCode};
use crate::ship::ShipType;

pub const KEYWORD: &str = "FIRE";

#[derive(Debug, Default)]
pub struct FireCommand {
    /// Target of the local FIRE still waiting for its answer.
    outstanding: Option<Coordinate>,
}

impl FireCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outstanding(&self) -> Option<Coordinate> {
        self.outstanding
    }

    fn resolve(
        &mut self,
        game: &mut GameState,
        target: Coordinate,
        code: ResponseCode,
        text: &str,
        effects: &mut Effects,
    ) -> Result<Reply, ProtocolError> {
        game.require_phase(Phase::InGame, KEYWORD)?;
        game.require_turn(true, KEYWORD)?;

        let outcome = match code.fire_outcome() {
            Some(outcome) => outcome,
            None if code.is_error() => {
                return Err(ProtocolError::Rejected {
                    command: KEYWORD.to_string(),
                    code,
                    text: text.to_string(),
                })
            }
            None => {
                return Err(sequence(format!("unexpected response {} to FIRE", code)));
            }
        };

        if game.remote_board().is_shot(target) {
            return Err(already_fired(target));
        }

        match outcome {
            FireOutcome::Win => {
                let last = sole_survivor(game)?;
                game.remote_board_mut()
                    .register_sinking(target, last)
                    .map_err(|e| board_error(target, e))?;
                game.finish();
                info!("sank the last {} at {}, match won", last, target);
            }
            FireOutcome::Miss => {
                game.remote_board_mut()
                    .register_shot(target, None)
                    .map_err(|e| board_error(target, e))?;
            }
            FireOutcome::Hit(t) | FireOutcome::Sunk(t) => {
                let recorded = game
                    .remote_board_mut()
                    .register_shot(target, Some(t))
                    .map_err(|e| board_error(target, e))?;
                if game.remote_board().all_sunk() {
                    game.finish();
                    return Err(sequence(
                        "last ship sunk without win code; assuming victory",
                    ));
                }
                let health = game.remote_board().ship(t).map_or(0, |s| s.health());
                match (outcome, recorded) {
                    (FireOutcome::Sunk(_), ShotOutcome::Hit(_)) => {
                        return Err(sequence(format!(
                            "{} reported sunk but has {} hit points left; assuming hit",
                            t, health
                        )));
                    }
                    (FireOutcome::Hit(_), ShotOutcome::Sunk(_)) => {
                        return Err(sequence(format!(
                            "{} reported hit but has no hit points left; assuming sunk",
                            t
                        )));
                    }
                    _ => {}
                }
            }
        }

        let remote = game.remote_board();
        let ship = remote
            .outcome_at(target)
            .and_then(|o| o.ship_type())
            .and_then(|t| remote.ship(t).copied());
        effects.events.push(Event::FireResponse { target, ship });
        Ok(Reply::Fired(FireReport {
            target,
            outcome,
            ship,
        }))
    }
}

impl CommandHandler for FireCommand {
    fn keyword(&self) -> &'static str {
        KEYWORD
    }

    fn prepare(
        &mut self,
        game: &mut GameState,
        argument: Option<&str>,
    ) -> Result<Option<String>, ProtocolError> {
        game.require_phase(Phase::InGame, KEYWORD)?;
        if let Some(pending) = self.outstanding {
            return Err(still_outstanding(pending));
        }
        game.require_turn(true, KEYWORD)?;
        let (target, message) = parse_argument(argument)?;
        if game.remote_board().is_shot(target) {
            return Err(already_fired(target));
        }
        self.outstanding = Some(target);
        Ok(Some(match message {
            Some(m) => format!("{} {}", target, m),
            None => target.to_string(),
        }))
    }

    fn on_command(
        &mut self,
        game: &mut GameState,
        argument: Option<&str>,
        effects: &mut Effects,
    ) -> Result<(), ProtocolError> {
        game.require_phase(Phase::InGame, KEYWORD)?;
        if let Some(pending) = self.outstanding {
            return Err(still_outstanding(pending));
        }
        game.require_turn(false, KEYWORD)?;
        let (target, message) = parse_argument(argument)?;

        let shot = game
            .local_board_mut()
            .fire(target)
            .map_err(|e| board_error(target, e))?;
        let outcome = match shot {
            ShotOutcome::Miss => FireOutcome::Miss,
            ShotOutcome::Hit(t) => FireOutcome::Hit(t),
            ShotOutcome::Sunk(_) if game.local_board().all_sunk() => FireOutcome::Win,
            ShotOutcome::Sunk(t) => FireOutcome::Sunk(t),
        };
        let code = ResponseCode::for_outcome(outcome);
        effects
            .outbound
            .push(response_line(code, code.default_text()));
        game.set_locals_turn(true);
        if outcome == FireOutcome::Win {
            game.finish();
            info!("last ship lost at {}, match over", target);
        }

        let ship = shot
            .ship_type()
            .and_then(|t| game.local_board().ship(t).copied());
        effects.events.push(Event::TakenFire { target, ship });
        if let Some(message) = message {
            effects
                .events
                .push(Event::TakenFireMessage(message.to_string()));
        }
        Ok(())
    }

    fn on_response(
        &mut self,
        game: &mut GameState,
        code: ResponseCode,
        text: &str,
        effects: &mut Effects,
    ) -> Result<Reply, ProtocolError> {
        let Some(target) = self.outstanding.take() else {
            return Err(sequence("no FIRE is awaiting a response"));
        };
        let result = self.resolve(game, target, code, text, effects);
        // Success or not, the exchange is over and the turn passes to the peer.
        game.set_locals_turn(false);
        if let Err(e) = &result {
            warn!("FIRE at {} answered with {}: {}", target, code, e);
        }
        result
    }

    fn expects(&self, code: ResponseCode) -> bool {
        code.category() != Category::Info
    }

    fn cancel(&mut self, game: &mut GameState) {
        if self.outstanding.take().is_some() {
            game.set_locals_turn(false);
        }
    }
}

/// `<coord> [message]`
fn parse_argument(argument: Option<&str>) -> Result<(Coordinate, Option<&str>), ProtocolError> {
    let argument = argument
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ProtocolError::argument_missing(KEYWORD))?;
    let (token, message) = split_head(argument);
    let target =
        Coordinate::parse(token).map_err(|e| ProtocolError::syntax(KEYWORD, e.to_string()))?;
    Ok((target, message))
}

fn sole_survivor(game: &GameState) -> Result<ShipType, ProtocolError> {
    let mut afloat = game.remote_board().ships_afloat().map(|s| s.ship_type());
    match (afloat.next(), afloat.next()) {
        (Some(last), None) => Ok(last),
        (None, _) => Err(sequence("win reported but no ships remaining")),
        (Some(_), Some(_)) => Err(sequence(
            "win reported with more than one ship remaining; cannot determine which ship was hit",
        )),
    }
}

fn sequence(reason: impl Into<String>) -> ProtocolError {
    ProtocolError::sequence(KEYWORD, reason)
}

fn already_fired(target: Coordinate) -> ProtocolError {
    sequence(format!("{} has already been fired upon", target))
}

fn still_outstanding(target: Coordinate) -> ProtocolError {
    sequence(format!("FIRE at {} is still awaiting a response", target))
}

fn board_error(target: Coordinate, err: BoardError) -> ProtocolError {
    match err {
        BoardError::AlreadyShot => already_fired(target),
        other => sequence(other.to_string()),
    }
}
