//! Players that set up a board and choose targets.

use alloc::string::String;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::{ai, board::Board, common::BoardError, coordinate::Coordinate};

/// Interface implemented by different player types.
///
/// A player places its fleet before the match and picks each target from
/// what its shadow of the opponent's board has revealed.
pub trait Player: Send {
    /// Place the whole fleet onto `board`.
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError>;

    /// Choose the next coordinate to fire at; `None` if nothing is left.
    fn select_target(&mut self, rng: &mut SmallRng, shadow: &Board) -> Option<Coordinate>;

    /// Optional message to send along with a shot.
    fn taunt(&mut self, _rng: &mut SmallRng) -> Option<String> {
        None
    }
}

const TAUNTS: [&str; 4] = [
    "Incoming!",
    "Say hello to my broadside",
    "Is this seat taken?",
    "Fire in the hole",
];

/// Player that places ships at random and targets by probability density.
#[derive(Debug, Default)]
pub struct AiPlayer {
    /// Chance of attaching a taunt to a shot.
    taunt_rate: f64,
}

impl AiPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// AI that taunts on roughly `rate` of its shots.
    pub fn with_taunts(rate: f64) -> Self {
        Self {
            taunt_rate: rate.clamp(0.0, 1.0),
        }
    }
}

impl Player for AiPlayer {
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        board.place_fleet_randomly(rng)
    }

    fn select_target(&mut self, rng: &mut SmallRng, shadow: &Board) -> Option<Coordinate> {
        ai::select_target(shadow, rng)
    }

    fn taunt(&mut self, rng: &mut SmallRng) -> Option<String> {
        if self.taunt_rate > 0.0 && rng.random_bool(self.taunt_rate) {
            let pick = rng.random_range(0..TAUNTS.len());
            Some(String::from(TAUNTS[pick]))
        } else {
            None
        }
    }
}
