//! Numeric response codes carried at the start of every response line.
//!
//! Codes are the only channel for game outcomes on the wire; the free text
//! after a code is advisory and never parsed.

use core::fmt;

use crate::ship::ShipType;

/// Broad meaning of a response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Success or informational reply.
    Info,
    /// Result of a FIRE.
    Outcome,
    /// The peer rejected a request.
    Error,
}

/// What a FIRE response code says about the shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum FireOutcome {
    Miss,
    Hit(ShipType),
    Sunk(ShipType),
    /// The shot sank the defender's last ship.
    Win,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseCodeError {
    #[error("unknown response code {0}")]
    UnknownCode(u16),
    #[error("response code {0} does not name a ship")]
    NotAShipCode(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ResponseCode {
    ConnectionClosing = 221,

    FireMiss = 250,
    FireHitCarrier = 251,
    FireHitBattleship = 252,
    FireHitDestroyer = 253,
    FireHitSubmarine = 254,
    FireHitPatrolBoat = 255,
    FireSunkCarrier = 261,
    FireSunkBattleship = 262,
    FireSunkDestroyer = 263,
    FireSunkSubmarine = 264,
    FireSunkPatrolBoat = 265,
    FireYouWin = 270,

    SyntaxError = 500,
    ArgumentMissing = 501,
    SequenceError = 503,
    UnsupportedState = 504,
}

impl ResponseCode {
    pub const ALL: [ResponseCode; 17] = [
        ResponseCode::ConnectionClosing,
        ResponseCode::FireMiss,
        ResponseCode::FireHitCarrier,
        ResponseCode::FireHitBattleship,
        ResponseCode::FireHitDestroyer,
        ResponseCode::FireHitSubmarine,
        ResponseCode::FireHitPatrolBoat,
        ResponseCode::FireSunkCarrier,
        ResponseCode::FireSunkBattleship,
        ResponseCode::FireSunkDestroyer,
        ResponseCode::FireSunkSubmarine,
        ResponseCode::FireSunkPatrolBoat,
        ResponseCode::FireYouWin,
        ResponseCode::SyntaxError,
        ResponseCode::ArgumentMissing,
        ResponseCode::SequenceError,
        ResponseCode::UnsupportedState,
    ];

    pub const fn value(self) -> u16 {
        self as u16
    }

    pub fn category(self) -> Category {
        match self.value() {
            250..=299 => Category::Outcome,
            200..=249 => Category::Info,
            _ => Category::Error,
        }
    }

    pub fn is_error(self) -> bool {
        self.category() == Category::Error
    }

    pub fn default_text(self) -> &'static str {
        use ResponseCode::*;
        match self {
            ConnectionClosing => "Connection closing",
            FireMiss => "Miss",
            FireHitCarrier => "Hit Carrier",
            FireHitBattleship => "Hit Battleship",
            FireHitDestroyer => "Hit Destroyer",
            FireHitSubmarine => "Hit Submarine",
            FireHitPatrolBoat => "Hit Patrol Boat",
            FireSunkCarrier => "You sunk my Carrier",
            FireSunkBattleship => "You sunk my Battleship",
            FireSunkDestroyer => "You sunk my Destroyer",
            FireSunkSubmarine => "You sunk my Submarine",
            FireSunkPatrolBoat => "You sunk my Patrol Boat",
            FireYouWin => "You win",
            SyntaxError => "Syntax error",
            ArgumentMissing => "Argument missing",
            SequenceError => "Bad sequence of commands",
            UnsupportedState => "Command not supported in this state",
        }
    }

    pub fn hit_code(ship: ShipType) -> ResponseCode {
        match ship {
            ShipType::Carrier => ResponseCode::FireHitCarrier,
            ShipType::Battleship => ResponseCode::FireHitBattleship,
            ShipType::Destroyer => ResponseCode::FireHitDestroyer,
            ShipType::Submarine => ResponseCode::FireHitSubmarine,
            ShipType::PatrolBoat => ResponseCode::FireHitPatrolBoat,
        }
    }

    pub fn sunk_code(ship: ShipType) -> ResponseCode {
        match ship {
            ShipType::Carrier => ResponseCode::FireSunkCarrier,
            ShipType::Battleship => ResponseCode::FireSunkBattleship,
            ShipType::Destroyer => ResponseCode::FireSunkDestroyer,
            ShipType::Submarine => ResponseCode::FireSunkSubmarine,
            ShipType::PatrolBoat => ResponseCode::FireSunkPatrolBoat,
        }
    }

    /// The ship named by a hit or sunk code.
    pub fn ship_type(self) -> Result<ShipType, ResponseCodeError> {
        use ResponseCode::*;
        match self {
            FireHitCarrier | FireSunkCarrier => Ok(ShipType::Carrier),
            FireHitBattleship | FireSunkBattleship => Ok(ShipType::Battleship),
            FireHitDestroyer | FireSunkDestroyer => Ok(ShipType::Destroyer),
            FireHitSubmarine | FireSunkSubmarine => Ok(ShipType::Submarine),
            FireHitPatrolBoat | FireSunkPatrolBoat => Ok(ShipType::PatrolBoat),
            other => Err(ResponseCodeError::NotAShipCode(other.value())),
        }
    }

    /// Decode a FIRE outcome; `None` for codes outside the outcome family.
    pub fn fire_outcome(self) -> Option<FireOutcome> {
        use ResponseCode::*;
        match self {
            FireMiss => Some(FireOutcome::Miss),
            FireYouWin => Some(FireOutcome::Win),
            FireHitCarrier | FireHitBattleship | FireHitDestroyer | FireHitSubmarine
            | FireHitPatrolBoat => self.ship_type().ok().map(FireOutcome::Hit),
            FireSunkCarrier | FireSunkBattleship | FireSunkDestroyer | FireSunkSubmarine
            | FireSunkPatrolBoat => self.ship_type().ok().map(FireOutcome::Sunk),
            _ => None,
        }
    }

    /// Code reporting `outcome` to the shooter.
    pub fn for_outcome(outcome: FireOutcome) -> ResponseCode {
        match outcome {
            FireOutcome::Miss => ResponseCode::FireMiss,
            FireOutcome::Hit(t) => Self::hit_code(t),
            FireOutcome::Sunk(t) => Self::sunk_code(t),
            FireOutcome::Win => ResponseCode::FireYouWin,
        }
    }
}

impl TryFrom<u16> for ResponseCode {
    type Error = ResponseCodeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        ResponseCode::ALL
            .iter()
            .copied()
            .find(|c| c.value() == value)
            .ok_or(ResponseCodeError::UnknownCode(value))
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
