//! Board errors and shot outcomes shared by the board and the protocol engine.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::ship::ShipType;

/// What a single shot did to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    Miss,
    /// Hit a ship that still has health left.
    Hit(ShipType),
    /// Hit that brought the ship to zero health.
    Sunk(ShipType),
}

impl ShotOutcome {
    /// The ship struck, if any.
    pub fn ship_type(&self) -> Option<ShipType> {
        match self {
            ShotOutcome::Miss => None,
            ShotOutcome::Hit(t) | ShotOutcome::Sunk(t) => Some(*t),
        }
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotOutcome::Miss => f.write_str("miss"),
            ShotOutcome::Hit(t) => write!(f, "hit on {}", t),
            ShotOutcome::Sunk(t) => write!(f, "{} sunk", t),
        }
    }
}

/// Errors returned by board operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("bitboard error: {0}")]
    BitBoard(#[from] BitBoardError),
    #[error("{0} is already placed on the board")]
    ShipAlreadyPlaced(ShipType),
    #[error("ship placement overlaps with another ship")]
    ShipOverlaps,
    #[error("ship placement is out of bounds")]
    ShipOutOfBounds,
    #[error("unable to find a free spot for {0}")]
    UnableToPlaceShip(ShipType),
    #[error("positions on a shadow board are unknown")]
    ShadowBoard,
    #[error("an authoritative board scores shots against its own ships")]
    AuthoritativeBoard,
    #[error("{0} is not part of this fleet")]
    NotInFleet(ShipType),
    #[error("already fired upon")]
    AlreadyShot,
    #[error("{0} is already sunk")]
    ShipAlreadySunk(ShipType),
}
