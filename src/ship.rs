//! Ship types, orientation, and per-ship health.

use core::fmt;

use crate::bitboard::GridMask;
use crate::common::BoardError;
use crate::config::BOARD_SIZE;
use crate::coordinate::Coordinate;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// The closed set of ship classes in a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipType {
    Carrier,
    Battleship,
    Destroyer,
    Submarine,
    PatrolBoat,
}

impl ShipType {
    pub const ALL: [ShipType; 5] = [
        ShipType::Carrier,
        ShipType::Battleship,
        ShipType::Destroyer,
        ShipType::Submarine,
        ShipType::PatrolBoat,
    ];

    /// Hit points, which is also the ship's length on the grid.
    pub const fn hit_points(self) -> u8 {
        match self {
            ShipType::Carrier => 5,
            ShipType::Battleship => 4,
            ShipType::Destroyer => 3,
            ShipType::Submarine => 3,
            ShipType::PatrolBoat => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipType::Carrier => "Carrier",
            ShipType::Battleship => "Battleship",
            ShipType::Destroyer => "Destroyer",
            ShipType::Submarine => "Submarine",
            ShipType::PatrolBoat => "Patrol Boat",
        }
    }

    /// Position in [`ShipType::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Occupancy mask for this ship with its bow at `origin`.
    pub(crate) fn footprint(
        self,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<GridMask, BoardError> {
        let len = self.hit_points() as usize;
        let (row, col) = (origin.row() as usize, origin.column() as usize);
        let fits = match orientation {
            Orientation::Horizontal => col + len <= BOARD_SIZE as usize,
            Orientation::Vertical => row + len <= BOARD_SIZE as usize,
        };
        if !fits {
            return Err(BoardError::ShipOutOfBounds);
        }
        let mut mask = GridMask::new();
        for i in 0..len {
            let (r, c) = match orientation {
                Orientation::Horizontal => (row, col + i),
                Orientation::Vertical => (row + i, col),
            };
            mask.set(r, c)?;
        }
        Ok(mask)
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A ship and its remaining hit points. Sunk once health reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    ship_type: ShipType,
    health: u8,
}

impl Ship {
    pub fn new(ship_type: ShipType) -> Self {
        Self {
            ship_type,
            health: ship_type.hit_points(),
        }
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn is_sunk(&self) -> bool {
        self.health == 0
    }

    /// Take one point of damage. Returns `false`, leaving health untouched,
    /// when the ship is already sunk.
    pub(crate) fn take_hit(&mut self) -> bool {
        if self.health == 0 {
            return false;
        }
        self.health -= 1;
        true
    }

    pub(crate) fn scuttle(&mut self) {
        self.health = 0;
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{})",
            self.ship_type,
            self.health,
            self.ship_type.hit_points()
        )
    }
}
