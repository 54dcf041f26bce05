//! Per-player board: fleet health, ship placement, and the shot record.
//!
//! A board is either *authoritative* (the local player's own board, ship
//! positions known) or a *shadow* (the opponent's board as reconstructed from
//! response codes: fleet and health known, positions never). The shot record
//! is append-only and every coordinate may appear in it at most once.

use alloc::collections::BTreeMap;
use core::fmt;
use rand::Rng;

use crate::bitboard::GridMask;
use crate::common::{BoardError, ShotOutcome};
use crate::config::{BOARD_SIZE, FLEET, NUM_SHIPS};
use crate::coordinate::Coordinate;
use crate::ship::{Orientation, Ship, ShipType};

const PLACEMENT_ATTEMPTS: usize = 100;

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    shadow: bool,
    fleet: [Option<Ship>; NUM_SHIPS],
    footprints: [Option<GridMask>; NUM_SHIPS],
    ship_map: GridMask,
    shots: BTreeMap<Coordinate, ShotOutcome>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty authoritative board. Ships join the fleet as they are placed.
    pub fn new() -> Self {
        Self {
            shadow: false,
            fleet: [None; NUM_SHIPS],
            footprints: [None; NUM_SHIPS],
            ship_map: GridMask::new(),
            shots: BTreeMap::new(),
        }
    }

    /// Shadow of an opponent carrying the standard fleet.
    pub fn shadow() -> Self {
        Self::shadow_of(&FLEET)
    }

    /// Shadow of an opponent carrying exactly `ships`.
    pub fn shadow_of(ships: &[ShipType]) -> Self {
        let mut board = Self::new();
        board.shadow = true;
        for &t in ships {
            board.fleet[t.index()] = Some(Ship::new(t));
        }
        board
    }

    pub fn is_shadow(&self) -> bool {
        self.shadow
    }

    /// Place a ship with its bow at `origin`.
    pub fn place(
        &mut self,
        ship_type: ShipType,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if self.shadow {
            return Err(BoardError::ShadowBoard);
        }
        if self.fleet[ship_type.index()].is_some() {
            return Err(BoardError::ShipAlreadyPlaced(ship_type));
        }
        let mask = ship_type.footprint(origin, orientation)?;
        if !(self.ship_map & mask).is_empty() {
            return Err(BoardError::ShipOverlaps);
        }
        self.ship_map = self.ship_map | mask;
        self.footprints[ship_type.index()] = Some(mask);
        self.fleet[ship_type.index()] = Some(Ship::new(ship_type));
        Ok(())
    }

    /// A random legal spot for `ship_type` given the ships already placed.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship_type: ShipType,
    ) -> Result<(Coordinate, Orientation), BoardError> {
        let len = ship_type.hit_points();
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_col, max_row) = match orientation {
                Orientation::Horizontal => (BOARD_SIZE - len, BOARD_SIZE - 1),
                Orientation::Vertical => (BOARD_SIZE - 1, BOARD_SIZE - len),
            };
            let origin = Coordinate::new(rng.random_range(0..=max_col), rng.random_range(0..=max_row))
                .ok_or(BoardError::ShipOutOfBounds)?;
            let mask = ship_type.footprint(origin, orientation)?;
            if (self.ship_map & mask).is_empty() {
                return Ok((origin, orientation));
            }
        }
        Err(BoardError::UnableToPlaceShip(ship_type))
    }

    /// Place every ship of the standard fleet that is not yet on the board.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        for t in FLEET {
            if self.fleet[t.index()].is_some() {
                continue;
            }
            let (origin, orientation) = self.random_placement(rng, t)?;
            self.place(t, origin, orientation)?;
        }
        Ok(())
    }

    pub fn ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.fleet.iter().flatten()
    }

    pub fn ship(&self, ship_type: ShipType) -> Option<&Ship> {
        self.fleet[ship_type.index()].as_ref()
    }

    pub fn ships_afloat(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.ships().filter(|s| !s.is_sunk())
    }

    /// Whether a fleet exists and none of it has health left.
    pub fn all_sunk(&self) -> bool {
        self.ships().next().is_some() && self.ships_afloat().next().is_none()
    }

    /// The ship occupying `coord`. Always `None` on a shadow board.
    pub fn ship_at(&self, coord: Coordinate) -> Option<&Ship> {
        let idx = self
            .footprints
            .iter()
            .position(|m| m.is_some_and(|m| m.contains(coord)))?;
        self.fleet[idx].as_ref()
    }

    pub fn is_shot(&self, coord: Coordinate) -> bool {
        self.shots.contains_key(&coord)
    }

    pub fn outcome_at(&self, coord: Coordinate) -> Option<ShotOutcome> {
        self.shots.get(&coord).copied()
    }

    /// Shot record in row-major order.
    pub fn shots(&self) -> impl Iterator<Item = (Coordinate, ShotOutcome)> + '_ {
        self.shots.iter().map(|(c, o)| (*c, *o))
    }

    pub fn shot_count(&self) -> usize {
        self.shots.len()
    }

    /// Take an opponent's shot on this authoritative board.
    pub fn fire(&mut self, target: Coordinate) -> Result<ShotOutcome, BoardError> {
        if self.shadow {
            return Err(BoardError::ShadowBoard);
        }
        if self.is_shot(target) {
            return Err(BoardError::AlreadyShot);
        }
        let outcome = match self
            .footprints
            .iter()
            .position(|m| m.is_some_and(|m| m.contains(target)))
        {
            None => ShotOutcome::Miss,
            Some(idx) => {
                let ship = self.fleet[idx].as_mut().ok_or(BoardError::ShipOverlaps)?;
                ship.take_hit();
                if ship.is_sunk() {
                    ShotOutcome::Sunk(ship.ship_type())
                } else {
                    ShotOutcome::Hit(ship.ship_type())
                }
            }
        };
        self.shots.insert(target, outcome);
        Ok(outcome)
    }

    /// Record on a shadow board what the opponent reported for `target`:
    /// a miss, or one point of damage to `ship`.
    pub fn register_shot(
        &mut self,
        target: Coordinate,
        ship: Option<ShipType>,
    ) -> Result<ShotOutcome, BoardError> {
        if !self.shadow {
            return Err(BoardError::AuthoritativeBoard);
        }
        if self.is_shot(target) {
            return Err(BoardError::AlreadyShot);
        }
        let outcome = match ship {
            None => ShotOutcome::Miss,
            Some(t) => {
                let entry = self.fleet[t.index()]
                    .as_mut()
                    .ok_or(BoardError::NotInFleet(t))?;
                if !entry.take_hit() {
                    return Err(BoardError::ShipAlreadySunk(t));
                }
                if entry.is_sunk() {
                    ShotOutcome::Sunk(t)
                } else {
                    ShotOutcome::Hit(t)
                }
            }
        };
        self.shots.insert(target, outcome);
        Ok(outcome)
    }

    /// Record on a shadow board that `target` sank `ship` outright.
    pub fn register_sinking(&mut self, target: Coordinate, ship: ShipType) -> Result<(), BoardError> {
        if !self.shadow {
            return Err(BoardError::AuthoritativeBoard);
        }
        if self.is_shot(target) {
            return Err(BoardError::AlreadyShot);
        }
        let entry = self.fleet[ship.index()]
            .as_mut()
            .ok_or(BoardError::NotInFleet(ship))?;
        if entry.is_sunk() {
            return Err(BoardError::ShipAlreadySunk(ship));
        }
        entry.scuttle();
        self.shots.insert(target, ShotOutcome::Sunk(ship));
        Ok(())
    }

    /// Occupancy of all placed ships.
    pub fn ship_map(&self) -> GridMask {
        self.ship_map
    }

    /// Cells where a shot struck a ship.
    pub fn hits(&self) -> GridMask {
        self.mask_where(|o| !matches!(o, ShotOutcome::Miss))
    }

    pub fn misses(&self) -> GridMask {
        self.mask_where(|o| matches!(o, ShotOutcome::Miss))
    }

    /// Cells whose recorded hit belongs to a ship that has since sunk.
    pub fn wreckage(&self) -> GridMask {
        self.mask_where(|o| {
            o.ship_type()
                .and_then(|t| self.ship(t))
                .is_some_and(|s| s.is_sunk())
        })
    }

    fn mask_where(&self, pred: impl Fn(&ShotOutcome) -> bool) -> GridMask {
        let mut mask = GridMask::new();
        for (coord, outcome) in self.shots.iter() {
            if pred(outcome) {
                // Coordinates are always on the grid.
                let _ = mask.insert(*coord);
            }
        }
        mask
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("shadow", &self.shadow)
            .field("fleet", &self.fleet)
            .field("shots", &self.shots)
            .finish()
    }
}
