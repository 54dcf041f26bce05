use crate::ship::ShipType;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;

/// Ships every player brings to a match, in fleet order.
pub const FLEET: [ShipType; NUM_SHIPS] = [
    ShipType::Carrier,
    ShipType::Battleship,
    ShipType::Destroyer,
    ShipType::Submarine,
    ShipType::PatrolBoat,
];

/// Sum of the fleet's hit points.
pub const TOTAL_SHIP_CELLS: usize = fleet_cells(&FLEET);

const fn fleet_cells(fleet: &[ShipType]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fleet.len() {
        total += fleet[i].hit_points() as usize;
        i += 1;
    }
    total
}

/// Environment variable read by [`crate::init_logging`].
#[cfg(feature = "std")]
pub const LOG_ENV_VAR: &str = "BROADSIDE_LOG";

/// Knobs for line transports.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Upper bound on a single send.
    pub io_timeout: std::time::Duration,
    /// How long the connection may go without a line in either direction
    /// before `next_line` gives up.
    pub idle_timeout: std::time::Duration,
    /// Longest accepted line, excluding the terminator.
    pub max_line_len: usize,
}

#[cfg(feature = "std")]
impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            io_timeout: std::time::Duration::from_secs(30),
            idle_timeout: std::time::Duration::from_secs(300),
            max_line_len: 1024,
        }
    }
}
