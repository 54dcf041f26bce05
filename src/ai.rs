// Probability-based targeting over a shadow board.
// no_std friendly: fixed-size matrices, libm for powers.

use rand::Rng;

use crate::{
    bitboard::GridMask,
    board::Board,
    config::BOARD_SIZE,
    coordinate::Coordinate,
    ship::Orientation,
};

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// Weight multiplier per known hit a candidate placement covers.
const HIT_BIAS: f64 = 10.0;

pub type Pdf = [[f64; GRID_SIZE]; GRID_SIZE];

/// Relative likelihood that each unshot cell holds a ship segment, given
/// what the shadow board has learned so far. Hits on ships still afloat pull
/// probability toward them; misses and cells of sunk ships block
/// placements. Indexed `[row][col]`, normalized to sum to 1.
pub fn calc_pdf(shadow: &Board) -> Pdf {
    let misses = shadow.misses();
    let wreckage = shadow.wreckage();
    let hits = shadow.hits();
    let blocked = misses | wreckage;
    let open_hit = |r: usize, c: usize| {
        hits.get(r, c).unwrap_or(false) && !wreckage.get(r, c).unwrap_or(false)
    };

    let mut matrix = [[0.0f64; GRID_SIZE]; GRID_SIZE];
    for ship in shadow.ships_afloat() {
        let len = ship.ship_type().hit_points() as usize;
        for orient in [Orientation::Horizontal, Orientation::Vertical] {
            let (rows, cols) = match orient {
                Orientation::Horizontal => (GRID_SIZE, GRID_SIZE - len + 1),
                Orientation::Vertical => (GRID_SIZE - len + 1, GRID_SIZE),
            };
            for r in 0..rows {
                for c in 0..cols {
                    let cell = |k: usize| match orient {
                        Orientation::Horizontal => (r, c + k),
                        Orientation::Vertical => (r + k, c),
                    };
                    if (0..len).any(|k| {
                        let (rr, cc) = cell(k);
                        blocked.get(rr, cc).unwrap_or(true)
                    }) {
                        continue;
                    }
                    let n_hits = (0..len)
                        .filter(|&k| {
                            let (rr, cc) = cell(k);
                            open_hit(rr, cc)
                        })
                        .count();
                    let weight = libm::pow(HIT_BIAS, n_hits as f64);
                    for k in 0..len {
                        let (rr, cc) = cell(k);
                        if !hits.get(rr, cc).unwrap_or(true) {
                            matrix[rr][cc] += weight;
                        }
                    }
                }
            }
        }
    }

    normalize(matrix, hits | misses)
}

fn normalize(mut matrix: Pdf, shot: GridMask) -> Pdf {
    let total: f64 = matrix.iter().flatten().sum();
    if total > 0.0 {
        matrix.iter_mut().flatten().for_each(|v| *v /= total);
        return matrix;
    }
    // Nothing left to reason about; spread evenly over unshot cells.
    let open = GRID_SIZE * GRID_SIZE - shot.count_ones();
    if open == 0 {
        return matrix;
    }
    let uniform = 1.0 / open as f64;
    for (r, row) in matrix.iter_mut().enumerate() {
        for (c, v) in row.iter_mut().enumerate() {
            if !shot.get(r, c).unwrap_or(true) {
                *v = uniform;
            }
        }
    }
    matrix
}

/// Sample a `(row, col)` from `pdf`. Lower temperatures favor the most
/// likely cells.
pub fn sample_pdf<R: Rng + ?Sized>(pdf: &Pdf, temperature: f64, rng: &mut R) -> (usize, usize) {
    let mut adjusted = [[0.0f64; GRID_SIZE]; GRID_SIZE];
    let mut total = 0.0;
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            let v = libm::pow(pdf[r][c], 1.0 / temperature);
            adjusted[r][c] = v;
            total += v;
        }
    }
    if total <= 0.0 {
        return (rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE));
    }
    let threshold: f64 = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            cumulative += adjusted[r][c];
            if threshold < cumulative {
                return (r, c);
            }
        }
    }
    (GRID_SIZE - 1, GRID_SIZE - 1)
}

/// Pick the next unshot cell to fire at on `shadow`; `None` once every cell
/// has been shot.
pub fn select_target<R: Rng + ?Sized>(shadow: &Board, rng: &mut R) -> Option<Coordinate> {
    let pdf = calc_pdf(shadow);
    let (r, c) = sample_pdf(&pdf, 0.5, rng);
    Coordinate::new(c as u8, r as u8)
        .filter(|t| !shadow.is_shot(*t))
        .or_else(|| Coordinate::all().find(|t| !shadow.is_shot(*t)))
}
