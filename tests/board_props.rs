use broadside::{Board, BoardError, Coordinate, ShipType, ShotOutcome, BOARD_SIZE, FLEET, TOTAL_SHIP_CELLS};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    board.place_fleet_randomly(&mut rng).unwrap();
    let shots = rng.random_range(0..(BOARD_SIZE as usize * BOARD_SIZE as usize));
    for _ in 0..shots {
        let c = Coordinate::new(rng.random_range(0..BOARD_SIZE), rng.random_range(0..BOARD_SIZE)).unwrap();
        let _ = board.fire(c);
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_fleet_never_overlaps(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        board.place_fleet_randomly(&mut rng).unwrap();
        prop_assert_eq!(board.ship_map().count_ones(), TOTAL_SHIP_CELLS);
    }

    #[test]
    fn fire_is_not_repeatable(seed in any::<u64>(), col in 0..BOARD_SIZE, row in 0..BOARD_SIZE) {
        let mut board = random_board(seed);
        let target = Coordinate::new(col, row).unwrap();
        let _ = board.fire(target);
        let after = board.clone();
        prop_assert!(board.fire(target).is_err());
        prop_assert_eq!(board, after);
    }

    #[test]
    fn health_matches_hits(seed in any::<u64>()) {
        let board = random_board(seed);
        let damage: usize = board
            .ships()
            .map(|s| (s.ship_type().hit_points() - s.health()) as usize)
            .sum();
        prop_assert_eq!(damage, board.hits().count_ones());
        let sunk = board.shots().filter(|(_, o)| matches!(o, ShotOutcome::Sunk(_))).count();
        prop_assert_eq!(sunk, board.ships().filter(|s| s.is_sunk()).count());
    }

    #[test]
    fn first_shot_changes_only_its_cell(seed in any::<u64>(), col in 0..BOARD_SIZE, row in 0..BOARD_SIZE) {
        let mut board = random_board(seed);
        let target = Coordinate::new(col, row).unwrap();
        prop_assume!(!board.is_shot(target));
        let before = board.clone();

        let outcome = board.fire(target).unwrap();
        prop_assert_eq!(board.shot_count(), before.shot_count() + 1);
        prop_assert_eq!(board.outcome_at(target), Some(outcome));
        for c in Coordinate::all().filter(|c| *c != target) {
            prop_assert_eq!(board.outcome_at(c), before.outcome_at(c));
        }
        let struck = before.ship_at(target).map(|s| s.ship_type());
        prop_assert_eq!(outcome.ship_type(), struck);
        for ship in before.ships() {
            let now = board.ship(ship.ship_type()).unwrap().health();
            let expected = if Some(ship.ship_type()) == struck { ship.health() - 1 } else { ship.health() };
            prop_assert_eq!(now, expected);
        }
    }

    #[test]
    fn shadow_rejects_duplicate_reports(
        col in 0..BOARD_SIZE,
        row in 0..BOARD_SIZE,
        report in proptest::option::of(0..FLEET.len()),
        again in proptest::option::of(0..FLEET.len()),
    ) {
        let target = Coordinate::new(col, row).unwrap();
        let mut shadow = Board::shadow();
        let first: Option<ShipType> = report.map(|i| FLEET[i]);
        shadow.register_shot(target, first).unwrap();
        let after = shadow.clone();

        let second: Option<ShipType> = again.map(|i| FLEET[i]);
        prop_assert_eq!(shadow.register_shot(target, second), Err(BoardError::AlreadyShot));
        prop_assert_eq!(shadow, after);
    }
}

#[test]
fn test_total_ship_cells_follows_fleet() {
    let summed: usize = FLEET.iter().map(|t| t.hit_points() as usize).sum();
    assert_eq!(TOTAL_SHIP_CELLS, summed);
    assert_eq!(TOTAL_SHIP_CELLS, 17);
}
