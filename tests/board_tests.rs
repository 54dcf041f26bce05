use broadside::{Board, BoardError, Coordinate, Orientation, ShipType, ShotOutcome, FLEET, TOTAL_SHIP_CELLS};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn at(token: &str) -> Coordinate {
    Coordinate::parse(token).unwrap()
}

/// Each ship laid horizontally from column A, one per row starting at row 1.
fn stacked_board() -> Board {
    let mut board = Board::new();
    for (row, ship) in FLEET.iter().enumerate() {
        board
            .place(*ship, Coordinate::new(0, row as u8).unwrap(), Orientation::Horizontal)
            .unwrap();
    }
    board
}

#[test]
fn test_place_and_lookup() {
    let board = stacked_board();
    assert_eq!(board.ships().count(), 5);
    assert_eq!(board.ship_map().count_ones(), TOTAL_SHIP_CELLS);
    assert_eq!(board.ship_at(at("E1")).map(|s| s.ship_type()), Some(ShipType::Carrier));
    assert!(board.ship_at(at("F1")).is_none());
    assert_eq!(board.ship_at(at("B5")).map(|s| s.ship_type()), Some(ShipType::PatrolBoat));
}

#[test]
fn test_placement_errors() {
    let mut board = Board::new();
    board
        .place(ShipType::Carrier, at("A1"), Orientation::Vertical)
        .unwrap();
    assert_eq!(
        board.place(ShipType::Carrier, at("C3"), Orientation::Vertical),
        Err(BoardError::ShipAlreadyPlaced(ShipType::Carrier))
    );
    assert_eq!(
        board.place(ShipType::Battleship, at("A3"), Orientation::Horizontal),
        Err(BoardError::ShipOverlaps)
    );
    assert_eq!(
        board.place(ShipType::Battleship, at("H1"), Orientation::Horizontal),
        Err(BoardError::ShipOutOfBounds)
    );
    assert_eq!(
        board.place(ShipType::PatrolBoat, at("J10"), Orientation::Vertical),
        Err(BoardError::ShipOutOfBounds)
    );
    assert_eq!(board.ships().count(), 1);
}

#[test]
fn test_fire_hit_sink_and_all_sunk() {
    let mut board = stacked_board();
    assert_eq!(board.fire(at("J10")), Ok(ShotOutcome::Miss));
    assert_eq!(board.fire(at("A5")), Ok(ShotOutcome::Hit(ShipType::PatrolBoat)));
    assert_eq!(board.ship(ShipType::PatrolBoat).unwrap().health(), 1);
    assert_eq!(board.fire(at("B5")), Ok(ShotOutcome::Sunk(ShipType::PatrolBoat)));
    assert!(board.ship(ShipType::PatrolBoat).unwrap().is_sunk());
    assert_eq!(board.ships_afloat().count(), 4);
    assert!(!board.all_sunk());

    // Everything else goes down too.
    for coord in Coordinate::all() {
        if !board.is_shot(coord) && board.ship_at(coord).is_some() {
            board.fire(coord).unwrap();
        }
    }
    assert!(board.all_sunk());
    assert_eq!(board.hits().count_ones(), TOTAL_SHIP_CELLS);
    assert_eq!(board.wreckage().count_ones(), TOTAL_SHIP_CELLS);
}

#[test]
fn test_fire_twice_is_rejected() {
    let mut board = stacked_board();
    board.fire(at("C3")).unwrap();
    let health = board.ship(ShipType::Destroyer).unwrap().health();
    assert_eq!(board.fire(at("C3")), Err(BoardError::AlreadyShot));
    assert_eq!(board.ship(ShipType::Destroyer).unwrap().health(), health);
    assert_eq!(board.shot_count(), 1);
}

#[test]
fn test_empty_board_is_not_all_sunk() {
    assert!(!Board::new().all_sunk());
}

#[test]
fn test_shadow_board_tracks_reports() {
    let mut shadow = Board::shadow();
    assert!(shadow.is_shadow());
    assert_eq!(shadow.ships_afloat().count(), 5);

    assert_eq!(shadow.register_shot(at("A1"), None), Ok(ShotOutcome::Miss));
    assert_eq!(
        shadow.register_shot(at("B2"), Some(ShipType::PatrolBoat)),
        Ok(ShotOutcome::Hit(ShipType::PatrolBoat))
    );
    assert_eq!(
        shadow.register_shot(at("B3"), Some(ShipType::PatrolBoat)),
        Ok(ShotOutcome::Sunk(ShipType::PatrolBoat))
    );
    assert_eq!(
        shadow.register_shot(at("B4"), Some(ShipType::PatrolBoat)),
        Err(BoardError::ShipAlreadySunk(ShipType::PatrolBoat))
    );
    assert!(!shadow.is_shot(at("B4")));
    assert_eq!(
        shadow.register_shot(at("B2"), None),
        Err(BoardError::AlreadyShot)
    );
    assert_eq!(shadow.misses().count_ones(), 1);
    assert_eq!(shadow.wreckage().count_ones(), 2);
    assert!(shadow.ship_at(at("B2")).is_none());
}

#[test]
fn test_shadow_and_authoritative_roles_do_not_mix() {
    let mut shadow = Board::shadow();
    assert_eq!(
        shadow.place(ShipType::Carrier, at("A1"), Orientation::Horizontal),
        Err(BoardError::ShadowBoard)
    );
    assert_eq!(shadow.fire(at("A1")), Err(BoardError::ShadowBoard));

    let mut board = stacked_board();
    assert_eq!(
        board.register_shot(at("A1"), None),
        Err(BoardError::AuthoritativeBoard)
    );
}

#[test]
fn test_register_sinking_scuttles_remaining_health() {
    let mut shadow = Board::shadow_of(&[ShipType::Carrier]);
    shadow.register_shot(at("A1"), Some(ShipType::Carrier)).unwrap();
    shadow.register_sinking(at("A2"), ShipType::Carrier).unwrap();
    assert!(shadow.all_sunk());
    assert_eq!(shadow.outcome_at(at("A2")), Some(ShotOutcome::Sunk(ShipType::Carrier)));
    assert_eq!(
        shadow.register_sinking(at("A3"), ShipType::Carrier),
        Err(BoardError::ShipAlreadySunk(ShipType::Carrier))
    );
    assert_eq!(
        shadow.register_shot(at("A4"), Some(ShipType::Destroyer)),
        Err(BoardError::NotInFleet(ShipType::Destroyer))
    );
}

#[test]
fn test_random_fleet_placement() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut board = Board::new();
    board.place_fleet_randomly(&mut rng).unwrap();
    assert_eq!(board.ships().count(), FLEET.len());
    assert_eq!(board.ship_map().count_ones(), TOTAL_SHIP_CELLS);
}
