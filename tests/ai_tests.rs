use broadside::{calc_pdf, select_target, AiPlayer, Board, Coordinate, Player, ShipType};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn at(token: &str) -> Coordinate {
    Coordinate::parse(token).unwrap()
}

#[test]
fn test_pdf_is_normalized_and_skips_shots() {
    let mut shadow = Board::shadow();
    shadow.register_shot(at("A1"), None).unwrap();
    shadow.register_shot(at("E5"), Some(ShipType::Carrier)).unwrap();
    let pdf = calc_pdf(&shadow);
    let total: f64 = pdf.iter().flatten().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert_eq!(pdf[0][0], 0.0);
    assert_eq!(pdf[4][4], 0.0);
}

#[test]
fn test_pdf_leans_toward_open_hits() {
    let mut shadow = Board::shadow();
    shadow.register_shot(at("E5"), Some(ShipType::Carrier)).unwrap();
    let pdf = calc_pdf(&shadow);
    // Neighbours of a hit outweigh a far corner.
    assert!(pdf[4][5] > pdf[9][9]);
    assert!(pdf[3][4] > pdf[0][9]);
}

#[test]
fn test_select_target_never_repeats() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut shadow = Board::shadow();
    for _ in 0..100 {
        let target = select_target(&shadow, &mut rng).unwrap();
        assert!(!shadow.is_shot(target));
        shadow.register_shot(target, None).unwrap();
    }
    assert!(select_target(&shadow, &mut rng).is_none());
}

#[test]
fn test_ai_player_places_full_fleet_and_taunts() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut ai = AiPlayer::new();
    let mut board = Board::new();
    ai.place_ships(&mut rng, &mut board).unwrap();
    assert_eq!(board.ships().count(), 5);
    assert!(ai.taunt(&mut rng).is_none());

    let mut loud = AiPlayer::with_taunts(1.0);
    assert!(loud.taunt(&mut rng).is_some());
}
