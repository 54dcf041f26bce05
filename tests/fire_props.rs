use broadside::{Board, Coordinate, Dispatcher, GameState, Phase};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::{rngs::SmallRng, SeedableRng};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn win_is_reported_only_for_the_last_ship(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        board.place_fleet_randomly(&mut rng).unwrap();
        let mut game = GameState::new(board, Board::shadow());
        game.start(false).unwrap();
        let mut d = Dispatcher::standard();

        let mut incoming: Vec<Coordinate> = Coordinate::all().collect();
        incoming.shuffle(&mut rng);
        let mut outgoing = Coordinate::all();

        let mut won = false;
        for target in incoming {
            let afloat = game.local_board().ships_afloat().count();
            let last_point = game.local_board().ship_at(target).map(|s| s.health()) == Some(1);
            let fx = d.dispatch(&mut game, &format!("FIRE {}", target));
            prop_assert_eq!(fx.outbound.len(), 1);

            let expect_win = afloat == 1 && last_point;
            prop_assert_eq!(fx.outbound[0].starts_with("270 "), expect_win, "{} -> {}", target, fx.outbound[0]);
            prop_assert_eq!(game.phase() == Phase::Finished, expect_win);
            if expect_win {
                won = true;
                break;
            }

            // Hand the turn back with a missed shot of our own.
            let ours = outgoing.next().unwrap();
            d.issue(&mut game, &format!("FIRE {}", ours)).unwrap();
            let fx = d.dispatch(&mut game, "250 Miss");
            prop_assert!(fx.completion.unwrap().result.is_ok());
        }
        prop_assert!(won);
        prop_assert!(game.local_board().all_sunk());
    }
}
