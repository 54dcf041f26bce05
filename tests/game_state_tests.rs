use broadside::{Board, GameState, MatchResult, Phase, ProtocolError, ResponseCode};

#[test]
fn test_phase_transitions() {
    let mut game = GameState::new(Board::new(), Board::shadow());
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.result(), None);

    game.start(true).unwrap();
    assert_eq!(game.phase(), Phase::InGame);
    assert!(game.is_locals_turn());
    assert!(game.start(false).is_err());

    assert!(game.finish());
    assert!(!game.finish());
    assert_eq!(game.result(), Some(MatchResult::Abandoned));
}

#[test]
fn test_turn_errors_name_the_owner() {
    let mut game = GameState::new(Board::new(), Board::shadow());
    game.start(false).unwrap();
    let err = game.require_turn(true, "FIRE").unwrap_err();
    assert_eq!(
        err.to_string(),
        "FIRE: out of turn, it is the remote player's turn"
    );
    assert_eq!(err.code(), ResponseCode::SequenceError);
    assert!(game.require_turn(false, "FIRE").is_ok());
}

#[test]
fn test_error_codes() {
    assert_eq!(ProtocolError::syntax("FIRE", "bad").code(), ResponseCode::SyntaxError);
    assert_eq!(ProtocolError::argument_missing("FIRE").code(), ResponseCode::ArgumentMissing);
    assert_eq!(ProtocolError::UnknownCommand("X".into()).code(), ResponseCode::SyntaxError);
    assert!(ProtocolError::argument_missing("FIRE").is_recoverable());
    assert!(!ProtocolError::sequence("FIRE", "late").is_recoverable());
}
