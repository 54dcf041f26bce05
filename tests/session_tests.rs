use broadside::{
    AiPlayer, Board, Coordinate, Event, FireOutcome, GameState, InMemoryTransport, LineTransport,
    MatchResult, Orientation, Phase, PlayerNode, ProtocolError, Session, FLEET,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::time::{timeout, Duration};

fn at(token: &str) -> Coordinate {
    Coordinate::parse(token).unwrap()
}

fn started_game(local_first: bool) -> GameState {
    let mut board = Board::new();
    for (row, ship) in FLEET.iter().enumerate() {
        board
            .place(*ship, Coordinate::new(0, row as u8).unwrap(), Orientation::Horizontal)
            .unwrap();
    }
    let mut game = GameState::new(board, Board::shadow());
    game.start(local_first).unwrap();
    game
}

#[tokio::test]
async fn test_fire_and_quit_against_scripted_peer() -> anyhow::Result<()> {
    let (local, mut peer) = InMemoryTransport::pair();
    let (session, handle, mut events) = Session::new(local, started_game(true));
    let task = tokio::spawn(session.run());

    let fire = {
        let handle = handle.clone();
        tokio::spawn(async move { handle.fire(at("B4"), Some("Incoming!")).await })
    };
    assert_eq!(peer.next_line().await?, "FIRE B4 Incoming!");
    peer.send_line("250 Miss").await?;
    let report = fire.await??;
    assert_eq!(report.outcome, FireOutcome::Miss);
    assert_eq!(events.recv().await, Some(Event::FireResponse { target: at("B4"), ship: None }));

    peer.send_line("FIRE A1").await?;
    assert_eq!(peer.next_line().await?, "251 Hit Carrier");
    match events.recv().await {
        Some(Event::TakenFire { target, ship: Some(ship) }) => {
            assert_eq!(target, at("A1"));
            assert_eq!(ship.health(), 4);
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert!(handle.snapshot().await?.is_locals_turn());

    let quit = {
        let handle = handle.clone();
        tokio::spawn(async move { handle.quit().await })
    };
    assert_eq!(peer.next_line().await?, "QUIT");
    peer.send_line("221 Connection closing").await?;
    quit.await??;

    let game = task.await??;
    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(game.result(), Some(MatchResult::Abandoned));
    Ok(())
}

#[tokio::test]
async fn test_peer_quit_ends_session() -> anyhow::Result<()> {
    let (local, mut peer) = InMemoryTransport::pair();
    let (session, _handle, mut events) = Session::new(local, started_game(false));
    let task = tokio::spawn(session.run());

    peer.send_line("QUIT").await?;
    assert_eq!(peer.next_line().await?, "221 Connection closing");
    assert_eq!(events.recv().await, Some(Event::PeerQuit));
    let game = task.await??;
    assert_eq!(game.phase(), Phase::Finished);
    // Our side closed its end.
    assert!(peer.next_line().await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_local_refusal_is_a_protocol_error() -> anyhow::Result<()> {
    let (local, mut peer) = InMemoryTransport::pair();
    let (session, handle, _events) = Session::new(local, started_game(false));
    let task = tokio::spawn(session.run());

    let err = handle.fire(at("A1"), None).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProtocolError>(),
        Some(ProtocolError::Sequence { .. })
    ));
    let err = handle.command("LAUNCH A1").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProtocolError>(),
        Some(ProtocolError::UnknownCommand(_))
    ));

    // Nothing went out on the wire.
    peer.close().await?;
    assert!(task.await?.is_err());
    Ok(())
}

#[tokio::test]
async fn test_disconnect_mid_match_is_an_error() -> anyhow::Result<()> {
    let (local, peer) = InMemoryTransport::pair();
    let (session, handle, _events) = Session::new(local, started_game(true));
    let task = tokio::spawn(session.run());
    drop(peer);
    assert!(task.await?.is_err());
    assert!(handle.snapshot().await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_garbage_from_peer_is_answered_without_state_change() -> anyhow::Result<()> {
    let (local, mut peer) = InMemoryTransport::pair();
    let (session, handle, mut events) = Session::new(local, started_game(false));
    let task = tokio::spawn(session.run());

    peer.send_line("HELLO there").await?;
    assert!(peer.next_line().await?.starts_with("500 "));
    peer.send_line("FIRE").await?;
    assert!(peer.next_line().await?.starts_with("501 "));
    peer.send_line("270 You win").await?;
    assert!(matches!(events.recv().await, Some(Event::ProtocolViolation(_))));

    let game = handle.snapshot().await?;
    assert_eq!(game.phase(), Phase::InGame);
    assert!(!game.is_locals_turn());
    assert_eq!(game.local_board().shot_count(), 0);

    peer.send_line("QUIT").await?;
    assert_eq!(peer.next_line().await?, "221 Connection closing");
    task.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ai_vs_ai_over_in_memory_transport() -> anyhow::Result<()> {
    let (t1, t2) = InMemoryTransport::pair();
    let p1 = PlayerNode::play(Box::new(AiPlayer::new()), SmallRng::seed_from_u64(1), t1, true);
    let p2 = PlayerNode::play(Box::new(AiPlayer::with_taunts(0.5)), SmallRng::seed_from_u64(2), t2, false);
    let (g1, g2) = timeout(Duration::from_secs(30), async { tokio::try_join!(p1, p2) }).await??;

    let results = (g1.result(), g2.result());
    assert!(
        results == (Some(MatchResult::Won), Some(MatchResult::Lost))
            || results == (Some(MatchResult::Lost), Some(MatchResult::Won)),
        "unexpected results {:?}",
        results
    );
    // Both sides agree on how many shots were fired at each fleet.
    assert_eq!(g1.remote_board().shot_count(), g2.local_board().shot_count());
    assert_eq!(g2.remote_board().shot_count(), g1.local_board().shot_count());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_node_quits_when_peer_rejects_its_fire() -> anyhow::Result<()> {
    let (local, mut peer) = InMemoryTransport::pair();
    let (session, handle, events) = Session::new(local, started_game(true));
    let mut node = PlayerNode::new(Box::new(AiPlayer::new()), handle, events);
    let mut rng = SmallRng::seed_from_u64(7);

    let script = tokio::spawn(async move {
        let fire = peer.next_line().await?;
        assert!(fire.starts_with("FIRE "), "got {}", fire);
        peer.send_line("503 Bad sequence of commands").await?;
        assert_eq!(peer.next_line().await?, "QUIT");
        peer.send_line("221 Connection closing").await?;
        anyhow::Ok(())
    });

    let (game, ()) = timeout(Duration::from_secs(5), async {
        tokio::try_join!(session.run(), node.run(&mut rng))
    })
    .await??;
    script.await??;
    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(game.result(), Some(MatchResult::Abandoned));
    assert_eq!(game.remote_board().shot_count(), 0);
    Ok(())
}
