use broadside::{AiPlayer, GameState, InMemoryTransport, PlayerNode};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn summary(game: &GameState) -> serde_json::Value {
    json!({
        "result": game.result(),
        "shots_fired": game.remote_board().shot_count(),
        "shots_taken": game.local_board().shot_count(),
        "ships_left": game.local_board().ships_afloat().count(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    broadside::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let (t1, t2) = InMemoryTransport::pair();
    let p1 = PlayerNode::play(
        Box::new(AiPlayer::new()),
        SmallRng::seed_from_u64(seed1),
        t1,
        true,
    );
    let p2 = PlayerNode::play(
        Box::new(AiPlayer::new()),
        SmallRng::seed_from_u64(seed2),
        t2,
        false,
    );
    let (g1, g2) = tokio::try_join!(p1, p2)?;

    let winner = if g1.remote_board().all_sunk() {
        Some("player1")
    } else if g2.remote_board().all_sunk() {
        Some("player2")
    } else {
        None
    };

    let result = json!({
        "player1": summary(&g1),
        "player2": summary(&g2),
        "winner": winner,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
