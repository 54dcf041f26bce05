#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    cli::run_cli, init_logging, ui::render_game, AiPlayer, GameState, InMemoryTransport,
    LineTransport, PlayerNode, Session, TcpLineTransport, TransportConfig,
};

#[cfg(feature = "std")]
use clap::{Args, Parser, ValueEnum};
#[cfg(feature = "std")]
use log::info;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::net::TcpListener;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum PlayerType {
    Human,
    Ai,
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct NetOpts {
    #[arg(long, value_enum, default_value_t = PlayerType::Human)]
    player: PlayerType,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Seconds allowed for a single send.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
    /// Seconds to wait for the peer before giving up.
    #[arg(long, default_value_t = 300)]
    idle_timeout: u64,
}

#[cfg(feature = "std")]
impl NetOpts {
    fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            io_timeout: Duration::from_secs(self.timeout),
            idle_timeout: Duration::from_secs(self.idle_timeout),
            ..TransportConfig::default()
        }
    }
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against an AI on the local machine.
    Local {
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Host a game and wait for an opponent to connect. The host fires first.
    Host {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[command(flatten)]
        opts: NetOpts,
    },
    /// Join a game hosted elsewhere.
    Join {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[command(flatten)]
        opts: NetOpts,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
async fn play<T: LineTransport>(
    player: PlayerType,
    mut rng: SmallRng,
    transport: T,
    local_first: bool,
) -> anyhow::Result<GameState> {
    match player {
        PlayerType::Ai => PlayerNode::play(Box::new(AiPlayer::new()), rng, transport, local_first).await,
        PlayerType::Human => {
            // Human fleets are placed at random.
            let mut placer = AiPlayer::new();
            let game = PlayerNode::setup(&mut placer, &mut rng, local_first)?;
            let (session, handle, events) = Session::new(transport, game);
            let (game, ()) = tokio::try_join!(session.run(), run_cli(handle, events))?;
            Ok(game)
        }
    }
}

#[cfg(feature = "std")]
fn report(game: &GameState) {
    println!("{}", render_game(game));
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local { player, seed } => {
            let rng = make_rng(seed);
            let opponent_rng = SmallRng::seed_from_u64(seed.map_or_else(rand::random, |s| s.wrapping_add(1)));
            let (t1, t2) = InMemoryTransport::pair();
            let opponent = PlayerNode::play(Box::new(AiPlayer::with_taunts(0.2)), opponent_rng, t2, false);
            let (game, _) = tokio::try_join!(play(player, rng, t1, true), opponent)?;
            if matches!(player, PlayerType::Ai) {
                report(&game);
            }
        }
        Commands::Host { bind, opts } => {
            println!("Listening on {}...", bind);
            let listener = TcpListener::bind(&bind).await?;
            let (stream, addr) = listener.accept().await?;
            info!("opponent connected from {}", addr);
            let transport = TcpLineTransport::with_config(stream, opts.transport_config());
            match play(opts.player, make_rng(opts.seed), transport, true).await {
                Ok(game) => report(&game),
                Err(e) => eprintln!("Game ended with an error: {:#}", e),
            }
        }
        Commands::Join { connect, opts } => {
            println!("Connecting to {}...", connect);
            let transport = TcpLineTransport::connect(&connect, opts.transport_config()).await?;
            info!("connected to {}", connect);
            match play(opts.player, make_rng(opts.seed), transport, false).await {
                Ok(game) => report(&game),
                Err(e) => eprintln!("Game ended with an error: {:#}", e),
            }
        }
    }
    Ok(())
}
