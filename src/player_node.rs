use rand::rngs::SmallRng;

use log::{debug, info, warn};

use crate::{
    board::Board,
    error::ProtocolError,
    game::{GameState, MatchResult, Phase},
    player::Player,
    protocol::Event,
    session::{Events, Session, SessionHandle},
    transport::LineTransport,
};

/// Drives a [`Player`] through a running session: fires when it holds the
/// turn, waits on engine events otherwise, and sends QUIT after winning.
pub struct PlayerNode {
    player: Box<dyn Player>,
    handle: SessionHandle,
    events: Events,
}

impl PlayerNode {
    pub fn new(player: Box<dyn Player>, handle: SessionHandle, events: Events) -> Self {
        Self {
            player,
            handle,
            events,
        }
    }

    /// Let `player` place its fleet and start a match against a standard
    /// opponent fleet.
    pub fn setup(
        player: &mut dyn Player,
        rng: &mut SmallRng,
        local_first: bool,
    ) -> anyhow::Result<GameState> {
        let mut board = Board::new();
        player
            .place_ships(rng, &mut board)
            .map_err(|e| anyhow::anyhow!(e))?;
        let mut game = GameState::new(board, Board::shadow());
        game.start(local_first)?;
        Ok(game)
    }

    /// Run a whole match for `player` over `transport` and return the final
    /// state.
    pub async fn play<T: LineTransport>(
        mut player: Box<dyn Player>,
        mut rng: SmallRng,
        transport: T,
        local_first: bool,
    ) -> anyhow::Result<GameState> {
        let game = Self::setup(player.as_mut(), &mut rng, local_first)?;
        let (session, handle, events) = Session::new(transport, game);
        let mut node = PlayerNode::new(player, handle, events);
        let (game, ()) = tokio::try_join!(session.run(), node.run(&mut rng))?;
        Ok(game)
    }

    /// Play until the session ends. The session's own result carries any
    /// transport failure.
    pub async fn run(&mut self, rng: &mut SmallRng) -> anyhow::Result<()> {
        loop {
            let game = match self.handle.snapshot().await {
                Ok(game) => game,
                Err(_) => return Ok(()),
            };
            match game.phase() {
                Phase::Finished => {
                    if game.result() == Some(MatchResult::Won) {
                        info!("all enemy ships sunk, sending QUIT");
                        if let Err(e) = self.handle.quit().await {
                            debug!("QUIT not acknowledged: {}", e);
                        }
                    }
                    return Ok(());
                }
                Phase::InGame if game.is_locals_turn() => {
                    let Some(target) = self.player.select_target(rng, game.remote_board()) else {
                        return Err(anyhow::anyhow!("no target left to fire at"));
                    };
                    let taunt = self.player.taunt(rng);
                    match self.handle.fire(target, taunt.as_deref()).await {
                        Ok(report) => debug!("FIRE {} -> {:?}", target, report.outcome),
                        Err(e) => {
                            let Some(err) = e.downcast_ref::<ProtocolError>() else {
                                return Ok(());
                            };
                            if err.is_recoverable() || game_over(&self.handle).await {
                                warn!("FIRE {} failed: {}", target, err);
                                continue;
                            }
                            warn!("match desynchronized after FIRE {}: {}; quitting", target, err);
                            if let Err(e) = self.handle.quit().await {
                                debug!("QUIT not acknowledged: {}", e);
                            }
                            return Ok(());
                        }
                    }
                }
                _ => match self.events.recv().await {
                    Some(event) => log_event(&event),
                    None => return Ok(()),
                },
            }
        }
    }
}

async fn game_over(handle: &SessionHandle) -> bool {
    handle
        .snapshot()
        .await
        .map_or(true, |game| game.phase() == Phase::Finished)
}

fn log_event(event: &Event) {
    match event {
        Event::TakenFire { target, ship } => match ship {
            Some(s) if s.is_sunk() => info!("enemy sank our {} at {}", s.ship_type(), target),
            Some(s) => info!("enemy hit our {} at {}", s.ship_type(), target),
            None => debug!("enemy missed at {}", target),
        },
        Event::TakenFireMessage(msg) => info!("enemy says: {}", msg),
        Event::FireResponse { .. } => {}
        Event::PeerQuit => info!("opponent quit"),
        Event::ProtocolViolation(e) => warn!("protocol violation: {}", e),
    }
}
