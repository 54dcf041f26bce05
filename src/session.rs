//! Async driver binding a [`Dispatcher`] and a [`GameState`] to a
//! [`LineTransport`].
//!
//! A session is a single task. It races the next inbound line against local
//! requests from [`SessionHandle`]s, so every handler invocation for the
//! connection is serialized without locks. Engine events are forwarded on
//! an unbounded channel.

use std::collections::VecDeque;

use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot};

use crate::command::{fire, quit, FireReport, Reply};
use crate::coordinate::Coordinate;
use crate::dispatcher::Dispatcher;
use crate::error::ProtocolError;
use crate::game::{GameState, Phase};
use crate::protocol::{command_line, Event};
use crate::transport::LineTransport;

/// Receiving end of a session's event stream.
pub type Events = mpsc::UnboundedReceiver<Event>;

const REQUEST_QUEUE: usize = 16;

type ReplySender = oneshot::Sender<Result<Reply, ProtocolError>>;

enum Request {
    Command { line: String, reply: ReplySender },
    Snapshot { reply: oneshot::Sender<GameState> },
}

pub struct Session<T: LineTransport> {
    transport: T,
    dispatcher: Dispatcher,
    game: GameState,
    requests: mpsc::Receiver<Request>,
    events: mpsc::UnboundedSender<Event>,
    /// Callers waiting on a completion, oldest first.
    pending: VecDeque<(&'static str, ReplySender)>,
}

impl<T: LineTransport> Session<T> {
    /// Session with FIRE and QUIT registered.
    pub fn new(transport: T, game: GameState) -> (Self, SessionHandle, Events) {
        Self::with_dispatcher(transport, Dispatcher::standard(), game)
    }

    pub fn with_dispatcher(
        transport: T,
        dispatcher: Dispatcher,
        game: GameState,
    ) -> (Self, SessionHandle, Events) {
        let (req_tx, req_rx) = mpsc::channel(REQUEST_QUEUE);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let session = Self {
            transport,
            dispatcher,
            game,
            requests: req_rx,
            events: event_tx,
            pending: VecDeque::new(),
        };
        (session, SessionHandle { requests: req_tx }, event_rx)
    }

    /// Serve the connection until either side quits or the transport fails.
    /// Returns the final match state.
    ///
    /// A transport failure after the match has finished ends the session
    /// normally; before that it is an error.
    pub async fn run(mut self) -> anyhow::Result<GameState> {
        let mut handles_open = true;
        loop {
            tokio::select! {
                line = self.transport.next_line() => {
                    let line = match line {
                        Ok(line) => line,
                        Err(e) if self.game.phase() == Phase::Finished => {
                            debug!("transport ended after match: {}", e);
                            break;
                        }
                        Err(e) => return Err(e.context("connection lost during match")),
                    };
                    if self.handle_line(&line).await? {
                        break;
                    }
                }
                request = self.requests.recv(), if handles_open => match request {
                    Some(request) => self.handle_request(request).await?,
                    None => handles_open = false,
                },
            }
        }
        Ok(self.game)
    }

    /// Returns `true` once the connection should close.
    async fn handle_line(&mut self, line: &str) -> anyhow::Result<bool> {
        let effects = self.dispatcher.dispatch(&mut self.game, line);
        for out in &effects.outbound {
            self.transport.send_line(out).await?;
        }
        for event in effects.events {
            // Nobody listening is fine.
            let _ = self.events.send(event);
        }
        if let Some(completion) = effects.completion {
            match self.pending.iter().position(|(k, _)| *k == completion.keyword) {
                Some(pos) => {
                    if let Some((_, reply)) = self.pending.remove(pos) {
                        let _ = reply.send(completion.result);
                    }
                }
                None => warn!("no caller waiting on {} completion", completion.keyword),
            }
        }
        if effects.close {
            info!("closing connection");
            self.transport.close().await?;
        }
        Ok(effects.close)
    }

    async fn handle_request(&mut self, request: Request) -> anyhow::Result<()> {
        match request {
            Request::Command { line, reply } => match self.dispatcher.issue(&mut self.game, &line) {
                Ok((keyword, out)) => {
                    self.transport.send_line(&out).await?;
                    self.pending.push_back((keyword, reply));
                }
                Err(e) => {
                    debug!("local command refused: {}", e);
                    let _ = reply.send(Err(e));
                }
            },
            Request::Snapshot { reply } => {
                let _ = reply.send(self.game.clone());
            }
        }
        Ok(())
    }
}

/// Cloneable handle for issuing local commands to a running [`Session`].
#[derive(Clone)]
pub struct SessionHandle {
    requests: mpsc::Sender<Request>,
}

impl SessionHandle {
    /// Send a raw command line and wait for the peer's answer.
    ///
    /// Refusals and protocol errors come back as a [`ProtocolError`] inside
    /// the `anyhow::Error`.
    pub async fn command(&self, line: &str) -> anyhow::Result<Reply> {
        let (reply, rx) = oneshot::channel();
        self.requests
            .send(Request::Command {
                line: line.to_string(),
                reply,
            })
            .await
            .map_err(|_| anyhow::anyhow!("Session has ended"))?;
        let result = rx
            .await
            .map_err(|_| anyhow::anyhow!("Session ended before a response arrived"))?;
        Ok(result?)
    }

    /// Fire at `target`, optionally attaching a message.
    pub async fn fire(&self, target: Coordinate, message: Option<&str>) -> anyhow::Result<FireReport> {
        let argument = match message {
            Some(m) => format!("{} {}", target, m),
            None => target.to_string(),
        };
        match self.command(&command_line(fire::KEYWORD, Some(&argument))).await? {
            Reply::Fired(report) => Ok(report),
            other => Err(anyhow::anyhow!("unexpected reply to FIRE: {:?}", other)),
        }
    }

    /// Ask the peer to close the connection.
    pub async fn quit(&self) -> anyhow::Result<()> {
        self.command(quit::KEYWORD).await.map(|_| ())
    }

    /// Copy of the current match state.
    pub async fn snapshot(&self) -> anyhow::Result<GameState> {
        let (reply, rx) = oneshot::channel();
        self.requests
            .send(Request::Snapshot { reply })
            .await
            .map_err(|_| anyhow::anyhow!("Session has ended"))?;
        rx.await.map_err(|_| anyhow::anyhow!("Session has ended"))
    }
}
