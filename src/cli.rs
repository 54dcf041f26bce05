//! Interactive terminal player.
//!
//! Reads commands from stdin while engine events are printed as they
//! arrive. Accepted input:
//!
//! ```text
//! FIRE B4 [message]   fire at B4, optionally with a message
//! B4                  same as FIRE B4
//! BOARD               show both boards
//! QUIT                leave the match
//! HELP                list commands
//! ```

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    command::fire,
    coordinate::Coordinate,
    error::ProtocolError,
    game::{MatchResult, Phase},
    protocol::{split_head, Event},
    session::{Events, SessionHandle},
    ui::{render_game, render_status},
};

const HELP: &str = "Commands: FIRE <coord> [message] | <coord> | BOARD | QUIT | HELP";

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Fire {
        target: Coordinate,
        message: Option<String>,
    },
    Board,
    Quit,
    Help,
    Empty,
    /// Unusable input, with the reason.
    Invalid(String),
}

pub fn parse_input(line: &str) -> Input {
    let (head, rest) = split_head(line);
    if head.is_empty() {
        return Input::Empty;
    }
    let fire_at = |arg: Option<&str>| match arg {
        None => Input::Invalid("FIRE needs a coordinate, e.g. FIRE B4".to_string()),
        Some(arg) => {
            let (coord, message) = split_head(arg);
            match Coordinate::parse(coord) {
                Ok(target) => Input::Fire {
                    target,
                    message: message.map(str::to_string),
                },
                Err(e) => Input::Invalid(e.to_string()),
            }
        }
    };
    match head.to_ascii_uppercase().as_str() {
        fire::KEYWORD => fire_at(rest),
        "BOARD" => Input::Board,
        "QUIT" | "EXIT" => Input::Quit,
        "HELP" | "?" => Input::Help,
        _ if rest.is_none() && Coordinate::parse(head).is_ok() => fire_at(Some(head)),
        _ => Input::Invalid(format!("unknown command '{}'. {}", head, HELP)),
    }
}

/// What to do after a local command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Bad input; ask again, the match is untouched.
    Retry,
    /// The two sides disagree about the match; offer to leave it.
    OfferQuit,
}

pub fn recovery_for(err: &ProtocolError) -> Recovery {
    if err.is_recoverable() {
        Recovery::Retry
    } else {
        Recovery::OfferQuit
    }
}

/// Whether an answer to the quit offer accepts it.
pub fn confirms(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn print_event(event: &Event) {
    match event {
        Event::TakenFire { target, ship } => match ship {
            Some(s) if s.is_sunk() => println!("Enemy fired at {}: your {} was sunk!", target, s.ship_type()),
            Some(s) => println!("Enemy fired at {}: your {} was hit.", target, s.ship_type()),
            None => println!("Enemy fired at {}: miss.", target),
        },
        Event::TakenFireMessage(msg) => println!("Enemy says: \"{}\"", msg),
        Event::FireResponse { target, ship } => match ship {
            Some(s) if s.is_sunk() => println!("{}: you sank their {}!", target, s.ship_type()),
            Some(s) => println!("{}: hit on their {}.", target, s.ship_type()),
            None => println!("{}: miss.", target),
        },
        Event::PeerQuit => println!("Your opponent left the match."),
        Event::ProtocolViolation(e) => println!("Protocol problem: {}", e),
    }
}

/// Run the terminal player against a session until the match is over.
pub async fn run_cli(handle: SessionHandle, mut events: Events) -> anyhow::Result<()> {
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", HELP);
    if let Ok(game) = handle.snapshot().await {
        print!("{}", render_game(&game));
    }
    let mut last_status = String::new();
    let mut offering_quit = false;
    loop {
        let game = match handle.snapshot().await {
            Ok(game) => game,
            Err(_) => return Ok(()),
        };
        let status = render_status(&game);
        if status != last_status {
            println!("{}", status);
            last_status = status;
        }
        if game.phase() == Phase::Finished {
            print!("{}", render_game(&game));
            if game.result() == Some(MatchResult::Won) {
                let _ = handle.quit().await;
            }
            return Ok(());
        }
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => print_event(&event),
                None => return Ok(()),
            },
            line = stdin.next_line() => {
                let Some(line) = line? else {
                    let _ = handle.quit().await;
                    return Ok(());
                };
                if offering_quit {
                    offering_quit = false;
                    if confirms(&line) {
                        if let Err(e) = handle.quit().await {
                            println!("QUIT failed: {}", e);
                        }
                        return Ok(());
                    }
                    println!("Continuing the match.");
                    continue;
                }
                match parse_input(&line) {
                    Input::Empty => {}
                    Input::Help => println!("{}", HELP),
                    Input::Invalid(reason) => println!("{}", reason),
                    Input::Board => print!("{}", render_game(&game)),
                    Input::Quit => {
                        if let Err(e) = handle.quit().await {
                            println!("QUIT failed: {}", e);
                        }
                        return Ok(());
                    }
                    Input::Fire { .. } if !game.is_locals_turn() => {
                        println!("Wait for your turn.");
                    }
                    Input::Fire { target, message } => {
                        match handle.fire(target, message.as_deref()).await {
                            Ok(_) => {}
                            Err(e) => match e.downcast_ref::<ProtocolError>() {
                                Some(err) => match recovery_for(err) {
                                    Recovery::Retry => println!("{}. Try again.", err),
                                    Recovery::OfferQuit => {
                                        println!("{}", err);
                                        println!("The match may be out of sync. Quit now? [y/N]");
                                        offering_quit = true;
                                    }
                                },
                                None => return Err(e),
                            },
                        }
                    }
                }
            }
        }
    }
}
