//! The `wildpile` binary: host a session or join one.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wildpile::prelude::*;
use wildpile_net::connect;

#[derive(Parser)]
#[command(name = "wildpile", about = "A network-synchronized shedding card game")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the authoritative session and wait for players.
    Host {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:7077")]
        addr: String,

        /// Seats to fill before dealing.
        #[arg(long, default_value_t = 2)]
        players: usize,

        /// Cards dealt to each seat.
        #[arg(long, default_value_t = 7)]
        hand_size: usize,

        /// Games to play back to back.
        #[arg(long, default_value_t = 1)]
        games: u64,

        /// Seed for reproducible shuffles.
        #[arg(long)]
        seed: Option<u64>,

        /// Seconds a turn-holder may stall before forfeiting.
        #[arg(long)]
        turn_timeout: Option<u64>,
    },

    /// Join a hosted session as a participant.
    Join {
        /// Session URL.
        #[arg(long, default_value = "ws://127.0.0.1:7077")]
        url: String,

        /// Name to claim a seat under.
        #[arg(long)]
        username: String,

        /// Play automatically instead of prompting on stdin.
        #[arg(long)]
        bot: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), WildpileError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Host {
            addr,
            players,
            hand_size,
            games,
            seed,
            turn_timeout,
        } => {
            let config = SessionConfig {
                players,
                hand_size,
                games,
                deck: seed.map(DeckPolicy::Seeded).unwrap_or(DeckPolicy::Random),
                turn_timeout: turn_timeout.map(Duration::from_secs),
                ..SessionConfig::default()
            };
            let lobby = Lobby::bind(&addr, config).await?;
            if let Ok(local) = lobby.local_addr() {
                tracing::info!(addr = %local, "hosting");
            }
            lobby.run().await?;
        }

        Command::Join { url, username, bot } => {
            if bot {
                play(username, &url, AutoPrompt).await?;
            } else {
                play(username, &url, ConsolePrompt::new()).await?;
            }
        }
    }
    Ok(())
}

/// Joins, then plays games until the session closes the channel.
async fn play<P: TurnPrompt>(
    username: String,
    url: &str,
    prompt: P,
) -> Result<(), WildpileError> {
    let conn = connect(url).await?;
    let mut player = Player::new(username, MessageChannel::json(conn), prompt);
    player.join().await?;
    while let Some(outcome) = player.play_game().await? {
        if outcome.local_win {
            println!("you win!");
        } else {
            println!("{} (seat {}) wins", outcome.winner_username, outcome.winner);
        }
    }
    println!("session ended");
    Ok(())
}
