//! Standalone headless client binary.
//!
//! Usage:
//!   cargo run -p arena_client -- [--addr 127.0.0.1:2567] [--name Player]
//!
//! Connects to a room server, joins, and runs the simulation loop
//! with idle input and no collision source. Useful for soaking a
//! server and for watching replication traffic.

use std::env;
use std::time::{Duration, Instant};

use anyhow::Context;
use arena_client::client::{ClientState, GameClient};
use arena_client::input::IdleInput;
use arena_shared::config::GameConfig;
use arena_shared::physics::NullCollision;
use tracing::info;

fn parse_args() -> GameConfig {
    let mut cfg = GameConfig::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--addr" if i + 1 < args.len() => {
                cfg.server_addr = args[i + 1].clone();
                i += 2;
            }
            "--name" if i + 1 < args.len() => {
                cfg.player_name = args[i + 1].clone();
                i += 2;
            }
            _ => i += 1,
        }
    }
    cfg
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cfg = parse_args();
    info!(server = %cfg.server_addr, name = %cfg.player_name, "Starting client");

    let mut client = GameClient::connect(&cfg).await.context("connect")?;

    let mut input = IdleInput;
    let mut collision = NullCollision;
    let frame_interval = Duration::from_millis(16);
    let mut last = Instant::now();

    loop {
        client.pump_network();

        if client.state == ClientState::Disconnected {
            info!("Session ended");
            break;
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;
        client.update(dt, &mut input, &mut collision);

        let tick = client.session.tick_count();
        if tick > 0 && tick % 300 == 0 {
            info!(
                tick,
                players = client.session.player_count(),
                "Simulation running"
            );
        }

        tokio::time::sleep(frame_interval).await;
    }

    Ok(())
}
