//! Client connection plumbing.
//!
//! `GameClient` performs the join handshake, then hands the two
//! halves of the connection to background tasks: the writer drains
//! the session's outbound channel, the reader feeds an inbound
//! channel that the simulation thread pumps between frames. Nothing
//! in the tick path awaits the network.

use std::net::SocketAddr;

use anyhow::Context;
use arena_shared::{
    config::GameConfig,
    net::{NetMsg, RoomConn, SessionId, PROTOCOL_VERSION},
    physics::CollisionBackend,
};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};
use tracing::{debug, info, warn};

use crate::{input::InputSource, session::GameSession};

/// Client connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// Handshake in progress.
    Connecting,
    /// Joined a room and simulating.
    Joined,
    /// Connection ended; the session is frozen.
    Disconnected,
}

/// Network-backed game client.
pub struct GameClient {
    pub state: ClientState,
    pub session: GameSession,
    session_id: SessionId,
    inbound: UnboundedReceiver<NetMsg>,
}

impl GameClient {
    /// Connects to the room server and performs the join handshake.
    /// Failure here is the one fatal error path; everything after it
    /// degrades gracefully.
    pub async fn connect(cfg: &GameConfig) -> anyhow::Result<Self> {
        let addr: SocketAddr = cfg.server_addr.parse().context("parse server_addr")?;

        info!(server = %addr, "Connecting to room server");
        let mut conn = RoomConn::connect(addr).await?;

        conn.send(&NetMsg::Hello {
            protocol: PROTOCOL_VERSION,
        })
        .await?;

        let welcome = conn.recv().await?;
        let session_id = match welcome {
            NetMsg::Welcome { session_id } => session_id,
            other => anyhow::bail!("expected Welcome, got {other:?}"),
        };
        info!(session_id = ?session_id, "Joined room");

        let (reader, mut writer) = conn.into_split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<NetMsg>();
        let (in_tx, in_rx) = mpsc::unbounded_channel::<NetMsg>();

        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                if let Err(e) = writer.send(&msg).await {
                    warn!(error = %e, "outbound send failed");
                    break;
                }
            }
        });

        tokio::spawn(async move {
            let mut reader = reader;
            loop {
                match reader.recv().await {
                    Ok(msg) => {
                        if in_tx.send(msg).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        debug!(error = %e, "room connection closed");
                        break;
                    }
                }
            }
        });

        let mut session = GameSession::new(cfg.clone(), out_tx);
        session.handle_message(NetMsg::Welcome { session_id });

        Ok(Self {
            state: ClientState::Joined,
            session,
            session_id,
            inbound: in_rx,
        })
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Drains inbound messages into the session. Called between
    /// frames on the simulation thread, so handlers never overlap the
    /// tick body.
    pub fn pump_network(&mut self) {
        loop {
            match self.inbound.try_recv() {
                Ok(NetMsg::Disconnect { reason }) => {
                    info!(reason = %reason, "Disconnected from server");
                    self.state = ClientState::Disconnected;
                }
                Ok(msg) => self.session.handle_message(msg),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.state != ClientState::Disconnected {
                        info!("Connection to server lost");
                        self.state = ClientState::Disconnected;
                    }
                    break;
                }
            }
        }
    }

    /// Advances the simulation by `dt` seconds of real time.
    pub fn update(
        &mut self,
        dt: f32,
        input: &mut impl InputSource,
        collision: &mut impl CollisionBackend,
    ) -> u32 {
        self.session.update(dt, input, collision)
    }
}
