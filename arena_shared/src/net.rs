//! Wire protocol.
//!
//! Goals:
//! - Provide the message types exchanged with the room server.
//! - Provide a simple length-prefixed JSON frame codec over TCP.
//! - Keep serialization explicit and versionable.
//!
//! The client core never blocks on this layer; a reader task and a
//! writer task own the two halves of the connection and bridge them
//! to the simulation thread over channels.

use anyhow::Context;
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpListener, TcpStream,
    },
};

use crate::math::Vec2;

/// Protocol version for compatibility checks.
pub const PROTOCOL_VERSION: u32 = 1;

/// Identifies a connected participant; assigned by the room server at
/// join time and stable for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u32);

/// Fire intent carried in the per-tick payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ShootIntent {
    pub x: f32,
    pub y: f32,
    /// True when a shot was fired during the tick this payload covers.
    pub active: bool,
}

/// Client input for one tick. Sent exactly once per fixed step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputPayload {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub shoot: ShootIntent,
    pub sprite_frame_key: String,
}

/// High-level message envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum NetMsg {
    // ─── Connection handshake ───
    Hello {
        protocol: u32,
    },
    Welcome {
        session_id: SessionId,
    },

    // ─── Client -> server ───
    /// Movement flags, sprite key and fire intent for one tick.
    Input(InputPayload),
    /// Locally detected projectile hit, reported for authoritative scoring.
    Hit {
        shooter_id: SessionId,
        victim_id: SessionId,
    },

    // ─── Server -> client ───
    PlayerJoined {
        session_id: SessionId,
        position: Vec2,
        sprite_frame_key: String,
    },
    PlayerLeft {
        session_id: SessionId,
    },
    /// Authoritative position/animation snapshot for one entity.
    PositionChanged {
        session_id: SessionId,
        position: Vec2,
        sprite_frame_key: String,
    },
    /// Authoritative health value; supersedes local damage prediction.
    HealthChanged {
        session_id: SessionId,
        health: i32,
    },
    /// Another client fired; replicated for visual-only playback.
    Shoot {
        session_id: SessionId,
        position: Vec2,
        velocity: Vec2,
    },
    Respawn {
        session_id: SessionId,
        x: f32,
        y: f32,
    },

    // ─── Disconnect ───
    Disconnect {
        reason: String,
    },
}

async fn write_frame(stream: &mut (impl AsyncWrite + Unpin), msg: &NetMsg) -> anyhow::Result<()> {
    let payload = serde_json::to_vec(msg).context("serialize msg")?;
    let mut buf = BytesMut::with_capacity(4 + payload.len());
    buf.put_u32(payload.len() as u32);
    buf.extend_from_slice(&payload);
    stream.write_all(&buf).await.context("tcp write")?;
    Ok(())
}

async fn read_frame(stream: &mut (impl AsyncRead + Unpin)) -> anyhow::Result<NetMsg> {
    let mut len_buf = [0u8; 4];
    stream
        .read_exact(&mut len_buf)
        .await
        .context("tcp read len")?;
    let len = u32::from_be_bytes(len_buf) as usize;
    let mut payload = vec![0u8; len];
    stream
        .read_exact(&mut payload)
        .await
        .context("tcp read payload")?;
    let msg = serde_json::from_slice(&payload).context("deserialize msg")?;
    Ok(msg)
}

/// Read half of a room connection.
#[derive(Debug)]
pub struct RoomReader {
    stream: OwnedReadHalf,
}

impl RoomReader {
    pub async fn recv(&mut self) -> anyhow::Result<NetMsg> {
        read_frame(&mut self.stream).await
    }
}

/// Write half of a room connection.
#[derive(Debug)]
pub struct RoomWriter {
    stream: OwnedWriteHalf,
}

impl RoomWriter {
    pub async fn send(&mut self, msg: &NetMsg) -> anyhow::Result<()> {
        write_frame(&mut self.stream, msg).await
    }
}

/// Connection to the room server, length-prefixed JSON frames over TCP.
#[derive(Debug)]
pub struct RoomConn {
    reader: RoomReader,
    writer: RoomWriter,
    peer: SocketAddr,
}

impl RoomConn {
    pub fn new(stream: TcpStream) -> anyhow::Result<Self> {
        let peer = stream.peer_addr().context("peer_addr")?;
        let (read, write) = stream.into_split();
        Ok(Self {
            reader: RoomReader { stream: read },
            writer: RoomWriter { stream: write },
            peer,
        })
    }

    pub async fn connect(addr: SocketAddr) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await.context("tcp connect")?;
        Self::new(stream)
    }

    pub async fn send(&mut self, msg: &NetMsg) -> anyhow::Result<()> {
        self.writer.send(msg).await
    }

    pub async fn recv(&mut self) -> anyhow::Result<NetMsg> {
        self.reader.recv().await
    }

    /// Splits into independently-owned read/write halves.
    pub fn into_split(self) -> (RoomReader, RoomWriter) {
        (self.reader, self.writer)
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

/// TCP listener for the room-server side of the protocol.
pub struct RoomListener {
    listener: TcpListener,
}

impl RoomListener {
    pub async fn bind(addr: SocketAddr) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await.context("tcp bind")?;
        Ok(Self { listener })
    }

    pub async fn accept(&self) -> anyhow::Result<(RoomConn, SocketAddr)> {
        let (stream, addr) = self.listener.accept().await.context("tcp accept")?;
        Ok((RoomConn::new(stream)?, addr))
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }
}

/// Convenience codec helpers.
pub fn encode_to_bytes(msg: &NetMsg) -> anyhow::Result<Bytes> {
    let payload = serde_json::to_vec(msg).context("serialize")?;
    Ok(Bytes::from(payload))
}

pub fn decode_from_bytes(b: &[u8]) -> anyhow::Result<NetMsg> {
    serde_json::from_slice(b).context("deserialize")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn netmsg_roundtrip_bytes() {
        let msg = NetMsg::Hello {
            protocol: PROTOCOL_VERSION,
        };
        let bytes = encode_to_bytes(&msg).unwrap();
        let back = decode_from_bytes(&bytes).unwrap();
        assert_eq!(msg, back);
    }

    #[test]
    fn input_payload_roundtrip() {
        let msg = NetMsg::Input(InputPayload {
            up: true,
            down: false,
            left: false,
            right: true,
            shoot: ShootIntent {
                x: 640.0,
                y: 480.0,
                active: true,
            },
            sprite_frame_key: "walk-right".to_string(),
        });
        let bytes = encode_to_bytes(&msg).unwrap();
        assert_eq!(decode_from_bytes(&bytes).unwrap(), msg);
    }

    #[tokio::test]
    async fn room_conn_frames_over_loopback() -> anyhow::Result<()> {
        let listener =
            RoomListener::bind("127.0.0.1:0".parse().unwrap()).await?;
        let addr = listener.local_addr()?;

        let server = tokio::spawn(async move {
            let (mut conn, _) = listener.accept().await?;
            let msg = conn.recv().await?;
            conn.send(&msg).await?;
            Ok::<_, anyhow::Error>(())
        });

        let mut client = RoomConn::connect(addr).await?;
        let sent = NetMsg::Hit {
            shooter_id: SessionId(1),
            victim_id: SessionId(2),
        };
        client.send(&sent).await?;
        let echoed = client.recv().await?;
        assert_eq!(echoed, sent);

        server.await??;
        Ok(())
    }
}
