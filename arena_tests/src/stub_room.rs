//! A scripted stand-in for the room server.
//!
//! Speaks just enough of the wire protocol for the integration tests:
//! ephemeral bind, the join handshake, and whatever replication
//! messages the test script sends by hand.

use arena_shared::{
    config::GameConfig,
    net::{NetMsg, RoomConn, RoomListener, SessionId, PROTOCOL_VERSION},
};

/// Binds a stub room server on an ephemeral port and returns a client
/// config pointing at it.
pub async fn bind_ephemeral() -> anyhow::Result<(RoomListener, GameConfig)> {
    let listener = RoomListener::bind("127.0.0.1:0".parse().unwrap()).await?;
    let addr = listener.local_addr()?;
    let cfg = GameConfig {
        server_addr: addr.to_string(),
        ..GameConfig::default()
    };
    Ok((listener, cfg))
}

/// Accepts one client, validates its `Hello`, and assigns `id`.
pub async fn accept_and_welcome(
    listener: &RoomListener,
    id: SessionId,
) -> anyhow::Result<RoomConn> {
    let (mut conn, _) = listener.accept().await?;
    match conn.recv().await? {
        NetMsg::Hello { protocol } => {
            anyhow::ensure!(protocol == PROTOCOL_VERSION, "protocol mismatch: {protocol}");
        }
        other => anyhow::bail!("expected Hello, got {other:?}"),
    }
    conn.send(&NetMsg::Welcome { session_id: id }).await?;
    Ok(conn)
}
