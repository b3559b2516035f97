//! Full socket round-trip: client ↔ stub room server over TCP.

use std::time::Duration;

use arena_client::client::{ClientState, GameClient};
use arena_client::input::IdleInput;
use arena_shared::math::Vec2;
use arena_shared::net::{NetMsg, SessionId};
use arena_shared::physics::NullCollision;
use arena_tests::stub_room::{accept_and_welcome, bind_ephemeral};

const ME: SessionId = SessionId(7);
const OTHER: SessionId = SessionId(9);

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn join_input_snapshot_roundtrip() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();

    let (listener, cfg) = bind_ephemeral().await?;

    let server = tokio::spawn(async move {
        let mut conn = accept_and_welcome(&listener, ME).await?;

        conn.send(&NetMsg::PlayerJoined {
            session_id: ME,
            position: Vec2::new(100.0, 100.0),
            sprite_frame_key: "idle-down".to_string(),
        })
        .await?;
        conn.send(&NetMsg::PlayerJoined {
            session_id: OTHER,
            position: Vec2::new(200.0, 200.0),
            sprite_frame_key: "idle-down".to_string(),
        })
        .await?;
        conn.send(&NetMsg::PositionChanged {
            session_id: OTHER,
            position: Vec2::new(400.0, 200.0),
            sprite_frame_key: "walk-right".to_string(),
        })
        .await?;

        // Wait until the client has simulated a few ticks.
        let mut inputs = 0u32;
        while inputs < 3 {
            if let NetMsg::Input(payload) = conn.recv().await? {
                assert!(!payload.shoot.active);
                inputs += 1;
            }
        }

        conn.send(&NetMsg::Disconnect {
            reason: "round over".to_string(),
        })
        .await?;
        Ok::<_, anyhow::Error>(inputs)
    });

    let mut client = GameClient::connect(&cfg).await?;
    assert_eq!(client.session_id(), ME);
    assert_eq!(client.state, ClientState::Joined);

    let mut input = IdleInput;
    let mut collision = NullCollision;
    let step = 1.0 / 60.0;

    let mut disconnected = false;
    for _ in 0..500 {
        client.pump_network();
        if client.state == ClientState::Disconnected {
            disconnected = true;
            break;
        }
        client.update(step, &mut input, &mut collision);
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    assert!(disconnected, "expected the scripted disconnect");

    assert_eq!(server.await??, 3);

    // Both entities made it into the registry, and the remote one
    // blended toward its snapshot rather than snapping.
    assert_eq!(client.session.player_count(), 2);
    let other = client.session.player(OTHER).unwrap();
    assert!(other.position.x > 200.0);
    assert!(other.position.y == 200.0);
    assert_eq!(other.sprite_frame_key, "walk-right");

    Ok(())
}
