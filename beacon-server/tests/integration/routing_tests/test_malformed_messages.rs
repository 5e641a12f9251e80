use std::sync::Arc;

use axum::extract::ws::Message;
use bytes::Bytes;
use beacon_server::Hub;

use crate::integration::init_tracing;
use crate::utils::spawn_peer;

#[tokio::test]
async fn test_malformed_frames_are_rejected_without_killing_the_connection() {
    init_tracing();

    let hub = Arc::new(Hub::new());
    let mut alice = spawn_peer(&hub, "room1", "alice");
    let mut bob = spawn_peer(&hub, "room1", "bob");

    alice.send_frame(Message::Binary(Bytes::from_static(b"\x01\x02\x03")));
    let notice = alice.recv_json().await;
    assert_eq!(notice["message"], "only text messages are supported");

    alice.send_raw("not json at all");
    let notice = alice.recv_json().await;
    assert_eq!(notice["message"], "invalid message format");

    alice.send_raw(r#"{"to":"bob"}"#);
    let notice = alice.recv_json().await;
    assert_eq!(notice["message"], "message type is required");

    alice.send_raw(r#"{"type":""}"#);
    let notice = alice.recv_json().await;
    assert_eq!(notice["message"], "message type is required");

    // None of that was fatal; routing still works.
    alice.send_raw(r#"{"type":"offer","to":"bob"}"#);
    let received = bob.recv_json().await;
    assert_eq!(received["type"], "offer");
    assert_eq!(received["from"], "alice");
}

#[tokio::test]
async fn test_error_notices_go_only_to_the_offender() {
    init_tracing();

    let hub = Arc::new(Hub::new());
    let mut alice = spawn_peer(&hub, "room1", "alice");
    let mut bob = spawn_peer(&hub, "room1", "bob");

    alice.send_raw("garbage");
    let notice = alice.recv_json().await;
    assert_eq!(notice["type"], "error");

    bob.expect_silence().await;
}
