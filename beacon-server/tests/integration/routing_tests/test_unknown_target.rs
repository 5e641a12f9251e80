use std::sync::Arc;

use beacon_server::Hub;

use crate::integration::init_tracing;
use crate::utils::spawn_peer;

#[tokio::test]
async fn test_unknown_target_errors_only_the_sender() {
    init_tracing();

    let hub = Arc::new(Hub::new());
    let mut alice = spawn_peer(&hub, "room1", "alice");
    let mut bob = spawn_peer(&hub, "room1", "bob");

    alice.send_raw(r#"{"type":"offer","to":"carol"}"#);

    let notice = alice.recv_json().await;
    assert_eq!(notice["type"], "error");
    assert_eq!(notice["message"], "target peer not found");

    bob.expect_silence().await;
}

#[tokio::test]
async fn test_lone_sender_gets_target_not_found() {
    init_tracing();

    let hub = Arc::new(Hub::new());
    let mut alice = spawn_peer(&hub, "room1", "alice");

    alice.send_raw(r#"{"type":"offer","to":"carol"}"#);

    let notice = alice.recv_json().await;
    assert_eq!(notice["type"], "error");
    assert_eq!(notice["message"], "target peer not found");
}
