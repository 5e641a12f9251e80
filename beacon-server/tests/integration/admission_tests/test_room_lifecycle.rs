use std::sync::Arc;

use beacon_core::RoomId;
use beacon_server::Hub;

use crate::integration::init_tracing;
use crate::utils::spawn_peer;

#[tokio::test]
async fn test_room_is_destroyed_with_its_last_member() {
    init_tracing();

    let hub = Arc::new(Hub::new());
    let room = RoomId::from("room1");

    let mut alice = spawn_peer(&hub, "room1", "alice");
    let mut bob = spawn_peer(&hub, "room1", "bob");
    assert!(hub.contains_room(&room));

    alice.disconnect().await;
    assert!(hub.contains_room(&room));

    bob.disconnect().await;
    assert!(!hub.contains_room(&room));

    // A fresh admission under the same id lands in a brand-new, empty room.
    let mut carol = spawn_peer(&hub, "room1", "carol");
    assert!(hub.contains_room(&room));
    carol.send_raw(r#"{"type":"offer","to":"alice"}"#);
    let notice = carol.recv_json().await;
    assert_eq!(notice["type"], "error");
    assert_eq!(notice["message"], "target peer not found");
}

#[tokio::test]
async fn test_unregister_is_idempotent() {
    init_tracing();

    let hub = Arc::new(Hub::new());
    let room = RoomId::from("room1");
    let mut alice = spawn_peer(&hub, "room1", "alice");

    let (room_id, peer_id) = (
        alice.client.room_id().clone(),
        alice.client.peer_id().clone(),
    );
    alice.disconnect().await;
    assert!(!hub.contains_room(&room));

    // The double-disconnect race resolves to a no-op.
    hub.unregister(&room_id, &peer_id);
    assert!(!hub.contains_room(&room));
}
