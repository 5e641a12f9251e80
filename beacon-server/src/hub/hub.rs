use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use beacon_core::{Envelope, PeerId, RoomId};
use thiserror::Error;
use tracing::info;

use crate::hub::room::Room;
use crate::signaling::Client;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("peer already registered")]
    AlreadyRegistered,
}

/// Registry of active rooms. Owns every room; a room only exists while it
/// has members. Not a singleton: independent hubs coexist, one per server.
pub struct Hub {
    rooms: Mutex<HashMap<RoomId, Arc<Room>>>,
}

impl Hub {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// Adds the client to its room, creating the room on first admission.
    /// Fails without touching an existing registration when the peer id is
    /// already taken in that room.
    pub fn register(&self, client: Arc<Client>) -> Result<(), RegisterError> {
        let mut rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());

        let room = rooms
            .entry(client.room_id().clone())
            .or_insert_with(|| Arc::new(Room::new(client.room_id().clone())));
        room.admit(Arc::clone(&client))?;

        info!(room = %client.room_id(), peer = %client.peer_id(), "peer joined");
        Ok(())
    }

    /// Removes the peer and deletes the room the moment it becomes empty.
    /// Removal and the emptiness check happen under the registry lock, so
    /// no admission can observe an empty-but-present room.
    pub fn unregister(&self, room_id: &RoomId, peer_id: &PeerId) {
        let mut rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());

        let Some(room) = rooms.get(room_id).cloned() else {
            return;
        };
        room.remove(peer_id);
        if room.is_empty() {
            rooms.remove(room_id);
        }

        info!(room = %room_id, peer = %peer_id, "peer left");
    }

    /// Routes a decoded envelope from `from` to its recipients, stamping
    /// the sender's id into `from` first. The registry lock is released
    /// before any room work happens.
    pub fn dispatch(&self, from: &Client, mut envelope: Envelope) {
        let room = {
            let rooms = self.rooms.lock().unwrap_or_else(|e| e.into_inner());
            rooms.get(from.room_id()).cloned()
        };
        let Some(room) = room else {
            from.send_error("room closed");
            return;
        };

        envelope.from = Some(from.peer_id().clone());
        room.dispatch(from, envelope);
    }

    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(room_id)
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}
