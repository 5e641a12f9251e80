use std::sync::Arc;

use axum::extract::ws::Message;
use beacon_core::{Envelope, PeerId, RoomId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::error;

use crate::hub::hub::RegisterError;
use crate::signaling::Client;

/// The peers of one logical signaling session. Membership mutations are
/// serialized by the hub's registry lock; dispatch reads the map through
/// its own sharded lock, so in-room traffic never contends with room
/// creation or teardown elsewhere.
pub struct Room {
    id: RoomId,
    peers: DashMap<PeerId, Arc<Client>>,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            peers: DashMap::new(),
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub(crate) fn admit(&self, client: Arc<Client>) -> Result<(), RegisterError> {
        match self.peers.entry(client.peer_id().clone()) {
            Entry::Occupied(_) => Err(RegisterError::AlreadyRegistered),
            Entry::Vacant(slot) => {
                slot.insert(client);
                Ok(())
            }
        }
    }

    /// Idempotent; covers the double-disconnect race.
    pub(crate) fn remove(&self, peer_id: &PeerId) {
        self.peers.remove(peer_id);
    }

    /// Routes one envelope: to the addressed peer, or to every member but
    /// the sender when no target is named. Every delivery is a non-blocking
    /// enqueue; a recipient vanishing mid-dispatch is a harmless drop.
    pub(crate) fn dispatch(&self, from: &Client, envelope: Envelope) {
        let raw = match envelope.encode() {
            Ok(raw) => raw,
            Err(err) => {
                error!(room = %self.id, peer = %from.peer_id(), %err, "failed to encode envelope");
                from.send_error("failed to encode message");
                return;
            }
        };
        let message = Message::Text(raw.into());

        match envelope.target() {
            Some(target) => match self.peers.get(target) {
                Some(peer) => peer.enqueue(message),
                None => from.send_error("target peer not found"),
            },
            None => {
                for peer in self.members_except(from.peer_id()) {
                    peer.enqueue(message.clone());
                }
            }
        }
    }

    fn members_except(&self, peer_id: &PeerId) -> Vec<Arc<Client>> {
        self.peers
            .iter()
            .filter(|entry| entry.key() != peer_id)
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }
}
