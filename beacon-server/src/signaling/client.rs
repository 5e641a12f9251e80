use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{CloseFrame, Message, close_code};
use beacon_core::{Envelope, ErrorNotice, PeerId, RoomId};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::hub::Hub;
use crate::transport::{MessageSink, MessageSource};

pub(crate) const QUEUE_SIZE: usize = 16;
pub(crate) const MAX_MESSAGE_BYTES: usize = 1 << 20; // 1 MiB
pub(crate) const WRITE_TIMEOUT: Duration = Duration::from_secs(5);
pub(crate) const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// One admitted connection. Rooms hold a shared handle to feed the bounded
/// outbound queue; the actor alone owns the transport halves and drains the
/// queue from its write loop.
pub struct Client {
    room_id: RoomId,
    peer_id: PeerId,
    outbound: mpsc::Sender<Message>,
    closed: CancellationToken,
}

impl Client {
    /// Builds the shared handle plus the receiver half of its outbound
    /// queue, which `run` later hands to the write loop.
    pub fn new(
        room_id: RoomId,
        peer_id: PeerId,
        closed: CancellationToken,
    ) -> (Arc<Self>, mpsc::Receiver<Message>) {
        let (outbound, outbound_rx) = mpsc::channel(QUEUE_SIZE);
        let client = Arc::new(Self {
            room_id,
            peer_id,
            outbound,
            closed,
        });
        (client, outbound_rx)
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn peer_id(&self) -> &PeerId {
        &self.peer_id
    }

    /// Queues a message for the write loop without ever blocking. Messages
    /// to a closing peer are ignored; past a full queue they are dropped,
    /// so one slow peer cannot stall dispatch to the rest of its room.
    pub fn enqueue(&self, message: Message) {
        if self.closed.is_cancelled() {
            return;
        }

        match self.outbound.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(room = %self.room_id, peer = %self.peer_id, "dropping message: send queue full");
            }
            Err(TrySendError::Closed(_)) => {}
        }
    }

    pub fn send_error(&self, message: &str) {
        warn!(room = %self.room_id, peer = %self.peer_id, reason = message, "sending error notice");
        match serde_json::to_string(&ErrorNotice::new(message)) {
            Ok(raw) => self.enqueue(Message::Text(raw.into())),
            Err(err) => debug!(%err, "failed to encode error notice"),
        }
    }

    /// Drives the connection to completion: spawns the write loop, runs the
    /// read loop inline, and unregisters from the hub once both are done.
    /// Teardown is idempotent; either loop ending, or an external
    /// cancellation of the shared token, closes the whole connection.
    pub async fn run(
        self: Arc<Self>,
        hub: Arc<Hub>,
        source: Box<dyn MessageSource>,
        sink: Box<dyn MessageSink>,
        outbound_rx: mpsc::Receiver<Message>,
    ) {
        let writer = tokio::spawn(Self::write_loop(sink, outbound_rx, self.closed.clone()));

        self.read_loop(&hub, source).await;

        self.closed.cancel();
        let _ = writer.await;
        hub.unregister(&self.room_id, &self.peer_id);
    }

    async fn read_loop(&self, hub: &Hub, mut source: Box<dyn MessageSource>) {
        loop {
            let message = tokio::select! {
                _ = self.closed.cancelled() => return,
                message = source.next_message() => match message {
                    Some(message) => message,
                    None => return,
                },
            };

            match message {
                Message::Text(text) => match Envelope::decode(text.as_str()) {
                    Ok(envelope) => {
                        debug!(room = %self.room_id, peer = %self.peer_id, kind = %envelope.kind, "inbound message");
                        hub.dispatch(self, envelope);
                    }
                    Err(err) => self.send_error(&err.to_string()),
                },
                Message::Binary(_) => self.send_error("only text messages are supported"),
                Message::Close(_) => return,
                // The transport layer answers pings itself.
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    }

    async fn write_loop(
        mut sink: Box<dyn MessageSink>,
        mut outbound_rx: mpsc::Receiver<Message>,
        closed: CancellationToken,
    ) {
        loop {
            let message = tokio::select! {
                _ = closed.cancelled() => break,
                message = outbound_rx.recv() => match message {
                    Some(message) => message,
                    None => break,
                },
            };

            match timeout(WRITE_TIMEOUT, sink.send_message(message)).await {
                Ok(Ok(())) => debug!("outbound message sent"),
                Ok(Err(err)) => {
                    debug!(%err, "write failed");
                    break;
                }
                Err(_) => {
                    debug!("write timed out");
                    break;
                }
            }
        }

        // A dead write side takes the read loop down with it.
        closed.cancel();

        let frame = CloseFrame {
            code: close_code::NORMAL,
            reason: "connection closed".into(),
        };
        let _ = timeout(CLOSE_GRACE, sink.send_message(Message::Close(Some(frame)))).await;
    }
}
