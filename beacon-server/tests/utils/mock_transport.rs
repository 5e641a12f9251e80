use async_trait::async_trait;
use axum::extract::ws::Message;
use beacon_server::{MessageSink, MessageSource};
use tokio::sync::mpsc;

/// In-memory read half: the test feeds frames in, the actor consumes them.
/// Dropping the sender looks like a peer disconnect.
pub struct MockSource(mpsc::UnboundedReceiver<Message>);

impl MockSource {
    pub fn new(inbound: mpsc::UnboundedReceiver<Message>) -> Self {
        Self(inbound)
    }
}

#[async_trait]
impl MessageSource for MockSource {
    async fn next_message(&mut self) -> Option<Message> {
        self.0.recv().await
    }
}

/// In-memory write half: everything the actor writes lands in a channel the
/// test reads from.
pub struct MockSink(mpsc::UnboundedSender<Message>);

impl MockSink {
    pub fn new(outbound: mpsc::UnboundedSender<Message>) -> Self {
        Self(outbound)
    }
}

#[async_trait]
impl MessageSink for MockSink {
    async fn send_message(&mut self, message: Message) -> anyhow::Result<()> {
        self.0
            .send(message)
            .map_err(|_| anyhow::anyhow!("connection closed"))
    }
}
