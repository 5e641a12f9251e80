use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tracing::debug;

use crate::transport::{MessageSink, MessageSource};

pub struct WsSource(SplitStream<WebSocket>);

pub struct WsSink(SplitSink<WebSocket, Message>);

/// Splits an upgraded socket into the two capability halves the client
/// actor consumes.
pub fn duplex(socket: WebSocket) -> (WsSink, WsSource) {
    let (sink, stream) = socket.split();
    (WsSink(sink), WsSource(stream))
}

#[async_trait]
impl MessageSource for WsSource {
    async fn next_message(&mut self) -> Option<Message> {
        match self.0.next().await? {
            Ok(message) => Some(message),
            Err(err) => {
                debug!(%err, "websocket read failed");
                None
            }
        }
    }
}

#[async_trait]
impl MessageSink for WsSink {
    async fn send_message(&mut self, message: Message) -> anyhow::Result<()> {
        self.0.send(message).await?;
        Ok(())
    }
}
