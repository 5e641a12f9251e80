mod ws;

use async_trait::async_trait;
use axum::extract::ws::Message;

pub use ws::{WsSink, WsSource, duplex};

/// Read half of a duplex message channel. `None` means the peer is gone:
/// disconnect, protocol close, or a transport error.
#[async_trait]
pub trait MessageSource: Send {
    async fn next_message(&mut self) -> Option<Message>;
}

/// Write half of a duplex message channel. A close frame is sent like any
/// other message.
#[async_trait]
pub trait MessageSink: Send {
    async fn send_message(&mut self, message: Message) -> anyhow::Result<()>;
}
