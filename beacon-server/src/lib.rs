mod config;
mod hub;
mod signaling;
mod transport;

pub mod server;

pub use config::ServerConfig;
pub use hub::{Hub, RegisterError, Room};
pub use server::AppState;
pub use signaling::{Client, OriginPolicy};
pub use transport::{MessageSink, MessageSource};
