pub(crate) mod client;
mod origin;
mod ws_handler;

pub use client::Client;
pub use origin::OriginPolicy;
pub use ws_handler::ws_handler;
