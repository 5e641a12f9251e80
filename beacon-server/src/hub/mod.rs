mod hub;
mod room;

pub use hub::{Hub, RegisterError};
pub use room::Room;
