mod envelope;
mod peer;
mod room;

pub use envelope::{Envelope, EnvelopeError, ErrorNotice};
pub use peer::PeerId;
pub use room::RoomId;
