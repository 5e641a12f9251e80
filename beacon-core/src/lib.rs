mod model;

pub use model::{Envelope, EnvelopeError, ErrorNotice, PeerId, RoomId};
