//! Message board domain objects
//!
//! The persisted message shape, its JSON rendering, and the request bodies that create or edit it.

pub mod message;
pub mod payloads;

pub use message::Message;
