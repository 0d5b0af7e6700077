//! Channel abstraction for event I/O.

pub mod channel;
pub mod telegram;

pub use channel::{Channel, EventPayload, EventStream, IncomingEvent};
pub use telegram::TelegramChannel;
