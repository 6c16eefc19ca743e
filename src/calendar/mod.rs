pub mod event;
pub mod grid;
pub mod store;

pub use event::{Event, EventId};
pub use store::EventStore;
