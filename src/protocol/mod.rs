//! Message types crossing task boundaries.

mod messages;

pub use messages::{FactoryEvent, SessionCommand, ViewUpdate};
