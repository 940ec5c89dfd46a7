pub mod api;
pub mod config;
pub mod extractor;
pub mod gate;
pub mod message;
pub mod policy;
pub mod processor;
pub mod redis;
pub mod stores;

pub use api::{GateError, Outcome};
pub use gate::IdempotentGate;
pub use message::Message;
