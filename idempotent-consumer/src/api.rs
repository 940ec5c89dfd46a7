use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// What the gate did with a message, when it did not error.
#[derive(Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Outcome {
    /// First sighting of the identity, the message went downstream.
    Forwarded,
    /// The identity was already recorded, the duplicate policy ran instead.
    Suppressed,
}

#[derive(Error, Debug)]
pub enum GateError {
    #[error("message {uuid} carries no usable identity (extractor: {extractor})")]
    MissingIdentity { uuid: Uuid, extractor: String },

    #[error("identity store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("transient downstream error, please retry")]
    RetryableProcessorError,
    #[error("message could not be processed downstream")]
    NonRetryableProcessorError,

    #[error("duplicate message rejected (identity: {identity})")]
    DuplicateRejected { identity: String },
}
