use std::collections::HashMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A unit of work moving through the pipeline.
///
/// The gate treats the message as opaque: only the configured extractor reads
/// headers or body, and the message is neither copied nor retained past the
/// `handle` call that carries it.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Message {
    pub uuid: Uuid,
    #[serde(default)]
    pub headers: HashMap<String, Value>,
    #[serde(default)]
    pub body: Bytes,
}

impl Message {
    pub fn new(headers: HashMap<String, Value>, body: Bytes) -> Message {
        Message {
            uuid: Uuid::now_v7(),
            headers,
            body,
        }
    }

    /// The string value of a header. `None` when the header is absent,
    /// not a string, or empty.
    pub fn header(&self, name: &str) -> Option<&str> {
        match self.headers.get(name).and_then(Value::as_str) {
            Some("") => None,
            value => value,
        }
    }

    pub fn with_header(mut self, name: &str, value: Value) -> Message {
        self.headers.insert(String::from(name), value);
        self
    }
}
