use sha2::{Digest, Sha256};

use crate::message::Message;

/// Derives the deduplication identity of a message.
///
/// Implementations must be deterministic and side-effect free: two equal
/// messages map to equal identities on every call, or deduplication breaks.
pub trait IdentityExtractor: Send + Sync {
    /// Returns `None` when the message carries no usable identity.
    fn extract(&self, message: &Message) -> Option<String>;

    /// Short description used when reporting a missing identity.
    fn describe(&self) -> String;
}

/// Reads the identity from a single header.
pub struct HeaderExtractor {
    header: String,
}

impl HeaderExtractor {
    pub fn new(header: impl Into<String>) -> HeaderExtractor {
        HeaderExtractor {
            header: header.into(),
        }
    }
}

impl IdentityExtractor for HeaderExtractor {
    fn extract(&self, message: &Message) -> Option<String> {
        message.header(&self.header).map(String::from)
    }

    fn describe(&self) -> String {
        format!("header({})", self.header)
    }
}

/// Joins several header values into one composite identity. All parts must
/// be present, otherwise the message has no identity at all.
pub struct CompositeExtractor {
    headers: Vec<String>,
}

impl CompositeExtractor {
    pub fn new(headers: Vec<String>) -> CompositeExtractor {
        CompositeExtractor { headers }
    }
}

impl IdentityExtractor for CompositeExtractor {
    fn extract(&self, message: &Message) -> Option<String> {
        let parts = self
            .headers
            .iter()
            .map(|name| message.header(name))
            .collect::<Option<Vec<&str>>>()?;

        Some(parts.join(":"))
    }

    fn describe(&self) -> String {
        format!("composite({})", self.headers.join(","))
    }
}

/// Hashes the message body, for pipelines whose messages carry no explicit
/// identifier. An empty body yields no identity rather than a shared digest.
pub struct BodyDigestExtractor {}

impl IdentityExtractor for BodyDigestExtractor {
    fn extract(&self, message: &Message) -> Option<String> {
        if message.body.is_empty() {
            return None;
        }

        let mut hasher = Sha256::new();
        hasher.update(&message.body);
        Some(hex::encode(hasher.finalize()))
    }

    fn describe(&self) -> String {
        String::from("body-digest(sha256)")
    }
}
