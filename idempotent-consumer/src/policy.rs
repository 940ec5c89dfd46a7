use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;

use crate::api::GateError;
use crate::message::Message;
use crate::processor::Processor;

/// Invoked instead of the downstream step when an identity was already seen.
///
/// The default policy only observes; substituting another one at gate
/// construction is how pipelines dead-letter, count, or reject duplicates.
#[async_trait]
pub trait DuplicatePolicy {
    async fn on_duplicate(&self, message: &Message, identity: &str) -> Result<(), GateError>;
}

/// Default policy: log and count, never fail.
pub struct LogDuplicates {}

#[async_trait]
impl DuplicatePolicy for LogDuplicates {
    async fn on_duplicate(&self, message: &Message, identity: &str) -> Result<(), GateError> {
        tracing::debug!(
            identity = identity,
            uuid = %message.uuid,
            "ignoring duplicate message"
        );
        counter!("idempotent_messages_suppressed_total").increment(1);

        Ok(())
    }
}

/// Routes duplicates to a secondary processor, typically a dead-letter sink,
/// instead of dropping them silently. The sink's errors surface to the caller.
pub struct DeadLetterPolicy {
    sink: Arc<dyn Processor + Send + Sync>,
}

impl DeadLetterPolicy {
    pub fn new(sink: Arc<dyn Processor + Send + Sync>) -> DeadLetterPolicy {
        DeadLetterPolicy { sink }
    }
}

#[async_trait]
impl DuplicatePolicy for DeadLetterPolicy {
    async fn on_duplicate(&self, message: &Message, identity: &str) -> Result<(), GateError> {
        tracing::debug!(identity = identity, "routing duplicate to dead letter sink");
        counter!("idempotent_messages_dead_lettered_total").increment(1);

        self.sink.process(message).await
    }
}

/// Strict policy for pipelines that treat redelivery as a fault worth
/// surfacing rather than a condition to absorb.
pub struct RejectDuplicates {}

#[async_trait]
impl DuplicatePolicy for RejectDuplicates {
    async fn on_duplicate(&self, _message: &Message, identity: &str) -> Result<(), GateError> {
        Err(GateError::DuplicateRejected {
            identity: String::from(identity),
        })
    }
}
