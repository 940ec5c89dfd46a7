use async_trait::async_trait;
use metrics::counter;
use tracing::info;

use crate::api::GateError;
use crate::message::Message;

/// The downstream step a first-sighted message is handed to.
#[async_trait]
pub trait Processor {
    async fn process(&self, message: &Message) -> Result<(), GateError>;
}

/// Logs each message it receives. Stands in for a real pipeline step during
/// development and smoke tests.
pub struct PrintProcessor {}

#[async_trait]
impl Processor for PrintProcessor {
    async fn process(&self, message: &Message) -> Result<(), GateError> {
        info!("processing message: {:?}", message.uuid);
        counter!("idempotent_messages_processed_total").increment(1);

        Ok(())
    }
}
