use std::sync::Arc;

use metrics::counter;
use tracing::instrument;

use crate::api::{GateError, Outcome};
use crate::config::Config;
use crate::extractor::{HeaderExtractor, IdentityExtractor};
use crate::message::Message;
use crate::policy::{DuplicatePolicy, LogDuplicates};
use crate::processor::{PrintProcessor, Processor};
use crate::redis::RedisClient;
use crate::stores::memory::MemoryStore;
use crate::stores::redis::RedisStore;
use crate::stores::IdentityStore;

/// Idempotent Consumer gate: forwards a message downstream on the first
/// sighting of its identity and suppresses every later one.
///
/// The gate keeps no state of its own between invocations; the store is the
/// only shared mutable resource. Sharing one store instance between gates
/// (or whole fleets of consumers) widens the deduplication scope accordingly.
#[derive(Clone)]
pub struct IdempotentGate {
    extractor: Arc<dyn IdentityExtractor + Send + Sync>,
    store: Arc<dyn IdentityStore + Send + Sync>,
    next: Arc<dyn Processor + Send + Sync>,
    on_duplicate: Arc<dyn DuplicatePolicy + Send + Sync>,
}

impl IdempotentGate {
    pub fn new(
        extractor: Arc<dyn IdentityExtractor + Send + Sync>,
        store: Arc<dyn IdentityStore + Send + Sync>,
        next: Arc<dyn Processor + Send + Sync>,
    ) -> IdempotentGate {
        IdempotentGate {
            extractor,
            store,
            next,
            on_duplicate: Arc::new(LogDuplicates {}),
        }
    }

    /// Builds a gate from environment-driven configuration, picking the store
    /// backend the deployment asks for. With `PRINT_PROCESSOR` set, forwarded
    /// messages are logged instead of reaching the supplied downstream step.
    pub fn from_config(
        config: &Config,
        next: Arc<dyn Processor + Send + Sync>,
    ) -> anyhow::Result<IdempotentGate> {
        let extractor = Arc::new(HeaderExtractor::new(config.identity_header.clone()));

        let next: Arc<dyn Processor + Send + Sync> = if config.print_processor {
            Arc::new(PrintProcessor {})
        } else {
            next
        };

        let store: Arc<dyn IdentityStore + Send + Sync> = if config.redis_store {
            let redis = Arc::new(RedisClient::new(config.redis_url.clone())?);
            Arc::new(RedisStore::new(redis, config.redis_seen_set_key.clone()))
        } else {
            Arc::new(MemoryStore::new())
        };

        Ok(IdempotentGate::new(extractor, store, next))
    }

    /// Replaces the default log-only duplicate policy.
    pub fn with_duplicate_policy(
        mut self,
        policy: Arc<dyn DuplicatePolicy + Send + Sync>,
    ) -> IdempotentGate {
        self.on_duplicate = policy;
        self
    }

    /// Runs one message through the gate.
    ///
    /// The identity is recorded before the downstream step runs, so a message
    /// whose processing fails stays recorded and is not forwarded again on
    /// redelivery. A store failure surfaces as an error without forwarding.
    #[instrument(skip_all, fields(uuid = %message.uuid, identity))]
    pub async fn handle(&self, message: &Message) -> Result<Outcome, GateError> {
        let Some(identity) = self.extractor.extract(message) else {
            counter!("idempotent_messages_dropped_total", "reason" => "missing_identity")
                .increment(1);
            return Err(GateError::MissingIdentity {
                uuid: message.uuid,
                extractor: self.extractor.describe(),
            });
        };
        tracing::Span::current().record("identity", identity.as_str());

        // add-if-absent is a single store call so that concurrent deliveries
        // of the same identity cannot both observe "new".
        if self.store.add(&identity).await? {
            self.next.process(message).await?;
            counter!("idempotent_messages_forwarded_total").increment(1);

            Ok(Outcome::Forwarded)
        } else {
            self.on_duplicate.on_duplicate(message, &identity).await?;

            Ok(Outcome::Suppressed)
        }
    }
}
