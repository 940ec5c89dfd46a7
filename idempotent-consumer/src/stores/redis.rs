use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::api::GateError;
use crate::redis::Client;
use crate::stores::IdentityStore;

pub const SEEN_SET_CACHE_KEY: &str = "idempotent/seen";

/// Seen-set shared through Redis, for fleets of consumers deduplicating
/// together.
///
/// `SADD`'s reply doubles as the add-if-absent primitive: redis applies the
/// insert atomically, so concurrent consumers on different hosts still agree
/// on a single first sighting.
pub struct RedisStore {
    redis: Arc<dyn Client + Send + Sync>,
    key: String,
}

impl RedisStore {
    pub fn new(redis: Arc<dyn Client + Send + Sync>, key: impl Into<String>) -> RedisStore {
        RedisStore {
            redis,
            key: key.into(),
        }
    }
}

#[async_trait]
impl IdentityStore for RedisStore {
    #[instrument(skip_all, fields(identity = identity))]
    async fn add(&self, identity: &str) -> Result<bool, GateError> {
        self.redis
            .sadd(self.key.clone(), String::from(identity))
            .await
            .map_err(|e| {
                tracing::error!("failed to record identity in redis: {e}");
                GateError::StoreUnavailable(e.to_string())
            })
    }

    async fn contains(&self, identity: &str) -> Result<bool, GateError> {
        self.redis
            .sismember(self.key.clone(), String::from(identity))
            .await
            .map_err(|e| GateError::StoreUnavailable(e.to_string()))
    }
}
