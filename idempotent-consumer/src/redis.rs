use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::time::timeout;

// SADD/SISMEMBER are O(1), this is generous
const REDIS_TIMEOUT_MILLISECS: u64 = 10;

/// A simple redis wrapper, just wide enough for set membership.
#[async_trait]
pub trait Client {
    /// SADD; reports whether the member was newly added to the set.
    async fn sadd(&self, k: String, member: String) -> Result<bool>;
    /// SISMEMBER.
    async fn sismember(&self, k: String, member: String) -> Result<bool>;
}

pub struct RedisClient {
    client: redis::Client,
}

impl RedisClient {
    pub fn new(addr: String) -> Result<RedisClient> {
        let client = redis::Client::open(addr)?;

        Ok(RedisClient { client })
    }
}

#[async_trait]
impl Client for RedisClient {
    async fn sadd(&self, k: String, member: String) -> Result<bool> {
        let mut conn = self.client.get_async_connection().await?;

        let results = conn.sadd(k, member);
        let added: i64 = timeout(Duration::from_millis(REDIS_TIMEOUT_MILLISECS), results).await??;

        Ok(added > 0)
    }

    async fn sismember(&self, k: String, member: String) -> Result<bool> {
        let mut conn = self.client.get_async_connection().await?;

        let results = conn.sismember(k, member);
        let fut = timeout(Duration::from_millis(REDIS_TIMEOUT_MILLISECS), results).await?;

        Ok(fut?)
    }
}

/// In-memory stand-in with real set semantics, for tests.
#[derive(Default)]
pub struct MockRedisClient {
    sets: Mutex<HashMap<String, HashSet<String>>>,
    broken: bool,
}

impl MockRedisClient {
    pub fn new() -> MockRedisClient {
        MockRedisClient::default()
    }

    /// A client whose every command fails, for fail-closed tests.
    pub fn broken() -> MockRedisClient {
        MockRedisClient {
            broken: true,
            ..MockRedisClient::default()
        }
    }
}

#[async_trait]
impl Client for MockRedisClient {
    async fn sadd(&self, k: String, member: String) -> Result<bool> {
        if self.broken {
            anyhow::bail!("mock redis is down");
        }

        let mut sets = self.sets.lock().expect("mock redis lock poisoned");
        Ok(sets.entry(k).or_default().insert(member))
    }

    async fn sismember(&self, k: String, member: String) -> Result<bool> {
        if self.broken {
            anyhow::bail!("mock redis is down");
        }

        let sets = self.sets.lock().expect("mock redis lock poisoned");
        Ok(sets.get(&k).is_some_and(|set| set.contains(&member)))
    }
}
