use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::api::GateError;
use crate::stores::IdentityStore;

/// Process-local seen-set backed by a `HashSet` behind an async lock.
///
/// Entries are never evicted. The optional capacity bound fails `add` once
/// reached instead of silently forgetting identities, which would reopen
/// duplicate forwarding.
#[derive(Clone, Default)]
pub struct MemoryStore {
    seen: Arc<RwLock<HashSet<String>>>,
    capacity: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn with_capacity_limit(capacity: usize) -> MemoryStore {
        MemoryStore {
            seen: Arc::default(),
            capacity: Some(capacity),
        }
    }

    pub async fn len(&self) -> usize {
        self.seen.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.seen.read().await.is_empty()
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn add(&self, identity: &str) -> Result<bool, GateError> {
        let mut seen = self.seen.write().await;

        if seen.contains(identity) {
            return Ok(false);
        }
        if let Some(capacity) = self.capacity {
            if seen.len() >= capacity {
                return Err(GateError::StoreUnavailable(format!(
                    "memory store is full ({capacity} identities)"
                )));
            }
        }

        Ok(seen.insert(String::from(identity)))
    }

    async fn contains(&self, identity: &str) -> Result<bool, GateError> {
        Ok(self.seen.read().await.contains(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::api::GateError;
    use crate::stores::IdentityStore;

    #[tokio::test]
    async fn add_reports_first_sighting_only_once() {
        let store = MemoryStore::new();

        assert!(store.add("A1").await.unwrap());
        assert!(!store.add("A1").await.unwrap());
        assert!(store.add("B2").await.unwrap());

        assert!(store.contains("A1").await.unwrap());
        assert!(!store.contains("C3").await.unwrap());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn full_store_keeps_known_identities_but_rejects_new_ones() {
        let store = MemoryStore::with_capacity_limit(1);

        assert!(store.add("A1").await.unwrap());
        // Known identities still dedupe once the bound is hit.
        assert!(!store.add("A1").await.unwrap());

        let err = store.add("B2").await.unwrap_err();
        assert!(matches!(err, GateError::StoreUnavailable(_)));
    }
}
