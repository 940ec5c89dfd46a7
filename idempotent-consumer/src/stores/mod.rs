use async_trait::async_trait;

use crate::api::GateError;

pub mod memory;
pub mod redis;

/// The seen-set shared by every worker handling messages through one gate.
///
/// `add` is the single primitive the gate decides on: it records the identity
/// and reports whether it was newly added, atomically with respect to
/// concurrent callers. Checking with `contains` first and inserting after
/// would reopen the race this trait exists to close, so `contains` is
/// read-only introspection and never feeds the gating decision.
///
/// Backends own their storage medium and eviction policy.
#[async_trait]
pub trait IdentityStore {
    /// Records `identity`; returns `true` iff it was not already present.
    async fn add(&self, identity: &str) -> Result<bool, GateError>;

    /// Reports whether `identity` was previously recorded. Must not mutate.
    async fn contains(&self, identity: &str) -> Result<bool, GateError>;
}
