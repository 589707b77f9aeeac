use std::sync::Arc;

use super::LockError;

/// Trait for a single lock instance.
///
/// In-memory locks use `Mutex` + `Condvar`; a deployment spanning processes
/// would put Postgres advisory locks, Redis, or etcd leases behind this.
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self) -> Result<(), LockError>;

    /// Try to acquire the lock without blocking.
    /// Returns `Ok(true)` if acquired, `Ok(false)` if already held.
    fn try_lock(&self) -> Result<bool, LockError>;

    /// Release the lock.
    fn unlock(&self) -> Result<(), LockError>;
}

/// Hands out one shared lock per scope key.
///
/// Repeated lookups of the same key must return the same underlying lock.
pub trait LockManager: Send + Sync {
    fn scope_lock(&self, key: &str) -> Result<Arc<dyn Lock>, LockError>;
}
