//! Scope locks - optional serialization of same-scope insertions.
//!
//! Two concurrent insertions into one scope can read the same max order and
//! end up with duplicate values. Handing the insertion policy a lock manager
//! closes that gap: the max-read and the write happen while holding the lock
//! for the scope's key. Without one, the race is an accepted trade-off.

mod error;
mod in_memory;
mod lock;

pub use error::LockError;
pub use in_memory::{InMemoryLock, InMemoryLockManager};
pub use lock::{Lock, LockManager};
