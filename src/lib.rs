#[cfg(feature = "emitter")]
mod emitter;
mod insert;
mod item;
mod lock;
mod reorder;
mod scope;
mod store;

#[cfg(feature = "emitter")]
pub use emitter::ReorderEmitter;
pub use insert::{InsertError, InsertionPolicy};
pub use item::Sortable;
pub use lock::{InMemoryLock, InMemoryLockManager, Lock, LockError, LockManager};
pub use reorder::{Permutation, Reconciler, ReorderError, ReorderReport};
pub use scope::Scope;
pub use store::{InMemoryItemStore, ItemStore, OrderUpdate, StoreError};

// Re-export the Sortable derive macro
pub use sortable_rust_macros::Sortable;

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
