//! ReorderEmitter - event-emitter integration for the post-reorder hook.
//!
//! Listeners register per collection name and receive the JSON form of the
//! commit report after every successful reorder, for side effects such as
//! cache invalidation. Requires the `emitter` feature (on by default).
//!
//! ## Example
//!
//! ```ignore
//! let mut emitter = ReorderEmitter::new();
//! emitter.on("tasks", |report| {
//!     println!("tasks reordered: {}", report);
//! });
//!
//! let reconciler = Reconciler::<Task>::new().with_after_sort(emitter.into_hook());
//! ```

use std::sync::Mutex;

use event_emitter_rs::EventEmitter;

use crate::reorder::ReorderReport;

/// Wraps an `EventEmitter` so reorder commits can be observed per collection.
pub struct ReorderEmitter {
    inner: EventEmitter,
}

impl ReorderEmitter {
    pub fn new() -> Self {
        ReorderEmitter {
            inner: EventEmitter::new(),
        }
    }

    /// Register a listener for reorders of a collection. The listener
    /// receives the serde_json form of the commit report. Returns the
    /// listener id.
    pub fn on<F>(&mut self, collection: &str, listener: F) -> String
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.inner.on(collection, listener)
    }

    /// Emit an event immediately, outside any reorder.
    pub fn emit(&mut self, collection: &str, data: impl Into<String>) {
        self.inner.emit(collection, data.into());
    }

    /// Convert into a post-reorder hook for `Reconciler::with_after_sort`.
    ///
    /// The hook must not fail a commit that already happened, so an
    /// unserializable report or a poisoned emitter skips the emission.
    pub fn into_hook(self) -> impl Fn(&ReorderReport) + Send + Sync + 'static {
        let inner = Mutex::new(self.inner);
        move |report: &ReorderReport| {
            let Ok(payload) = serde_json::to_string(report) else {
                return;
            };
            if let Ok(mut emitter) = inner.lock() {
                emitter.emit(&report.collection, payload);
            }
        }
    }
}

impl Default for ReorderEmitter {
    fn default() -> Self {
        Self::new()
    }
}
