//! Reordering - reconcile a client-submitted permutation into persisted order values.
//!
//! A drag-and-drop interaction produces a permutation: for each display slot,
//! the identifier of the item that used to occupy it and the identifier of
//! the item occupying it now. The reconciler resolves the permutation against
//! the store, reassigns the existing order values to the new occupants, and
//! commits every change in one atomic batch. Nothing is written unless every
//! referenced item resolves.

mod error;
mod permutation;
mod reconciler;

pub use error::ReorderError;
pub use permutation::Permutation;
pub use reconciler::{Reconciler, ReorderReport};
