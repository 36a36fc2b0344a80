//! Cart reconciliation - the engine that keeps the local cart view in step
//! with the durable cart store.

mod engine;
mod outcome;

pub use engine::CartEngine;
pub use outcome::{Mutation, MutationResult, SyncOutcome};
