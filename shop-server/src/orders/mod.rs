//! Order lifecycle
//!
//! Orders move `new → reported → approved`; an approved order carries a
//! one-time activation code that unlocks its item for the owner.

pub mod lifecycle;

#[cfg(test)]
mod tests;

pub use lifecycle::{LifecycleError, OrderLifecycle};
