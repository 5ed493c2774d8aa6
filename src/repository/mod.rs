//! Repository abstraction for gradebook persistence.
//!
//! The protocol core talks to storage exclusively through the query
//! objects defined here, so storage backends can be swapped without
//! touching request handling.
//!
//! # Architecture
//!
//! - `query`: immutable lookup/mutation parameter bundles
//! - `traits`: the repository contracts and the [`Gradebook`] aggregate
//! - `memory`: a concurrent in-memory gradebook

mod memory;
mod query;
mod traits;


pub use memory::InMemoryGradebook;
pub use query::{LineItemQuery, ResultGetQuery, ScoreCreateQuery};
pub use traits::{Gradebook, LineItemRepository, ResultRepository, ScoreRepository};
