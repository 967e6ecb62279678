//! Descriptive statistics over the enriched survey table.
//!
//! Everything here is a pure read; no function mutates the table.

mod correlation;
mod summary;

pub use correlation::CorrelationMatrix;
pub use summary::{compute_key_metrics, group_means, mean_where};
