//! Relations module - explicit and implicit character relations.
//!
//! - **Keys**: raw lowercase name pairs for accumulation, canonical pairs for output
//! - **Counts**: get-or-zero counters with point-wise arithmetic
//! - **Resolver**: maps raw names back to a play's roster
//! - **Aggregator**: credits relations scene by scene

mod aggregator;
mod counts;
mod key;
mod resolver;

pub use aggregator::*;
pub use counts::*;
pub use key::*;
pub use resolver::*;
