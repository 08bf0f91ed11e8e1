//! Dataset comparison
//!
//! Inner-joins two datasets on their normalized filenames, computes per-file
//! deltas and ranks the top savings and regressions by percentage.

pub mod engine;
pub mod types;

pub use engine::{DiffEngine, DEFAULT_TOP_N};
pub use types::{DiffRecord, DiffReport};
