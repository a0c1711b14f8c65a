//! Per-employee aggregation of evaluation output.

mod summary;

pub use summary::summarize;
