pub mod artifact;
pub mod materialize;

pub use artifact::{copy_verbatim, exists, touch};
pub use materialize::{ensure_file, Materialized};
