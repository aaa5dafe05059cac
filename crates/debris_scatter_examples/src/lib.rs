#![forbid(unsafe_code)]

mod summary;

pub use summary::{init_tracing, print_collection_estimate, print_tally};
