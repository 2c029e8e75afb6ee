//! Dataset retrieval.
//!
//! Makes the remote feature collection available as a local file. A local file
//! that already exists is trusted as-is; there is no freshness check and no
//! retry on failure.

mod download;

pub use download::{ensure_local_copy, FetchOutcome};
