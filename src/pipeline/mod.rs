//! Pipeline orchestration for audit runs.
//!
//! Drives fetch → parse → flatten → compare over a batch of pairs and
//! routes the rendered report to its destination. Fetching is sequential
//! (the only blocking I/O); flatten+compare is independent per pair and
//! runs in parallel, with results collected back in input order so both
//! reporting strategies see pairs exactly as they were requested.

mod batch;
mod output;
mod process;

pub use batch::{run_pair_batch, run_scan};
pub use output::{write_output, OutputTarget};
pub use process::{process_pair, BOTH_SIDES, CANDIDATE_SIDE, REFERENCE_SIDE};

/// Exit codes for CI integration
pub mod exit_codes {
    /// Success - no differences found (or --fail-on-diff not set)
    pub const SUCCESS: i32 = 0;
    /// Differences were found
    pub const DIFFERENCES_FOUND: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}
