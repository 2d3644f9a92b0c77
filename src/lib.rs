//! A distributed word-frequency counter (lite).
//!
//! A single coordinator owns an in-memory corpus of text lines and deals
//! them out round-robin to a fixed set of workers. Each worker tokenizes
//! its lines into a private counter table, ships the table back over the
//! transport, and the coordinator merges every partial table into one
//! ranked report.

pub mod codec;
pub mod cmd;
pub mod config;
pub mod coordinator;
pub mod corpus;
pub mod error;
pub mod partition;
pub mod rank;
pub mod standalone;
pub mod table;
pub mod tokenizer;
pub mod transport;
pub mod utils;
pub mod worker;

pub use config::{CountConfig, LengthBounds};
pub use coordinator::{Coordinator, Outcome};
pub use corpus::Corpus;
pub use error::{Error, Result};
pub use partition::Partitioner;
pub use rank::{Order, Report, ReportEntry};
pub use table::CounterTable;
pub use worker::{Worker, WorkerSummary};

/////////////////////////////////////////////////////////////////////////////
// Participant identities
/////////////////////////////////////////////////////////////////////////////

/// Stable label of a participant. Workers are `1..=N`.
pub type WorkerId = u32;

/// The coordinator is always participant 0 and never tokenizes.
pub const COORDINATOR: WorkerId = 0;

/// Default file the report is written to by the binaries.
pub const DEFAULT_OUTPUT: &str = "output_log_parallel.txt";
