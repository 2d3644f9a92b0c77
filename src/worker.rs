//! The worker role: tokenize assigned lines, count, ship the table back.

use std::time::{Duration, Instant};

use bytes::Bytes;
use log::{debug, info};

use crate::transport::Transport;
use crate::utils::line_text;
use crate::{codec, tokenizer, CounterTable, LengthBounds, Partitioner, Result, WorkerId, COORDINATOR};

/// What one worker did during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    pub rank: WorkerId,
    /// Lines received from the coordinator.
    pub lines: usize,
    /// Words counted, repeats included.
    pub words: u64,
    /// Distinct words in the shipped table.
    pub distinct: usize,
    pub elapsed: Duration,
}

/// Counts the eligible words of `lines` into a fresh table.
pub fn count_lines<I, L>(lines: I, bounds: LengthBounds) -> CounterTable
where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    let mut table = CounterTable::new();
    for line in lines {
        table.extend(tokenizer::tokenize(&line_text(line.as_ref()), bounds));
    }
    table
}

/// A worker participant. Holds nothing until [`Worker::run`] is called;
/// the job parameters arrive over the transport.
#[derive(Debug, Default)]
pub struct Worker;

impl Worker {
    pub fn new() -> Self {
        Self
    }

    /// Runs one counting round on `transport`.
    ///
    /// The worker learns the length bounds and the corpus size from the
    /// coordinator's broadcasts, derives how many lines it owns, receives
    /// exactly that many, and replies with its encoded table before
    /// entering the final barrier.
    pub async fn run<T: Transport>(&self, transport: &mut T) -> Result<WorkerSummary> {
        let start = Instant::now();
        let rank = transport.rank();

        let min_len = transport.broadcast(0).await? as usize;
        let max_len = transport.broadcast(0).await? as usize;
        let total_lines = transport.broadcast(0).await? as usize;
        let bounds = LengthBounds::new(min_len, max_len)?;

        let partitioner = Partitioner::new(transport.workers())?;
        let expected = partitioner.lines_for(rank, total_lines).count();
        debug!("worker {} expects {} of {} lines", rank, expected, total_lines);

        let mut lines = Vec::with_capacity(expected);
        for _ in 0..expected {
            let line: Bytes = transport.recv(COORDINATOR).await?;
            lines.push(line);
        }

        let table = count_lines(&lines, bounds);
        let words = table.total();
        let distinct = table.len();
        transport.send(COORDINATOR, codec::encode(&table)).await?;
        transport.barrier().await?;

        let summary = WorkerSummary {
            rank,
            lines: expected,
            words,
            distinct,
            elapsed: start.elapsed(),
        };
        info!(
            "Execution time for rank {} : {:.9} seconds",
            rank,
            summary.elapsed.as_secs_f64()
        );
        Ok(summary)
    }
}
