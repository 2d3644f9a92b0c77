//! The coordinator role: deal out lines, gather partial tables, merge, rank.
//!
//! A run moves through
//! `CollectingLines → Distributing → Gathering → Merging → Ranking → Done`.
//! Collecting happens when the [`Coordinator`] is built; the remaining
//! phases happen inside [`Coordinator::run`].

use std::fmt;
use std::time::{Duration, Instant};

use bytes::Bytes;
use log::info;

use crate::codec::{self, DecodeStats};
use crate::transport::Transport;
use crate::{CountConfig, Corpus, CounterTable, Error, Partitioner, Report, Result, WorkerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    CollectingLines,
    Distributing,
    Gathering,
    Merging,
    Ranking,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Result of a coordinator run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub report: Report,
    /// Lines dealt out to workers.
    pub lines: usize,
    /// Records merged into the global table across all workers.
    ///
    /// Informational only.
    pub merged_records: usize,
    /// Per-worker decode bookkeeping, by rank.
    pub decode_stats: Vec<(WorkerId, DecodeStats)>,
    pub elapsed: Duration,
}

/// Owns the corpus and the global table.
#[derive(Debug)]
pub struct Coordinator {
    config: CountConfig,
    corpus: Corpus,
    phase: Phase,
}

impl Coordinator {
    /// Validates `config` and takes ownership of an already collected corpus.
    pub fn new(config: CountConfig, corpus: Corpus) -> Result<Self> {
        config.bounds()?;
        info!("{}: {} lines", Phase::CollectingLines, corpus.len());
        Ok(Self {
            config,
            corpus,
            phase: Phase::CollectingLines,
        })
    }

    /// Collects the corpus from `inputs` (see [`Corpus::collect`]).
    pub fn from_inputs<S: AsRef<str>>(config: CountConfig, inputs: &[S]) -> Result<Self> {
        Self::new(config, Corpus::collect(inputs)?)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    fn enter(&mut self, phase: Phase) {
        info!("{} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Drives one full round over `transport` and returns the ranked report.
    ///
    /// Gathering waits for exactly one table from every worker. A worker
    /// that never replies blocks this call forever; wrap it in a timeout if
    /// that matters to the caller.
    pub async fn run<T: Transport>(&mut self, transport: &mut T) -> Result<Outcome> {
        let start = Instant::now();
        if !transport.is_coordinator() {
            return Err(Error::NotCoordinator {
                rank: transport.rank(),
            });
        }
        let partitioner = Partitioner::new(transport.workers())?;
        let bounds = self.config.bounds()?;

        self.enter(Phase::Distributing);
        transport.broadcast(bounds.min() as u64).await?;
        transport.broadcast(bounds.max() as u64).await?;
        transport.broadcast(self.corpus.len() as u64).await?;
        for (index, line) in self.corpus.indexed() {
            transport.send(partitioner.owner(index), line.clone()).await?;
        }

        self.enter(Phase::Gathering);
        let mut partials: Vec<(WorkerId, Bytes)> = Vec::with_capacity(partitioner.workers() as usize);
        for worker in 1..=partitioner.workers() {
            partials.push((worker, transport.recv(worker).await?));
        }

        self.enter(Phase::Merging);
        let mut global = CounterTable::new();
        let mut merged_records = 0;
        let mut decode_stats = Vec::with_capacity(partials.len());
        for (worker, payload) in partials {
            let decoded = codec::decode(&payload, bounds);
            merged_records += decoded.stats.accepted;
            decode_stats.push((worker, decoded.stats));
            global.merge(decoded.table);
        }
        info!(
            "merged {} records into {} distinct words",
            merged_records,
            global.len()
        );
        transport.barrier().await?;

        self.enter(Phase::Ranking);
        let report = Report::new(global, self.config.order);

        self.enter(Phase::Done);
        let elapsed = start.elapsed();
        info!(
            "Execution time for rank {} : {:.9} seconds",
            transport.rank(),
            elapsed.as_secs_f64()
        );
        Ok(Outcome {
            report,
            lines: self.corpus.len(),
            merged_records,
            decode_stats,
            elapsed,
        })
    }
}
