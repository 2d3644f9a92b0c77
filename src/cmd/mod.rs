//! Command-line arguments shared by the binaries.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::{CountConfig, Order, DEFAULT_OUTPUT};

pub mod coordinator;
pub mod prompt;
pub mod worker;

pub const DEFAULT_MIN_LEN: usize = 1;
pub const DEFAULT_MAX_LEN: usize = 64;

/// Job description given on the command line.
#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    /// Input files or glob patterns, read in order. Prompts when omitted.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// JSON job file with `min_len`, `max_len` and `order`
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Shortest word to count
    #[arg(long)]
    pub min_len: Option<usize>,

    /// Longest word to count
    #[arg(long)]
    pub max_len: Option<usize>,

    /// Report order
    #[arg(short = 'O', long, value_enum)]
    pub order: Option<Order>,

    /// Report destination, `-` for stdout
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,
}

/// A fully resolved and validated job.
#[derive(Debug, Clone)]
pub struct Job {
    pub inputs: Vec<String>,
    pub config: CountConfig,
    pub output: String,
}

impl JobArgs {
    /// Merges the job file (if any) with the flags, flags winning.
    ///
    /// Falls back to the interactive prompt on stdin when no input was named.
    /// The prompt asks for the bounds and order itself, so job flags without
    /// inputs are rejected.
    pub fn resolve(self) -> Result<Job> {
        if self.inputs.is_empty() {
            if self.has_job_flags() {
                bail!("--config, --min-len, --max-len and --order need at least one INPUT");
            }
            let stdin = std::io::stdin();
            let (inputs, config) = prompt::prompt_job(stdin.lock(), std::io::stdout())?;
            return Ok(Job {
                inputs,
                config,
                output: self.output,
            });
        }

        let base = match &self.config {
            Some(path) => CountConfig::from_json_file(path)
                .with_context(|| format!("loading job file {}", path.display()))?,
            None => CountConfig {
                min_len: DEFAULT_MIN_LEN,
                max_len: DEFAULT_MAX_LEN,
                order: Order::default(),
            },
        };
        let config = CountConfig::new(
            self.min_len.unwrap_or(base.min_len),
            self.max_len.unwrap_or(base.max_len),
            self.order.unwrap_or(base.order),
        )?;
        Ok(Job {
            inputs: self.inputs,
            config,
            output: self.output,
        })
    }

    fn has_job_flags(&self) -> bool {
        self.config.is_some()
            || self.min_len.is_some()
            || self.max_len.is_some()
            || self.order.is_some()
    }
}

impl Job {
    /// Writes `report` to the job's output (`-` is stdout).
    pub fn write_report(&self, report: &crate::Report) -> Result<()> {
        if self.output == "-" {
            report.write_to(std::io::stdout().lock())?;
        } else {
            let file = std::fs::File::create(&self.output)
                .with_context(|| format!("creating {}", self.output))?;
            report.write_to(std::io::BufWriter::new(file))?;
        }
        Ok(())
    }
}
