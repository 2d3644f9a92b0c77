use clap::{Parser, Subcommand};

use crate::cmd::JobArgs;

pub mod engine;

pub use engine::run_local;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count words with in-process workers
    Count {
        /// Number of worker tasks
        #[arg(short = 'n', long, default_value_t = 4)]
        workers: u32,

        #[command(flatten)]
        job: JobArgs,
    },
}
