use clap::Parser;

use super::JobArgs;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Port the coordinator listens on for workers
    #[clap(short = 'P', long, default_value_t = 7878)]
    pub port: u16,
    /// Number of workers to wait for before starting
    #[clap(short = 'n', long, default_value_t = 1)]
    pub workers: u32,
    #[command(flatten)]
    pub job: JobArgs,
}
