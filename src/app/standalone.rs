use anyhow::Result;
use clap::Parser;
use log::info;
use wclite::standalone::{run_local, Args, Commands};
use wclite::Corpus;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Commands::Count { workers, job } = Args::parse().command;
    let job = job.resolve()?;

    let corpus = Corpus::collect(&job.inputs)?;
    let (outcome, summaries) = run_local(job.config, corpus, workers).await?;
    for summary in &summaries {
        info!(
            "worker {}: {} lines, {} words, {:.9} s",
            summary.rank,
            summary.lines,
            summary.words,
            summary.elapsed.as_secs_f64()
        );
    }
    job.write_report(&outcome.report)?;
    Ok(())
}
