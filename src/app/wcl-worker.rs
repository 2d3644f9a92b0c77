use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use wclite::cmd::worker::Args;
use wclite::transport::tcp::TcpEndpoint;
use wclite::Worker;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut transport = TcpEndpoint::connect(args.join.as_str())
        .await
        .with_context(|| format!("joining coordinator at {}", args.join))?;

    let summary = Worker::new().run(&mut transport).await?;
    info!(
        "worker {} counted {} words ({} distinct) in {} lines",
        summary.rank, summary.words, summary.distinct, summary.lines
    );
    Ok(())
}
