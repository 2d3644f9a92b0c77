use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tokio::net::TcpListener;
use wclite::cmd::coordinator::Args;
use wclite::transport::tcp::TcpEndpoint;
use wclite::Coordinator;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let workers = args.workers;
    let port = args.port;
    let job = args.job.resolve()?;

    let mut coordinator = Coordinator::from_inputs(job.config, &job.inputs)?;

    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("binding port {port}"))?;
    info!("waiting for {} workers on {}", workers, listener.local_addr()?);
    let mut transport = TcpEndpoint::accept(&listener, workers).await?;

    let outcome = coordinator.run(&mut transport).await?;
    job.write_report(&outcome.report)?;
    info!(
        "wrote {} entries ({} records merged) to {}",
        outcome.report.entries.len(),
        outcome.merged_records,
        job.output
    );
    Ok(())
}
