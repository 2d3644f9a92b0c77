use futures::future::try_join_all;
use log::info;
use tokio::task::JoinHandle;

use crate::transport::local;
use crate::*;

/// Runs a whole counting round inside this process.
///
/// Spawns one tokio task per worker on an in-process cluster, drives the
/// coordinator on the current task and joins every worker once the
/// coordinator has passed the final barrier.
pub async fn run_local(
    config: CountConfig,
    corpus: Corpus,
    workers: u32,
) -> Result<(Outcome, Vec<WorkerSummary>)> {
    let mut coordinator = Coordinator::new(config, corpus)?;
    let (mut root, endpoints) = local::cluster(workers)?;

    let handles: Vec<JoinHandle<Result<WorkerSummary>>> = endpoints
        .into_iter()
        .map(|mut endpoint| tokio::spawn(async move { Worker::new().run(&mut endpoint).await }))
        .collect();

    let outcome = coordinator.run(&mut root).await?;

    let summaries = try_join_all(handles)
        .await
        .map_err(|err| Error::WorkerPanicked(err.to_string()))?
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    info!(
        "{} lines over {} workers, {} distinct words",
        outcome.lines,
        workers,
        outcome.report.entries.len()
    );
    Ok((outcome, summaries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn worker_tables_add_up_to_the_global_table() {
        let corpus = Corpus::from_texts(["one two two\nthree three three\nfour\n"]);
        let config = CountConfig::new(1, 10, Order::Alphabetical).unwrap();
        let (outcome, summaries) = run_local(config, corpus, 2).await.unwrap();

        let local_words: u64 = summaries.iter().map(|s| s.words).sum();
        let global_words: u64 = outcome.report.entries.iter().map(|e| e.count).sum();
        assert_eq!(local_words, global_words);
        assert_eq!(global_words, 7);

        let local_distinct: usize = summaries.iter().map(|s| s.distinct).sum();
        assert_eq!(outcome.merged_records, local_distinct);
    }

    #[tokio::test]
    async fn each_worker_sees_its_round_robin_share() {
        let corpus = Corpus::from_texts(["a\nb\nc\nd\ne\n"]);
        let config = CountConfig::new(1, 1, Order::Alphabetical).unwrap();
        let (_, summaries) = run_local(config, corpus, 3).await.unwrap();
        let lines: Vec<(WorkerId, usize)> = summaries.iter().map(|s| (s.rank, s.lines)).collect();
        assert_eq!(lines, [(1, 2), (2, 2), (3, 1)]);
    }
}
