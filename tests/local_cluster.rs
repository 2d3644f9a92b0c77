//! End-to-end counting rounds over the in-process transport.

use wclite::standalone::run_local;
use wclite::{Corpus, CountConfig, Order, Report};

fn scenario_corpus() -> Corpus {
    Corpus::from_texts(["The cat sat.\nThe DOG sat!\n"])
}

async fn report(corpus: Corpus, min: usize, max: usize, order: Order, workers: u32) -> Report {
    let config = CountConfig::new(min, max, order).unwrap();
    let (outcome, _) = run_local(config, corpus, workers).await.unwrap();
    outcome.report
}

fn lines(report: &Report) -> Vec<String> {
    report.entries.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn alphabetical_scenario() {
    let report = report(scenario_corpus(), 2, 10, Order::Alphabetical, 2).await;
    assert_eq!(lines(&report), ["cat: 1", "dog: 1", "sat: 2", "the: 2"]);
}

#[tokio::test]
async fn frequency_scenario() {
    let report = report(scenario_corpus(), 2, 10, Order::Frequency, 2).await;
    assert_eq!(lines(&report), ["the: 2", "sat: 2", "dog: 1", "cat: 1"]);
}

#[tokio::test]
async fn min_len_above_every_word_gives_empty_report() {
    let report = report(scenario_corpus(), 4, 10, Order::Alphabetical, 2).await;
    assert!(report.is_empty());
    assert_eq!(report.to_string(), "Word Count Report (Alphabetical Order):\n");
}

#[tokio::test]
async fn empty_corpus_completes_for_any_worker_count() {
    for workers in [1, 2, 7] {
        let report = report(Corpus::new(), 1, 10, Order::Frequency, workers).await;
        assert!(report.is_empty());
    }
}

#[tokio::test]
async fn result_does_not_depend_on_worker_count() {
    let text = "It was the best of times, it was the worst of times,\n\
                it was the age of wisdom, it was the age of foolishness,\n\
                it was the epoch of belief, it was the epoch of incredulity,\n";
    let single = report(Corpus::from_texts([text]), 1, 20, Order::Frequency, 1).await;
    for workers in [2, 3, 5, 10] {
        let many = report(Corpus::from_texts([text]), 1, 20, Order::Frequency, workers).await;
        assert_eq!(many, single);
    }
    assert_eq!(single.entries[0].word, "was");
    assert_eq!(single.entries[0].count, 6);
}

#[tokio::test]
async fn rejects_zero_workers() {
    let config = CountConfig::new(1, 10, Order::Alphabetical).unwrap();
    assert!(run_local(config, scenario_corpus(), 0).await.is_err());
}

#[tokio::test]
async fn many_lines_exceed_link_capacity() {
    let text = "alpha beta\n".repeat(5000);
    let report = report(Corpus::from_texts([text]), 1, 10, Order::Alphabetical, 3).await;
    assert_eq!(lines(&report), ["alpha: 5000", "beta: 5000"]);
}
