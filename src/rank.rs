//! Total ordering of the merged table into the final report.

use std::fmt;
use std::io::{self, Write};

use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::CounterTable;

/// How the report is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Ascending by word.
    #[default]
    #[value(alias = "a")]
    #[serde(alias = "a")]
    Alphabetical,
    /// Descending by count; equal counts are in descending word order.
    #[value(alias = "n")]
    #[serde(alias = "n")]
    Frequency,
}

impl Order {
    /// Maps the single-letter answer of the interactive prompt.
    ///
    /// `a` selects alphabetical order; any other letter selects frequency.
    pub fn from_letter(letter: char) -> Self {
        match letter {
            'a' => Order::Alphabetical,
            _ => Order::Frequency,
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Order::Alphabetical => "Word Count Report (Alphabetical Order):",
            Order::Frequency => "Word Count Report (Number of Words Order):",
        }
    }
}

/// One `(word, count)` line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub word: String,
    pub count: u64,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.word, self.count)
    }
}

/// Re-emits the whole table as an ordered sequence. Nothing is truncated.
pub fn rank(table: CounterTable, order: Order) -> Vec<ReportEntry> {
    let entries = table
        .into_iter()
        .map(|(word, count)| ReportEntry { word, count });
    match order {
        // the table already iterates in ascending word order
        Order::Alphabetical => entries.collect(),
        Order::Frequency => entries
            .sorted_by(|a, b| b.count.cmp(&a.count).then_with(|| b.word.cmp(&a.word)))
            .collect(),
    }
}

/// The final ranked report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub order: Order,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn new(table: CounterTable, order: Order) -> Self {
        Self {
            order,
            entries: rank(table, order),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the header and one `word: count` line per entry.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{self}")?;
        out.flush()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.order.header())?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CounterTable {
        let mut table = CounterTable::new();
        table.add_count("the", 2);
        table.add_count("cat", 1);
        table.add_count("sat", 2);
        table.add_count("dog", 1);
        table
    }

    fn lines(entries: &[ReportEntry]) -> Vec<String> {
        entries.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn alphabetical_is_ascending_by_word() {
        let ranked = rank(sample(), Order::Alphabetical);
        assert_eq!(lines(&ranked), ["cat: 1", "dog: 1", "sat: 2", "the: 2"]);
    }

    #[test]
    fn frequency_breaks_ties_by_descending_word() {
        let ranked = rank(sample(), Order::Frequency);
        assert_eq!(lines(&ranked), ["the: 2", "sat: 2", "dog: 1", "cat: 1"]);
    }

    #[test]
    fn frequency_is_descending_by_count() {
        let mut table = sample();
        table.add_count("zebra", 5);
        let ranked = rank(table, Order::Frequency);
        assert_eq!(ranked[0].word, "zebra");
        assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn report_renders_header_and_lines() {
        let report = Report::new(sample(), Order::Frequency);
        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Word Count Report (Number of Words Order):\nthe: 2\nsat: 2\ndog: 1\ncat: 1\n"
        );
        assert_eq!(report.to_string().lines().count(), 5);
    }

    #[test]
    fn write_to_matches_display() {
        for order in [Order::Alphabetical, Order::Frequency] {
            let report = Report::new(sample(), order);
            let mut out = Vec::new();
            report.write_to(&mut out).unwrap();
            assert_eq!(String::from_utf8(out).unwrap(), report.to_string());
        }
    }

    #[test]
    fn empty_table_gives_header_only() {
        let report = Report::new(CounterTable::new(), Order::Alphabetical);
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "Word Count Report (Alphabetical Order):\n");
    }

    #[test]
    fn order_letters() {
        assert_eq!(Order::from_letter('a'), Order::Alphabetical);
        assert_eq!(Order::from_letter('n'), Order::Frequency);
        assert_eq!(Order::from_letter('x'), Order::Frequency);
        assert_eq!(Order::from_str("n", true).unwrap(), Order::Frequency);
        assert_eq!(Order::from_str("alphabetical", true).unwrap(), Order::Alphabetical);
    }
}
