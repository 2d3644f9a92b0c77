//! Text encoding of counter tables.
//!
//! A table travels as one `word:count` record per line. Words are
//! alphabetic by construction, so neither `:` nor `\n` can appear inside a
//! word and no escaping is needed. If tokenization ever admits other
//! characters this format has to move to length-prefixed records.
//!
//! The payload itself contains line breaks, so it must be carried by a
//! length-delimited transport frame (see [`crate::transport::Packet`]).

use bytes::{BufMut, Bytes, BytesMut};
use log::debug;
use thiserror::Error;

use crate::{CounterTable, LengthBounds};

const SEPARATOR: char = ':';

/// Why a record was dropped while decoding. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Not exactly one separator, or a count that is not a number.
    #[error("malformed record {0:?}")]
    Malformed(String),

    /// Word fails the length filter.
    #[error("word {0:?} is outside the length bounds")]
    OutOfBounds(String),

    /// Adding the record would overflow the word's count.
    #[error("count for {0:?} overflows")]
    Overflow(String),
}

/// Bookkeeping for one decoded payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Records merged into the table.
    pub accepted: usize,
    pub malformed: usize,
    pub out_of_bounds: usize,
    pub overflowed: usize,
}

/// A decoded table plus what happened to its records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    pub table: CounterTable,
    pub stats: DecodeStats,
}

/// Serializes `table` in ascending word order.
pub fn encode(table: &CounterTable) -> Bytes {
    let mut buf = BytesMut::with_capacity(table.len() * 12);
    for (word, count) in table.iter() {
        buf.put(format!("{word}{SEPARATOR}{count}\n").as_bytes());
    }
    buf.freeze()
}

/// Parses a single `word:count` record and applies the length filter.
pub fn parse_record(record: &str, bounds: LengthBounds) -> Result<(&str, u64), RecordError> {
    let mut fields = record.split(SEPARATOR);
    let (word, count) = match (fields.next(), fields.next(), fields.next()) {
        (Some(word), Some(count), None) => (word, count),
        _ => return Err(RecordError::Malformed(record.to_owned())),
    };
    if !bounds.accepts(word) {
        return Err(RecordError::OutOfBounds(word.to_owned()));
    }
    let count = count
        .trim()
        .parse::<u64>()
        .map_err(|_| RecordError::Malformed(record.to_owned()))?;
    Ok((word, count))
}

/// Rebuilds a table from `payload`, silently skipping bad records.
///
/// The length filter is applied again here so a table from a faulty
/// encoder can never smuggle in words the job did not ask for. Repeated
/// words are summed; a record that would push a count past `u64::MAX` is
/// dropped as [`RecordError::Overflow`].
pub fn decode(payload: &[u8], bounds: LengthBounds) -> Decoded {
    let text = String::from_utf8_lossy(payload);
    let mut decoded = Decoded::default();
    for record in text.lines() {
        let merged = parse_record(record, bounds).and_then(|(word, count)| {
            if decoded.table.checked_add_count(word, count) {
                Ok(())
            } else {
                Err(RecordError::Overflow(word.to_owned()))
            }
        });
        match merged {
            Ok(()) => decoded.stats.accepted += 1,
            Err(err) => {
                debug!("dropping record: {err}");
                match err {
                    RecordError::Malformed(_) => decoded.stats.malformed += 1,
                    RecordError::OutOfBounds(_) => decoded.stats.out_of_bounds += 1,
                    RecordError::Overflow(_) => decoded.stats.overflowed += 1,
                }
            }
        }
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min: usize, max: usize) -> LengthBounds {
        LengthBounds::new(min, max).unwrap()
    }

    #[test]
    fn encodes_sorted_records() {
        let table: CounterTable = ["the", "cat", "the"].into_iter().collect();
        assert_eq!(&encode(&table)[..], b"cat:1\nthe:2\n");
    }

    #[test]
    fn empty_table_encodes_to_nothing() {
        assert!(encode(&CounterTable::new()).is_empty());
        assert_eq!(decode(b"", bounds(0, 10)), Decoded::default());
    }

    #[test]
    fn decode_reverses_encode_within_bounds() {
        let table: CounterTable = ["sat", "the", "dog", "the", "sat", "cat"].into_iter().collect();
        let decoded = decode(&encode(&table), bounds(2, 10));
        assert_eq!(decoded.table, table);
        assert_eq!(decoded.stats.accepted, 4);
    }

    #[test]
    fn skips_records_without_exactly_one_separator() {
        let decoded = decode(b"cat:1\nno separator\na:b:3\ndog:2\n", bounds(1, 10));
        assert_eq!(decoded.table.get("cat"), Some(1));
        assert_eq!(decoded.table.get("dog"), Some(2));
        assert_eq!(decoded.table.len(), 2);
        assert_eq!(decoded.stats.malformed, 2);
    }

    #[test]
    fn reapplies_length_filter() {
        let decoded = decode(b"a:4\ncat:1\nelephant:2\n", bounds(2, 5));
        assert_eq!(decoded.table.len(), 1);
        assert_eq!(decoded.table.get("cat"), Some(1));
        assert_eq!(decoded.stats.out_of_bounds, 2);
        assert_eq!(decoded.stats.accepted, 1);
    }

    #[test]
    fn non_numeric_count_is_malformed() {
        assert_eq!(
            parse_record("cat:many", bounds(1, 5)),
            Err(RecordError::Malformed("cat:many".to_owned()))
        );
    }

    #[test]
    fn repeated_words_are_summed() {
        let decoded = decode(b"cat:1\ncat:3\n", bounds(1, 5));
        assert_eq!(decoded.table.get("cat"), Some(4));
        assert_eq!(decoded.stats.accepted, 2);
    }

    #[test]
    fn overflowing_record_is_dropped() {
        let decoded = decode(b"cat:18446744073709551615\ncat:1\ndog:2\n", bounds(1, 10));
        assert_eq!(decoded.table.get("cat"), Some(u64::MAX));
        assert_eq!(decoded.table.get("dog"), Some(2));
        assert_eq!(decoded.stats.accepted, 2);
        assert_eq!(decoded.stats.overflowed, 1);
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let decoded = decode(b"cat:1\r\ndog:2\r\n", bounds(1, 5));
        assert_eq!(decoded.table.get("dog"), Some(2));
    }
}
