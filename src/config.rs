//! Job configuration shared by every participant.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::rank::Order;
use crate::{Error, Result};

/// Inclusive word-length filter `[min, max]`, measured in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    min: usize,
    max: usize,
}

impl LengthBounds {
    /// Returns [`Error::InvalidBounds`] when `max < min`.
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if max < min {
            return Err(Error::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> usize {
        self.min
    }

    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Whether `word` has an accepted length.
    #[inline]
    pub fn accepts(&self, word: &str) -> bool {
        self.range().contains(&word.chars().count())
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

/// Everything a run needs besides the corpus and the worker count.
///
/// Can be loaded from a JSON job file:
///
/// ```json
/// { "min_len": 2, "max_len": 10, "order": "frequency" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountConfig {
    pub min_len: usize,
    pub max_len: usize,
    #[serde(default)]
    pub order: Order,
}

impl CountConfig {
    pub fn new(min_len: usize, max_len: usize, order: Order) -> Result<Self> {
        let config = Self {
            min_len,
            max_len,
            order,
        };
        config.bounds()?;
        Ok(config)
    }

    /// Validated length filter for this job.
    pub fn bounds(&self) -> Result<LengthBounds> {
        LengthBounds::new(self.min_len, self.max_len)
    }

    /// Reads and validates a JSON job file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.bounds()?;
        Ok(config)
    }
}
