//! Collecting the input corpus.
//!
//! Every input source is split into lines and the lines are concatenated
//! in source order. A line's position in that concatenation is its global
//! index, which is all the partitioner ever looks at.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use glob::glob;
use log::{info, warn};

use crate::utils::split_lines;
use crate::Result;

/// The in-memory corpus, one raw byte line per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    lines: Vec<Bytes>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a corpus from in-memory text bodies, in order.
    pub fn from_texts<I, T>(texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        let mut corpus = Self::new();
        for text in texts {
            corpus.push_source(text.into());
        }
        corpus
    }

    /// Reads every file named by `inputs`, in order.
    ///
    /// Inputs containing glob metacharacters are expanded. A source that
    /// cannot be opened or read contributes no lines.
    pub fn collect<S: AsRef<str>>(inputs: &[S]) -> Result<Self> {
        let mut corpus = Self::new();
        for path in expand_inputs(inputs)? {
            match read_source(&path) {
                Ok(buf) => {
                    let before = corpus.len();
                    corpus.push_source(buf);
                    info!("{}: {} lines", path.display(), corpus.len() - before);
                }
                Err(err) => warn!("skipping {}: {}", path.display(), err),
            }
        }
        Ok(corpus)
    }

    /// Appends all lines of one source.
    pub fn push_source(&mut self, buf: Bytes) {
        self.lines.extend(split_lines(&buf));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[Bytes] {
        &self.lines
    }

    /// Lines paired with their global index.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &Bytes)> + '_ {
        self.lines.iter().enumerate()
    }
}

/// Expands glob patterns; literal paths are passed through untouched.
pub fn expand_inputs<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.contains(['*', '?', '[']) {
            let matched: Vec<PathBuf> = glob(input)?.flatten().collect();
            if matched.is_empty() {
                warn!("pattern {input} matched no files");
            }
            paths.extend(matched);
        } else {
            paths.push(PathBuf::from(input));
        }
    }
    Ok(paths)
}

fn read_source(path: &Path) -> std::io::Result<Bytes> {
    let mut buf = Vec::new();
    File::open(path)?.read_to_end(&mut buf)?;
    Ok(Bytes::from(buf))
}
