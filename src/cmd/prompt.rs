//! Interactive job entry, used when no inputs are given on the command line.

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};

use crate::{CountConfig, Order};

/// Whitespace-separated answers, possibly several per line.
struct Answers<R> {
    input: R,
    pending: Vec<String>,
}

impl<R: BufRead> Answers<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: Vec::new(),
        }
    }

    fn next(&mut self) -> Result<String> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                bail!("unexpected end of input");
            }
            self.pending = line.split_whitespace().rev().map(str::to_owned).collect();
        }
        self.pending.pop().ok_or_else(|| anyhow!("no answer"))
    }

    fn number(&mut self, what: &str) -> Result<usize> {
        let answer = self.next()?;
        answer
            .parse()
            .with_context(|| format!("{what}: {answer:?} is not a non-negative number"))
    }
}

/// Asks for the input files, the length bounds and the report order.
pub fn prompt_job<R: BufRead, W: Write>(input: R, mut out: W) -> Result<(Vec<String>, CountConfig)> {
    let mut answers = Answers::new(input);

    write!(out, "Enter the number of text files: ")?;
    out.flush()?;
    let count = answers.number("number of text files")?;

    let mut files = Vec::with_capacity(count);
    for i in 0..count {
        write!(out, "Enter the path of text file {}: ", i + 1)?;
        out.flush()?;
        files.push(answers.next()?);
    }

    write!(out, "Enter the minimum length of words to consider: ")?;
    out.flush()?;
    let min_len = answers.number("minimum length")?;

    write!(out, "Enter the maximum length of words to consider: ")?;
    out.flush()?;
    let max_len = answers.number("maximum length")?;

    write!(
        out,
        "Enter 'a' for alphabetical order or 'n' for number of words order: "
    )?;
    out.flush()?;
    let letter = answers.next()?.chars().next().unwrap_or('n');

    let config = CountConfig::new(min_len, max_len, Order::from_letter(letter))?;
    Ok((files, config))
}
