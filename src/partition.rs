//! Round-robin assignment of corpus lines to workers.
//!
//! Line `i` belongs to worker `i mod N + 1`. The rule only looks at the
//! index, never at the content, so lines are spread evenly by count but a
//! worker that draws long lines does more work. That skew is accepted.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use log::debug;

use crate::{Error, Result, WorkerId};

/// Deterministic line → worker assignment for a fixed worker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    workers: NonZeroU32,
}

impl Partitioner {
    /// Returns [`Error::NoWorkers`] when `workers` is zero.
    pub fn new(workers: u32) -> Result<Self> {
        let workers = NonZeroU32::new(workers).ok_or(Error::NoWorkers)?;
        Ok(Self { workers })
    }

    pub fn workers(&self) -> u32 {
        self.workers.get()
    }

    /// Worker that owns the line at global index `line`.
    #[inline]
    pub fn owner(&self, line: usize) -> WorkerId {
        (line % self.workers.get() as usize) as WorkerId + 1
    }

    /// Indices in `[0, total_lines)` owned by `worker`, ascending.
    ///
    /// Empty when `worker` is not in `1..=N`.
    pub fn lines_for(&self, worker: WorkerId, total_lines: usize) -> impl Iterator<Item = usize> {
        let valid = (1..=self.workers.get()).contains(&worker);
        let start = if valid { worker as usize - 1 } else { total_lines };
        (start..total_lines).step_by(self.workers.get() as usize)
    }

    /// Full assignment for every worker, including workers that get nothing.
    pub fn assign(&self, total_lines: usize) -> BTreeMap<WorkerId, Vec<usize>> {
        let assignments: BTreeMap<WorkerId, Vec<usize>> = (1..=self.workers.get())
            .map(|worker| (worker, self.lines_for(worker, total_lines).collect()))
            .collect();

        debug!(
            "Assigned {} lines to {} workers",
            total_lines,
            self.workers.get()
        );

        assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_workers_is_rejected() {
        assert!(matches!(Partitioner::new(0), Err(Error::NoWorkers)));
    }

    #[test]
    fn owner_is_round_robin() {
        let p = Partitioner::new(3).unwrap();
        let owners: Vec<WorkerId> = (0..7).map(|i| p.owner(i)).collect();
        assert_eq!(owners, [1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn lines_for_matches_owner() {
        let p = Partitioner::new(4).unwrap();
        for worker in 1..=4 {
            for line in p.lines_for(worker, 23) {
                assert_eq!(p.owner(line), worker);
            }
        }
    }

    #[test]
    fn lines_for_unknown_worker_is_empty() {
        let p = Partitioner::new(2).unwrap();
        assert_eq!(p.lines_for(0, 10).count(), 0);
        assert_eq!(p.lines_for(3, 10).count(), 0);
    }

    #[test]
    fn more_workers_than_lines() {
        let p = Partitioner::new(5).unwrap();
        let assignments = p.assign(2);
        assert_eq!(assignments.len(), 5);
        assert_eq!(assignments[&1], [0]);
        assert_eq!(assignments[&2], [1]);
        assert!(assignments[&3].is_empty());
    }

    #[test]
    fn assignment_covers_every_line_exactly_once() {
        for workers in 1..=6 {
            let p = Partitioner::new(workers).unwrap();
            for total in 0..=20 {
                let mut seen = vec![0usize; total];
                for (worker, lines) in p.assign(total) {
                    for line in lines {
                        assert_eq!(p.owner(line), worker, "N={workers} L={total}");
                        seen[line] += 1;
                    }
                }
                assert!(seen.iter().all(|&n| n == 1), "N={workers} L={total}: {seen:?}");
            }
        }
    }
}
