use std::collections::HashMap;

/// Per-parse attempt numbering. Must be fed submissions in ascending
/// chronological order; each parser creates its own counter so no state
/// survives between parses.
#[derive(Debug, Default)]
pub struct AttemptCounter {
    counts: HashMap<(usize, usize), u32>,
}

impl AttemptCounter {
    pub fn new() -> AttemptCounter {
        AttemptCounter::default()
    }

    /// Returns 1 on the first call for a (team, problem) pair and the
    /// previous result + 1 on each subsequent call.
    pub fn next(&mut self, team: usize, problem: usize) -> u32 {
        let count = self.counts.entry((team, problem)).or_insert(0);
        *count += 1;
        *count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_pair() {
        let mut counter = AttemptCounter::new();
        assert_eq!(counter.next(0, 0), 1);
        assert_eq!(counter.next(0, 0), 2);
        assert_eq!(counter.next(0, 1), 1);
        assert_eq!(counter.next(1, 0), 1);
        assert_eq!(counter.next(0, 0), 3);
    }

    #[test]
    fn counters_are_independent() {
        let mut first = AttemptCounter::new();
        first.next(0, 0);
        first.next(0, 0);
        let mut second = AttemptCounter::new();
        assert_eq!(second.next(0, 0), 1);
    }
}
