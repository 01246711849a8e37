use std::collections::HashSet;

/// The canonical fingerprints of every configuration seen so far in one run.
/// Owned by a single simulation, so independent runs in the same process
/// never share recurrence state.
#[derive(Debug, Clone, Default)]
pub struct History {
    seen: HashSet<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key`, reporting whether it had been seen before. A repeated
    /// key is not re-inserted.
    pub fn record_and_check(&mut self, key: String) -> bool {
        !self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
