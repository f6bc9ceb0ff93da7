use std::collections::HashSet;
use std::hash::Hash;

/// Share of an element's area that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.2;

pub const REVEAL_TARGET_CLASS: &str = "fade-in";
pub const REVEALED_CLASS: &str = "visible";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// Mark the element visible and stop observing it.
    Reveal,
    Ignore,
}

/// One-way visibility bookkeeping: an element is revealed the first time it
/// intersects the viewport and is never touched again.
#[derive(Debug)]
pub struct RevealTracker<K> {
    revealed: HashSet<K>,
}

impl<K> Default for RevealTracker<K> {
    fn default() -> Self {
        Self {
            revealed: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> RevealTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_intersection(&mut self, key: K, is_intersecting: bool) -> RevealAction {
        if !is_intersecting {
            return RevealAction::Ignore;
        }
        if self.revealed.insert(key) {
            RevealAction::Reveal
        } else {
            RevealAction::Ignore
        }
    }

    pub fn is_revealed(&self, key: &K) -> bool {
        self.revealed.contains(key)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}
