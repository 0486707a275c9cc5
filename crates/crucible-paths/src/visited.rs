use crate::state::{SearchState, StateKey};

/// A finalized state and how it was reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Settled {
    pub state: SearchState,
    /// Minimal cumulative cost from the source.
    pub cost: u32,
    /// The state this one was reached from; `None` for the source.
    pub parent: Option<StateKey>,
}

/// Finalized states, indexed by [`StateKey`]. Entries are write-once.
pub struct Visited {
    slots: Vec<Option<Settled>>,
    count: usize,
}

impl Visited {
    /// An empty table for a key space of `len` slots.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            count: 0,
        }
    }

    /// Number of finalized states.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn contains(&self, key: StateKey) -> bool {
        self.get(key).is_some()
    }

    #[inline]
    pub fn get(&self, key: StateKey) -> Option<&Settled> {
        self.slots.get(key.index()).and_then(|s| s.as_ref())
    }

    /// Finalize `key`. Returns `false`, leaving the table untouched, if it
    /// was already finalized or lies outside the key space.
    pub fn insert(&mut self, key: StateKey, settled: Settled) -> bool {
        let Some(slot) = self.slots.get_mut(key.index()) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(settled);
        self.count += 1;
        true
    }
}
