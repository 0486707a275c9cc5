//! The open set of a run-length search, with dominance pruning.

use std::collections::BinaryHeap;
use std::fmt;

use crate::error::SearchError;
use crate::moves::Edge;
use crate::state::{StateCodec, StateKey};

/// Reference into a dense slot array, ordered by cost for use in
/// `BinaryHeap`. Equal costs pop in ascending index order.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) cost: u32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest cost first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of [`Frontier::offer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Offer {
    /// First live entry for this state.
    Inserted,
    /// Cheaper than the previous entry for this state, which it replaced.
    Replaced,
    /// A live entry at the same position and heading, with no longer a run
    /// and no higher a cost, already exists.
    Dominated,
}

/// Returned by [`Frontier::pop_min`] when no live entries remain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrontierEmpty;

impl fmt::Display for FrontierEmpty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("frontier is empty")
    }
}

impl std::error::Error for FrontierEmpty {}

/// Discovered but not yet finalized states, each holding the cheapest known
/// edge that reaches it.
///
/// Slots are dense and indexed by [`StateKey`]. All run lengths for one
/// (position, heading) pair are adjacent, so the dominance check is a short
/// slice scan. The heap uses lazy deletion: replaced or popped entries stay
/// in it until they surface and are skipped.
pub struct Frontier {
    codec: StateCodec,
    slots: Vec<Option<Edge>>,
    open: BinaryHeap<NodeRef>,
    live: usize,
}

impl Frontier {
    /// Create an empty frontier over the key space of `codec`.
    pub fn new(codec: StateCodec) -> Self {
        Self {
            slots: vec![None; codec.len()],
            codec,
            open: BinaryHeap::new(),
            live: 0,
        }
    }

    /// The codec used to key entries.
    #[inline]
    pub fn codec(&self) -> &StateCodec {
        &self.codec
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Cumulative cost of the live entry for `key`, if any.
    #[inline]
    pub fn best_cost(&self, key: StateKey) -> Option<u32> {
        self.slots
            .get(key.index())
            .and_then(|s| s.as_ref())
            .map(|e| e.total_cost)
    }

    /// Fold `edge` into the frontier unless a live entry dominates it.
    ///
    /// The exact same state counts as a dominator, so an entry is only
    /// replaced by a strictly cheaper edge.
    pub fn offer(&mut self, edge: Edge) -> Result<Offer, SearchError> {
        let to = edge.to;
        let oob = SearchError::OutOfBounds(to.pos);
        let key = self.codec.encode(&to).ok_or(oob.clone())?;
        let span = self.codec.runs_up_to(to.pos, to.last, to.run).ok_or(oob)?;

        let dominated = self.slots[span]
            .iter()
            .flatten()
            .any(|e| e.total_cost <= edge.total_cost);
        if dominated {
            return Ok(Offer::Dominated);
        }

        let slot = &mut self.slots[key.index()];
        let outcome = if slot.is_some() {
            Offer::Replaced
        } else {
            self.live += 1;
            Offer::Inserted
        };
        *slot = Some(edge);
        self.open.push(NodeRef {
            idx: key.index(),
            cost: edge.total_cost,
        });
        Ok(outcome)
    }

    /// Remove and return the cheapest live entry. Ties go to the smaller key.
    pub fn pop_min(&mut self) -> Result<(StateKey, Edge), FrontierEmpty> {
        while let Some(top) = self.open.pop() {
            let slot = &mut self.slots[top.idx];
            // Skip stale references.
            if !matches!(slot, Some(e) if e.total_cost == top.cost) {
                continue;
            }
            if let Some(edge) = slot.take() {
                self.live -= 1;
                return Ok((StateKey(top.idx), edge));
            }
        }
        Err(FrontierEmpty)
    }
}
