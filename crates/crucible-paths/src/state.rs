//! Search states and their dense integer encoding.

use std::fmt;

use crucible_core::{Direction, Point, Range};

use crate::error::SearchError;

/// A position together with the movement history that matters for the
/// run-length rules.
///
/// Only the source state has `last == None`, and it always has `run == 0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchState {
    pub pos: Point,
    pub last: Option<Direction>,
    pub run: u32,
}

impl SearchState {
    /// The starting state at `pos`, with no movement history.
    #[inline]
    pub const fn source(pos: Point) -> Self {
        Self {
            pos,
            last: None,
            run: 0,
        }
    }

    /// A state reached after `run` consecutive steps towards `dir`.
    #[inline]
    pub const fn moving(pos: Point, dir: Direction, run: u32) -> Self {
        Self {
            pos,
            last: Some(dir),
            run,
        }
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last {
            Some(d) => write!(f, "{}{}x{}", self.pos, d, self.run),
            None => write!(f, "{}*", self.pos),
        }
    }
}

/// Dense key of a [`SearchState`], produced by a [`StateCodec`].
///
/// Keys order first by cell (row-major), then by direction slot, then by
/// run length.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey(pub(crate) usize);

impl StateKey {
    /// The slot index of this key.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Direction slots per cell: one for "no direction" plus the four cardinals.
const DIR_SLOTS: usize = 5;

/// Bijection between in-bounds search states and `0..len()`.
///
/// ```text
/// key = ((cell * 5 + dir_slot) * (run_cap + 1)) + run
/// ```
///
/// `run_cap` is `max_run` bounded by the grid's longest axis, since no
/// straight run can be longer than that anyway.
#[derive(Clone, Debug)]
pub struct StateCodec {
    bounds: Range,
    destination: Point,
    run_cap: u32,
    len: usize,
}

impl StateCodec {
    /// Build a codec for states inside `bounds` with runs up to `max_run`.
    pub fn new(bounds: Range, destination: Point, max_run: u32) -> Result<Self, SearchError> {
        let extent = bounds.width().max(bounds.height()).max(0) as u32;
        let run_cap = max_run.min(extent);
        let len = bounds
            .len()
            .checked_mul(DIR_SLOTS)
            .and_then(|n| n.checked_mul(run_cap as usize + 1))
            .ok_or(SearchError::StateSpaceOverflow)?;
        Ok(Self {
            bounds,
            destination,
            run_cap,
            len,
        })
    }

    /// Size of the key space.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the key space is empty (empty bounds).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The rectangle of encodable positions.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// The position every terminal state shares.
    #[inline]
    pub fn destination(&self) -> Point {
        self.destination
    }

    /// Whether `state` sits on the destination, whatever its history.
    #[inline]
    pub fn is_terminal(&self, state: &SearchState) -> bool {
        state.pos == self.destination
    }

    /// Encode `state`, clamping its run to the codec's cap. Returns `None`
    /// for positions outside the bounds.
    #[inline]
    pub fn encode(&self, state: &SearchState) -> Option<StateKey> {
        let base = self.slot_base(state.pos, state.last)?;
        Some(StateKey(base + state.run.min(self.run_cap) as usize))
    }

    /// Inverse of [`encode`](Self::encode) for keys it produced.
    pub fn decode(&self, key: StateKey) -> SearchState {
        let span = self.run_cap as usize + 1;
        let run = (key.0 % span) as u32;
        let rest = key.0 / span;
        let last = (rest % DIR_SLOTS)
            .checked_sub(1)
            .and_then(Direction::from_index);
        let pos = self.bounds.point_at(rest / DIR_SLOTS);
        SearchState { pos, last, run }
    }

    /// Keys of every state at `pos` heading `last` with a run of at most
    /// `run`, in ascending run order.
    #[inline]
    pub fn runs_up_to(
        &self,
        pos: Point,
        last: Option<Direction>,
        run: u32,
    ) -> Option<std::ops::Range<usize>> {
        let base = self.slot_base(pos, last)?;
        Some(base..base + run.min(self.run_cap) as usize + 1)
    }

    #[inline]
    fn slot_base(&self, pos: Point, last: Option<Direction>) -> Option<usize> {
        let cell = self.bounds.index_of(pos)?;
        let dir = last.map_or(0, |d| d.index() + 1);
        Some((cell * DIR_SLOTS + dir) * (self.run_cap as usize + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn codec(w: i32, h: i32, max_run: u32) -> StateCodec {
        let bounds = Range::new(0, 0, w, h);
        StateCodec::new(bounds, Point::new(w - 1, h - 1), max_run).unwrap()
    }

    fn all_states(c: &StateCodec, max_run: u32) -> Vec<SearchState> {
        let mut out = Vec::new();
        for pos in c.bounds() {
            out.push(SearchState::source(pos));
            for d in Direction::ALL {
                for run in 1..=max_run {
                    out.push(SearchState::moving(pos, d, run));
                }
            }
        }
        out
    }

    #[test]
    fn keys_are_unique_and_in_range() {
        let c = codec(4, 3, 3);
        let states = all_states(&c, 3);
        let mut seen = HashSet::new();
        for s in &states {
            let k = c.encode(s).unwrap();
            assert!(k.index() < c.len());
            assert!(seen.insert(k), "collision for {s}");
            assert_eq!(c.decode(k), *s);
        }
    }

    #[test]
    fn run_cap_follows_grid_extent() {
        // A 3x2 grid can never hold a run longer than 3.
        let c = codec(3, 2, 10);
        assert_eq!(c.len(), 6 * 5 * 4);
        let a = SearchState::moving(Point::new(2, 0), Direction::East, 3);
        let b = SearchState::moving(Point::new(2, 0), Direction::East, 10);
        assert_eq!(c.encode(&a), c.encode(&b));
    }

    #[test]
    fn out_of_bounds_has_no_key() {
        let c = codec(3, 3, 3);
        assert_eq!(c.encode(&SearchState::source(Point::new(3, 0))), None);
        assert_eq!(c.encode(&SearchState::source(Point::new(0, -1))), None);
        assert!(c.runs_up_to(Point::new(-1, 0), None, 0).is_none());
    }

    #[test]
    fn terminal_ignores_history() {
        let c = codec(5, 4, 3);
        let dest = Point::new(4, 3);
        assert!(c.is_terminal(&SearchState::moving(dest, Direction::South, 1)));
        assert!(c.is_terminal(&SearchState::moving(dest, Direction::East, 3)));
        assert!(!c.is_terminal(&SearchState::moving(Point::new(4, 2), Direction::South, 1)));
    }

    #[test]
    fn runs_up_to_is_contiguous() {
        let c = codec(4, 4, 3);
        let pos = Point::new(2, 1);
        let span = c.runs_up_to(pos, Some(Direction::West), 2).unwrap();
        assert_eq!(span.len(), 3);
        for (run, k) in span.enumerate() {
            let s = c.decode(StateKey(k));
            assert_eq!(s, SearchState { pos, last: Some(Direction::West), run: run as u32 });
        }
    }

    #[test]
    fn key_order_groups_by_cell() {
        let c = codec(3, 3, 3);
        let a = c.encode(&SearchState::moving(Point::new(0, 0), Direction::West, 3)).unwrap();
        let b = c.encode(&SearchState::source(Point::new(1, 0))).unwrap();
        assert!(a < b);
    }

    #[test]
    fn overflowing_state_space_is_rejected() {
        let bounds = Range::new(0, 0, i32::MAX, i32::MAX);
        assert!(matches!(
            StateCodec::new(bounds, Point::ZERO, u32::MAX),
            Err(SearchError::StateSpaceOverflow)
        ));
    }
}
