//! The search driver: a Dijkstra loop over run-length states.

use crucible_core::Point;

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::limits::{RunLimits, SearchConfig};
use crate::moves::{Edge, MoveGenerator};
use crate::state::{SearchState, StateCodec, StateKey};
use crate::traits::CostField;
use crate::visited::{Settled, Visited};

/// A cheapest path found by [`RunSearch`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Sum of the entry costs of every cell after the source.
    pub cost: u32,
    /// Every cell visited, source and destination included.
    pub path: Vec<Point>,
    /// Number of states finalized, the source included.
    pub expansions: usize,
}

/// Where a [`RunSearch`] stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Running,
    Done(Route),
}

/// A single shortest-path query under run-length rules.
///
/// The source is finalized and expanded on construction. Each
/// [`step`](Self::step) finalizes the cheapest frontier state; the first
/// destination state finalized is optimal over every trailing heading and
/// run length, since states are finalized in non-decreasing cost order.
pub struct RunSearch<'a, F: CostField + ?Sized> {
    moves: MoveGenerator<'a, F>,
    codec: StateCodec,
    frontier: Frontier,
    visited: Visited,
    max_expansions: Option<usize>,
    phase: Phase,
    // scratch buffer for successor edges
    buf: Vec<Edge>,
}

impl<'a, F: CostField + ?Sized> RunSearch<'a, F> {
    /// Prepare a search from the top-left to the bottom-right corner of
    /// `field`.
    pub fn new(field: &'a F, config: SearchConfig) -> Result<Self, SearchError> {
        let bounds = field.bounds();
        Self::between(field, bounds.min, bounds.max.shift(-1, -1), config)
    }

    /// Prepare a search between two arbitrary points of `field`.
    pub fn between(
        field: &'a F,
        from: Point,
        to: Point,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        let limits = config.limits.validate()?;
        let bounds = field.bounds();
        for p in [from, to] {
            if !bounds.contains(p) {
                return Err(SearchError::OutOfBounds(p));
            }
        }

        let codec = StateCodec::new(bounds, to, limits.max_run)?;
        log::debug!(
            "searching {}x{} field from {from} to {to} with runs {}..={} ({} states)",
            bounds.width(),
            bounds.height(),
            limits.min_run,
            limits.max_run,
            codec.len()
        );

        let mut search = Self {
            moves: MoveGenerator::new(field, limits),
            frontier: Frontier::new(codec.clone()),
            visited: Visited::new(codec.len()),
            codec,
            max_expansions: config.max_expansions,
            phase: Phase::Running,
            buf: Vec::with_capacity(4),
        };

        let source = SearchState::source(from);
        let key = search
            .codec
            .encode(&source)
            .ok_or(SearchError::OutOfBounds(from))?;
        search.visited.insert(
            key,
            Settled {
                state: source,
                cost: 0,
                parent: None,
            },
        );
        if search.codec.is_terminal(&source) {
            search.finish(key, 0);
        } else {
            search.expand(&source, 0)?;
        }
        Ok(search)
    }

    /// The run limits in force.
    #[inline]
    pub fn limits(&self) -> RunLimits {
        self.moves.limits()
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done(_))
    }

    /// Number of states finalized so far, the source included.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.visited.len()
    }

    /// Live frontier entries.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Finalize the cheapest frontier state and expand it.
    ///
    /// A no-op once the search is done.
    pub fn step(&mut self) -> Result<&Phase, SearchError> {
        if self.is_done() {
            return Ok(&self.phase);
        }
        if let Some(limit) = self.max_expansions {
            if self.visited.len() >= limit {
                log::warn!("search stopped after {limit} expansions without reaching the destination");
                return Err(SearchError::ExpansionLimit { limit });
            }
        }

        let (key, edge) = self
            .frontier
            .pop_min()
            .map_err(|_| SearchError::NoPathExists)?;
        let state = edge.to;
        let cost = edge.total_cost;
        self.visited.insert(
            key,
            Settled {
                state,
                cost,
                parent: self.codec.encode(&edge.from),
            },
        );
        log::trace!("finalized {state} at cost {cost}");

        if self.codec.is_terminal(&state) {
            self.finish(key, cost);
        } else {
            self.expand(&state, cost)?;
        }
        Ok(&self.phase)
    }

    /// Step until done.
    pub fn run(mut self) -> Result<Route, SearchError> {
        while !self.is_done() {
            self.step()?;
        }
        match self.phase {
            Phase::Done(route) => Ok(route),
            Phase::Running => Err(SearchError::NoPathExists),
        }
    }

    fn expand(&mut self, state: &SearchState, cost: u32) -> Result<(), SearchError> {
        let mut buf = std::mem::take(&mut self.buf);
        buf.clear();
        self.moves.successors(state, cost, &mut buf)?;
        for edge in buf.drain(..) {
            let to = self
                .codec
                .encode(&edge.to)
                .ok_or(SearchError::OutOfBounds(edge.to.pos))?;
            if self.visited.contains(to) {
                continue;
            }
            self.frontier.offer(edge)?;
        }
        self.buf = buf;
        Ok(())
    }

    fn finish(&mut self, key: StateKey, cost: u32) {
        let path = self.trace_path(key);
        let expansions = self.visited.len();
        log::debug!(
            "reached destination at cost {cost} after {expansions} expansions ({} cells)",
            path.len()
        );
        self.phase = Phase::Done(Route {
            cost,
            path,
            expansions,
        });
    }

    /// Walk parent links back to the source, unrolling multi-cell hops.
    fn trace_path(&self, key: StateKey) -> Vec<Point> {
        let mut states = Vec::new();
        let mut cur = Some(key);
        while let Some(k) = cur {
            let Some(settled) = self.visited.get(k) else {
                break;
            };
            states.push(settled.state);
            cur = settled.parent;
        }
        states.reverse();

        let mut path = Vec::new();
        let mut prev: Option<&SearchState> = None;
        for s in &states {
            match (prev, s.last) {
                (Some(p), Some(dir)) => {
                    let d = s.pos - p.pos;
                    let mut pos = p.pos;
                    for _ in 0..(d.x.abs() + d.y.abs()) {
                        pos = pos.step(dir);
                        path.push(pos);
                    }
                }
                _ => path.push(s.pos),
            }
            prev = Some(s);
        }
        path
    }
}

/// Cheapest corner-to-corner route through `field` under `limits`.
pub fn shortest_route<F: CostField + ?Sized>(
    field: &F,
    limits: RunLimits,
) -> Result<Route, SearchError> {
    RunSearch::new(field, SearchConfig::new(limits))?.run()
}

/// Cost of the cheapest corner-to-corner route through `field`.
pub fn min_path_cost<F: CostField + ?Sized>(
    field: &F,
    limits: RunLimits,
) -> Result<u32, SearchError> {
    shortest_route(field, limits).map(|r| r.cost)
}
