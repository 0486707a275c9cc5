//! Successor generation under the run-length rules.

use crucible_core::{Direction, Point};

use crate::error::SearchError;
use crate::limits::RunLimits;
use crate::state::SearchState;
use crate::traits::CostField;

/// A legal hop between two search states.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: SearchState,
    pub to: SearchState,
    /// Sum of the entry costs of every cell entered by this hop.
    pub step_cost: u32,
    /// Cost of the whole path up to and including this hop.
    pub total_cost: u32,
}

/// Enumerates the legal successors of a search state.
///
/// Continuing straight advances one cell. Turning, or leaving the source,
/// advances `min_run` cells in a single hop so that the minimum run is
/// satisfied by construction.
pub struct MoveGenerator<'a, F: CostField + ?Sized> {
    field: &'a F,
    limits: RunLimits,
}

impl<'a, F: CostField + ?Sized> MoveGenerator<'a, F> {
    /// Create a generator over `field`. `limits` are assumed validated.
    pub fn new(field: &'a F, limits: RunLimits) -> Self {
        Self { field, limits }
    }

    /// The run limits in force.
    #[inline]
    pub fn limits(&self) -> RunLimits {
        self.limits
    }

    /// Append every legal edge out of `from` into `buf`. The caller clears
    /// `buf` before calling. `cost` is the cumulative cost of `from`.
    pub fn successors(
        &self,
        from: &SearchState,
        cost: u32,
        buf: &mut Vec<Edge>,
    ) -> Result<(), SearchError> {
        for dir in Direction::ALL {
            let (hops, run) = match from.last {
                Some(last) if dir == last.opposite() => continue,
                Some(last) if dir == last => {
                    if from.run >= self.limits.max_run {
                        continue;
                    }
                    (1, from.run + 1)
                }
                _ => (self.limits.min_run, self.limits.min_run),
            };

            let Some((pos, step_cost)) = self.walk(from.pos, dir, hops)? else {
                continue;
            };
            buf.push(Edge {
                from: *from,
                to: SearchState::moving(pos, dir, run),
                step_cost,
                total_cost: cost
                    .checked_add(step_cost)
                    .ok_or(SearchError::CostOverflow)?,
            });
        }
        Ok(())
    }

    /// Step `hops` cells from `start` towards `dir`, summing entry costs.
    /// Returns `None` if any cell along the way is off the field.
    /// Fails with [`SearchError::CostOverflow`] if the sum exceeds `u32`.
    fn walk(
        &self,
        start: Point,
        dir: Direction,
        hops: u32,
    ) -> Result<Option<(Point, u32)>, SearchError> {
        let bounds = self.field.bounds();
        let mut pos = start;
        let mut sum: u32 = 0;
        for _ in 0..hops {
            pos = pos.step(dir);
            if !bounds.contains(pos) {
                return Ok(None);
            }
            sum = sum
                .checked_add(self.field.cost(pos)?)
                .ok_or(SearchError::CostOverflow)?;
        }
        Ok(Some((pos, sum)))
    }
}
