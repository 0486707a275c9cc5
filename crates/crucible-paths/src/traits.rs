use crucible_core::{CostGrid, GridError, Point, Range};

/// A rectangular field of non-negative entry costs.
pub trait CostField {
    /// The half-open rectangle of valid positions.
    fn bounds(&self) -> Range;

    /// Cost paid when a path enters `p`. Fails with
    /// [`GridError::OutOfBounds`] outside [`bounds`](Self::bounds).
    fn cost(&self, p: Point) -> Result<u32, GridError>;
}

impl CostField for CostGrid {
    #[inline]
    fn bounds(&self) -> Range {
        CostGrid::bounds(self)
    }

    #[inline]
    fn cost(&self, p: Point) -> Result<u32, GridError> {
        CostGrid::cost(self, p)
    }
}
