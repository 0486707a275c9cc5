use std::fmt;

use crucible_core::{GridError, MalformedGrid, Point};

/// Errors produced while setting up or running a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The grid text could not be parsed.
    MalformedGrid(MalformedGrid),
    /// `min_run` is zero or greater than `max_run`.
    InvalidParameters { min_run: u32, max_run: u32 },
    /// A position escaped the grid. Indicates a bug in move generation.
    OutOfBounds(Point),
    /// The frontier ran dry before any destination state was finalized.
    NoPathExists,
    /// The configured expansion cap was reached first.
    ExpansionLimit { limit: usize },
    /// The state space of the grid does not fit in a `usize` key.
    StateSpaceOverflow,
    /// A cumulative path cost does not fit in a `u32`.
    CostOverflow,
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        match e {
            GridError::MalformedGrid(m) => Self::MalformedGrid(m),
            GridError::OutOfBounds(p) => Self::OutOfBounds(p),
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedGrid(e) => write!(f, "malformed grid: {e}"),
            Self::InvalidParameters { min_run, max_run } => write!(
                f,
                "invalid run limits: min_run={min_run}, max_run={max_run} \
                 (need 1 <= min_run <= max_run)"
            ),
            Self::OutOfBounds(p) => write!(f, "point {p} is outside the grid"),
            Self::NoPathExists => f.write_str("no path satisfies the run limits"),
            Self::ExpansionLimit { limit } => {
                write!(f, "search gave up after {limit} expansions")
            }
            Self::StateSpaceOverflow => f.write_str("state space is too large to index"),
            Self::CostOverflow => f.write_str("path cost overflowed u32"),
        }
    }
}

impl std::error::Error for SearchError {}
