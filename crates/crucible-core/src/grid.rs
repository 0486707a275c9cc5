//! The [`CostGrid`] type: an immutable 2D grid of per-cell entry costs.
//!
//! Grids are parsed from text, one row per line, one ASCII digit per cell.
//! The cost of a cell is paid when a path *enters* it.

use std::fmt;
use std::str::FromStr;

use crate::geom::{Point, Range};

/// An immutable, rectangular, non-empty grid of single-digit costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostGrid {
    costs: Vec<u8>,
    bounds: Range,
}

impl CostGrid {
    /// Parse a grid from text.
    ///
    /// Leading/trailing whitespace is trimmed from the whole string and from
    /// each line, so indented fixtures and `\r\n` line endings are accepted.
    /// Every remaining character must be a digit and all lines must have the
    /// same width.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let mut costs = Vec::new();
        let mut width: Option<usize> = None;
        let mut height = 0usize;

        for (y, line) in s.trim().lines().map(str::trim).enumerate() {
            let mut x = 0usize;
            for ch in line.chars() {
                let Some(d) = ch.to_digit(10) else {
                    return Err(MalformedGrid::InvalidDigit {
                        ch,
                        pos: Point::new(x as i32, y as i32),
                    }
                    .into());
                };
                costs.push(d as u8);
                x += 1;
            }
            match width {
                None => width = Some(x),
                Some(w) if w != x => {
                    return Err(MalformedGrid::Ragged {
                        line: y,
                        expected: w,
                        found: x,
                    }
                    .into());
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(MalformedGrid::Empty.into());
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(MalformedGrid::TooLarge { width, height }.into());
        }

        Ok(Self {
            costs,
            bounds: Range::new(0, 0, width as i32, height as i32),
        })
    }

    /// The bounding range, always anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Top-left corner.
    #[inline]
    pub fn source(&self) -> Point {
        self.bounds.min
    }

    /// Bottom-right corner.
    #[inline]
    pub fn destination(&self) -> Point {
        self.bounds.max.shift(-1, -1)
    }

    /// Entry cost of the cell at `p`.
    pub fn cost(&self, p: Point) -> Result<u32, GridError> {
        self.bounds
            .index_of(p)
            .map(|i| u32::from(self.costs[i]))
            .ok_or(GridError::OutOfBounds(p))
    }

    /// Return a copy of this grid with the cell at `p` set to `cost`.
    ///
    /// `cost` is clamped to a single digit.
    pub fn with_cost(&self, p: Point, cost: u8) -> Result<Self, GridError> {
        let i = self.bounds.index_of(p).ok_or(GridError::OutOfBounds(p))?;
        let mut grid = self.clone();
        grid.costs[i] = cost.min(9);
        Ok(grid)
    }

    /// Row-major iterator over `(Point, cost)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, u32)> + '_ {
        self.bounds
            .iter()
            .zip(self.costs.iter())
            .map(|(p, &c)| (p, u32::from(c)))
    }
}

impl FromStr for CostGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CostGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.width() as usize;
        for (y, row) in self.costs.chunks(w).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for &c in row {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a grid text was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedGrid {
    /// No rows, or rows with no cells.
    Empty,
    /// A line has a different width than the first one.
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character that is not an ASCII digit.
    InvalidDigit { ch: char, pos: Point },
    /// Dimensions do not fit in grid coordinates.
    TooLarge { width: usize, height: usize },
}

impl fmt::Display for MalformedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("grid is empty"),
            Self::Ragged {
                line,
                expected,
                found,
            } => write!(
                f,
                "grid line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidDigit { ch, pos } => {
                write!(f, "grid contains non-digit {ch:?} at {pos}")
            }
            Self::TooLarge { width, height } => {
                write!(f, "grid of {width}x{height} cells is too large")
            }
        }
    }
}

/// Errors produced by [`CostGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The input text is not a rectangular grid of digits.
    MalformedGrid(MalformedGrid),
    /// A coordinate query escaped the grid.
    OutOfBounds(Point),
}

impl From<MalformedGrid> for GridError {
    fn from(e: MalformedGrid) -> Self {
        Self::MalformedGrid(e)
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedGrid(e) => write!(f, "malformed grid: {e}"),
            Self::OutOfBounds(p) => write!(f, "point {p} is outside the grid"),
        }
    }
}

impl std::error::Error for GridError {}
