//! **crucible-core** — core types for run-length constrained grid pathfinding.
//!
//! This crate provides the geometry primitives and the immutable cost grid
//! shared by the *crucible* search engine.

pub mod geom;
pub mod grid;

pub use geom::{Direction, Point, Range, RangeIter};
pub use grid::{CostGrid, GridError, MalformedGrid};
