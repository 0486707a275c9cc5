//! Shortest paths on cost grids under directional run-length rules.
//!
//! A path pays the cost of every cell it enters. After entering a direction
//! it must keep going for at least `min_run` cells before turning, it may
//! not hold one direction for more than `max_run` cells, and it may never
//! reverse. The search runs Dijkstra over states that carry the last
//! direction and current run length alongside the position:
//!
//! - [`StateCodec`] maps states to dense [`StateKey`]s
//! - [`MoveGenerator`] enumerates legal hops; a turn is one `min_run`-cell hop
//! - [`Frontier`] keeps the cheapest edge per state and prunes dominated ones
//! - [`RunSearch`] drives the loop and reconstructs the [`Route`]
//!
//! ```
//! use crucible_core::CostGrid;
//! use crucible_paths::{RunLimits, min_path_cost};
//!
//! let grid: CostGrid = "12345".parse().unwrap();
//! assert_eq!(min_path_cost(&grid, RunLimits::ULTRA), Ok(14));
//! ```
//!
//! [`cell_dijkstra`] solves the unconstrained problem on the same fields.

mod dijkstra;
mod error;
mod frontier;
mod limits;
mod moves;
mod search;
mod state;
mod traits;
mod visited;

pub use dijkstra::cell_dijkstra;
pub use error::SearchError;
pub use frontier::{Frontier, FrontierEmpty, Offer};
pub use limits::{RunLimits, SearchConfig};
pub use moves::{Edge, MoveGenerator};
pub use search::{Phase, Route, RunSearch, min_path_cost, shortest_route};
pub use state::{SearchState, StateCodec, StateKey};
pub use traits::CostField;
pub use visited::{Settled, Visited};
