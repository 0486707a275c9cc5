use std::collections::BinaryHeap;

use crucible_core::Point;

use crate::frontier::NodeRef;
use crate::traits::CostField;

/// Plain 4-neighbour Dijkstra over entry costs, ignoring run-length rules.
///
/// Returns the cheapest cost of reaching `to` from `from` (the cost of
/// `from` itself is not paid), or `None` if either point is outside the
/// field.
pub fn cell_dijkstra<F: CostField + ?Sized>(field: &F, from: Point, to: Point) -> Option<u32> {
    let rng = field.bounds();
    let start = rng.index_of(from)?;
    let goal = rng.index_of(to)?;

    let mut dist = vec![u32::MAX; rng.len()];
    dist[start] = 0;
    let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
    open.push(NodeRef { idx: start, cost: 0 });

    while let Some(current) = open.pop() {
        let ci = current.idx;
        // Skip stale entries.
        if current.cost > dist[ci] {
            continue;
        }
        if ci == goal {
            return Some(current.cost);
        }

        for np in rng.point_at(ci).neighbors_4() {
            let Some(ni) = rng.index_of(np) else {
                continue;
            };
            let Ok(step) = field.cost(np) else {
                continue;
            };
            let tentative = current.cost.saturating_add(step);
            if tentative >= dist[ni] {
                continue;
            }
            dist[ni] = tentative;
            open.push(NodeRef {
                idx: ni,
                cost: tentative,
            });
        }
    }
    None
}
