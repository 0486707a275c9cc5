use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crucible_core::{CostGrid, Direction, Point};
use crucible_paths::{RunLimits, SearchError, cell_dijkstra, min_path_cost, shortest_route};
use proptest::prelude::*;

fn grid_text(w: usize, cells: &[u8]) -> String {
    cells
        .chunks(w)
        .map(|row| row.iter().map(|&c| char::from(b'0' + c)).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn arb_grid(max_w: usize, max_h: usize) -> impl Strategy<Value = CostGrid> {
    (1..=max_w, 1..=max_h).prop_flat_map(|(w, h)| {
        proptest::collection::vec(0u8..10, w * h)
            .prop_map(move |cells| CostGrid::parse(&grid_text(w, &cells)).unwrap())
    })
}

fn arb_limits() -> impl Strategy<Value = RunLimits> {
    (1u32..5, 0u32..6).prop_map(|(min, extra)| RunLimits::new(min, min + extra))
}

/// Cell-by-cell search with an explicit "may I turn yet" rule, used as an
/// independent oracle for the hop-based engine.
fn stepwise_min_cost(g: &CostGrid, limits: RunLimits) -> Option<u32> {
    type State = (Point, Option<Direction>, u32);
    let dest = g.destination();
    let start: State = (g.source(), None, 0);
    let mut best: HashMap<State, u32> = HashMap::from([(start, 0)]);
    let mut open = BinaryHeap::from([Reverse((0u32, 0usize))]);
    let mut states = vec![start];

    while let Some(Reverse((cost, i))) = open.pop() {
        let (pos, last, run) = states[i];
        if best.get(&states[i]).is_some_and(|&b| b < cost) {
            continue;
        }
        if pos == dest && (last.is_none() || run >= limits.min_run) {
            return Some(cost);
        }
        for dir in Direction::ALL {
            let next_run = match last {
                Some(l) if dir == l.opposite() => continue,
                Some(l) if dir == l => {
                    if run >= limits.max_run {
                        continue;
                    }
                    run + 1
                }
                Some(_) if run < limits.min_run => continue,
                _ => 1,
            };
            let np = pos.step(dir);
            let Ok(c) = g.cost(np) else {
                continue;
            };
            let next: State = (np, Some(dir), next_run);
            let nc = cost + c;
            if best.get(&next).is_some_and(|&b| b <= nc) {
                continue;
            }
            best.insert(next, nc);
            states.push(next);
            open.push(Reverse((nc, states.len() - 1)));
        }
    }
    None
}

#[test]
fn oracle_agrees_on_sample() {
    let g = CostGrid::parse(
        "2413432311323\n3215453535623\n3255245654254\n3446585845452\n\
         4546657867536\n1438598798454\n4457876987766\n3637877979653\n\
         4654967986887\n4564679986453\n1224686865563\n2546548887735\n\
         4322674655533",
    )
    .unwrap();
    assert_eq!(stepwise_min_cost(&g, RunLimits::STANDARD), Some(102));
    assert_eq!(stepwise_min_cost(&g, RunLimits::ULTRA), Some(94));
}

proptest! {
    #[test]
    fn matches_stepwise_oracle(g in arb_grid(7, 7), limits in arb_limits()) {
        let expected = stepwise_min_cost(&g, limits);
        match min_path_cost(&g, limits) {
            Ok(cost) => prop_assert_eq!(Some(cost), expected),
            Err(e) => {
                prop_assert_eq!(e, SearchError::NoPathExists);
                prop_assert_eq!(expected, None);
            }
        }
    }

    #[test]
    fn unbinding_max_run_is_plain_dijkstra(g in arb_grid(8, 8)) {
        let extent = g.width().max(g.height()) as u32;
        let cost = min_path_cost(&g, RunLimits::new(1, extent)).unwrap();
        prop_assert_eq!(Some(cost), cell_dijkstra(&g, g.source(), g.destination()));
    }

    #[test]
    fn raising_a_cell_never_lowers_cost(
        g in arb_grid(7, 7),
        limits in arb_limits(),
        x in 0i32..7,
        y in 0i32..7,
        bump in 1u8..10,
    ) {
        let p = Point::new(x % g.width(), y % g.height());
        let before = g.cost(p).unwrap() as u8;
        let raised = g.with_cost(p, before.saturating_add(bump)).unwrap();
        match (min_path_cost(&g, limits), min_path_cost(&raised, limits)) {
            (Ok(a), Ok(b)) => prop_assert!(b >= a, "{} dropped to {}", a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "reachability changed: {:?} vs {:?}", a, b),
        }
    }

    #[test]
    fn repeated_queries_are_identical(g in arb_grid(6, 6), limits in arb_limits()) {
        prop_assert_eq!(shortest_route(&g, limits), shortest_route(&g, limits));
    }

    #[test]
    fn single_cell_is_free(c in 0u8..10, limits in arb_limits()) {
        let g = CostGrid::parse(&c.to_string()).unwrap();
        prop_assert_eq!(min_path_cost(&g, limits), Ok(0));
    }

    #[test]
    fn routes_are_walkable(g in arb_grid(7, 7), limits in arb_limits()) {
        let Ok(route) = shortest_route(&g, limits) else {
            return Ok(());
        };
        prop_assert_eq!(route.path.first(), Some(&g.source()));
        prop_assert_eq!(route.path.last(), Some(&g.destination()));
        let mut sum = 0;
        let mut prev_dir: Option<Direction> = None;
        let mut run = 0;
        for w in route.path.windows(2) {
            let dir = Direction::between(w[0], w[1]);
            prop_assert!(dir.is_some(), "{} -> {} is not a step", w[0], w[1]);
            let dir = dir.unwrap();
            sum += g.cost(w[1]).unwrap();
            if Some(dir) == prev_dir {
                run += 1;
            } else {
                if let Some(p) = prev_dir {
                    prop_assert_ne!(p.opposite(), dir);
                    prop_assert!(run >= limits.min_run);
                }
                run = 1;
            }
            prop_assert!(run <= limits.max_run);
            prev_dir = Some(dir);
        }
        if prev_dir.is_some() {
            prop_assert!(run >= limits.min_run);
        }
        prop_assert_eq!(sum, route.cost);
    }

    #[test]
    fn reachability_depends_only_on_shape(
        g in arb_grid(7, 7),
        limits in arb_limits(),
    ) {
        let flat = CostGrid::parse(
            &grid_text(g.width() as usize, &vec![1; (g.width() * g.height()) as usize]),
        )
        .unwrap();
        prop_assert_eq!(
            min_path_cost(&g, limits).is_ok(),
            min_path_cost(&flat, limits).is_ok()
        );
    }
}
