//! Checks that a finished coloring actually has the path property every
//! algorithm in this crate promises: each color class induces a
//! disjoint union of simple paths (no vertex has more than two
//! same-colored neighbours, and no same-colored cycle exists).

use pc_graph::{Coloring, PlaneGraph};

/// The result of [`verify_path_coloring`]: either the coloring is valid,
/// or the first violation found is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Valid,
    DegreeExceeded { vertex: u32, color: i32 },
    Cycle { color: i32, sample_vertex: u32 },
    Uncolored { vertex: u32 },
}

/// Walks every color class of `coloring` over `graph` in `Θ(|V| + |E|)`
/// time and reports the first structural violation, if any.
pub fn verify_path_coloring(graph: &PlaneGraph<'_>, coloring: &Coloring<'_>) -> VerifyOutcome {
    let n = graph.n();

    for v in 0..n as u32 {
        if !coloring.is_colored(v) {
            return VerifyOutcome::Uncolored { vertex: v };
        }
    }

    for v in 0..n as u32 {
        let c = coloring.get(v);
        let same_color_degree = graph
            .rotation(v)
            .iter()
            .filter(|&&u| coloring.get(u) == c)
            .count();
        if same_color_degree > 2 {
            return VerifyOutcome::DegreeExceeded { vertex: v, color: c };
        }
    }

    let mut visited = vec![false; n];
    for v in 0..n as u32 {
        if visited[v as usize] {
            continue;
        }
        let c = coloring.get(v);
        // Walk the color-`c` component containing `v` as a path: start
        // from `v`, and if it has same-color degree 1 it's an endpoint;
        // otherwise walk in one direction until closing back on `v`
        // (a cycle) or running out of same-color neighbours.
        let mut component = Vec::new();
        let mut stack = vec![v];
        visited[v as usize] = true;
        while let Some(u) = stack.pop() {
            component.push(u);
            for &w in graph.rotation(u) {
                if coloring.get(w) == c && !visited[w as usize] {
                    visited[w as usize] = true;
                    stack.push(w);
                }
            }
        }
        let edge_count: usize = component
            .iter()
            .map(|&u| graph.rotation(u).iter().filter(|&&w| coloring.get(w) == c).count())
            .sum::<usize>()
            / 2;
        if edge_count >= component.len() {
            return VerifyOutcome::Cycle { color: c, sample_vertex: v };
        }
    }

    VerifyOutcome::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_core::Arena;
    use pc_graph::Coloring;

    #[test]
    fn triangle_with_distinct_colors_is_valid() {
        let arena = Arena::with_capacity(4096);
        let rotations = vec![vec![1, 2], vec![2, 0], vec![0, 1]];
        let g = PlaneGraph::build(&arena, &rotations).unwrap();
        let mut c = Coloring::new(&arena, 3);
        c.set(0, 1);
        c.set(1, 2);
        c.set(2, 3);
        assert_eq!(verify_path_coloring(&g, &c), VerifyOutcome::Valid);
    }

    #[test]
    fn monochromatic_triangle_is_a_cycle() {
        let arena = Arena::with_capacity(4096);
        let rotations = vec![vec![1, 2], vec![2, 0], vec![0, 1]];
        let g = PlaneGraph::build(&arena, &rotations).unwrap();
        let mut c = Coloring::new(&arena, 3);
        c.set(0, 1);
        c.set(1, 1);
        c.set(2, 1);
        assert_eq!(
            verify_path_coloring(&g, &c),
            VerifyOutcome::Cycle { color: 1, sample_vertex: 0 }
        );
    }

    #[test]
    fn k4_apex_third_color_is_valid() {
        let arena = Arena::with_capacity(4096);
        let rotations = vec![
            vec![1, 3, 2],
            vec![2, 3, 0],
            vec![0, 3, 1],
            vec![0, 1, 2],
        ];
        let g = PlaneGraph::build(&arena, &rotations).unwrap();
        let mut c = Coloring::new(&arena, 4);
        c.set(0, 1);
        c.set(1, 2);
        c.set(2, 2);
        c.set(3, 3);
        assert_eq!(verify_path_coloring(&g, &c), VerifyOutcome::Valid);
    }
}
