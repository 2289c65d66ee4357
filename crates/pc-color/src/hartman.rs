//! P3-choose: the list-coloring analogue of [`crate::poh`]. Each vertex
//! carries a small admissible list instead of a fixed three-color
//! palette; the algorithm shrinks every list to a singleton such that
//! the resulting coloring still has the path property.
//!
//! Deciding a vertex `z` rescans its whole remaining rotation exactly as
//! [`crate::poh`] does, for the same reason: a chord onto a third
//! already-committed region must be excluded from `z`'s candidates even
//! though it never triggered `z`'s frame. But a list can also be forced
//! from the *other* direction: committing `z` removes `z`'s color from
//! every undecided neighbour's list, and a neighbour `u` whose list
//! drops to a single remaining color is promoted immediately, without
//! waiting for its own two-reference trigger. This is what keeps a
//! neighbour's shrinking list from ever going empty: the list property
//! only holds if every removal that matters is applied the moment it
//! happens, not discovered lazily at `u`'s own turn.

use std::collections::VecDeque;

use pc_core::Arena;
use pc_graph::{AdmissibleList, AugmentedGraph, Marks};

use crate::frame::{scan_decided_neighbours, CaseCoverage, Frame, FrameRegistry, StepKind};

pub use crate::frame::BoundaryMark;

/// `p3_choose` was called with an input violating its preconditions:
/// malformed boundary, a list too small for its role, or a seed corner
/// without a committed singleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum P3ChooseError {
    EmptyBoundary,
    SplitOutOfRange { split: usize, boundary_len: usize },
    DuplicateBoundaryVertex { vertex: u32 },
    CornerNotSingleton { vertex: u32 },
    ListTooSmall { vertex: u32, len: usize, minimum: usize },
    NoAdmissibleColor { vertex: u32 },
    IncompleteColoring { colored: usize, total: usize },
}

impl std::fmt::Display for P3ChooseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            P3ChooseError::EmptyBoundary => write!(f, "outer cycle must have at least 3 vertices"),
            P3ChooseError::SplitOutOfRange { split, boundary_len } => write!(
                f,
                "split point {split} is out of range for a boundary of length {boundary_len}"
            ),
            P3ChooseError::DuplicateBoundaryVertex { vertex } => {
                write!(f, "vertex {vertex} appears more than once on the outer cycle")
            }
            P3ChooseError::CornerNotSingleton { vertex } => write!(
                f,
                "corner vertex {vertex} must have a singleton admissible list before coloring starts"
            ),
            P3ChooseError::ListTooSmall { vertex, len, minimum } => write!(
                f,
                "vertex {vertex} has an admissible list of length {len}, below the required minimum {minimum}"
            ),
            P3ChooseError::NoAdmissibleColor { vertex } => write!(
                f,
                "vertex {vertex}'s admissible list was exhausted before a consistent color could be chosen"
            ),
            P3ChooseError::IncompleteColoring { colored, total } => write!(
                f,
                "frame stack drained with only {colored} of {total} vertices decided"
            ),
        }
    }
}

impl std::error::Error for P3ChooseError {}

/// Counts how many times each of the list-specific cases fired, on top
/// of the chord cases already tracked by [`CaseCoverage`]: a neighbour
/// whose list was forced to a singleton mid-run (`promoted`), and a
/// vertex whose whole remaining neighbourhood is exactly two or three
/// already-committed vertices (`edge_collapse`, `triangle_collapse`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChooseCoverage {
    pub promoted: u32,
    pub edge_collapse: u32,
    pub triangle_collapse: u32,
}

/// The result of a successful [`p3_choose`] run.
pub struct P3ChooseOutput<'a> {
    pub boundary_mark: &'a [BoundaryMark],
    pub coverage: CaseCoverage,
    pub choose_coverage: ChooseCoverage,
}

/// Shrinks every entry of `lists` to a singleton consistent with a path
/// coloring, given an outer cycle split into an X-path and a Y-path
/// whose shared corners (`outer_cycle[0]` and `outer_cycle[split]`, with
/// wraparound) already carry committed singleton lists.
///
/// `lists[v]` for every interior vertex must have exactly 3 candidates;
/// every other boundary vertex must have at least 2.
pub fn p3_choose<'a>(
    arena: &'a Arena,
    graph: &'a AugmentedGraph<'a>,
    outer_cycle: &[u32],
    split: usize,
    lists: &mut [AdmissibleList],
) -> Result<P3ChooseOutput<'a>, P3ChooseError> {
    if outer_cycle.len() < 3 {
        return Err(P3ChooseError::EmptyBoundary);
    }
    if split == 0 || split >= outer_cycle.len() {
        return Err(P3ChooseError::SplitOutOfRange { split, boundary_len: outer_cycle.len() });
    }

    let n = graph.graph().n();
    let marks_out = arena.alloc_slice_fill_copy(n, BoundaryMark::Interior);
    let mut seen = arena.alloc_slice_fill_copy(n, false);
    let mut marks = Marks::new(arena, n);

    let x_corner = outer_cycle[0];
    let y_corner = outer_cycle[outer_cycle.len() - 1];

    for v in 0..n as u32 {
        if v == x_corner || v == y_corner {
            continue;
        }
        let is_boundary = outer_cycle.contains(&v);
        let minimum = if is_boundary { 2 } else { 3 };
        if lists[v as usize].len() < minimum {
            return Err(P3ChooseError::ListTooSmall {
                vertex: v,
                len: lists[v as usize].len(),
                minimum,
            });
        }
    }

    for corner in [x_corner, y_corner] {
        if lists[corner as usize].committed().is_none() {
            return Err(P3ChooseError::CornerNotSingleton { vertex: corner });
        }
    }

    for (idx, &v) in outer_cycle.iter().enumerate() {
        if seen[v as usize] {
            return Err(P3ChooseError::DuplicateBoundaryVertex { vertex: v });
        }
        seen[v as usize] = true;
        marks_out[v as usize] = if idx < split { BoundaryMark::XPath } else { BoundaryMark::YPath };
    }

    // Commit the remaining boundary vertices by walking each path from
    // its singleton corner, preferring a color that differs from the
    // previously committed neighbour but falling back to agreement
    // when the list forces it. The two chains cover the X-path
    // (starting at x_corner) and the seam-to-Y-path run (starting at
    // the X-path's last vertex, which is already committed by the
    // first chain, through to y_corner).
    commit_chain(&mut lists[..], &outer_cycle[..split]);
    commit_chain(&mut lists[..], &outer_cycle[split - 1..]);

    let x_mark = marks.fresh();
    let y_mark = marks.fresh();
    for (idx, &v) in outer_cycle.iter().enumerate() {
        marks.set(v, if idx < split { x_mark } else { y_mark });
    }

    let mut registry = FrameRegistry::new(arena, graph);
    for &v in outer_cycle {
        registry.seed_decided(v, &|w: u32| lists[w as usize].committed().is_some(), &mut marks);
    }

    let mut colored = outer_cycle.len();
    let mut choose_coverage = ChooseCoverage::default();

    while let Some(mut frame) = registry.pop() {
        if lists[frame.z as usize].committed().is_some() {
            continue;
        }
        let deg = registry.graph().graph().degree(frame.z);
        let (choice, kind) = decide(&mut registry, &mut frame, &marks, &*lists)?;
        if kind == StepKind::Terminal && graph.graph().rotation(frame.x).contains(&frame.y) {
            // z's only decided neighbours are x and y, and they're
            // adjacent to each other: z closes off exactly one
            // triangular face, collapsing that gap in the rotation.
            choose_coverage.edge_collapse += 1;
        } else if deg == 3 && kind != StepKind::Terminal {
            // z has no neighbours beyond x, y and the chord found by
            // the rescan: its whole remaining neighbourhood was a
            // single triangle, already decided on every side.
            choose_coverage.triangle_collapse += 1;
        }
        lists[frame.z as usize].commit(choice);

        let path_mark = if frame.x_path_mark == x_mark && lists[frame.x as usize].committed() == Some(choice) {
            x_mark
        } else if frame.y_path_mark == y_mark && lists[frame.y as usize].committed() == Some(choice) {
            y_mark
        } else {
            frame.face_mark
        };
        marks.set(frame.z, path_mark);
        if path_mark == x_mark {
            marks_out[frame.z as usize] = BoundaryMark::XPath;
        } else if path_mark == y_mark {
            marks_out[frame.z as usize] = BoundaryMark::YPath;
        }

        registry.mark_decided(frame.z, &|v: u32| lists[v as usize].committed().is_some(), &mut marks);
        cascade_removals(graph, &mut registry, &mut marks, lists, &mut choose_coverage, frame.z);
        colored += 1;
    }

    if colored != n || !registry.all_decided(&|v: u32| lists[v as usize].committed().is_some(), n) {
        return Err(P3ChooseError::IncompleteColoring { colored, total: n });
    }

    Ok(P3ChooseOutput { boundary_mark: marks_out, coverage: registry.coverage, choose_coverage })
}

/// Resolves one frame: rescans `frame.z`'s whole remaining rotation so
/// every already-committed neighbour's color is excluded, not merely
/// the two that triggered the frame, then picks the first color in
/// `z`'s own admissible list that survives.
fn decide(
    registry: &mut FrameRegistry<'_>,
    frame: &mut Frame,
    marks: &Marks,
    lists: &[AdmissibleList],
) -> Result<(i32, StepKind), P3ChooseError> {
    let mut avoid: Vec<i32> = Vec::with_capacity(4);
    let kind = scan_decided_neighbours(
        registry,
        frame,
        marks,
        &|v: u32| lists[v as usize].committed().is_some(),
        |w| {
            if let Some(c) = lists[w as usize].committed() {
                if !avoid.contains(&c) {
                    avoid.push(c);
                }
            }
        },
    );

    let choice = lists[frame.z as usize]
        .as_slice()
        .iter()
        .copied()
        .find(|c| !avoid.contains(c))
        .ok_or(P3ChooseError::NoAdmissibleColor { vertex: frame.z })?;
    Ok((choice, kind))
}

/// Propagates the effect of committing `from`'s color onto every
/// undecided neighbour's admissible list, promoting any neighbour whose
/// list collapses to a singleton as a result, and chaining from there:
/// a promoted vertex's own color is removed from *its* undecided
/// neighbours in turn. This is the mechanism that keeps a list from
/// ever being discovered empty at the promoted vertex's own turn.
fn cascade_removals(
    graph: &AugmentedGraph<'_>,
    registry: &mut FrameRegistry<'_>,
    marks: &mut Marks,
    lists: &mut [AdmissibleList],
    coverage: &mut ChooseCoverage,
    from: u32,
) {
    let mut queue: VecDeque<u32> = VecDeque::new();
    queue.push_back(from);

    while let Some(z) = queue.pop_front() {
        let color = lists[z as usize].committed().expect("cascade source is already committed");
        let deg = graph.graph().degree(z);
        for i in 0..deg {
            let u = graph.graph().neighbour(z, i);
            if lists[u as usize].committed().is_some() {
                continue;
            }
            let new_len = lists[u as usize].remove(color);
            if new_len == 1 {
                coverage.promoted += 1;
                registry.mark_decided(u, &|v: u32| lists[v as usize].committed().is_some(), marks);
                queue.push_back(u);
            }
        }
    }
}

/// Commits every vertex of `path[1..]` in order, each to a member of its
/// own admissible list that differs from the previous vertex's color
/// when possible. `path[0]` must already be committed; a vertex already
/// committed (the closing corner) is left untouched.
fn commit_chain(lists: &mut [AdmissibleList], path: &[u32]) {
    let mut prev_color = lists[path[0] as usize]
        .committed()
        .expect("chain must start from an already-committed vertex");
    for &v in &path[1..] {
        if let Some(c) = lists[v as usize].committed() {
            prev_color = c;
            continue;
        }
        let choice = lists[v as usize]
            .as_slice()
            .iter()
            .copied()
            .find(|&c| c != prev_color)
            .unwrap_or_else(|| lists[v as usize].as_slice()[0]);
        lists[v as usize].commit(choice);
        prev_color = choice;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_graph::PlaneGraph;

    fn pyramid(arena: &Arena) -> (PlaneGraph<'_>,) {
        // Apex 0 connected to a 5-cycle 1..5 forming the outer boundary.
        let rotations = vec![
            vec![1, 2, 3, 4, 5],
            vec![2, 0, 5],
            vec![3, 0, 1],
            vec![4, 0, 2],
            vec![5, 0, 3],
            vec![1, 0, 4],
        ];
        (PlaneGraph::build(arena, &rotations).unwrap(),)
    }

    #[test]
    fn pyramid_apex_gets_singleton_from_its_own_list() {
        let arena = Arena::with_capacity(1 << 16);
        let (g,) = pyramid(&arena);
        let aug = AugmentedGraph::build(&arena, &g).unwrap();
        let mut lists = vec![
            AdmissibleList::from_slice(&[1, 2, 3]), // apex, interior
            AdmissibleList::singleton(1),
            AdmissibleList::from_slice(&[1, 2]),
            AdmissibleList::from_slice(&[1, 2]),
            AdmissibleList::from_slice(&[1, 2]),
            AdmissibleList::singleton(2),
        ];
        let outer_cycle = [1, 2, 3, 4, 5];
        p3_choose(&arena, &aug, &outer_cycle, 1, &mut lists).unwrap();
        for l in &lists {
            assert!(l.committed().is_some());
        }
    }

    #[test]
    fn pyramid_with_uniform_lists_gives_the_apex_color_three() {
        // Same pentagon-plus-apex shape as poh's S3 test, with a uniform
        // {1,2,3} list everywhere except the two corner singletons.
        let arena = Arena::with_capacity(1 << 16);
        let rotations = vec![
            vec![1, 5, 4],
            vec![2, 5, 0],
            vec![3, 5, 1],
            vec![4, 5, 2],
            vec![0, 5, 3],
            vec![1, 2, 3, 4, 0],
        ];
        let g = PlaneGraph::build(&arena, &rotations).unwrap();
        let aug = AugmentedGraph::build(&arena, &g).unwrap();
        let mut lists = vec![
            AdmissibleList::singleton(1), // vertex 0, X corner
            AdmissibleList::from_slice(&[1, 2, 3]),
            AdmissibleList::from_slice(&[1, 2, 3]),
            AdmissibleList::from_slice(&[1, 2, 3]),
            AdmissibleList::singleton(2), // vertex 4, Y corner
            AdmissibleList::from_slice(&[1, 2, 3]), // apex
        ];
        let outer_cycle = [0, 1, 2, 3, 4];
        p3_choose(&arena, &aug, &outer_cycle, 2, &mut lists).unwrap();
        for l in &lists {
            assert_eq!(l.as_slice().len(), 1);
        }
        assert_eq!(lists[5].committed(), Some(3));
    }

    #[test]
    fn a_degree_three_apex_with_all_neighbours_decided_is_a_triangle_collapse() {
        // Same K4 shape as poh's apex test: once the outer triangle is
        // committed, the apex's whole neighbourhood is already decided
        // on every side, so its own decision closes a single triangle.
        let arena = Arena::with_capacity(1 << 16);
        let rotations = vec![
            vec![1, 3, 2],
            vec![2, 3, 0],
            vec![0, 3, 1],
            vec![0, 1, 2],
        ];
        let g = PlaneGraph::build(&arena, &rotations).unwrap();
        let aug = AugmentedGraph::build(&arena, &g).unwrap();
        let mut lists = vec![
            AdmissibleList::singleton(1),
            AdmissibleList::from_slice(&[1, 2]),
            AdmissibleList::singleton(2),
            AdmissibleList::from_slice(&[1, 2, 3]),
        ];
        let outer_cycle = [0, 1, 2];
        let out = p3_choose(&arena, &aug, &outer_cycle, 1, &mut lists).unwrap();
        assert_eq!(lists[3].committed(), Some(3));
        assert!(out.choose_coverage.triangle_collapse >= 1, "{:?}", out.choose_coverage);
    }

    #[test]
    fn general_stacked_triangulations_produce_singleton_lists() {
        let mut seen_promotion = false;
        let mut seen_chord = false;
        for n in [20usize, 60, 150] {
            let fixture = pc_fixtures::generate_stacked_triangulation(0x5eed, n as u64, n)
                .expect("fixture generation");
            let arena = Arena::with_capacity(1 << 20);
            let g = PlaneGraph::build(&arena, &fixture.rotations).unwrap();
            let aug = AugmentedGraph::build(&arena, &g).unwrap();

            let x_corner = fixture.outer_cycle[0];
            let y_corner = fixture.outer_cycle[fixture.outer_cycle.len() - 1];
            let mut lists = vec![AdmissibleList::from_slice(&[1, 2, 3]); n];
            lists[x_corner as usize] = AdmissibleList::singleton(1);
            lists[y_corner as usize] = AdmissibleList::singleton(2);
            for &v in &fixture.outer_cycle {
                if v != x_corner && v != y_corner && lists[v as usize].len() > 2 {
                    lists[v as usize] = AdmissibleList::from_slice(&[1, 2]);
                }
            }

            let split = 1;
            let out = p3_choose(&arena, &aug, &fixture.outer_cycle, split, &mut lists).unwrap();
            for (v, l) in lists.iter().enumerate() {
                assert!(l.committed().is_some(), "vertex {v} left uncommitted, n={n}");
            }
            seen_promotion |= out.choose_coverage.promoted > 0;
            let chords = out.coverage.chord_x_path + out.coverage.chord_y_path + out.coverage.chord_foreign;
            seen_chord |= chords > 0;
        }
        assert!(seen_promotion, "no generated triangulation forced a list-collapse promotion");
        assert!(seen_chord, "no generated triangulation exercised a chord case");
    }
}
