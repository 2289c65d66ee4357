//! Parallel frame coloring: the same frame stack [`pc_color::poh`] drives
//! sequentially, but the stack is drained one whole wave at a time and
//! each wave's frames are split into up to `num_workers` independent
//! chunks dispatched across a [`WorkerPool`]. A frame only enters a wave
//! once both of its reference neighbours were decided in a *strictly
//! earlier* wave, so no two frames in the same wave ever read a vertex
//! another frame in that wave is about to write; the main thread applies
//! every wave's results and feeds the next wave's frames before the pool
//! is handed the next batch.

use std::thread;

use pc_core::Arena;
use pc_color::frame::{BoundaryMark, Frame, FrameRegistry, StepKind, VInfo};
use pc_color::{P3ColorOutput, X_COLOR, Y_COLOR};
use pc_graph::{AugmentedGraph, Coloring, Marks};

use crate::pool::WorkerPool;

const THIRD_COLOR: i32 = 3;

/// Mirrors [`pc_color::P3ColorError`]; kept distinct because the
/// parallel driver validates and fails independently of the sequential
/// one rather than delegating to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParallelColorError {
    EmptyBoundary,
    SplitOutOfRange { split: usize, boundary_len: usize },
    DuplicateBoundaryVertex { vertex: u32 },
    IncompleteColoring { colored: usize, total: usize },
    InvariantViolation { vertex: u32 },
    NotAPathColoring,
}

impl std::fmt::Display for ParallelColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParallelColorError::EmptyBoundary => {
                write!(f, "outer cycle must have at least 3 vertices")
            }
            ParallelColorError::SplitOutOfRange { split, boundary_len } => write!(
                f,
                "split point {split} is out of range for a boundary of length {boundary_len}"
            ),
            ParallelColorError::DuplicateBoundaryVertex { vertex } => {
                write!(f, "vertex {vertex} appears more than once on the outer cycle")
            }
            ParallelColorError::IncompleteColoring { colored, total } => write!(
                f,
                "frame stack drained with only {colored} of {total} vertices colored"
            ),
            ParallelColorError::InvariantViolation { vertex } => write!(
                f,
                "vertex {vertex} has decided neighbours using all three colors"
            ),
            ParallelColorError::NotAPathColoring => {
                write!(f, "the finished coloring does not have the path property")
            }
        }
    }
}

impl std::error::Error for ParallelColorError {}

/// Same contract as [`pc_color::p3_color`], run across `num_workers`
/// threads. Produces the same coloring as the sequential version for
/// the same input: a frame's outcome depends only on the colors of
/// neighbours decided in an earlier wave, never on another frame
/// resolved in the same wave, so splitting a wave across workers changes
/// nothing about what any single frame sees.
pub fn color_parallel<'a>(
    arena: &'a Arena,
    graph: &'a AugmentedGraph<'a>,
    outer_cycle: &[u32],
    split: usize,
    num_workers: usize,
) -> Result<P3ColorOutput<'a>, ParallelColorError> {
    if outer_cycle.len() < 3 {
        return Err(ParallelColorError::EmptyBoundary);
    }
    if split == 0 || split >= outer_cycle.len() {
        return Err(ParallelColorError::SplitOutOfRange {
            split,
            boundary_len: outer_cycle.len(),
        });
    }

    let n = graph.graph().n();
    let mut coloring = Coloring::new(arena, n);
    let marks_out = arena.alloc_slice_fill_copy(n, BoundaryMark::Interior);
    let mut seen = vec![false; n];
    let mut marks = Marks::new(arena, n);

    for (idx, &v) in outer_cycle.iter().enumerate() {
        if seen[v as usize] {
            return Err(ParallelColorError::DuplicateBoundaryVertex { vertex: v });
        }
        seen[v as usize] = true;
        let on_x_path = idx < split;
        coloring.set(v, if on_x_path { X_COLOR } else { Y_COLOR });
        marks_out[v as usize] = if on_x_path { BoundaryMark::XPath } else { BoundaryMark::YPath };
    }

    let x_mark = marks.fresh();
    let y_mark = marks.fresh();
    for (idx, &v) in outer_cycle.iter().enumerate() {
        marks.set(v, if idx < split { x_mark } else { y_mark });
    }

    let mut registry = FrameRegistry::new(arena, graph);
    for &v in outer_cycle {
        registry.seed_decided(v, &|w: u32| coloring.get(w) != 0, &mut marks);
    }

    let mut colored = outer_cycle.len();
    let num_workers = num_workers.max(1);
    let mut invariant_violation = None;

    thread::scope(|scope| {
        let pool = WorkerPool::new(scope, num_workers);
        loop {
            let wave = registry.drain();
            if wave.is_empty() {
                break;
            }
            // Split this wave's frames into up to `num_workers`
            // independent sub-frames; each chunk is posted as one job.
            let chunk_count = num_workers.min(wave.len());
            let chunk_size = wave.len().div_ceil(chunk_count);
            let jobs_by_chunk: Vec<Vec<(Frame, VInfo)>> = wave
                .chunks(chunk_size)
                .map(|chunk| chunk.iter().map(|&f| (f, registry.vinfo(f.z))).collect())
                .collect();

            let (tx, rx) = crossbeam_channel::unbounded::<Result<(u32, i32, StepKind, i32), u32>>();
            for jobs in jobs_by_chunk {
                let tx = tx.clone();
                let coloring_ref = &coloring;
                let marks_ref = &marks;
                pool.submit(Box::new(move || {
                    for (mut frame, vinfo) in jobs {
                        let face_mark = frame.face_mark;
                        let result = resolve(graph, coloring_ref, marks_ref, &mut frame, vinfo)
                            .map(|(color, kind)| (frame.z, color, kind, face_mark))
                            .ok_or(frame.z);
                        tx.send(result).expect("receiver outlives every wave");
                    }
                }));
            }
            drop(tx);
            pool.wait();

            for outcome in rx.try_iter() {
                match outcome {
                    Err(vertex) => invariant_violation = Some(vertex),
                    Ok((z, color, kind, face_mark)) => {
                        coloring.set(z, color);
                        registry.coverage.record(kind);
                        let path_mark = if color == X_COLOR {
                            x_mark
                        } else if color == Y_COLOR {
                            y_mark
                        } else {
                            face_mark
                        };
                        marks.set(z, path_mark);
                        if color == X_COLOR {
                            marks_out[z as usize] = BoundaryMark::XPath;
                        } else if color == Y_COLOR {
                            marks_out[z as usize] = BoundaryMark::YPath;
                        }
                        registry.mark_decided(z, &|v: u32| coloring.get(v) != 0, &mut marks);
                        colored += 1;
                    }
                }
            }
        }
        pool.halt_and_destroy();
    });

    if let Some(vertex) = invariant_violation {
        return Err(ParallelColorError::InvariantViolation { vertex });
    }
    if colored != n || !registry.all_decided(&|v: u32| coloring.get(v) != 0, n) {
        return Err(ParallelColorError::IncompleteColoring { colored, total: n });
    }

    let outcome = pc_color::verify_path_coloring(graph.graph(), &coloring);
    if outcome != pc_color::VerifyOutcome::Valid {
        return Err(ParallelColorError::NotAPathColoring);
    }

    Ok(P3ColorOutput { coloring, boundary_mark: marks_out, coverage: registry.coverage })
}

/// Rescans `frame.z`'s whole remaining rotation (the arc `vinfo` bounds)
/// and picks a color distinct from every decided neighbour found, not
/// merely the two that triggered the frame. A free function rather than
/// a method on [`FrameRegistry`], since a worker thread only ever holds
/// a snapshot of the one frame it was handed, never the registry itself
/// (which isn't safe to share mutably across threads).
fn resolve(
    graph: &AugmentedGraph<'_>,
    coloring: &Coloring<'_>,
    marks: &Marks,
    frame: &mut Frame,
    vinfo: VInfo,
) -> Option<(i32, StepKind)> {
    let pg = graph.graph();
    let deg = pg.degree(frame.z);
    let mut used = [false; 4];
    let mut kind = StepKind::Terminal;

    let mut i = vinfo.first;
    loop {
        let w = pg.neighbour(frame.z, i);
        let c = coloring.get(w);
        if c != 0 {
            if (1..=3).contains(&c) {
                used[c as usize] = true;
            }
            if frame.x == u32::MAX {
                frame.x = w;
                frame.x_path_mark = marks.get(w);
            } else if frame.y == u32::MAX && w != frame.x {
                frame.y = w;
                frame.y_path_mark = marks.get(w);
            } else if w != frame.x && w != frame.y {
                kind = if marks.get(w) == frame.x_path_mark {
                    StepKind::ChordXPath
                } else if marks.get(w) == frame.y_path_mark {
                    StepKind::ChordYPath
                } else {
                    StepKind::ChordForeign
                };
            }
        }
        if i == vinfo.last {
            break;
        }
        i = (i + 1) % deg;
    }

    for c in [X_COLOR, Y_COLOR, THIRD_COLOR] {
        if !used[c as usize] {
            return Some((c, kind));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_graph::PlaneGraph;

    #[test]
    fn matches_sequential_result_on_a_triangle() {
        let arena = Arena::with_capacity(1 << 16);
        let rotations = vec![vec![1, 2], vec![2, 0], vec![0, 1]];
        let g = PlaneGraph::build(&arena, &rotations).unwrap();
        let aug = AugmentedGraph::build(&arena, &g).unwrap();
        let out = color_parallel(&arena, &aug, &[0, 1, 2], 1, 2).unwrap();
        assert_eq!(out.coloring.as_slice(), &[1, 2, 2]);
    }

    #[test]
    fn agrees_with_sequential_driver_on_a_larger_fan() {
        // A 7-spoke wheel: apex 0, rim 1..7.
        let rim = 6;
        let arena = Arena::with_capacity(1 << 16);
        let mut rotations = Vec::with_capacity(rim + 1);
        let apex_rotation: Vec<u32> = (1..=rim as u32).collect();
        rotations.push(apex_rotation);
        for k in 0..rim {
            let prev = if k == 0 { rim as u32 } else { k as u32 };
            let next = if k + 1 == rim { 1 } else { (k + 2) as u32 };
            rotations.push(vec![next, 0, prev]);
        }
        let g = PlaneGraph::build(&arena, &rotations).unwrap();
        let aug = AugmentedGraph::build(&arena, &g).unwrap();
        let outer_cycle: Vec<u32> = (1..=rim as u32).collect();

        let arena_seq = Arena::with_capacity(1 << 16);
        let g_seq = PlaneGraph::build(&arena_seq, &rotations).unwrap();
        let aug_seq = AugmentedGraph::build(&arena_seq, &g_seq).unwrap();
        let sequential = pc_color::p3_color(&arena_seq, &aug_seq, &outer_cycle, 3).unwrap();

        let parallel = color_parallel(&arena, &aug, &outer_cycle, 3, 4).unwrap();
        assert_eq!(parallel.coloring.as_slice(), sequential.coloring.as_slice());
    }

    #[test]
    fn a_hundred_vertex_triangulation_verifies_with_one_and_three_workers() {
        let fixture = pc_fixtures::generate_stacked_triangulation(0xb00b123, 0xfafafeed, 100)
            .expect("fixture generation");

        for &workers in &[1usize, 3] {
            let arena = Arena::with_capacity(1 << 20);
            let g = PlaneGraph::build(&arena, &fixture.rotations).unwrap();
            let aug = AugmentedGraph::build(&arena, &g).unwrap();
            let out = color_parallel(&arena, &aug, &fixture.outer_cycle, 1, workers).unwrap();
            assert_eq!(
                pc_color::verify_path_coloring(&g, &out.coloring),
                pc_color::VerifyOutcome::Valid,
                "workers={workers}"
            );
            for (idx, &v) in fixture.outer_cycle.iter().enumerate() {
                let expected = if idx < 1 { BoundaryMark::XPath } else { BoundaryMark::YPath };
                assert_eq!(out.boundary_mark[v as usize], expected, "vertex {v}, workers={workers}");
            }
        }
    }

    #[test]
    fn a_larger_triangulation_exercises_more_than_one_wave_with_several_workers() {
        // With a wide fixture and several workers, at least one wave
        // must be split into more than one chunk: this is the case the
        // sequential driver's single-frame-at-a-time stack never faces.
        let fixture = pc_fixtures::generate_stacked_triangulation(0x1234, 0x9999, 300)
            .expect("fixture generation");
        let arena = Arena::with_capacity(1 << 22);
        let g = PlaneGraph::build(&arena, &fixture.rotations).unwrap();
        let aug = AugmentedGraph::build(&arena, &g).unwrap();
        let out = color_parallel(&arena, &aug, &fixture.outer_cycle, 1, 8).unwrap();
        assert_eq!(
            pc_color::verify_path_coloring(&g, &out.coloring),
            pc_color::VerifyOutcome::Valid
        );
    }
}
