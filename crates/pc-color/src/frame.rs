//! The frame registry both [`crate::poh`] and [`crate::hartman`] drive:
//! a LIFO stack of [`Frame`]s, one per vertex waiting to be decided,
//! plus the per-vertex [`VInfo`] and [`pc_graph::Marks`] bookkeeping
//! the case analysis in each algorithm's `step` function consults.
//!
//! A vertex `z` is pushed as a frame the moment two of its neighbours
//! are already decided (the two that will become `x` and `y`, the
//! frame's X-path and Y-path references). Between push and pop, more
//! of `z`'s neighbours can themselves become decided; when the frame
//! is finally popped and stepped, the algorithm rescans `z`'s whole
//! rotation through `V(z).first..=V(z).last` rather than trusting the
//! two references cached at push time, so a chord into a third
//! already-decided region is never missed.

use pc_core::Arena;
use pc_graph::{AugmentedGraph, Marks};

/// Which side of the seed boundary a decided vertex was placed on.
/// Vertices promoted onto a path mid-run (case 2/3/4 below) carry the
/// same tag as the path they joined; a vertex that only ever touches
/// the interior (never promoted) stays [`BoundaryMark::Interior`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryMark {
    XPath,
    YPath,
    Interior,
}

/// The rotation arc of `z` still facing undecided territory, bounding
/// the `edge_index` cursor a frame walks while scanning `z`'s
/// neighbours. `first` and `last` are both inclusive rotation indices;
/// an interior vertex touched for the first time gets the widest
/// possible arc (its whole rotation), since none of its neighbours
/// have been ruled out yet.
#[derive(Clone, Copy, Debug)]
pub struct VInfo {
    pub first: u32,
    pub last: u32,
}

/// A vertex `z` ready to be decided, together with the two reference
/// neighbours (`x`, `y`) that triggered it and the mark classes/face
/// tag threaded through from whichever earlier frame placed them.
#[derive(Clone, Copy, Debug)]
pub struct Frame {
    pub z: u32,
    pub x: u32,
    pub y: u32,
    pub x_path_mark: i32,
    pub y_path_mark: i32,
    pub face_mark: i32,
    pub edge_index: u32,
}

/// What kind of step a [`Frame`] resolved into, for the case-coverage
/// bookkeeping the test suite checks against general triangulations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    /// `z`'s only decided neighbours, after a full rescan, are exactly
    /// its two trigger references: a plain two-path meeting point.
    Terminal,
    /// A third decided neighbour was found sharing `x`'s mark class: a
    /// chord folding `z` back onto the X-path.
    ChordXPath,
    /// Symmetric, onto the Y-path.
    ChordYPath,
    /// A third decided neighbour was found that belongs to neither
    /// path: a chord into a separately-resolved region.
    ChordForeign,
}

/// Counts, across a whole run, how many vertices were finalized via
/// each [`StepKind`]. Exists so tests on general (non-example)
/// triangulations can assert the chord-handling branches actually ran,
/// not just the terminal one the literal S1-S4 fixtures exercise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaseCoverage {
    pub terminal: u32,
    pub chord_x_path: u32,
    pub chord_y_path: u32,
    pub chord_foreign: u32,
}

impl CaseCoverage {
    /// Bumps the counter for `kind`. Public so a driver that resolves
    /// frames outside [`scan_decided_neighbours`] (because it can't
    /// share a `&mut FrameRegistry` across threads, for instance) can
    /// still report into the same tally.
    pub fn record(&mut self, kind: StepKind) {
        match kind {
            StepKind::Terminal => self.terminal += 1,
            StepKind::ChordXPath => self.chord_x_path += 1,
            StepKind::ChordYPath => self.chord_y_path += 1,
            StepKind::ChordForeign => self.chord_foreign += 1,
        }
    }
}

/// The shared push/pop/propagate machinery: a LIFO stack of frames plus
/// the per-vertex decided-neighbour count that drives it. Algorithm-
/// specific decision logic (which color, which list) lives in
/// [`crate::poh`] and [`crate::hartman`]; this registry only tracks
/// *when* a vertex becomes ready and hands back everything its decision
/// needs to rescan.
pub struct FrameRegistry<'a> {
    graph: &'a AugmentedGraph<'a>,
    vinfo: &'a mut [VInfo],
    decided_count: &'a mut [u32],
    queued: &'a mut [bool],
    stack: Vec<Frame>,
    pub coverage: CaseCoverage,
}

impl<'a> FrameRegistry<'a> {
    pub fn new(arena: &'a Arena, graph: &'a AugmentedGraph<'a>) -> Self {
        let n = graph.graph().n();
        FrameRegistry {
            graph,
            vinfo: arena.alloc_slice_fill_with(n, |_| VInfo { first: 0, last: 0 }),
            decided_count: arena.alloc_slice_fill_copy(n, 0u32),
            queued: arena.alloc_slice_fill_copy(n, false),
            stack: Vec::new(),
            coverage: CaseCoverage::default(),
        }
    }

    pub fn graph(&self) -> &'a AugmentedGraph<'a> {
        self.graph
    }

    pub fn vinfo(&self, v: u32) -> VInfo {
        self.vinfo[v as usize]
    }

    /// Registers a vertex as decided without requiring it to pass
    /// through the two-neighbour trigger, and propagates the update.
    /// Used to load the seed boundary before any frame exists.
    pub fn seed_decided(&mut self, v: u32, decided: &dyn Fn(u32) -> bool, marks: &mut Marks) {
        self.propagate(v, decided, marks);
    }

    /// Propagates the fact that `v` was just decided: every undecided
    /// neighbour's count goes up by one, and any that just reached two
    /// is pushed as a fresh frame with a newly allocated `face_mark`.
    pub fn mark_decided(&mut self, v: u32, decided: &dyn Fn(u32) -> bool, marks: &mut Marks) {
        self.propagate(v, decided, marks);
    }

    fn propagate(&mut self, v: u32, decided: &dyn Fn(u32) -> bool, marks: &mut Marks) {
        let graph = self.graph.graph();
        let deg = graph.degree(v);
        for i in 0..deg {
            let u = graph.neighbour(v, i);
            if decided(u) {
                continue;
            }
            self.decided_count[u as usize] += 1;
            if self.decided_count[u as usize] == 2 && !self.queued[u as usize] {
                self.queued[u as usize] = true;
                let udeg = graph.degree(u);
                self.vinfo[u as usize] = VInfo { first: 0, last: udeg.saturating_sub(1) };
                let face_mark = marks.fresh();
                self.stack.push(Frame {
                    z: u,
                    x: u32::MAX,
                    y: u32::MAX,
                    x_path_mark: -1,
                    y_path_mark: -1,
                    face_mark,
                    edge_index: 0,
                });
            }
        }
    }

    /// Pops the next frame to process, in LIFO order: a frame born from
    /// a vertex decided while resolving an earlier frame is processed
    /// before the algorithm returns to whatever was queued before it.
    pub fn pop(&mut self) -> Option<Frame> {
        self.stack.pop()
    }

    /// Pushes an already-resolved vertex back onto the frame stack so
    /// its effects (propagation to its own undecided neighbours) are
    /// driven through the normal step loop. Used by
    /// [`crate::hartman`]'s case 7 promotion, where a neighbour's list
    /// collapses to a forced singleton mid-scan rather than through the
    /// ordinary two-reference trigger.
    pub fn push_resolved(&mut self, frame: Frame) {
        self.stack.push(frame);
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Takes every frame currently on the stack, leaving it empty. Every
    /// frame handed back was triggered by a vertex decided in a
    /// strictly earlier wave, so the whole batch is safe to resolve
    /// concurrently: no two of them read a vertex the other is about to
    /// write, and none of them depends on another frame in the same
    /// batch. Used by the parallel driver to split the stack into the
    /// independent sub-frames it dispatches to its worker pool.
    pub fn drain(&mut self) -> Vec<Frame> {
        std::mem::take(&mut self.stack)
    }

    pub fn all_decided(&self, decided: &dyn Fn(u32) -> bool, n: usize) -> bool {
        (0..n as u32).all(|v| decided(v))
    }
}

/// Scans every neighbour of `frame.z`, classifying each already-decided
/// one against the frame's own `x`/`y` references and `marks`. Returns
/// the set of distinct decided colors/lists callers must avoid (via
/// `collect`, invoked once per decided neighbour found) along with the
/// [`StepKind`] the scan resolved into, and fills in `frame.x`/`y` and
/// the two path marks the first time each is seen.
///
/// This is the fix for the soundness gap a two-reference-only scan has
/// on general triangulations: every already-decided neighbour of `z`
/// is examined, not just the first two encountered in rotation order.
pub fn scan_decided_neighbours(
    registry: &mut FrameRegistry<'_>,
    frame: &mut Frame,
    marks: &Marks,
    decided: &dyn Fn(u32) -> bool,
    mut collect: impl FnMut(u32),
) -> StepKind {
    let graph = registry.graph().graph();
    let deg = graph.degree(frame.z);
    let vinfo = registry.vinfo(frame.z);
    let mut kind = StepKind::Terminal;

    let mut i = vinfo.first;
    loop {
        let w = graph.neighbour(frame.z, i);
        if decided(w) {
            collect(w);
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
    frame.edge_index = vinfo.last;
    registry.coverage.record(kind);
    kind
}
