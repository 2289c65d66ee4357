use std::collections::HashMap;

use pc_core::Arena;

use crate::graph::PlaneGraph;
use crate::HalfEdge;

/// A plane graph plus, for every half-edge, the index of its twin in the
/// neighbour's own rotation. This is everything `next`/`prev`/`face_next`
/// need; it is built once from a [`PlaneGraph`] and never mutated.
pub struct AugmentedGraph<'a> {
    graph: &'a PlaneGraph<'a>,
    twins: &'a [u32],
}

/// The rotation data could not be augmented: some half-edge has no
/// matching twin, which means the input was not a valid undirected plane
/// graph (an edge appeared an odd number of times, or a multi-edge
/// confused the matching).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentError {
    pub vertex: u32,
    pub index: u32,
    pub neighbour: u32,
}

impl std::fmt::Display for AugmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "half-edge ({}, {}) to neighbour {} has no matching twin: \
             the rotation data is not a valid undirected plane graph",
            self.vertex, self.index, self.neighbour
        )
    }
}

impl std::error::Error for AugmentError {}

impl<'a> AugmentedGraph<'a> {
    /// Computes twin indices for every half-edge of `graph`, allocating
    /// the result from `arena`. `Θ(|E|)` expected time via a hash map
    /// keyed by the directed edge `(from, to)`: each undirected edge is
    /// inserted once (as the first direction encountered) and matched
    /// once (when its reverse direction is seen), so every entry is
    /// touched exactly twice.
    pub fn build(arena: &'a Arena, graph: &'a PlaneGraph<'a>) -> Result<Self, AugmentError> {
        let twins = arena.alloc_slice_fill_with(graph.total_half_edges(), |_| u32::MAX);
        let mut pending: HashMap<(u32, u32), u32> = HashMap::with_capacity(graph.total_half_edges());

        for v in 0..graph.n() as u32 {
            for i in 0..graph.degree(v) {
                let u = graph.neighbour(v, i);
                if let Some(j) = pending.remove(&(u, v)) {
                    let offset_v = graph.offsets()[v as usize];
                    let offset_u = graph.offsets()[u as usize];
                    twins[(offset_v + i) as usize] = j;
                    twins[(offset_u + j) as usize] = i;
                } else {
                    pending.insert((v, u), i);
                }
            }
        }

        if let Some((&(v, u), &i)) = pending.iter().next() {
            return Err(AugmentError { vertex: v, index: i, neighbour: u });
        }

        Ok(AugmentedGraph { graph, twins })
    }

    pub fn graph(&self) -> &PlaneGraph<'a> {
        self.graph
    }

    fn twin_index(&self, v: u32, i: u32) -> u32 {
        self.twins[(self.graph.offsets()[v as usize] + i) as usize]
    }

    /// The twin half-edge of `(v, i)`: the same undirected edge, viewed
    /// from the other endpoint.
    pub fn twin(&self, he: HalfEdge) -> HalfEdge {
        let u = self.graph.neighbour(he.v, he.i);
        HalfEdge::new(u, self.twin_index(he.v, he.i))
    }

    /// The next half-edge clockwise around `he.v`'s rotation, wrapping.
    pub fn next(&self, he: HalfEdge) -> HalfEdge {
        let deg = self.graph.degree(he.v);
        HalfEdge::new(he.v, (he.i + 1) % deg)
    }

    /// The previous half-edge (counter-clockwise) around `he.v`'s
    /// rotation, wrapping.
    pub fn prev(&self, he: HalfEdge) -> HalfEdge {
        let deg = self.graph.degree(he.v);
        HalfEdge::new(he.v, (he.i + deg - 1) % deg)
    }

    /// The next half-edge along the same face as `he`: cross to the
    /// twin, then step one position clockwise in the neighbour's
    /// rotation.
    pub fn face_next(&self, he: HalfEdge) -> HalfEdge {
        let t = self.twin(he);
        self.next(t)
    }
}
