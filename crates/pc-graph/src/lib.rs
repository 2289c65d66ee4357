//! The plane-graph data model: flat adjacency runs in clockwise rotation
//! order, their augmentation with half-edge twin indices, and the small
//! per-vertex arrays (coloring, admissible lists) the coloring
//! algorithms read and write.
//!
//! Every structure here is a thin view over arena-allocated flat arrays;
//! there is no per-vertex heap object and no pointer chases through the
//! structure itself. See `pc-core` for the allocator these are built on.

mod augmented;
mod graph;
mod list;
mod marks;

pub use augmented::AugmentedGraph;
pub use graph::{GraphBuildError, PlaneGraph};
pub use list::AdmissibleList;
pub use marks::{Coloring, Marks};

/// A vertex identifier; vertices are numbered `0..n`.
pub type VertexId = u32;

/// A half-edge: the `i`-th neighbour in vertex `v`'s clockwise rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HalfEdge {
    pub v: VertexId,
    pub i: u32,
}

impl HalfEdge {
    pub fn new(v: VertexId, i: u32) -> Self {
        HalfEdge { v, i }
    }
}
