use pc_core::Arena;

/// A plane graph stored as per-vertex adjacency runs in clockwise
/// rotation order, flattened into one arena-allocated array.
///
/// `offsets` has length `n + 1`; vertex `v`'s neighbours occupy
/// `runs[offsets[v]..offsets[v + 1]]`.
pub struct PlaneGraph<'a> {
    n: usize,
    offsets: &'a [u32],
    runs: &'a [u32],
}

/// The input adjacency was malformed: an undirected edge, a degree
/// claim, or a vertex id was inconsistent with the graph's own size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphBuildError {
    NeighbourOutOfRange { vertex: u32, neighbour: u32, n: usize },
    SelfLoop { vertex: u32 },
}

impl std::fmt::Display for GraphBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphBuildError::NeighbourOutOfRange { vertex, neighbour, n } => write!(
                f,
                "vertex {vertex} lists neighbour {neighbour} which is out of range for n={n}"
            ),
            GraphBuildError::SelfLoop { vertex } => {
                write!(f, "vertex {vertex} lists itself as its own neighbour")
            }
        }
    }
}

impl std::error::Error for GraphBuildError {}

impl<'a> PlaneGraph<'a> {
    /// Builds a plane graph from per-vertex rotation lists, flattening
    /// them into the arena. `rotations[v]` must already be in clockwise
    /// order around `v`; this constructor does not reorder anything, it
    /// only validates and flattens.
    pub fn build(arena: &'a Arena, rotations: &[Vec<u32>]) -> Result<Self, GraphBuildError> {
        let n = rotations.len();
        let mut offsets = Vec::with_capacity(n + 1);
        let mut total = 0u32;
        offsets.push(0u32);
        for (v, run) in rotations.iter().enumerate() {
            for &u in run {
                if u as usize >= n {
                    return Err(GraphBuildError::NeighbourOutOfRange {
                        vertex: v as u32,
                        neighbour: u,
                        n,
                    });
                }
                if u == v as u32 {
                    return Err(GraphBuildError::SelfLoop { vertex: v as u32 });
                }
            }
            total += run.len() as u32;
            offsets.push(total);
        }
        let offsets_slice = arena.alloc_slice_copy(&offsets);
        let runs_slice = arena.alloc_slice_fill_with(total as usize, |_| 0u32);
        let mut cursor = 0usize;
        for run in rotations {
            for &u in run {
                runs_slice[cursor] = u;
                cursor += 1;
            }
        }
        Ok(PlaneGraph {
            n,
            offsets: offsets_slice,
            runs: runs_slice,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn degree(&self, v: u32) -> u32 {
        self.offsets[v as usize + 1] - self.offsets[v as usize]
    }

    /// The clockwise rotation of neighbours around `v`.
    pub fn rotation(&self, v: u32) -> &[u32] {
        let lo = self.offsets[v as usize] as usize;
        let hi = self.offsets[v as usize + 1] as usize;
        &self.runs[lo..hi]
    }

    /// The neighbour at position `i` in `v`'s rotation.
    pub fn neighbour(&self, v: u32, i: u32) -> u32 {
        self.rotation(v)[i as usize]
    }

    pub fn offsets(&self) -> &[u32] {
        self.offsets
    }

    pub fn runs(&self) -> &[u32] {
        self.runs
    }

    pub fn total_half_edges(&self) -> usize {
        self.runs.len()
    }
}
