//! Generates random maximal planar triangulations by repeatedly
//! stacking a new vertex into a randomly chosen interior face, the way
//! a point-insertion triangulation generator grows its mesh one vertex
//! at a time. Unlike a geometric generator, this one works purely on
//! the rotation system: the numbers never leave `0..vertex_count`, and
//! the three vertices of the seed triangle remain the outer boundary
//! forever, since only interior faces are ever split.

use crate::error::FixtureError;
use crate::rng::Pcg32;

/// A generated triangulation, ready to hand to
/// `pc_graph::PlaneGraph::build`, plus the outer cycle every generated
/// instance shares: the seed triangle `[0, 1, 2]`.
pub struct TriangulationFixture {
    pub rotations: Vec<Vec<u32>>,
    pub outer_cycle: Vec<u32>,
}

/// Builds a triangulation of exactly `vertex_count` vertices, seeded
/// from `(seed_state, seed_seq)` for the face-choice random stream.
pub fn generate_stacked_triangulation(
    seed_state: u64,
    seed_seq: u64,
    vertex_count: usize,
) -> Result<TriangulationFixture, FixtureError> {
    if vertex_count < 3 {
        return Err(FixtureError::TooFewVertices { requested: vertex_count });
    }

    let mut rng = Pcg32::seed(seed_state, seed_seq);
    let mut rotations: Vec<Vec<u32>> = vec![vec![1, 2], vec![2, 0], vec![0, 1]];
    // Every face is tracked as `(a, b, c)` such that in `a`'s rotation
    // `c` is immediately followed by `b`, in `b`'s rotation `a` is
    // immediately followed by `c`, and in `c`'s rotation `b` is
    // immediately followed by `a`. Only the bounded face of the seed
    // triangle goes on the worklist; its mirror (the unbounded face)
    // is left alone and becomes the permanent outer boundary.
    let mut faces: Vec<(u32, u32, u32)> = vec![(0, 1, 2)];

    for _ in 3..vertex_count {
        let idx = rng.below(faces.len());
        let (a, b, c) = faces.swap_remove(idx);
        let v = rotations.len() as u32;

        insert_after(&mut rotations[a as usize], c, v);
        insert_after(&mut rotations[b as usize], a, v);
        insert_after(&mut rotations[c as usize], b, v);
        rotations.push(vec![a, c, b]);

        faces.push((a, b, v));
        faces.push((b, c, v));
        faces.push((c, a, v));
    }

    Ok(TriangulationFixture { rotations, outer_cycle: vec![0, 1, 2] })
}

/// Splices `value` into `rotation` immediately clockwise of `after`.
fn insert_after(rotation: &mut Vec<u32>, after: u32, value: u32) {
    let pos = rotation
        .iter()
        .position(|&x| x == after)
        .expect("the face's recorded corner is a current neighbour");
    rotation.insert(pos + 1, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_core::Arena;
    use pc_graph::PlaneGraph;

    #[test]
    fn rejects_too_few_vertices() {
        assert!(matches!(
            generate_stacked_triangulation(1, 1, 2),
            Err(FixtureError::TooFewVertices { requested: 2 })
        ));
    }

    #[test]
    fn seed_triangle_alone_is_returned_unchanged() {
        let fx = generate_stacked_triangulation(1, 1, 3).unwrap();
        assert_eq!(fx.rotations, vec![vec![1, 2], vec![2, 0], vec![0, 1]]);
        assert_eq!(fx.outer_cycle, vec![0, 1, 2]);
    }

    #[test]
    fn every_generated_size_is_a_valid_plane_graph_with_a_stable_boundary() {
        let arena = Arena::with_capacity(1 << 20);
        for n in [3, 4, 5, 10, 50, 200] {
            let fx = generate_stacked_triangulation(0xb00b123, 0xfafafeed, n).unwrap();
            assert_eq!(fx.rotations.len(), n);
            let g = PlaneGraph::build(&arena, &fx.rotations).unwrap();
            assert_eq!(g.n(), n);
            // Maximal planar triangulations have exactly 3n - 6 edges
            // for n >= 3, i.e. 6n - 12 half-edges.
            assert_eq!(g.total_half_edges(), 6 * n - 12);
            // The seed triangle's edges among themselves never get an
            // extra vertex stacked between them.
            assert!(g.rotation(0).contains(&1));
            assert!(g.rotation(0).contains(&2));
        }
    }

    #[test]
    fn same_seed_is_reproducible() {
        let a = generate_stacked_triangulation(7, 3, 30).unwrap();
        let b = generate_stacked_triangulation(7, 3, 30).unwrap();
        assert_eq!(a.rotations, b.rotations);
    }
}
