//! Synthetic triangulation fixtures for tests, benchmarks, and the demo
//! binary: deterministic, seedable, and free of any dependency on a
//! geometric embedding since the coloring algorithms only ever need a
//! rotation system.

mod error;
mod r#gen;
mod rng;

pub use error::FixtureError;
pub use r#gen::{generate_stacked_triangulation, TriangulationFixture};
pub use rng::Pcg32;
