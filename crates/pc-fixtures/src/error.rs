use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("a triangulation fixture needs at least 3 vertices, got {requested}")]
    TooFewVertices { requested: usize },
}
