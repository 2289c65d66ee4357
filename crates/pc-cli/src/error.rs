use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config file {path}")]
    ConfigRead { path: String, #[source] source: std::io::Error },
    #[error("failed to parse config file {path} as TOML")]
    ConfigParse { path: String, #[source] source: toml::de::Error },
    #[error(transparent)]
    Fixture(#[from] pc_fixtures::FixtureError),
    #[error("graph construction failed: {0}")]
    GraphBuild(String),
    #[error("coloring failed: {0}")]
    Coloring(String),
    #[error("the produced coloring failed verification: {0:?}")]
    Verification(pc_color::VerifyOutcome),
}
