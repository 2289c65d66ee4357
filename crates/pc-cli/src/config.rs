//! Loads an optional TOML run profile. A missing file falls back to
//! defaults; a malformed one is reported rather than silently ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RunConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub coloring: ColoringConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    #[serde(default = "GenerationConfig::default_vertex_count")]
    pub vertex_count: usize,
    #[serde(default = "GenerationConfig::default_seed_state")]
    pub seed_state: u64,
    #[serde(default = "GenerationConfig::default_seed_seq")]
    pub seed_seq: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            vertex_count: Self::default_vertex_count(),
            seed_state: Self::default_seed_state(),
            seed_seq: Self::default_seed_seq(),
        }
    }
}

impl GenerationConfig {
    const fn default_vertex_count() -> usize {
        100
    }
    const fn default_seed_state() -> u64 {
        0xb00b123
    }
    const fn default_seed_seq() -> u64 {
        0xfafafeed
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ColoringConfig {
    #[serde(default = "ColoringConfig::default_split")]
    pub split: usize,
    #[serde(default = "ColoringConfig::default_workers")]
    pub workers: usize,
}

impl Default for ColoringConfig {
    fn default() -> Self {
        Self { split: Self::default_split(), workers: Self::default_workers() }
    }
}

impl ColoringConfig {
    const fn default_split() -> usize {
        1
    }
    const fn default_workers() -> usize {
        1
    }
}

/// Loads a run profile from `path` if given, otherwise from
/// `pc-cli.toml` in the working directory if present; absence of
/// either falls back to [`RunConfig::default`].
pub fn load_from(path: Option<PathBuf>) -> Result<RunConfig, Error> {
    let path = match path {
        Some(p) => p,
        None => {
            let local = Path::new("pc-cli.toml");
            if !local.exists() {
                return Ok(RunConfig::default());
            }
            local.to_path_buf()
        }
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|source| Error::ConfigRead { path: path.display().to_string(), source })?;
    toml::from_str(&content)
        .map_err(|source| Error::ConfigParse { path: path.display().to_string(), source })
}
