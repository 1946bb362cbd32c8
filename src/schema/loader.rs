//! Loading parameters and seeds from JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use super::{ConfigError, SeedSet, SimulationParams};

/// Errors raised while loading a configuration from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Companion seed file for a parameter file: `params.json` → `params.seeds.json`.
pub fn seeds_path(params_path: &Path) -> PathBuf {
    params_path.with_extension("seeds.json")
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate parameters, plus seeds from the companion file if present.
pub fn load_config(params_path: &Path) -> Result<(SimulationParams, SeedSet), LoadError> {
    let params: SimulationParams = read_json(params_path)?;
    params.validate()?;

    let seeds_path = seeds_path(params_path);
    let seeds: SeedSet = if seeds_path.exists() {
        read_json(&seeds_path)?
    } else {
        SeedSet::default()
    };
    seeds.validate()?;

    log::debug!(
        "Loaded {} ({} seeds)",
        params_path.display(),
        seeds.seeds.len()
    );
    Ok((params, seeds))
}
