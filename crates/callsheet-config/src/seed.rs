use std::fs;
use std::path::Path;

use callsheet_core::domain::{normalize_country_code, NewHotelContact};
use callsheet_core::{sample_roster, RosterStore};
use serde::Deserialize;

use crate::{AppConfig, ConfigError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedFile {
    #[serde(default)]
    hotel: Vec<NewHotelContact>,
}

/// Reads a `[[hotel]]` roster file. Entries keep file order, which becomes
/// display order once they are added to a store.
pub fn load_seed(path: &Path) -> Result<Vec<NewHotelContact>> {
    if !path.exists() {
        return Err(ConfigError::MissingSeedFile(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_seed(path, &contents)
}

/// Builds the in-memory roster a session starts with: `seed_override` wins
/// over the configured seed path, and the built-in sample is used when
/// neither is set.
pub fn load_roster(config: &AppConfig, seed_override: Option<&Path>) -> Result<RosterStore> {
    let seed = match seed_override.or(config.seed_path.as_deref()) {
        Some(path) => load_seed(path)?,
        None => sample_roster(),
    };
    Ok(RosterStore::from_seed(
        config.default_country_code.clone(),
        seed,
    ))
}

fn parse_seed(path: &Path, contents: &str) -> Result<Vec<NewHotelContact>> {
    let parsed: SeedFile = toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hotels = Vec::with_capacity(parsed.hotel.len());
    for (index, mut entry) in parsed.hotel.into_iter().enumerate() {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::InvalidSeed {
                path: path.to_path_buf(),
                index: index + 1,
                reason: "name is empty".to_string(),
            });
        }
        if let Some(code) = entry.country_code.take() {
            if !code.trim().is_empty() {
                let normalized =
                    normalize_country_code(&code).map_err(|err| ConfigError::InvalidSeed {
                        path: path.to_path_buf(),
                        index: index + 1,
                        reason: err.to_string(),
                    })?;
                entry.country_code = Some(normalized);
            }
        }
        hotels.push(entry);
    }
    Ok(hotels)
}
