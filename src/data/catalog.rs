use std::{collections::BTreeMap, path::Path};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{PocketError, PocketResult};

/// Decade shown when none is requested.
pub const DEFAULT_DECADE: &str = "00";

/// One game on the Order Up timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Asset stem, e.g. `"thesims"`.
    pub name: String,
    /// Display date, e.g. `"2000 - Feb 4"`.
    pub date: String,
}

impl Game {
    /// Background image path by naming convention: `{decade}s/{name}bg.png`.
    pub fn background_path(&self, decade: &str) -> String {
        format!("{decade}s/{}bg.png", self.name)
    }

    /// Logo image path by naming convention: `{decade}s/{name}logo.png`.
    pub fn logo_path(&self, decade: &str) -> String {
        format!("{decade}s/{}logo.png", self.name)
    }
}

/// Games grouped by decade key (`"00"`, `"10"`, ...), each list in release order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameCatalog {
    decades: BTreeMap<String, Vec<Game>>,
}

impl GameCatalog {
    /// Build a catalog from decade lists.
    pub fn new(decades: BTreeMap<String, Vec<Game>>) -> Self {
        Self { decades }
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(json: &str) -> PocketResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| PocketError::data(format!("parse game catalog JSON: {e}")))
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> PocketResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read game catalog '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Games of one decade.
    pub fn decade(&self, decade: &str) -> PocketResult<&[Game]> {
        self.decades.get(decade).map(Vec::as_slice).ok_or_else(|| {
            PocketError::data(format!(
                "catalog has no decade '{decade}' (available: {})",
                self.decade_keys().collect::<Vec<_>>().join(", ")
            ))
        })
    }

    /// Decade keys in sorted order.
    pub fn decade_keys(&self) -> impl Iterator<Item = &str> {
        self.decades.keys().map(String::as_str)
    }
}

/// Asset paths under `root` that the decade's games reference but that do not exist.
pub fn missing_assets(root: &Path, decade: &str, games: &[Game]) -> Vec<String> {
    games
        .iter()
        .flat_map(|g| [g.background_path(decade), g.logo_path(decade)])
        .filter(|rel| !root.join(rel).is_file())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/data/catalog.rs"]
mod tests;
