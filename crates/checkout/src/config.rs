//! Session configuration: where the seed catalog comes from.

use std::path::{Path, PathBuf};

use thiserror::Error;

use storefront_inventory::{Inventory, ItemSeed, SeedError, default_catalog, parse_catalog};

/// Environment variable naming a JSON catalog file.
pub const CATALOG_ENV: &str = "STOREFRONT_CATALOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Seed(#[from] SeedError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// JSON catalog to seed from; the built-in catalog when `None`.
    pub catalog_path: Option<PathBuf>,
}

impl StorefrontConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let catalog_path = lookup(CATALOG_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);
        Self { catalog_path }
    }

    pub fn with_catalog_path(path: impl AsRef<Path>) -> Self {
        Self {
            catalog_path: Some(path.as_ref().to_path_buf()),
        }
    }

    pub fn load_catalog(&self) -> Result<Vec<ItemSeed>, ConfigError> {
        let Some(path) = &self.catalog_path else {
            tracing::info!("using built-in catalog");
            return Ok(default_catalog());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let seeds = parse_catalog(&raw)?;
        tracing::info!(path = %path.display(), items = seeds.len(), "catalog loaded");
        Ok(seeds)
    }

    pub fn load_inventory(&self) -> Result<Inventory, ConfigError> {
        Ok(Inventory::from_seed(self.load_catalog()?)?)
    }
}
