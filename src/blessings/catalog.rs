//! Blessing catalog for loading and looking up blessing content.
//!
//! Definitions are parsed from TOML, validated once, and shared behind `Arc`
//! so every engine built from the catalog points at the same static data.

use std::path::Path;
use std::sync::Arc;

use crate::blessings::builtin::BUILTIN_BLESSINGS;
use crate::core::error::{BuildError, Result};
use crate::core::types::BlessingId;
use crate::engine::SigilGraphEngine;
use crate::graph::{validate_definition, BlessingDefinition};

/// Ordered collection of validated blessing definitions
#[derive(Debug, Clone, Default)]
pub struct BlessingCatalog {
    blessings: Vec<Arc<BlessingDefinition>>,
}

impl BlessingCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the ten built-in blessings
    pub fn builtin() -> Result<Self> {
        let mut catalog = Self::new();
        for (origin, source) in BUILTIN_BLESSINGS {
            catalog.load_str(origin, source)?;
        }
        tracing::info!("Loaded {} built-in blessings", catalog.len());
        Ok(catalog)
    }

    /// Register a definition, replacing any blessing with the same id
    pub fn register(&mut self, definition: BlessingDefinition) -> Result<BlessingId> {
        validate_definition(&definition)?;
        let id = definition.id.clone();
        let definition = Arc::new(definition);
        match self.blessings.iter_mut().find(|b| b.id == id) {
            Some(existing) => {
                tracing::info!("Replacing blessing {}", id);
                *existing = definition;
            }
            None => self.blessings.push(definition),
        }
        Ok(id)
    }

    /// Parse and register one blessing from TOML text
    pub fn load_str(&mut self, origin: &str, content: &str) -> Result<BlessingId> {
        let definition: BlessingDefinition =
            toml::from_str(content).map_err(|e| BuildError::TomlError {
                origin: origin.to_string(),
                source: e,
            })?;
        self.register(definition)
    }

    /// Load a blessing from a TOML file
    pub fn load_file(&mut self, path: &Path) -> Result<BlessingId> {
        let content = std::fs::read_to_string(path)?;
        self.load_str(&path.display().to_string(), &content)
    }

    /// Load every `.toml` file in a directory, in file name order
    pub fn load_directory(&mut self, path: &Path) -> Result<Vec<BlessingId>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry_path = entry?.path();
            if entry_path.is_file() && entry_path.extension().is_some_and(|ext| ext == "toml") {
                files.push(entry_path);
            }
        }
        files.sort();

        let mut ids = Vec::with_capacity(files.len());
        for file in files {
            ids.push(self.load_file(&file)?);
        }
        tracing::info!("Loaded {} blessings from {}", ids.len(), path.display());
        Ok(ids)
    }

    pub fn get(&self, id: &BlessingId) -> Option<&Arc<BlessingDefinition>> {
        self.blessings.iter().find(|b| &b.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &BlessingId> {
        self.blessings.iter().map(|b| &b.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<BlessingDefinition>> {
        self.blessings.iter()
    }

    pub fn len(&self) -> usize {
        self.blessings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blessings.is_empty()
    }

    /// Fresh engine for a blessing
    pub fn engine(&self, id: &BlessingId) -> Result<SigilGraphEngine> {
        let definition = self
            .get(id)
            .ok_or_else(|| BuildError::UnknownBlessing(id.to_string()))?;
        SigilGraphEngine::new(Arc::clone(definition))
    }
}
