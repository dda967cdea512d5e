use crate::models::Program;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading the program catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog contains no usable programs")]
    Empty,
}

/// In-memory program catalog
///
/// Stands in for the upstream catalog feed. Records that break the program
/// data-quality rules are dropped at load time so the ranking engine and
/// safety validator only ever see well-formed programs.
#[derive(Debug, Clone, Default)]
pub struct ProgramCatalog {
    programs: Vec<Program>,
    index: HashMap<String, usize>,
}

impl ProgramCatalog {
    /// Load a JSON array of programs from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json(&raw)?;
        tracing::info!("Loaded {} programs from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse a JSON array of programs
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let programs: Vec<Program> = serde_json::from_str(raw)?;
        let catalog = Self::from_programs(programs);

        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    /// Build a catalog, dropping malformed records and repeated ids
    pub fn from_programs(programs: Vec<Program>) -> Self {
        let mut catalog = Self::default();

        for program in programs {
            if let Some(issue) = program.quality_issue() {
                tracing::warn!("Dropping program {:?}: {}", program.id, issue);
                continue;
            }
            if catalog.index.contains_key(&program.id) {
                tracing::warn!("Dropping program {:?}: duplicate id", program.id);
                continue;
            }

            catalog.index.insert(program.id.clone(), catalog.programs.len());
            catalog.programs.push(program);
        }

        catalog
    }

    pub fn get(&self, id: &str) -> Option<&Program> {
        self.index.get(id).map(|&i| &self.programs[i])
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}
