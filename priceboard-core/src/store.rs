//! On-disk source store — one JSON document per uploaded model.
//!
//! Layout: `<data_dir>/<source>.json`, holding the observations plus a meta
//! block (row count, date span, blake3 content fingerprint, import
//! timestamp). Importing under an existing name replaces that source.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Observation, SourceCollection};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("source '{0}' not found")]
    NotFound(String),

    #[error("invalid source name '{0}'")]
    InvalidName(String),

    #[error("source '{0}' has no observations")]
    EmptySource(String),

    #[error("corrupt source file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

/// Everything the dashboard needs to list a source without loading it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMeta {
    pub name: String,
    pub rows: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Blake3 hex digest over the serialized observations.
    pub fingerprint: String,
    pub imported_at: NaiveDateTime,
}

impl SourceMeta {
    /// Short fingerprint for table display.
    pub fn short_fingerprint(&self) -> &str {
        &self.fingerprint[..self.fingerprint.len().min(12)]
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SourceDocument {
    meta: SourceMeta,
    observations: Vec<Observation>,
}

/// File-backed store of uploaded sources.
#[derive(Debug, Clone)]
pub struct SourceStore {
    dir: PathBuf,
}

impl SourceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a source, replacing any existing one with the same name.
    pub fn import(
        &self,
        name: &str,
        observations: &[Observation],
    ) -> Result<SourceMeta, StoreError> {
        validate_name(name)?;
        let (first_date, last_date) = date_span(observations)
            .ok_or_else(|| StoreError::EmptySource(name.to_string()))?;

        let payload =
            serde_json::to_vec(observations).expect("observation serialization cannot fail");
        let meta = SourceMeta {
            name: name.to_string(),
            rows: observations.len(),
            first_date,
            last_date,
            fingerprint: blake3::hash(&payload).to_hex().to_string(),
            imported_at: Utc::now().naive_utc(),
        };

        let document = SourceDocument {
            meta: meta.clone(),
            observations: observations.to_vec(),
        };
        fs::create_dir_all(&self.dir)?;
        let json =
            serde_json::to_string_pretty(&document).expect("document serialization cannot fail");
        fs::write(self.path_for(name), json)?;
        Ok(meta)
    }

    /// Meta for every stored source, sorted by name. Non-JSON files in the
    /// data directory are ignored; a corrupt JSON document is an error.
    pub fn list(&self) -> Result<Vec<SourceMeta>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut metas = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            metas.push(self.read_document(&path)?.meta);
        }
        metas.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(metas)
    }

    /// Load one source's observations.
    pub fn load(&self, name: &str) -> Result<Vec<Observation>, StoreError> {
        validate_name(name)?;
        let path = self.path_for(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(self.read_document(&path)?.observations)
    }

    /// Load a set of sources into a collection, as one atomic snapshot.
    pub fn load_selection(&self, names: &[String]) -> Result<SourceCollection, StoreError> {
        let mut collection = SourceCollection::new();
        for name in names {
            collection.insert(name.clone(), self.load(name)?);
        }
        Ok(collection)
    }

    /// Delete a stored source.
    pub fn remove(&self, name: &str) -> Result<(), StoreError> {
        validate_name(name)?;
        let path = self.path_for(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    fn read_document(&self, path: &Path) -> Result<SourceDocument, StoreError> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|e| StoreError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    let ok = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

fn date_span(observations: &[Observation]) -> Option<(NaiveDate, NaiveDate)> {
    let first = observations.iter().map(|o| o.date).min()?;
    let last = observations.iter().map(|o| o.date).max()?;
    Some((first, last))
}
