// src/storage/mod.rs
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use crate::models::DocumentOutcome;
use crate::persona::Persona;
use crate::utils::error::StorageError;
use serde::Serialize;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves one document's outcome as `<name>_<persona>_prioritized.json`.
    /// `name` should come from `output_names` so a batch never reuses a file.
    pub fn save_result(
        &self,
        name: &str,
        persona: Persona,
        outcome: &DocumentOutcome,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self
            .base_dir
            .join(format!("{}_{}_prioritized.json", name, persona));
        self.write_json(&file_path, outcome)?;

        tracing::info!("Saved result to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves every outcome of a batch, in order, as one JSON array
    pub fn save_combined(
        &self,
        persona: Persona,
        outcomes: &[DocumentOutcome],
    ) -> Result<PathBuf, StorageError> {
        let file_path = self
            .base_dir
            .join(format!("all_documents_{}_prioritized.json", persona));
        self.write_json(&file_path, outcomes)?;

        tracing::info!("Saved combined results ({} documents) to {}", outcomes.len(), file_path.display());
        Ok(file_path)
    }

    fn write_json<T: Serialize + ?Sized>(&self, file_path: &Path, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(file_path, json)
            .map_err(StorageError::IoError)
    }
}

/// Per-document output names for one batch, in input order.
///
/// The file stem is used as-is when it is unique. Documents sharing a stem
/// (`plan.pdf`, `plan.txt`) get their extension appended (`plan_pdf`,
/// `plan_txt`), and any name still taken gets a numeric suffix.
pub fn output_names(sources: &[PathBuf]) -> Vec<String> {
    let stem_of = |path: &Path| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    };

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for source in sources {
        *stem_counts.entry(stem_of(source.as_path())).or_default() += 1;
    }

    let mut taken = HashSet::new();
    sources
        .iter()
        .map(|source| {
            let stem = stem_of(source.as_path());
            let base = match source.extension() {
                Some(ext) if stem_counts[&stem] > 1 => {
                    format!("{}_{}", stem, ext.to_string_lossy().to_lowercase())
                }
                _ => stem.clone(),
            };

            let mut name = base.clone();
            let mut n = 2;
            while !taken.insert(name.clone()) {
                name = format!("{}_{}", base, n);
                n += 1;
            }
            if name != stem {
                tracing::warn!("Output name for {} disambiguated to {}", source.display(), name);
            }
            name
        })
        .collect()
}
