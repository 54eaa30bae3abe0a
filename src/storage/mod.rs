// src/storage/mod.rs
use crate::extractors::{summarize, Item};
use crate::ingest::IngestReport;
use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes local JSON snapshots of a run next to each other in one directory.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves every parsed item plus per-domain counts to `<stem>_items.json`.
    pub fn save_items(&self, stem: &str, source: &Path, items: &[Item]) -> Result<PathBuf, StorageError> {
        let snapshot = serde_json::json!({
            "source": source.display().to_string(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
            "item_count": items.len(),
            "domains": summarize(items),
            "items": items,
        });

        self.write_json(&format!("{}_items.json", stem), &snapshot)
    }

    /// Saves the ingestion outcome to `<stem>_ingest.json`.
    pub fn save_report(&self, stem: &str, report: &IngestReport) -> Result<PathBuf, StorageError> {
        let snapshot = serde_json::json!({
            "completed_at": chrono::Utc::now().to_rfc3339(),
            "report": report,
        });

        self.write_json(&format!("{}_ingest.json", stem), &snapshot)
    }

    fn write_json(&self, filename: &str, value: &serde_json::Value) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(filename);

        let contents = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, contents).map_err(StorageError::IoError)?;

        tracing::info!("Saved {}", file_path.display());
        Ok(file_path)
    }
}

/// File-name friendly stem of the source document ("Domain Packs.md" -> "domain_packs").
pub fn snapshot_stem(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let cleaned: String = stem
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_matches('_');

    if cleaned.is_empty() {
        "domain_pack".to_string()
    } else {
        cleaned.to_string()
    }
}
