use crate::domain::model::ListCollection;
use crate::domain::ports::Persistence;
use crate::utils::error::Result;
use chrono::Utc;
use serde_json::error::Category;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed storage: one pretty-printed JSON object mapping list name to
/// its item array.
///
/// Saves are atomic (write to a `.tmp` sibling, then rename over the target),
/// so a crash mid-write never leaves a half-written data file. The
/// timestamped-sidecar recovery on load stays for files damaged by other
/// writers or carried over from earlier deployments.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    data_file: PathBuf,
    backup_enabled: bool,
}

impl JsonFileStorage {
    pub fn new(data_file: impl Into<PathBuf>, backup_enabled: bool) -> Self {
        Self {
            data_file: data_file.into(),
            backup_enabled,
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// `<data_file><suffix>`, e.g. `lists_data.json.backup`.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut path = self.data_file.clone().into_os_string();
        path.push(suffix);
        path.into()
    }

    fn backup_corrupted_file(&self) {
        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let backup_path = self.sibling(&format!(".backup_{}", stamp));
        match fs::copy(&self.data_file, &backup_path) {
            Ok(_) => tracing::info!("Corrupted file backed up to {}", backup_path.display()),
            Err(e) => tracing::error!("Failed to backup corrupted file: {}", e),
        }
    }
}

impl Persistence for JsonFileStorage {
    fn load(&self) -> ListCollection {
        if !self.data_file.exists() {
            tracing::info!(
                "Data file {} not found, starting fresh",
                self.data_file.display()
            );
            return ListCollection::new();
        }

        let content = match fs::read_to_string(&self.data_file) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Error loading data: {}", e);
                self.backup_corrupted_file();
                return ListCollection::new();
            }
        };

        match serde_json::from_str::<ListCollection>(&content) {
            Ok(collection) => collection,
            // parses as JSON, just not as a name -> items mapping
            Err(e) if e.classify() == Category::Data => {
                tracing::warn!("Invalid data format in {}", self.data_file.display());
                ListCollection::new()
            }
            Err(e) => {
                tracing::error!("Error loading data: {}", e);
                self.backup_corrupted_file();
                ListCollection::new()
            }
        }
    }

    fn save(&self, collection: &ListCollection) -> Result<()> {
        if self.backup_enabled && self.data_file.exists() {
            let backup_path = self.sibling(".backup");
            if let Err(e) = fs::copy(&self.data_file, &backup_path) {
                tracing::warn!("Skipping pre-save backup: {}", e);
            }
        }

        if let Some(parent) = self.data_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(collection)?;
        let tmp_path = self.sibling(".tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.data_file)?;

        tracing::debug!("Data saved to {}", self.data_file.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_in(dir: &TempDir) -> JsonFileStorage {
        JsonFileStorage::new(dir.path().join("lists_data.json"), true)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        let mut collection = ListCollection::new();
        collection.insert("Zebra".to_string());
        collection.insert("Alpha".to_string());
        collection
            .items_mut("Alpha")
            .unwrap()
            .extend(["one".to_string(), "two".to_string()]);

        storage.save(&collection).unwrap();
        assert_eq!(storage.load(), collection);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested/deeper/lists.json"), false);

        storage.save(&ListCollection::new()).unwrap();
        assert!(storage.data_file().exists());
    }

    #[test]
    fn test_save_leaves_no_tmp_residue() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        storage.save(&ListCollection::new()).unwrap();
        assert!(storage.data_file().exists());
        assert!(!storage.sibling(".tmp").exists());
    }
}
