use crate::capability::storage::{StorageCapability, StorageError};
use crate::worker::Worker;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

type Items = BTreeMap<String, String>;

impl Worker {
    fn read_items(&self) -> Result<Items, StorageError> {
        if !self.storage_path.exists() {
            return Ok(Items::new());
        }

        let file =
            File::open(&self.storage_path).map_err(|err| StorageError::Read(err.to_string()))?;

        serde_json::from_reader(file).map_err(|err| {
            if err.is_io() {
                StorageError::Read(err.to_string())
            } else {
                StorageError::Deserialize(err.to_string())
            }
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .storage_path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("storage"));
        name.push(".tmp");
        self.storage_path.with_file_name(name)
    }

    /// Writes a sibling file and renames it over the store, so a crash
    /// mid-write leaves the previous contents in place.
    fn write_items(&self, items: &Items) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(items)
            .map_err(|err| StorageError::Serialize(err.to_string()))?;

        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                std::fs::create_dir_all(parent)
                    .map_err(|err| StorageError::Write(err.to_string()))?;
            }
        }

        let temp_path = self.temp_path();

        let mut file =
            File::create(&temp_path).map_err(|err| StorageError::Write(err.to_string()))?;

        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|err| StorageError::Write(err.to_string()))?;

        std::fs::rename(&temp_path, &self.storage_path).map_err(|err| {
            let _ = std::fs::remove_file(&temp_path);
            StorageError::Write(err.to_string())
        })
    }
}

impl StorageCapability for Worker {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = match self.read_items() {
            Ok(items) => items,
            Err(StorageError::Deserialize(err)) => {
                tracing::warn!(
                    "Replacing unreadable storage file {}: {}",
                    self.storage_path.display(),
                    err
                );
                Items::new()
            }
            Err(err) => return Err(err),
        };
        items.insert(key.to_string(), value.to_string());
        self.write_items(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.read_items()?;
        if items.remove(key).is_some() {
            self.write_items(&items)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Endpoints;
    use tempfile::tempdir;

    fn worker_at(path: std::path::PathBuf) -> Worker {
        Worker {
            reqwest_client: reqwest::Client::new(),
            endpoints: Endpoints::from_origin("http://127.0.0.1:8000"),
            storage_path: path,
        }
    }

    #[test]
    fn test_missing_file_has_no_items() {
        let dir = tempdir().unwrap();
        let worker = worker_at(dir.path().join("storage.json"));

        assert_eq!(worker.get_item("revnix_conversation").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let dir = tempdir().unwrap();
        let worker = worker_at(dir.path().join("nested").join("storage.json"));

        worker.set_item("a", "[1,2]").unwrap();
        worker.set_item("b", "other").unwrap();
        assert_eq!(worker.get_item("a").unwrap().as_deref(), Some("[1,2]"));

        worker.remove_item("a").unwrap();
        assert_eq!(worker.get_item("a").unwrap(), None);
        assert_eq!(worker.get_item("b").unwrap().as_deref(), Some("other"));
    }

    #[test]
    fn test_corrupt_file_reports_error_and_is_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();
        let worker = worker_at(path);

        assert!(matches!(
            worker.get_item("a"),
            Err(StorageError::Deserialize(_))
        ));

        worker.set_item("a", "fresh").unwrap();
        assert_eq!(worker.get_item("a").unwrap().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_write_replaces_file_without_leftovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let worker = worker_at(path.clone());

        worker.set_item("a", "first").unwrap();
        worker.set_item("b", "second").unwrap();

        let files = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect::<Vec<_>>();
        assert_eq!(files, vec![OsString::from("storage.json")]);

        let on_disk: Items =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.get("a").map(String::as_str), Some("first"));
        assert_eq!(on_disk.get("b").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_unreadable_store_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "data").unwrap();
        let worker = worker_at(path.clone());

        assert!(matches!(
            worker.set_item("a", "fresh"),
            Err(StorageError::Read(_))
        ));
        assert_eq!(std::fs::read_to_string(path.join("keep")).unwrap(), "data");
    }
}
