//! Dataset storage
//!
//! [`Store`] owns the JSON data file. Every mutation is one
//! load → mutate → save cycle under a single write gate; a failed
//! mutation is never saved.

pub mod dataset;
pub mod json_store;
pub mod seed;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

pub use dataset::Dataset;
pub use json_store::{JsonFileStore, StoreError};
pub use seed::{AdminSeed, SeedConfig};

use crate::auth::CredentialHasher;
use crate::utils::AppResult;

pub struct Store {
    file: JsonFileStore,
    seed: SeedConfig,
    hasher: Arc<dyn CredentialHasher>,
    write_gate: Mutex<()>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.file.path())
            .finish_non_exhaustive()
    }
}

impl Store {
    pub fn new(
        path: impl Into<PathBuf>,
        seed: SeedConfig,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            file: JsonFileStore::new(path),
            seed,
            hasher,
            write_gate: Mutex::new(()),
        }
    }

    pub fn hasher(&self) -> &dyn CredentialHasher {
        self.hasher.as_ref()
    }

    /// Current dataset, seeding it first if the file does not exist
    ///
    /// Reads bypass the gate; the rename in [`JsonFileStore::write`] means
    /// they always see a whole document.
    pub async fn load(&self) -> AppResult<Dataset> {
        if let Some(dataset) = self.file.read().await? {
            return Ok(dataset);
        }
        let _gate = self.write_gate.lock().await;
        self.load_or_seed_locked().await
    }

    /// Persist a full dataset, replacing prior content
    pub async fn save(&self, dataset: &Dataset) -> AppResult<()> {
        let _gate = self.write_gate.lock().await;
        self.file.write(dataset).await?;
        Ok(())
    }

    /// Run one load → mutate → save cycle under the write gate
    ///
    /// If `f` fails nothing is written and its error is returned.
    pub async fn mutate<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Dataset) -> AppResult<T> + Send,
        T: Send,
    {
        let _gate = self.write_gate.lock().await;
        let mut dataset = self.load_or_seed_locked().await?;
        let out = f(&mut dataset)?;
        self.file.write(&dataset).await?;
        Ok(out)
    }

    /// Caller must hold the write gate
    async fn load_or_seed_locked(&self) -> AppResult<Dataset> {
        if let Some(dataset) = self.file.read().await? {
            return Ok(dataset);
        }

        let dataset = seed::build_seed(&self.seed, self.hasher.as_ref())?;
        self.file.write(&dataset).await?;
        tracing::info!(
            path = %self.file.path().display(),
            items = dataset.items.len(),
            "Seed dataset created"
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Argon2Hasher;
    use shared::ErrorCode;
    use shared::AppError;

    fn open(dir: &tempfile::TempDir) -> Store {
        Store::new(
            dir.path().join("data").join("db.json"),
            SeedConfig::default(),
            Arc::new(Argon2Hasher),
        )
    }

    #[tokio::test]
    async fn test_load_seeds_missing_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir);

        let first = store.load().await.unwrap();
        assert!(dir.path().join("data/db.json").exists());

        let second = store.load().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir);

        let dataset = store.load().await.unwrap();
        store.save(&dataset).await.unwrap();
        assert_eq!(store.load().await.unwrap(), dataset);
    }

    #[tokio::test]
    async fn test_failed_mutation_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir);
        let before = store.load().await.unwrap();

        let result: AppResult<()> = store
            .mutate(|ds| {
                ds.items.clear();
                Err(AppError::validation("rejected"))
            })
            .await;

        assert!(result.unwrap_err().is(ErrorCode::ValidationFailed));
        assert_eq!(store.load().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_concurrent_mutations_are_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(open(&dir));
        store.load().await.unwrap();

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .mutate(move |ds| {
                        ds.items[0].title = format!("edit {}", i);
                        ds.items[0].price += 1;
                        Ok(())
                    })
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let dataset = store.load().await.unwrap();
        let seeded_price = dataset.items[0].price - 16;
        assert!((10_000..=100_000).contains(&seeded_price));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_persistence_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir);
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/db.json"), b"{ not json").unwrap();

        let err = store.load().await.unwrap_err();
        assert!(err.is(ErrorCode::PersistenceFailed));

        // previous content untouched
        let raw = std::fs::read(dir.path().join("data/db.json")).unwrap();
        assert_eq!(raw, b"{ not json");
    }

    fn tmp_files(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count()
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir);
        let data_dir = dir.path().join("data");
        let target = data_dir.join("db.json");
        let backup = data_dir.join("db.json.bak");

        let before = store.load().await.unwrap();
        let original = std::fs::read(&target).unwrap();

        // park the document and block the rename with a non-empty directory
        let (t, b) = (target.clone(), backup.clone());
        let result: AppResult<()> = store
            .mutate(move |ds| {
                ds.items.clear();
                std::fs::rename(&t, &b).unwrap();
                std::fs::create_dir(&t).unwrap();
                std::fs::write(t.join("keep"), b"x").unwrap();
                Ok(())
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.is(ErrorCode::PersistenceFailed));
        assert!(err.message.contains("Failed to write data file"));
        assert_eq!(tmp_files(&data_dir), 0);
        assert_eq!(std::fs::read(target.join("keep")).unwrap(), b"x");

        std::fs::remove_dir_all(&target).unwrap();
        std::fs::rename(&backup, &target).unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), original);
        assert_eq!(store.load().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_save_over_blocked_target_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir);
        let dataset = store.load().await.unwrap();

        let blocked = dir.path().join("blocked");
        std::fs::create_dir_all(blocked.join("db.json")).unwrap();
        std::fs::write(blocked.join("db.json/previous"), b"prior").unwrap();
        let other = Store::new(blocked.join("db.json"), SeedConfig::default(), Arc::new(Argon2Hasher));

        let err = other.save(&dataset).await.unwrap_err();
        assert!(err.is(ErrorCode::PersistenceFailed));
        assert_eq!(std::fs::read(blocked.join("db.json/previous")).unwrap(), b"prior");
        assert_eq!(tmp_files(&blocked), 0);
    }
}
