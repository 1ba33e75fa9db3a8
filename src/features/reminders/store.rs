//! # Reminder Store
//!
//! One JSON file per owner (`<owner>.json`) holding that owner's entire
//! collection. Every save overwrites the file wholesale.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Write through a temp file and rename
//! - 1.0.0: Initial per-owner JSON persistence

use crate::features::reminders::model::Reminder;
use crate::features::reminders::registry::ReminderRegistry;
use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use tokio::fs;

const FILE_EXT: &str = "json";

#[derive(Debug, Clone)]
pub struct ReminderStore {
    dir: PathBuf,
}

impl ReminderStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the saves directory if it does not exist
    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("creating saves directory {}", self.dir.display()))
    }

    /// Path of the save file for `owner`; rejects ids that are not plain file names
    pub fn path_for(&self, owner: &str) -> Result<PathBuf> {
        if owner.is_empty()
            || owner.starts_with('.')
            || owner.contains(['/', '\\'])
            || owner.contains('\0')
        {
            return Err(anyhow!("owner id '{owner}' is not a valid file name"));
        }
        Ok(self.dir.join(format!("{owner}.{FILE_EXT}")))
    }

    /// Overwrite `owner`'s save file with `reminders`
    pub async fn save(&self, owner: &str, reminders: &[Reminder]) -> Result<()> {
        let path = self.path_for(owner)?;
        let tmp = path.with_extension(format!("{FILE_EXT}.tmp"));
        let json = serde_json::to_string(reminders).context("serializing reminders")?;

        fs::write(&tmp, json)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("replacing {}", path.display()))?;

        debug!("💾 Saved {} reminders for user {owner}", reminders.len());
        Ok(())
    }

    /// Save the registry's current collection for `owner`, logging failures.
    ///
    /// Owners without a collection are skipped.
    pub async fn persist(&self, registry: &ReminderRegistry, owner: &str) {
        let Some(reminders) = registry.snapshot(owner) else {
            debug!("No reminder collection for user {owner}, nothing to save");
            return;
        };
        if let Err(e) = self.save(owner, &reminders).await {
            error!("Error writing to file for user {owner}: {e:#}");
        }
    }

    /// Read one save file
    pub async fn load_file(&self, path: &Path) -> Result<Vec<Reminder>> {
        let data = fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let reminders: Vec<Reminder> = serde_json::from_str(&data)
            .with_context(|| format!("parsing {}", path.display()))?;

        if let Some(bad) = reminders.iter().find(|r| !r.is_schedulable()) {
            return Err(anyhow!(
                "{} holds an unschedulable reminder ({:?}, {} {})",
                path.display(),
                bad.message,
                bad.time,
                bad.units
            ));
        }
        Ok(reminders)
    }

    /// Load every owner's save file. Unreadable or malformed files are logged
    /// and skipped; only a failure to list the directory is an error.
    pub async fn load_all(&self) -> Result<Vec<(String, Vec<Reminder>)>> {
        let mut dir = fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("listing {}", self.dir.display()))?;
        let mut loaded = Vec::new();

        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXT) {
                continue;
            }
            let Some(owner) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match self.load_file(&path).await {
                Ok(reminders) => loaded.push((owner.to_string(), reminders)),
                Err(e) => warn!("Error reading file {}: {e:#}", path.display()),
            }
        }

        Ok(loaded)
    }

    /// Startup bootstrap: create the directory, load every save file and
    /// rearm its reminders. Returns the number of reminders armed.
    pub async fn restore_into(&self, registry: &ReminderRegistry) -> usize {
        if let Err(e) = self.ensure_dir().await {
            error!("Error creating saves directory: {e:#}");
            return 0;
        }

        let saved = match self.load_all().await {
            Ok(saved) => saved,
            Err(e) => {
                error!("Error loading saved reminders! {e:#}");
                return 0;
            }
        };

        let owners = saved.len();
        let armed: usize = saved
            .into_iter()
            .map(|(owner, reminders)| registry.restore(&owner, reminders))
            .sum();
        info!("📂 Loaded {armed} saved reminders for {owners} users");
        armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::testing::RecordingDelivery;
    use crate::features::reminders::scheduler::ReminderScheduler;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn registry() -> ReminderRegistry {
        ReminderRegistry::new(ReminderScheduler::new(Arc::new(RecordingDelivery::default())))
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = ReminderStore::new(tmp.path());

        let before = registry();
        before.set("111", "drink water", "every", "30", "minutes").unwrap();
        before.set("111", "stand up", "each", "2", "hours").unwrap();
        store.persist(&before, "111").await;

        let after = registry();
        assert_eq!(store.restore_into(&after).await, 2);
        assert_eq!(after.snapshot("111"), before.snapshot("111"));
        assert_eq!(after.periods("111"), before.periods("111"));
        assert_eq!(
            after.periods("111")[0],
            Some(Duration::from_millis(30 * 60_000))
        );
    }

    #[tokio::test]
    async fn test_saved_file_shape() {
        let tmp = TempDir::new().unwrap();
        let store = ReminderStore::new(tmp.path());
        let reminders = vec![Reminder::from_parts("7", "hi", "every", "5", "seconds").unwrap()];

        store.save("7", &reminders).await.unwrap();

        let raw = std::fs::read_to_string(tmp.path().join("7.json")).unwrap();
        assert_eq!(
            raw,
            r#"[{"author":"7","message":"hi","type":"every","time":"5","units":"seconds"}]"#
        );
        assert!(!tmp.path().join("7.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let tmp = TempDir::new().unwrap();
        let store = ReminderStore::new(tmp.path());
        let one = Reminder::from_parts("7", "a", "every", "5", "seconds").unwrap();

        store.save("7", &[one.clone(), one.clone()]).await.unwrap();
        store.save("7", &[]).await.unwrap();

        let loaded = store.load_file(&tmp.path().join("7.json")).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_bad_files_skipped() {
        let tmp = TempDir::new().unwrap();
        let store = ReminderStore::new(tmp.path());
        std::fs::write(tmp.path().join("bad.json"), "{not json").unwrap();
        std::fs::write(
            tmp.path().join("zero.json"),
            r#"[{"author":"zero","message":"x","type":"every","time":"0","units":"seconds"}]"#,
        )
        .unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();
        store
            .save("42", &[Reminder::from_parts("42", "ok", "each", "1", "days").unwrap()])
            .await
            .unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].0, "42");
    }

    #[tokio::test]
    async fn test_restore_creates_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("saves");
        let store = ReminderStore::new(&dir);

        assert_eq!(store.restore_into(&registry()).await, 0);
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn test_persist_skips_unknown_owner() {
        let tmp = TempDir::new().unwrap();
        let store = ReminderStore::new(tmp.path());

        store.persist(&registry(), "nobody").await;
        assert!(!tmp.path().join("nobody.json").exists());
    }

    #[test]
    fn test_path_for_rejects_traversal() {
        let store = ReminderStore::new("saves");
        assert!(store.path_for("../etc").is_err());
        assert!(store.path_for("a/b").is_err());
        assert!(store.path_for("").is_err());
        assert!(store.path_for(".hidden").is_err());
        assert_eq!(
            store.path_for("1234").unwrap(),
            PathBuf::from("saves").join("1234.json")
        );
    }
}
