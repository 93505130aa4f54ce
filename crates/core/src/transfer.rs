//! Transfer engine
//!
//! Orchestrates single-object and bulk upload / download / delete against
//! one bucket, plus directory-to-prefix mirroring in both directions.
//!
//! Single-item operations never return an error: everything is caught at
//! this boundary, logged, and reported as an [`Outcome`]. Batch operations
//! run strictly sequentially, continue past failing items, and return a
//! [`BatchReport`] carrying one outcome per item; the only early failures
//! are validation errors raised before any I/O.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::ignore::IgnoreRules;
use crate::lister::{list_under_prefix, normalize_prefix};
use crate::store::{ObjectStore, PageRequest};

/// Result of one transfer item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    /// The operation completed
    Done,

    /// The remote object does not exist; nothing was transferred and the
    /// local filesystem was left untouched
    SkippedMissing,

    /// The operation failed; the reason names the file or key and the error
    Failed(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Outcome of one item within a batch
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    /// Source of the operation: local path for uploads, object key otherwise
    pub source: String,

    /// Destination, for operations that have one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Per-item results of a batch operation
///
/// "Everything succeeded" is a derived check, not the primary result, so
/// partial failures are never silently collapsed into a single boolean.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    fn push(&mut self, source: String, target: Option<String>, outcome: Outcome) {
        self.items.push(ItemReport {
            source,
            target,
            outcome,
        });
    }

    /// Whether no item failed (skips count as success)
    pub fn all_succeeded(&self) -> bool {
        !self.items.iter().any(|item| item.outcome.is_failure())
    }

    /// Items that failed
    pub fn failed(&self) -> impl Iterator<Item = &ItemReport> {
        self.items.iter().filter(|item| item.outcome.is_failure())
    }

    pub fn done_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.outcome == Outcome::Done)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Transfer operations against one bucket-bound store
pub struct TransferEngine<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ObjectStore + ?Sized> TransferEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Verify connectivity with one cheap bounded listing call.
    pub async fn check_connection(&self) -> Result<()> {
        self.store.list_page(PageRequest::default()).await?;
        Ok(())
    }

    /// Upload a single local file to `key`.
    ///
    /// An existing object at `key` is deleted first (last-writer-wins,
    /// no atomic replace). A missing local file is a failure.
    pub async fn upload_one(&self, local: &Path, key: &str) -> Outcome {
        match self.try_upload(local, key).await {
            Ok(()) => Outcome::Done,
            Err(e) => {
                warn!(local = %local.display(), key, error = %e, "upload failed");
                Outcome::Failed(format!("{}: {e}", local.display()))
            }
        }
    }

    async fn try_upload(&self, local: &Path, key: &str) -> Result<()> {
        if !local.exists() {
            return Err(Error::NotFound(format!("local file {}", local.display())));
        }
        if self.store.object_exists(key).await? {
            self.store.delete_object(key).await?;
        }
        info!(local = %local.display(), key, "upload");
        let data = std::fs::read(local)?;
        self.store.put_object(key, data, None).await
    }

    /// Upload `locals[i]` to `keys[i]` for every i, sequentially.
    ///
    /// Mismatched lengths fail before any I/O. One failing transfer does
    /// not halt the batch.
    pub async fn upload_many(&self, locals: &[PathBuf], keys: &[String]) -> Result<BatchReport> {
        if locals.len() != keys.len() {
            return Err(Error::Validation(format!(
                "transfer plan mismatch: {} local files against {} keys",
                locals.len(),
                keys.len()
            )));
        }
        let mut report = BatchReport::default();
        for (local, key) in locals.iter().zip(keys) {
            let outcome = self.upload_one(local, key).await;
            report.push(local.display().to_string(), Some(key.clone()), outcome);
        }
        Ok(report)
    }

    /// Mirror a local directory tree to a remote prefix.
    ///
    /// Relative file names matching any ignore rule are excluded before
    /// the transfer plan is built.
    pub async fn upload_dir(
        &self,
        local_dir: &Path,
        remote_dir: &str,
        ignore: Option<&IgnoreRules>,
    ) -> Result<BatchReport> {
        let remote_root = remote_dir.trim_end_matches('/');
        let mut locals = Vec::new();
        let mut keys = Vec::new();
        for name in crate::walker::walk_relative_files(local_dir)? {
            if let Some(rules) = ignore {
                if rules.matched(&name) {
                    info!(file = %name, "ignored by rule");
                    continue;
                }
            }
            keys.push(format!("{remote_root}/{name}"));
            locals.push(local_dir.join(&name));
        }
        self.upload_many(&locals, &keys).await
    }

    /// Download the object at `key` to `local`.
    ///
    /// An existing local file is removed first (overwrite, no partial or
    /// resumable transfer). A missing remote object is a skip, distinct
    /// from both success and failure; the local filesystem is untouched.
    pub async fn download_one(&self, key: &str, local: &Path) -> Outcome {
        match self.try_download(key, local).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(key, local = %local.display(), error = %e, "download failed");
                Outcome::Failed(format!("{key}: {e}"))
            }
        }
    }

    async fn try_download(&self, key: &str, local: &Path) -> Result<Outcome> {
        if !self.store.object_exists(key).await? {
            info!(key, "remote object does not exist, skipping download");
            return Ok(Outcome::SkippedMissing);
        }
        if local.exists() {
            std::fs::remove_file(local)?;
        }
        let data = self.store.get_object(key).await?;
        std::fs::write(local, data)?;
        info!(key, local = %local.display(), "download");
        Ok(Outcome::Done)
    }

    /// Mirror a remote prefix into a local directory.
    ///
    /// Every required subdirectory is created before the corresponding
    /// file is written.
    pub async fn download_dir(&self, remote_dir: &str, local_dir: &Path) -> Result<BatchReport> {
        self.download_dir_filtered(remote_dir, local_dir, None).await
    }

    /// Like [`download_dir`](Self::download_dir), but skips keys ending
    /// with `suffix`.
    pub async fn download_dir_ignoring(
        &self,
        remote_dir: &str,
        local_dir: &Path,
        suffix: &str,
    ) -> Result<BatchReport> {
        self.download_dir_filtered(remote_dir, local_dir, Some(suffix))
            .await
    }

    async fn download_dir_filtered(
        &self,
        remote_dir: &str,
        local_dir: &Path,
        ignore_suffix: Option<&str>,
    ) -> Result<BatchReport> {
        let keys = list_under_prefix(self.store, remote_dir).await?;
        std::fs::create_dir_all(local_dir)?;

        let remote_root = normalize_prefix(remote_dir);
        let mut report = BatchReport::default();
        for key in keys {
            if let Some(suffix) = ignore_suffix {
                if key.ends_with(suffix) {
                    info!(key, "ignored by suffix");
                    continue;
                }
            }
            let relative = key
                .strip_prefix(&remote_root)
                .unwrap_or(&key)
                .trim_start_matches('/');
            let local_file = local_dir.join(relative);
            if let Some(parent) = local_file.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let outcome = self.download_one(&key, &local_file).await;
            report.push(
                key.clone(),
                Some(local_file.display().to_string()),
                outcome,
            );
        }
        Ok(report)
    }

    /// Delete the object at `key` and verify it is gone.
    ///
    /// Continued presence after the delete call is a failure. Deleting an
    /// already-absent key verifies trivially and counts as done.
    pub async fn delete_one(&self, key: &str) -> Outcome {
        match self.try_delete(key).await {
            Ok(()) => Outcome::Done,
            Err(e) => {
                warn!(key, error = %e, "delete failed");
                Outcome::Failed(format!("{key}: {e}"))
            }
        }
    }

    async fn try_delete(&self, key: &str) -> Result<()> {
        self.store.delete_object(key).await?;
        if self.store.object_exists(key).await? {
            return Err(Error::General(format!(
                "object {key} still present after delete"
            )));
        }
        info!(key, "deleted");
        Ok(())
    }

    /// Delete each key sequentially; one failing delete does not halt the
    /// batch.
    pub async fn delete_many(&self, keys: &[String]) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        for key in keys {
            let outcome = self.delete_one(key).await;
            report.push(key.clone(), None, outcome);
        }
        Ok(report)
    }

    /// Delete every object under `prefix`.
    pub async fn delete_dir(&self, prefix: &str) -> Result<BatchReport> {
        let keys = list_under_prefix(self.store, prefix).await?;
        self.delete_many(&keys).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ListingPage, MockObjectStore};
    use tempfile::TempDir;

    fn page(keys: &[&str], truncated: bool, token: Option<&str>) -> ListingPage {
        ListingPage {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            truncated,
            continuation_token: token.map(|t| t.to_string()),
        }
    }

    #[tokio::test]
    async fn test_upload_one_missing_local_file() {
        // No expectations set: any store call would panic the mock.
        let store = MockObjectStore::new();
        let engine = TransferEngine::new(&store);

        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("absent.txt");
        let outcome = engine.upload_one(&missing, "remote/absent.txt").await;
        assert!(outcome.is_failure());
    }

    #[tokio::test]
    async fn test_upload_one_replaces_existing_object() {
        let temp_dir = TempDir::new().unwrap();
        let local = temp_dir.path().join("data.txt");
        std::fs::write(&local, b"fresh content").unwrap();

        let mut store = MockObjectStore::new();
        store
            .expect_object_exists()
            .withf(|key| key == "remote/data.txt")
            .times(1)
            .returning(|_| Ok(true));
        store
            .expect_delete_object()
            .withf(|key| key == "remote/data.txt")
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_put_object()
            .withf(|key, data, _| key == "remote/data.txt" && data == b"fresh content")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let engine = TransferEngine::new(&store);
        let outcome = engine.upload_one(&local, "remote/data.txt").await;
        assert_eq!(outcome, Outcome::Done);
    }

    #[tokio::test]
    async fn test_upload_many_length_mismatch_before_io() {
        let store = MockObjectStore::new();
        let engine = TransferEngine::new(&store);

        let result = engine
            .upload_many(&[PathBuf::from("a.txt")], &["k1".to_string(), "k2".to_string()])
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_upload_many_continues_past_failures() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.txt");
        std::fs::write(&good, b"ok").unwrap();
        let missing = temp_dir.path().join("missing.txt");

        let mut store = MockObjectStore::new();
        store.expect_object_exists().returning(|_| Ok(false));
        store
            .expect_put_object()
            .withf(|key, _, _| key == "remote/good.txt")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let engine = TransferEngine::new(&store);
        let report = engine
            .upload_many(
                &[missing, good],
                &["remote/missing.txt".to_string(), "remote/good.txt".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report.done_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.all_succeeded());
    }

    #[tokio::test]
    async fn test_upload_dir_applies_ignore_rules() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a.txt", "a.log", "b.txt"] {
            std::fs::write(temp_dir.path().join(name), name.as_bytes()).unwrap();
        }

        let mut store = MockObjectStore::new();
        store.expect_object_exists().returning(|_| Ok(false));
        store
            .expect_put_object()
            .withf(|key, _, _| key == "remote/dir/b.txt")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let engine = TransferEngine::new(&store);
        let rules = IgnoreRules::parse(r"a\..*").unwrap();
        let report = engine
            .upload_dir(temp_dir.path(), "remote/dir", Some(&rules))
            .await
            .unwrap();

        assert_eq!(report.len(), 1);
        assert!(report.all_succeeded());
        assert_eq!(report.items[0].target.as_deref(), Some("remote/dir/b.txt"));
    }

    #[tokio::test]
    async fn test_download_one_missing_remote_is_a_skip() {
        let mut store = MockObjectStore::new();
        store
            .expect_object_exists()
            .withf(|key| key == "remote/absent.txt")
            .times(1)
            .returning(|_| Ok(false));

        let temp_dir = TempDir::new().unwrap();
        let local = temp_dir.path().join("absent.txt");

        let engine = TransferEngine::new(&store);
        let outcome = engine.download_one("remote/absent.txt", &local).await;
        assert_eq!(outcome, Outcome::SkippedMissing);
        // No file may be created for a skipped download.
        assert!(!local.exists());
    }

    #[tokio::test]
    async fn test_download_one_overwrites_local_file() {
        let temp_dir = TempDir::new().unwrap();
        let local = temp_dir.path().join("data.txt");
        std::fs::write(&local, b"stale").unwrap();

        let mut store = MockObjectStore::new();
        store.expect_object_exists().returning(|_| Ok(true));
        store
            .expect_get_object()
            .withf(|key| key == "remote/data.txt")
            .times(1)
            .returning(|_| Ok(b"fresh".to_vec()));

        let engine = TransferEngine::new(&store);
        let outcome = engine.download_one("remote/data.txt", &local).await;
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(std::fs::read(&local).unwrap(), b"fresh");
    }

    #[tokio::test]
    async fn test_download_dir_creates_subdirectories() {
        let mut store = MockObjectStore::new();
        store.expect_list_page().times(1).returning(|_| {
            Ok(page(
                &["remote/dir/x.txt", "remote/dir/sub/y.txt"],
                false,
                None,
            ))
        });
        store.expect_object_exists().returning(|_| Ok(true));
        store
            .expect_get_object()
            .returning(|key| Ok(key.as_bytes().to_vec()));

        let temp_dir = TempDir::new().unwrap();
        let local_dir = temp_dir.path().join("out");

        let engine = TransferEngine::new(&store);
        let report = engine.download_dir("remote/dir", &local_dir).await.unwrap();

        assert_eq!(report.len(), 2);
        assert!(report.all_succeeded());
        assert_eq!(
            std::fs::read(local_dir.join("x.txt")).unwrap(),
            b"remote/dir/x.txt"
        );
        assert_eq!(
            std::fs::read(local_dir.join("sub/y.txt")).unwrap(),
            b"remote/dir/sub/y.txt"
        );
    }

    #[tokio::test]
    async fn test_download_dir_ignoring_suffix() {
        let mut store = MockObjectStore::new();
        store.expect_list_page().times(1).returning(|_| {
            Ok(page(
                &["remote/dir/keep.txt", "remote/dir/skip.tmp"],
                false,
                None,
            ))
        });
        store.expect_object_exists().returning(|_| Ok(true));
        store
            .expect_get_object()
            .withf(|key| key == "remote/dir/keep.txt")
            .times(1)
            .returning(|_| Ok(b"kept".to_vec()));

        let temp_dir = TempDir::new().unwrap();
        let local_dir = temp_dir.path().join("out");

        let engine = TransferEngine::new(&store);
        let report = engine
            .download_dir_ignoring("remote/dir", &local_dir, ".tmp")
            .await
            .unwrap();

        assert_eq!(report.len(), 1);
        assert!(local_dir.join("keep.txt").exists());
        assert!(!local_dir.join("skip.tmp").exists());
    }

    #[tokio::test]
    async fn test_delete_one_verifies_absence() {
        let mut store = MockObjectStore::new();
        store
            .expect_delete_object()
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_object_exists()
            .times(1)
            .returning(|_| Ok(false));

        let engine = TransferEngine::new(&store);
        assert_eq!(engine.delete_one("remote/gone.txt").await, Outcome::Done);
    }

    #[tokio::test]
    async fn test_delete_one_still_present_is_a_failure() {
        let mut store = MockObjectStore::new();
        store
            .expect_delete_object()
            .times(1)
            .returning(|_| Ok(()));
        store.expect_object_exists().times(1).returning(|_| Ok(true));

        let engine = TransferEngine::new(&store);
        let outcome = engine.delete_one("remote/stuck.txt").await;
        assert!(outcome.is_failure());
    }

    #[tokio::test]
    async fn test_delete_dir_lists_then_deletes() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_page()
            .times(1)
            .returning(|_| Ok(page(&["remote/dir/a", "remote/dir/b"], false, None)));
        store.expect_delete_object().times(2).returning(|_| Ok(()));
        store.expect_object_exists().returning(|_| Ok(false));

        let engine = TransferEngine::new(&store);
        let report = engine.delete_dir("remote/dir").await.unwrap();
        assert_eq!(report.len(), 2);
        assert!(report.all_succeeded());
    }

    #[tokio::test]
    async fn test_check_connection() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_page()
            .withf(|req| req.start_after.is_empty() && req.continuation_token.is_none())
            .times(1)
            .returning(|_| Ok(page(&[], false, None)));

        let engine = TransferEngine::new(&store);
        engine.check_connection().await.unwrap();
    }

    #[test]
    fn test_report_serialization_carries_reasons() {
        let mut report = BatchReport::default();
        report.push("a.txt".into(), Some("k/a.txt".into()), Outcome::Done);
        report.push(
            "b.txt".into(),
            Some("k/b.txt".into()),
            Outcome::Failed("b.txt: Not found".into()),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["items"][0]["status"], "done");
        assert_eq!(json["items"][1]["status"], "failed");
        assert_eq!(json["items"][1]["reason"], "b.txt: Not found");
    }
}
