//! Classification and transfer orchestration
//!
//! The three public operations of a getter backend:
//! - [`classify_mode`] decides whether an address names a single object or
//!   an object tree by probing the store's prefix listing;
//! - [`fetch_tree`] replaces a local destination with every object under a
//!   blob path, re-rooted relative to that path;
//! - [`fetch_one`] downloads exactly one object to an exact path.
//!
//! All three are generic over [`ObjectStore`], so they are tested against a
//! mock store without any network dependency.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use serde::Serialize;
use tokio::fs;

use crate::error::Result;
use crate::store::ObjectStore;

/// Whether an address names a single object or an object tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientMode {
    /// The address names one object.
    File,
    /// The address names a prefix with objects beneath it.
    Dir,
}

impl std::fmt::Display for ClientMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientMode::File => write!(f, "file"),
            ClientMode::Dir => write!(f, "dir"),
        }
    }
}

/// Counters reported by a completed tree fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchSummary {
    /// Objects downloaded
    pub objects: u64,
    /// Total bytes written
    pub bytes: u64,
}

/// A getter backend, as seen by the surrounding dispatch framework
///
/// Implementations parse the address, build a store client scoped to the
/// resolved account and credential, and delegate to the orchestration
/// functions in this module.
#[async_trait]
pub trait Getter: Send + Sync {
    /// Decide whether `address` names a single object or an object tree
    async fn classify_mode(&self, address: &str) -> Result<ClientMode>;

    /// Materialize every object under `address` into `dest`
    async fn get_tree(&self, dest: &Path, address: &str) -> Result<FetchSummary>;

    /// Download the single object at `address` to exactly `dest`
    async fn get_file(&self, dest: &Path, address: &str) -> Result<u64>;
}

/// Classify `blob_path` by scanning the prefix listing in order
///
/// Exact-name match is tested before the prefix match, so an object named
/// `collision/foo` classifies as a file even when `collision/foo/bar` also
/// exists. The prefix match requires a path separator after `blob_path`,
/// so `fold` never matches a listing containing `folder/x`.
pub async fn classify_mode<S>(store: &S, container: &str, blob_path: &str) -> Result<ClientMode>
where
    S: ObjectStore + ?Sized,
{
    let dir_prefix = format!("{blob_path}/");
    let mut pages = store.list_by_prefix(container, blob_path);

    while let Some(page) = pages.next().await {
        for entry in page?.entries {
            if entry.key == blob_path {
                return Ok(ClientMode::File);
            }
            if entry.key.starts_with(&dir_prefix) {
                return Ok(ClientMode::Dir);
            }
            // A sibling that merely shares a lexical prefix: the address
            // names a plain object, not a tree.
            return Ok(ClientMode::File);
        }
    }

    // Nothing listed under the path. Absence is the download step's concern,
    // so default to a file and let that step report not-found.
    Ok(ClientMode::File)
}

/// Download every object under `blob_path` into a pristine `dest` tree
///
/// A pre-existing `dest` (file or directory) is removed first; the fetch is
/// never incremental. The first failed download aborts the fetch and leaves
/// already-written files in place.
pub async fn fetch_tree<S>(
    store: &S,
    container: &str,
    blob_path: &str,
    dest: &Path,
) -> Result<FetchSummary>
where
    S: ObjectStore + ?Sized,
{
    replace_dest(dest).await?;

    let mut summary = FetchSummary::default();
    let mut pages = store.list_by_prefix(container, blob_path);

    while let Some(page) = pages.next().await {
        for entry in page?.entries {
            if entry.is_directory_marker() {
                continue;
            }

            let obj_dest = dest_for_key(dest, blob_path, &entry.key);
            let bytes = fetch_one(store, container, &entry.key, &obj_dest).await?;
            tracing::debug!(
                key = %entry.key,
                dest = %obj_dest.display(),
                bytes,
                "downloaded object"
            );

            summary.objects += 1;
            summary.bytes += bytes;
        }
    }

    Ok(summary)
}

/// Download one object to exactly `dest`, creating parent directories
///
/// Overwrites only the target file; siblings are untouched. Returns the
/// number of bytes written.
pub async fn fetch_one<S>(store: &S, container: &str, key: &str, dest: &Path) -> Result<u64>
where
    S: ObjectStore + ?Sized,
{
    let body = store.get_object(container, key).await?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(dest, &body).await?;

    Ok(body.len() as u64)
}

/// Remove a pre-existing destination and create its parent directories
async fn replace_dest(dest: &Path) -> Result<()> {
    match fs::metadata(dest).await {
        Ok(meta) => {
            if meta.is_dir() {
                fs::remove_dir_all(dest).await?;
            } else {
                fs::remove_file(dest).await?;
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await?;
    }

    Ok(())
}

/// Compute an object's local destination by re-rooting its key
///
/// The key is taken relative to the queried `blob_path` and joined under
/// `dest_root`. Pure path algebra: a key can never re-root outside
/// `dest_root`, because the relative part is produced by prefix stripping,
/// never by upward traversal.
fn dest_for_key(dest_root: &Path, blob_path: &str, key: &str) -> PathBuf {
    let rel = key
        .strip_prefix(blob_path)
        .map(|r| r.trim_start_matches('/'))
        .unwrap_or(key);

    if rel.is_empty() {
        dest_root.to_path_buf()
    } else {
        dest_root.join(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::{ListEntry, ListPage, MockObjectStore};
    use futures::stream;

    fn page(keys: &[&str]) -> ListPage {
        ListPage {
            entries: keys.iter().map(|k| ListEntry::new(*k)).collect(),
        }
    }

    fn store_listing(pages: Vec<Result<ListPage>>) -> MockObjectStore {
        let mut store = MockObjectStore::new();
        let pages = std::sync::Mutex::new(Some(pages));
        store
            .expect_list_by_prefix()
            .returning(move |_, _| {
                let pages = pages.lock().unwrap().take().expect("listing restarted");
                stream::iter(pages).boxed()
            });
        store
    }

    #[tokio::test]
    async fn test_classify_exact_match_wins_over_prefix() {
        let store = store_listing(vec![Ok(page(&["collision/foo", "collision/foo/bar"]))]);
        let mode = classify_mode(&store, "c", "collision/foo").await.unwrap();
        assert_eq!(mode, ClientMode::File);
    }

    #[tokio::test]
    async fn test_classify_dir_on_separator_bounded_prefix() {
        let store = store_listing(vec![Ok(page(&[
            "folder/main.tf",
            "folder/subfolder/sub.tf",
        ]))]);
        let mode = classify_mode(&store, "c", "folder").await.unwrap();
        assert_eq!(mode, ClientMode::Dir);
    }

    #[tokio::test]
    async fn test_classify_lexical_sibling_is_file() {
        // "fold" is a strict substring of "folder", not a path-bounded prefix.
        let store = store_listing(vec![Ok(page(&[
            "folder/main.tf",
            "folder/subfolder/sub.tf",
        ]))]);
        let mode = classify_mode(&store, "c", "fold").await.unwrap();
        assert_eq!(mode, ClientMode::File);
    }

    #[tokio::test]
    async fn test_classify_empty_listing_defaults_to_file() {
        let store = store_listing(vec![]);
        let mode = classify_mode(&store, "c", "missing/obj").await.unwrap();
        assert_eq!(mode, ClientMode::File);
    }

    #[tokio::test]
    async fn test_classify_skips_empty_pages() {
        let store = store_listing(vec![Ok(page(&[])), Ok(page(&["x/y/z.txt"]))]);
        let mode = classify_mode(&store, "c", "x/y").await.unwrap();
        assert_eq!(mode, ClientMode::Dir);
    }

    #[tokio::test]
    async fn test_classify_propagates_transport_error() {
        let store = store_listing(vec![Err(Error::Transport("boom".into()))]);
        let err = classify_mode(&store, "c", "x").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    fn expect_object(store: &mut MockObjectStore, key: &str, body: &[u8]) {
        let key = key.to_owned();
        let body = body.to_vec();
        store
            .expect_get_object()
            .withf(move |_, k| k == key)
            .returning(move |_, _| Ok(body.clone()));
    }

    #[tokio::test]
    async fn test_fetch_tree_reroots_under_destination() {
        let mut store = store_listing(vec![Ok(page(&[
            "folder/main.tf",
            "folder/subfolder/sub.tf",
        ]))]);
        expect_object(&mut store, "folder/main.tf", b"main");
        expect_object(&mut store, "folder/subfolder/sub.tf", b"sub");

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");
        let summary = fetch_tree(&store, "c", "folder", &dest).await.unwrap();

        assert_eq!(summary, FetchSummary { objects: 2, bytes: 7 });
        assert_eq!(std::fs::read(dest.join("main.tf")).unwrap(), b"main");
        assert_eq!(std::fs::read(dest.join("subfolder/sub.tf")).unwrap(), b"sub");
        // Paths are relative to the queried blob path, not absolute keys.
        assert!(!dest.join("folder").exists());
    }

    #[tokio::test]
    async fn test_fetch_tree_replaces_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");
        std::fs::create_dir_all(dest.join("stale")).unwrap();
        std::fs::write(dest.join("stale/left-over.txt"), b"old").unwrap();

        let mut store = store_listing(vec![Ok(page(&["folder/fresh.txt"]))]);
        expect_object(&mut store, "folder/fresh.txt", b"new");

        fetch_tree(&store, "c", "folder", &dest).await.unwrap();

        assert_eq!(std::fs::read(dest.join("fresh.txt")).unwrap(), b"new");
        assert!(!dest.join("stale").exists());
    }

    #[tokio::test]
    async fn test_fetch_tree_replaces_plain_file_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");
        std::fs::write(&dest, b"i am a file").unwrap();

        let mut store = store_listing(vec![Ok(page(&["folder/a.txt"]))]);
        expect_object(&mut store, "folder/a.txt", b"a");

        fetch_tree(&store, "c", "folder", &dest).await.unwrap();
        assert!(dest.is_dir());
        assert_eq!(std::fs::read(dest.join("a.txt")).unwrap(), b"a");
    }

    #[tokio::test]
    async fn test_fetch_tree_skips_directory_markers() {
        let mut store = store_listing(vec![Ok(page(&[
            "folder/",
            "folder/sub/",
            "folder/sub/file.txt",
        ]))]);
        expect_object(&mut store, "folder/sub/file.txt", b"data");

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");
        let summary = fetch_tree(&store, "c", "folder", &dest).await.unwrap();

        assert_eq!(summary.objects, 1);
        assert!(dest.join("sub/file.txt").is_file());
    }

    #[tokio::test]
    async fn test_fetch_tree_aborts_on_first_failure() {
        let mut store = store_listing(vec![Ok(page(&["folder/ok.txt", "folder/bad.txt"]))]);
        expect_object(&mut store, "folder/ok.txt", b"fine");
        store
            .expect_get_object()
            .withf(|_, k| k == "folder/bad.txt")
            .returning(|_, k| Err(Error::NotFound(k.to_owned())));

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");
        let err = fetch_tree(&store, "c", "folder", &dest).await.unwrap_err();

        assert!(err.is_not_found());
        // No rollback: objects downloaded before the failure stay on disk.
        assert!(dest.join("ok.txt").is_file());
    }

    #[tokio::test]
    async fn test_fetch_tree_consumes_multiple_pages() {
        let mut store = store_listing(vec![
            Ok(page(&["folder/a.txt"])),
            Ok(page(&["folder/b.txt"])),
        ]);
        expect_object(&mut store, "folder/a.txt", b"a");
        expect_object(&mut store, "folder/b.txt", b"b");

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");
        let summary = fetch_tree(&store, "c", "folder", &dest).await.unwrap();

        assert_eq!(summary.objects, 2);
        assert!(dest.join("a.txt").is_file());
        assert!(dest.join("b.txt").is_file());
    }

    #[tokio::test]
    async fn test_fetch_one_creates_parent_directories() {
        let mut store = MockObjectStore::new();
        expect_object(&mut store, "folder/obj.bin", b"bytes");

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("deep/nested/obj.bin");
        let bytes = fetch_one(&store, "c", "folder/obj.bin", &dest).await.unwrap();

        assert_eq!(bytes, 5);
        assert_eq!(std::fs::read(&dest).unwrap(), b"bytes");
    }

    #[tokio::test]
    async fn test_fetch_one_is_idempotent() {
        let mut store = MockObjectStore::new();
        expect_object(&mut store, "folder/obj.bin", b"stable");

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("obj.bin");

        fetch_one(&store, "c", "folder/obj.bin", &dest).await.unwrap();
        let first = std::fs::read(&dest).unwrap();
        fetch_one(&store, "c", "folder/obj.bin", &dest).await.unwrap();
        let second = std::fs::read(&dest).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fetch_one_surfaces_not_found() {
        let mut store = MockObjectStore::new();
        store
            .expect_get_object()
            .returning(|_, k| Err(Error::NotFound(k.to_owned())));

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("missing.txt");
        let err = fetch_one(&store, "c", "no/such/object", &dest).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(!dest.exists());
    }

    #[test]
    fn test_dest_for_key_strips_query_prefix() {
        let root = Path::new("/dst");
        assert_eq!(
            dest_for_key(root, "folder", "folder/main.tf"),
            PathBuf::from("/dst/main.tf")
        );
        assert_eq!(
            dest_for_key(root, "folder", "folder/subfolder/sub.tf"),
            PathBuf::from("/dst/subfolder/sub.tf")
        );
    }

    #[test]
    fn test_dest_for_key_exact_key_maps_to_root() {
        let root = Path::new("/dst");
        assert_eq!(dest_for_key(root, "folder/a", "folder/a"), PathBuf::from("/dst"));
    }

    #[test]
    fn test_dest_for_key_never_escapes_root() {
        let root = Path::new("/dst");
        // A lexical sibling of the queried path still lands under the root.
        let dest = dest_for_key(root, "folder", "folderx");
        assert!(dest.starts_with(root));
    }
}
