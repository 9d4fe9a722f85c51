//! Integration tests for the full sync pipeline.
//!
//! The catalog, the beatmap host and the device bridge are replaced with
//! in-memory fakes so the whole plan/execute flow runs without a network
//! or a headset.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use synth_sync_core::{
    BeatmapFetcher, CatalogEntry, CatalogError, CatalogPage, CatalogSource, Device, DeviceBridge,
    DeviceError, DeviceSession, DownloadError, DuplicatePolicy, Error, SyncEngine, SyncError,
    SyncOptions,
};

const FOLDER: &str = "/sdcard/SynthRidersUC/CustomSongs/";

/// Catalog served from memory, split into fixed-size pages.
struct MemoryCatalog {
    pages: Vec<Vec<CatalogEntry>>,
    fail_page: Option<u32>,
    calls: AtomicUsize,
}

impl MemoryCatalog {
    fn new(pages: Vec<Vec<&str>>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|names| {
                    names
                        .into_iter()
                        .map(|n| CatalogEntry::new(n, format!("/api/beatmaps/{}/download", n)))
                        .collect()
                })
                .collect(),
            fail_page: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing_on(mut self, page: u32) -> Self {
        self.fail_page = Some(page);
        self
    }
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
    async fn fetch_page(&self, page: u32) -> Result<CatalogPage, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_page == Some(page) {
            return Err(CatalogError::network(
                page,
                std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
            ));
        }
        let entries = self.pages[(page - 1) as usize].clone();
        Ok(CatalogPage {
            count: entries.len() as u32,
            entries,
            total_count: self.pages.iter().map(Vec::len).sum::<usize>() as u32,
            page_index: page,
            page_count: self.pages.len() as u32,
        })
    }
}

/// Beatmap host that 404s for a configured set of names.
#[derive(Default)]
struct MemoryHost {
    not_found: HashSet<String>,
    downloads: AtomicUsize,
}

#[async_trait]
impl BeatmapFetcher for MemoryHost {
    async fn download(&self, entry: &CatalogEntry, dest: &Path) -> Result<u64, DownloadError> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        if self.not_found.contains(&entry.name) {
            return Err(DownloadError::HttpStatus {
                status: 404,
                url: entry.download_locator.clone(),
            });
        }
        let body = format!("beatmap:{}", entry.name);
        tokio::fs::write(dest, &body).await?;
        Ok(body.len() as u64)
    }
}

/// Device whose folder is a shared map of name -> content.
#[derive(Clone, Default)]
struct FakeHeadset {
    files: Arc<Mutex<HashMap<String, String>>>,
    fail_listing: bool,
}

impl FakeHeadset {
    fn with_files(names: &[&str]) -> Self {
        let files = names
            .iter()
            .map(|n| (n.to_string(), String::new()))
            .collect();
        Self {
            files: Arc::new(Mutex::new(files)),
            fail_listing: false,
        }
    }
}

#[async_trait]
impl DeviceBridge for FakeHeadset {
    async fn list_devices(&self) -> Result<Vec<Device>, DeviceError> {
        Ok(vec![device()])
    }

    async fn list_folder(&self, path: &str, _serial: &str) -> Result<Vec<String>, DeviceError> {
        assert_eq!(path, FOLDER);
        if self.fail_listing {
            return Err(DeviceError::CommandFailed {
                command: format!("adb shell ls {}", path),
                status: "exit status: 1".to_string(),
                output: "No such file or directory".to_string(),
            });
        }
        let mut names: Vec<String> = self.files.lock().unwrap().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn push(&self, local: &Path, remote: &str, _serial: &str) -> Result<(), DeviceError> {
        let name = remote
            .strip_prefix(FOLDER)
            .expect("push outside the song folder")
            .to_string();
        let content = std::fs::read_to_string(local).expect("staging file readable");
        self.files.lock().unwrap().insert(name, content);
        Ok(())
    }
}

fn device() -> Device {
    Device {
        serial: "1WMHH815K10176".to_string(),
        model: "Quest_2".to_string(),
    }
}

fn options(staging: &TempDir) -> SyncOptions {
    SyncOptions {
        device_folder: FOLDER.to_string(),
        staging_dir: staging.path().to_path_buf(),
        max_concurrent_requests: 2,
        duplicate_policy: DuplicatePolicy::KeepAll,
        dry_run: false,
    }
}

#[tokio::test]
async fn test_full_sync_pushes_only_missing() {
    let staging = TempDir::new().unwrap();
    let headset = FakeHeadset::with_files(&["a.synth", "d.synth"]);
    let mut session = DeviceSession::new(headset.clone(), device());

    let catalog = MemoryCatalog::new(vec![
        vec!["a.synth", "b.synth"],
        vec!["c.synth", "d.synth"],
        vec!["e.synth"],
    ]);
    let host = MemoryHost::default();
    let engine = SyncEngine::new(&catalog, &host, options(&staging));

    let plan = engine.plan(&session).await.unwrap();
    assert_eq!(plan.device_file_count, 2);
    assert_eq!(plan.pages.len(), 3);
    assert_eq!(plan.catalog_entry_count(), 5);

    let mut missing: Vec<&str> = plan.missing.iter().map(|e| e.name.as_str()).collect();
    missing.sort();
    assert_eq!(missing, vec!["b.synth", "c.synth", "e.synth"]);

    let report = engine.execute(&plan.missing, &mut session).await;
    assert_eq!(report.pushed, 3);
    assert!(report.is_success());
    assert_eq!(report.cleanup_warnings, 0);

    let files = headset.files.lock().unwrap();
    assert_eq!(files.len(), 5);
    assert_eq!(files["c.synth"], "beatmap:c.synth");

    // Staging directory is left empty
    assert_eq!(std::fs::read_dir(staging.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_second_run_finds_nothing_missing() {
    let staging = TempDir::new().unwrap();
    let headset = FakeHeadset::with_files(&[]);
    let mut session = DeviceSession::new(headset, device());

    let catalog = MemoryCatalog::new(vec![vec!["a.synth"], vec!["b.synth"]]);
    let host = MemoryHost::default();
    let engine = SyncEngine::new(&catalog, &host, options(&staging));

    let plan = engine.plan(&session).await.unwrap();
    engine.execute(&plan.missing, &mut session).await;

    let plan = engine.plan(&session).await.unwrap();
    assert!(plan.missing.is_empty());
    assert_eq!(plan.device_file_count, 2);
}

#[tokio::test]
async fn test_page_failure_aborts_before_reconciliation() {
    let staging = TempDir::new().unwrap();
    let session = DeviceSession::new(FakeHeadset::default(), device());

    let catalog = MemoryCatalog::new(vec![vec!["a"], vec!["b"], vec!["c"]]).failing_on(2);
    let host = MemoryHost::default();
    let engine = SyncEngine::new(&catalog, &host, options(&staging));

    let err = engine.plan(&session).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Catalog(CatalogError::Network { page: 2, .. })
    ));
    assert_eq!(host.downloads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_device_listing_failure_is_fatal() {
    let staging = TempDir::new().unwrap();
    let headset = FakeHeadset {
        fail_listing: true,
        ..Default::default()
    };
    let session = DeviceSession::new(headset, device());

    let catalog = MemoryCatalog::new(vec![vec!["a"]]);
    let host = MemoryHost::default();
    let engine = SyncEngine::new(&catalog, &host, options(&staging));

    let err = engine.plan(&session).await.unwrap_err();
    assert!(matches!(err, Error::Device(DeviceError::CommandFailed { .. })));
    // Catalog is never touched when the device cannot be listed
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_download_404_does_not_abort_batch() {
    let staging = TempDir::new().unwrap();
    let headset = FakeHeadset::default();
    let mut session = DeviceSession::new(headset.clone(), device());

    let catalog = MemoryCatalog::new(vec![vec!["first.synth", "gone.synth", "last.synth"]]);
    let host = MemoryHost {
        not_found: ["gone.synth".to_string()].into_iter().collect(),
        ..Default::default()
    };
    let engine = SyncEngine::new(&catalog, &host, options(&staging));

    let plan = engine.plan(&session).await.unwrap();
    let report = engine.execute(&plan.missing, &mut session).await;

    assert_eq!(report.pushed, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(host.downloads.load(Ordering::SeqCst), 3);
    match &report.failures[0].error {
        SyncError::Download {
            name,
            source: DownloadError::HttpStatus { status, .. },
        } => {
            assert_eq!(name, "gone.synth");
            assert_eq!(*status, 404);
        }
        other => panic!("Expected download 404, got {:?}", other),
    }

    let files = headset.files.lock().unwrap();
    assert!(files.contains_key("first.synth"));
    assert!(files.contains_key("last.synth"));
    assert!(!files.contains_key("gone.synth"));
}

#[tokio::test]
async fn test_duplicate_policy_controls_repeat_downloads() {
    let staging = TempDir::new().unwrap();
    let catalog = MemoryCatalog::new(vec![vec!["dup.synth", "x.synth"], vec!["dup.synth"]]);
    let host = MemoryHost::default();

    let session = DeviceSession::new(FakeHeadset::default(), device());
    let engine = SyncEngine::new(&catalog, &host, options(&staging));
    let plan = engine.plan(&session).await.unwrap();
    assert_eq!(plan.missing.len(), 3);

    let deduped = SyncOptions {
        duplicate_policy: DuplicatePolicy::FirstOccurrence,
        ..options(&staging)
    };
    let engine = SyncEngine::new(&catalog, &host, deduped);
    let plan = engine.plan(&session).await.unwrap();
    assert_eq!(plan.missing.len(), 2);
}

/// Page 1 of an empty catalog still answers, reporting zero pages.
struct EmptyCatalog;

#[async_trait]
impl CatalogSource for EmptyCatalog {
    async fn fetch_page(&self, page: u32) -> Result<CatalogPage, CatalogError> {
        Ok(CatalogPage {
            entries: Vec::new(),
            count: 0,
            total_count: 0,
            page_index: page,
            page_count: 0,
        })
    }
}

#[tokio::test]
async fn test_empty_catalog() {
    let staging = TempDir::new().unwrap();
    let session = DeviceSession::new(FakeHeadset::with_files(&["local.synth"]), device());

    let host = MemoryHost::default();
    let engine = SyncEngine::new(EmptyCatalog, &host, options(&staging));
    let plan = engine.plan(&session).await.unwrap();

    assert_eq!(plan.device_file_count, 1);
    assert!(plan.pages.is_empty());
    assert!(plan.missing.is_empty());
}
