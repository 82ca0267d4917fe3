//! Integration tests for the synchronization engine against a scripted device

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use super::{SyncEngine, SyncResult};
use crate::comparison::TimestampComparator;
use crate::config::SyncConfig;
use crate::device::DeviceChannel;
use crate::error::{ChannelError, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    List(String),
    Pull(String),
}

/// Device serving canned listings and file contents, recording every call
#[derive(Default)]
struct ScriptedDevice {
    listings: HashMap<String, String>,
    files: HashMap<String, Vec<u8>>,
    failing: HashSet<String>,
    vanishing: HashSet<String>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedDevice {
    fn dir(mut self, path: &str, lines: &[String]) -> Self {
        self.listings.insert(path.to_string(), lines.join("\n"));
        self
    }

    fn file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.as_bytes().to_vec());
        self
    }

    fn failing(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    fn vanishing(mut self, path: &str) -> Self {
        self.vanishing.insert(path.to_string());
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn pulls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Pull(path) => Some(path),
                Call::List(_) => None,
            })
            .collect()
    }

    fn reset(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl DeviceChannel for ScriptedDevice {
    fn list(&self, remote_dir: &str) -> Result<String, ChannelError> {
        self.calls
            .borrow_mut()
            .push(Call::List(remote_dir.to_string()));
        self.listings
            .get(remote_dir)
            .cloned()
            .ok_or_else(|| ChannelError::CommandFailed {
                operation: format!("shell ls -la {remote_dir}"),
                status: "exit status: 1".to_string(),
                output: format!("{remote_dir}: No such file or directory"),
            })
    }

    fn pull(&self, remote: &str, local: &Path) -> Result<String, ChannelError> {
        self.calls.borrow_mut().push(Call::Pull(remote.to_string()));
        if self.failing.contains(remote) {
            return Err(ChannelError::CommandFailed {
                operation: format!("pull {remote}"),
                status: "exit status: 1".to_string(),
                output: "remote object does not exist".to_string(),
            });
        }
        if self.vanishing.contains(remote) {
            return Ok(String::new());
        }
        let content = self.files.get(remote).cloned().unwrap_or_default();
        fs::write(local, content).map_err(|e| ChannelError::CommandFailed {
            operation: format!("pull {remote}"),
            status: "exit status: 1".to_string(),
            output: e.to_string(),
        })?;
        Ok("1 file pulled.".to_string())
    }
}

fn listed_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 0)
        .unwrap()
}

fn file_line(name: &str, size: usize) -> String {
    format!("-rw-rw-r-- 1 root sdcard_rw {size} 2020-01-02 03:04 {name}")
}

fn dir_line(name: &str) -> String {
    format!("drwxrwx--x 2 root sdcard_rw 4096 2020-01-02 03:04 {name}")
}

/// `/` holds `DCIM/` then `a.txt`; `/DCIM/` holds `photo.jpg`
fn sample_device() -> ScriptedDevice {
    ScriptedDevice::default()
        .dir("/", &[dir_line("DCIM"), file_line("a.txt", 5)])
        .dir("/DCIM/", &[file_line("photo.jpg", 3)])
        .file("/a.txt", "hello")
        .file("/DCIM/photo.jpg", "abc")
}

fn sync_with(
    device: &ScriptedDevice,
    config: SyncConfig,
    local: &Path,
) -> Result<SyncResult, Error> {
    SyncEngine::new(config, device).unwrap().sync("/", local)
}

#[test]
fn test_sync_pulls_new_files_depth_first() {
    let device = sample_device();
    let local = TempDir::new().unwrap();

    let result = sync_with(&device, SyncConfig::default(), local.path()).unwrap();

    assert_eq!(
        device.calls(),
        [
            Call::List("/".to_string()),
            Call::List("/DCIM/".to_string()),
            Call::Pull("/DCIM/photo.jpg".to_string()),
            Call::Pull("/a.txt".to_string()),
        ]
    );
    assert_eq!(result.directories, 2);
    assert_eq!(result.pulled, 2);
    assert!(result.is_success());

    assert_eq!(fs::read_to_string(local.path().join("a.txt")).unwrap(), "hello");
    let photo = local.path().join("DCIM").join("photo.jpg");
    assert_eq!(fs::read_to_string(&photo).unwrap(), "abc");

    let modified = fs::metadata(&photo).unwrap().modified().unwrap();
    assert_eq!(TimestampComparator::from_system_time(modified), listed_at());
}

#[test]
fn test_second_run_is_idempotent() {
    let device = sample_device();
    let local = TempDir::new().unwrap();

    sync_with(&device, SyncConfig::default(), local.path()).unwrap();
    device.reset();
    let result = sync_with(&device, SyncConfig::default(), local.path()).unwrap();

    assert!(device.pulls().is_empty());
    assert_eq!(result.pulled, 0);
    assert_eq!(result.skip_reasons.get("unchanged"), Some(&2));
}

#[test]
fn test_size_change_triggers_pull() {
    let device = sample_device();
    let local = TempDir::new().unwrap();
    fs::write(local.path().join("a.txt"), "stale content").unwrap();

    sync_with(&device, SyncConfig::default(), local.path()).unwrap();

    assert!(device.pulls().contains(&"/a.txt".to_string()));
    assert_eq!(fs::read_to_string(local.path().join("a.txt")).unwrap(), "hello");
}

#[test]
fn test_ignored_directory_skips_subtree() {
    let device = sample_device();
    let local = TempDir::new().unwrap();
    let config = SyncConfig {
        ignore: vec!["/DCIM/".to_string()],
        ..SyncConfig::default()
    };

    let result = sync_with(&device, config, local.path()).unwrap();

    assert_eq!(
        device.calls(),
        [
            Call::List("/".to_string()),
            Call::Pull("/a.txt".to_string()),
        ]
    );
    assert!(!local.path().join("DCIM").exists());
    assert_eq!(result.skip_reasons.get("ignored"), Some(&1));
}

#[test]
fn test_ignored_root_is_noop() {
    let device = sample_device();
    let local = TempDir::new().unwrap();
    let config = SyncConfig {
        ignore: vec!["/".to_string()],
        ..SyncConfig::default()
    };

    let result = sync_with(&device, config, local.path()).unwrap();

    assert!(device.calls().is_empty());
    assert_eq!(result.directories, 0);
}

#[test]
fn test_ignored_file_pattern() {
    let device = sample_device();
    let local = TempDir::new().unwrap();
    let config = SyncConfig {
        ignore: vec!["*.jpg".to_string()],
        ..SyncConfig::default()
    };

    sync_with(&device, config, local.path()).unwrap();

    assert_eq!(device.pulls(), ["/a.txt"]);
    assert!(local.path().join("DCIM").is_dir());
}

#[test]
fn test_pull_failure_aborts_remaining_siblings() {
    let device = ScriptedDevice::default()
        .dir(
            "/",
            &[
                file_line("a.txt", 1),
                file_line("b.txt", 1),
                file_line("c.txt", 1),
            ],
        )
        .file("/a.txt", "a")
        .file("/c.txt", "c")
        .failing("/b.txt");
    let local = TempDir::new().unwrap();

    let err = sync_with(&device, SyncConfig::default(), local.path()).unwrap_err();

    assert!(matches!(err, Error::Channel(ChannelError::CommandFailed { .. })));
    assert_eq!(device.pulls(), ["/a.txt", "/b.txt"]);
    assert!(local.path().join("a.txt").exists());
    assert!(!local.path().join("c.txt").exists());
}

#[test]
fn test_pull_failure_in_subtree_aborts_parent() {
    let device = ScriptedDevice::default()
        .dir("/", &[dir_line("sub"), file_line("z.txt", 1)])
        .dir("/sub/", &[file_line("bad.bin", 1)])
        .file("/z.txt", "z")
        .failing("/sub/bad.bin");
    let local = TempDir::new().unwrap();

    let err = sync_with(&device, SyncConfig::default(), local.path()).unwrap_err();

    assert!(matches!(err, Error::Channel(_)));
    assert!(!device.pulls().contains(&"/z.txt".to_string()));
}

#[test]
fn test_listing_failure_aborts() {
    let device = ScriptedDevice::default()
        .dir("/", &[dir_line("gone"), file_line("z.txt", 1)])
        .file("/z.txt", "z");
    let local = TempDir::new().unwrap();

    let err = sync_with(&device, SyncConfig::default(), local.path()).unwrap_err();

    assert!(matches!(err, Error::Channel(_)));
    assert!(device.pulls().is_empty());
}

#[test]
fn test_listing_parse_error_aborts() {
    let device = ScriptedDevice::default().dir("/", &["total 4".to_string()]);
    let local = TempDir::new().unwrap();

    let err = sync_with(&device, SyncConfig::default(), local.path()).unwrap_err();

    assert!(matches!(err, Error::Listing(_)));
}

#[test]
fn test_local_directory_creation_failure() {
    let device = sample_device();
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let err = sync_with(&device, SyncConfig::default(), &blocker.join("mirror")).unwrap_err();

    assert!(matches!(err, Error::LocalFilesystem { .. }));
    assert!(device.pulls().is_empty());
}

#[test]
fn test_unreadable_file_skipped() {
    let device = ScriptedDevice::default()
        .dir(
            "/",
            &["--w------- 1 root root 3 2020-01-02 03:04 secret".to_string()],
        )
        .file("/secret", "abc");
    let local = TempDir::new().unwrap();

    let result = sync_with(&device, SyncConfig::default(), local.path()).unwrap();

    assert!(device.pulls().is_empty());
    assert_eq!(result.skip_reasons.get("unreadable"), Some(&1));
}

#[test]
fn test_special_files_not_represented() {
    let link = "lrwxrwxrwx 1 root root 21 2020-01-02 03:04 sdcard -> /storage/self/primary";
    let device = ScriptedDevice::default().dir("/", &[link.to_string()]);
    let local = TempDir::new().unwrap();

    let result = sync_with(&device, SyncConfig::default(), local.path()).unwrap();

    assert_eq!(device.calls(), [Call::List("/".to_string())]);
    assert_eq!(result.skipped, 0);
}

#[test]
fn test_missing_after_pull_is_not_fatal() {
    let device = ScriptedDevice::default()
        .dir("/", &[file_line("ghost.txt", 1), file_line("real.txt", 1)])
        .file("/real.txt", "r")
        .vanishing("/ghost.txt");
    let local = TempDir::new().unwrap();

    let result = sync_with(&device, SyncConfig::default(), local.path()).unwrap();

    assert_eq!(device.pulls(), ["/ghost.txt", "/real.txt"]);
    assert_eq!(result.pulled, 1);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("ghost.txt"));
}

#[cfg(unix)]
#[test]
fn test_uninspectable_local_copy_still_pulled() {
    let device = ScriptedDevice::default()
        .dir(
            "/",
            &[file_line("notes/draft.txt", 1), file_line("z.txt", 1)],
        )
        .file("/z.txt", "z")
        .vanishing("/notes/draft.txt");
    let local = TempDir::new().unwrap();
    fs::write(local.path().join("notes"), "regular file").unwrap();

    let result = sync_with(&device, SyncConfig::default(), local.path()).unwrap();

    assert_eq!(device.pulls(), ["/notes/draft.txt", "/z.txt"]);
    assert_eq!(result.pulled, 2);
    assert_eq!(result.warnings.len(), 2);
    assert!(result.warnings[0].starts_with("could not inspect"));
    assert!(result.warnings[1].starts_with("could not set timestamp"));
    assert_eq!(fs::read_to_string(local.path().join("z.txt")).unwrap(), "z");
}

#[test]
fn test_dry_run_touches_nothing() {
    let device = sample_device();
    let tmp = TempDir::new().unwrap();
    let local = tmp.path().join("mirror");
    let config = SyncConfig {
        dry_run: true,
        ..SyncConfig::default()
    };

    let result = sync_with(&device, config, &local).unwrap();

    assert!(device.pulls().is_empty());
    assert_eq!(result.pulled, 2);
    assert_eq!(result.directories, 2);
    assert!(!local.exists());
}

#[test]
fn test_root_gets_trailing_separator() {
    let device = ScriptedDevice::default()
        .dir("/sdcard/", &[file_line("a.txt", 1)])
        .file("/sdcard/a.txt", "a");
    let local = TempDir::new().unwrap();

    SyncEngine::new(SyncConfig::default(), &device)
        .unwrap()
        .sync("/sdcard", local.path())
        .unwrap();

    assert_eq!(
        device.calls(),
        [
            Call::List("/sdcard/".to_string()),
            Call::Pull("/sdcard/a.txt".to_string()),
        ]
    );
}

#[test]
fn test_invalid_pattern_rejected_at_construction() {
    let device = ScriptedDevice::default();
    let config = SyncConfig {
        ignore: vec![String::new()],
        ..SyncConfig::default()
    };

    let result = SyncEngine::new(config, &device);

    assert!(matches!(result, Err(Error::Pattern(_))));
}
