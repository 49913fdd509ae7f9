use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RETENTION: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupKind {
    Manual,
    Automatic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupRecord {
    pub file: String,
    pub created_at: String,
    pub size: u64,
    pub kind: BackupKind,
}

/// Snapshots of the live document plus a JSON metadata sidecar. Retention
/// keeps the most recent N records and deletes older snapshot files.
/// Metadata bookkeeping has the same lost-update exposure as the document
/// itself; accepted for single-admin usage.
pub struct BackupManager {
    data_path: PathBuf,
    dir: PathBuf,
    meta_path: PathBuf,
    retention: usize,
}

impl BackupManager {
    pub fn new(site_dir: &Path, retention: usize) -> Self {
        let dir = site_dir.join("backups");
        BackupManager {
            data_path: site_dir.join("data.json"),
            meta_path: dir.join("backups.json"),
            dir,
            retention: retention.max(1),
        }
    }

    /// Snapshot the current live document. Returns `Ok(None)` when there is
    /// no document to snapshot yet.
    pub fn create_backup(&self, manual: bool) -> Result<Option<BackupRecord>, String> {
        if !self.data_path.exists() {
            return Ok(None);
        }
        fs::create_dir_all(&self.dir)
            .map_err(|e| format!("could not create backup directory: {}", e))?;

        let file = self.next_snapshot_name();
        let dest = self.dir.join(&file);
        fs::copy(&self.data_path, &dest)
            .map_err(|e| format!("could not write snapshot {}: {}", file, e))?;
        let size = fs::metadata(&dest).map(|m| m.len()).unwrap_or(0);

        let record = BackupRecord {
            file: file.clone(),
            created_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            size,
            kind: if manual {
                BackupKind::Manual
            } else {
                BackupKind::Automatic
            },
        };

        let mut records = self.read_meta();
        records.retain(|r| r.file != file);
        // Newest first, so same-second records keep creation order.
        records.insert(0, record.clone());
        self.enforce_retention(&mut records);
        self.write_meta(&records)?;
        Ok(Some(record))
    }

    /// All known backups, newest first.
    pub fn list_backups(&self) -> Vec<BackupRecord> {
        let mut records = self.read_meta();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Copy a snapshot back over the live document, after saving an
    /// automatic safety copy of the current state.
    pub fn restore_backup(&self, name: &str) -> Result<(), String> {
        let src = self.snapshot_path(name)?;
        // Read the snapshot up front: the safety copy below may evict this
        // very file if it is the oldest one past the retention cap.
        let snapshot =
            fs::read(&src).map_err(|e| format!("backup {} is not readable: {}", name, e))?;
        if self.data_path.exists() {
            self.create_backup(false)?;
        }
        fs::write(&self.data_path, snapshot)
            .map_err(|e| format!("could not restore {}: {}", name, e))?;
        Ok(())
    }

    /// Remove a snapshot file and its metadata entry.
    pub fn delete_backup(&self, name: &str) -> Result<(), String> {
        let path = self.snapshot_path(name)?;
        let mut records = self.read_meta();
        let known = records.iter().any(|r| r.file == name);
        if !known && !path.exists() {
            return Err(format!("backup {} does not exist", name));
        }
        if path.exists() {
            fs::remove_file(&path).map_err(|e| format!("could not delete {}: {}", name, e))?;
        }
        records.retain(|r| r.file != name);
        self.write_meta(&records)
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Timestamped snapshot name; a numeric suffix disambiguates snapshots
    /// taken within the same second.
    fn next_snapshot_name(&self) -> String {
        let stamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let mut file = format!("backup_{}.json", stamp);
        let mut n = 1;
        while self.dir.join(&file).exists() {
            n += 1;
            file = format!("backup_{}_{}.json", stamp, n);
        }
        file
    }

    /// Validate a user-supplied snapshot name and resolve it inside the
    /// backup directory. Anything that is not a plain `backup_*.json` name
    /// is rejected before it can escape the directory.
    fn snapshot_path(&self, name: &str) -> Result<PathBuf, String> {
        let well_formed = name.starts_with("backup_")
            && name.ends_with(".json")
            && !name.contains("..")
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        if !well_formed {
            return Err(format!("invalid backup name: {}", name));
        }
        Ok(self.dir.join(name))
    }

    fn enforce_retention(&self, records: &mut Vec<BackupRecord>) {
        // Stable sort: same-second records stay in newest-first insert order.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        while records.len() > self.retention {
            // Oldest entry is at the tail.
            if let Some(evicted) = records.pop() {
                let path = self.dir.join(&evicted.file);
                if let Err(e) = fs::remove_file(&path) {
                    log::warn!(
                        "[backup] could not remove evicted snapshot {}: {}",
                        evicted.file,
                        e
                    );
                }
            }
        }
    }

    fn read_meta(&self) -> Vec<BackupRecord> {
        match fs::read_to_string(&self.meta_path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("[backup] metadata unreadable, starting fresh: {}", e);
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    fn write_meta(&self, records: &[BackupRecord]) -> Result<(), String> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| format!("could not create backup directory: {}", e))?;
        let json = serde_json::to_string_pretty(records).map_err(|e| e.to_string())?;
        fs::write(&self.meta_path, json)
            .map_err(|e| format!("could not write backup metadata: {}", e))
    }
}
