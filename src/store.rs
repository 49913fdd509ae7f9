use std::fs;
use std::path::{Path, PathBuf};

use crate::backup::BackupManager;
use crate::models::document::Document;

/// Flat-document persistence: the whole site lives in one `data.json`,
/// fully re-read and fully re-written on every mutation. There is no
/// in-process locking; concurrent admin writers race and the last writer
/// wins. Accepted for single-admin usage.
pub struct DocumentStore {
    data_path: PathBuf,
    backups: BackupManager,
}

impl DocumentStore {
    pub fn open(site_dir: &Path, retention: usize) -> Self {
        DocumentStore {
            data_path: site_dir.join("data.json"),
            backups: BackupManager::new(site_dir, retention),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// Current persisted state. Seeds and persists a default document on
    /// first access; an unparseable file fails soft to an empty document
    /// (the file is left untouched so it can be inspected or restored).
    pub fn load(&self) -> Document {
        match self.try_load() {
            Ok(doc) => doc,
            Err(e) => {
                log::error!("[store] {}", e);
                Document::default()
            }
        }
    }

    /// Like `load`, but surfaces the parse error so the dashboard can show
    /// a warning instead of silently presenting an empty site.
    pub fn try_load(&self) -> Result<Document, String> {
        if !self.data_path.exists() {
            let doc = Document::default();
            self.persist(&doc)?;
            log::info!("[store] seeded default document at {}", self.data_path.display());
            return Ok(doc);
        }
        let raw = fs::read_to_string(&self.data_path)
            .map_err(|e| format!("could not read {}: {}", self.data_path.display(), e))?;
        serde_json::from_str(&raw)
            .map_err(|e| format!("{} is not valid JSON: {}", self.data_path.display(), e))
    }

    /// Serialize the full document and overwrite the persisted state. The
    /// previous on-disk version gets an automatic backup first; a backup
    /// failure is logged and the save still proceeds.
    pub fn save(&self, doc: &Document) -> Result<(), String> {
        if self.data_path.exists() {
            if let Err(e) = self.backups.create_backup(false) {
                log::error!("[store] automatic backup before save failed: {}", e);
            }
        }
        self.persist(doc)
    }

    fn persist(&self, doc: &Document) -> Result<(), String> {
        if let Some(parent) = self.data_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("could not create {}: {}", parent.display(), e))?;
        }
        let json = serde_json::to_string_pretty(doc).map_err(|e| e.to_string())?;
        fs::write(&self.data_path, json)
            .map_err(|e| format!("could not write {}: {}", self.data_path.display(), e))
    }
}
