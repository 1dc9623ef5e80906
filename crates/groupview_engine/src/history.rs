use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use view_logging::view_warn;

const HISTORY_FILENAME: &str = ".groupview_history.ron";

/// How many recently viewed groups the store keeps.
const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history directory missing or not writable: {0}")]
    HistoryDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Format(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedHistory {
    group_ids: Vec<String>,
}

/// Recent-groups side channel: a small ron file of group ids, most recent
/// first, deduplicated and capped. Written atomically (temp file, then
/// rename) so a crash never leaves a half-written history behind.
#[derive(Debug, Clone)]
pub struct RecentGroupsStore {
    dir: PathBuf,
}

impl RecentGroupsStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Recently viewed group ids, most recent first. A missing file is an
    /// empty history; an unreadable one is logged and treated the same.
    pub fn load(&self) -> Vec<String> {
        let path = self.dir.join(HISTORY_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                view_warn!("Failed to read group history from {:?}: {}", path, err);
                return Vec::new();
            }
        };

        match ron::from_str::<PersistedHistory>(&content) {
            Ok(history) => history.group_ids,
            Err(err) => {
                view_warn!("Failed to parse group history from {:?}: {}", path, err);
                Vec::new()
            }
        }
    }

    /// Moves `group_id` to the front of the history and rewrites the file.
    pub fn record(&self, group_id: &str) -> Result<(), HistoryError> {
        let mut group_ids = self.load();
        group_ids.retain(|known| known != group_id);
        group_ids.insert(0, group_id.to_string());
        group_ids.truncate(HISTORY_LIMIT);

        let content = ron::ser::to_string_pretty(
            &PersistedHistory { group_ids },
            ron::ser::PrettyConfig::new(),
        )
        .map_err(|err| HistoryError::Format(err.to_string()))?;

        self.write_atomically(&content)
    }

    fn write_atomically(&self, content: &str) -> Result<(), HistoryError> {
        ensure_history_dir(&self.dir)?;

        let target = self.dir.join(HISTORY_FILENAME);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace existing file if present to keep determinism.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| HistoryError::Io(e.error))?;
        Ok(())
    }
}

/// Ensure the history directory exists; create if missing.
fn ensure_history_dir(dir: &std::path::Path) -> Result<(), HistoryError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| HistoryError::HistoryDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(HistoryError::HistoryDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| HistoryError::HistoryDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| HistoryError::HistoryDir(e.to_string()))?;
    Ok(())
}
