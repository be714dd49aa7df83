//! Participant store trait and the file-backed implementation
//!
//! Every operation, reads included, runs under one exclusive lock so an
//! append can never interleave with a rewrite or a full scan.

use crate::error::Result;
use crate::record::ParticipantRecord;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Selects records for removal.
pub type RecordPredicate<'a> = &'a (dyn Fn(&ParticipantRecord) -> bool + Send + Sync);

/// Participant store trait
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    /// Append one record to the log.
    async fn append(&self, record: &ParticipantRecord) -> Result<()>;

    /// All records in insertion order, or `None` if the log does not exist.
    async fn load(&self) -> Result<Option<Vec<ParticipantRecord>>>;

    /// All records in insertion order; a missing log reads as empty.
    async fn all(&self) -> Result<Vec<ParticipantRecord>> {
        Ok(self.load().await?.unwrap_or_default())
    }

    /// Number of stored records; agrees with `all().len()`.
    async fn count(&self) -> Result<usize>;

    /// Remove every record the predicate selects. Returns whether any was removed.
    async fn remove_matching(&self, predicate: RecordPredicate<'_>) -> Result<bool>;

    /// Delete the whole log. Returns whether there was a log to delete.
    async fn clear(&self) -> Result<bool>;
}

/// File-based participant store, one record per line.
#[derive(Debug)]
pub struct FileParticipantStore {
    path: Mutex<PathBuf>,
}

impl FileParticipantStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Mutex::new(path.as_ref().to_path_buf()),
        }
    }

    fn scratch_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }
}

async fn read_optional(path: &Path) -> std::io::Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}

/// Write `contents` to `scratch`, flush it to disk, then rename it over `path`.
async fn replace_via_scratch(path: &Path, scratch: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(scratch).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(scratch, path).await
}

fn non_blank_lines(contents: &str) -> impl Iterator<Item = &str> {
    contents.lines().filter(|line| !line.trim().is_empty())
}

#[async_trait]
impl ParticipantStore for FileParticipantStore {
    async fn append(&self, record: &ParticipantRecord) -> Result<()> {
        let path = self.path.lock().await;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut line = record.to_line();
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&*path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(code = %record.code, user_id = %record.user_id, "Participant appended");
        Ok(())
    }

    async fn load(&self) -> Result<Option<Vec<ParticipantRecord>>> {
        let path = self.path.lock().await;

        let Some(contents) = read_optional(&path).await? else {
            return Ok(None);
        };

        let mut records = Vec::new();
        for (index, line) in non_blank_lines(&contents).enumerate() {
            match ParticipantRecord::parse_line(line) {
                Some(record) => records.push(record),
                None => tracing::warn!(line = index + 1, "Skipping malformed participant line"),
            }
        }
        Ok(Some(records))
    }

    async fn count(&self) -> Result<usize> {
        let path = self.path.lock().await;
        let contents = read_optional(&path).await?.unwrap_or_default();
        Ok(non_blank_lines(&contents)
            .filter(|line| ParticipantRecord::parse_line(line).is_some())
            .count())
    }

    async fn remove_matching(&self, predicate: RecordPredicate<'_>) -> Result<bool> {
        let path = self.path.lock().await;

        let Some(contents) = read_optional(&path).await? else {
            return Ok(false);
        };

        let mut kept = String::with_capacity(contents.len());
        let mut removed = 0usize;
        for line in non_blank_lines(&contents) {
            let selected = ParticipantRecord::parse_line(line)
                .map(|record| predicate(&record))
                .unwrap_or(false);
            if selected {
                removed += 1;
            } else {
                kept.push_str(line);
                kept.push('\n');
            }
        }

        if removed == 0 {
            return Ok(false);
        }

        // Survivors go to a scratch file first; the rename swaps it in whole.
        let scratch = Self::scratch_path(&path);
        if let Err(error) = replace_via_scratch(&path, &scratch, kept.as_bytes()).await {
            if let Err(cleanup) = fs::remove_file(&scratch).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!(error = %cleanup, "Failed to remove scratch file");
                }
            }
            return Err(error.into());
        }

        tracing::info!(removed, "Participants removed");
        Ok(true)
    }

    async fn clear(&self) -> Result<bool> {
        let path = self.path.lock().await;
        match fs::remove_file(&*path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Participant log cleared");
                Ok(true)
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
            Err(error) => Err(error.into()),
        }
    }
}
