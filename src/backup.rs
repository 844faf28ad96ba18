//! Local archive backups of the remote day-log tree.
//!
//! A backup is a gzip-compressed tar archive holding every object under the
//! base path, named by its key relative to that path (`YYYY/MM/YYYY-MM-DD.json`).

use crate::errors::{AppError, AppResult, Operation, StorageError};
use crate::remote::ObjectStore;
use blake3::Hasher;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Report of a completed backup operation.
#[derive(Debug, Clone)]
pub struct BackupReport {
    /// Number of day logs included in the archive
    pub total_days: usize,
    /// Size of the backup archive in bytes
    pub archive_size: u64,
    /// BLAKE3 checksum of the backup archive
    pub checksum: String,
    /// Duration taken to create the backup
    pub duration: Duration,
}

fn archive_error(context: &str, e: io::Error) -> AppError {
    AppError::Io(io::Error::new(e.kind(), format!("{}: {}", context, e)))
}

/// Creates a backup archive of every object under `base_path`.
///
/// # Arguments
///
/// * `store` - Store holding the day logs
/// * `base_path` - Key prefix of the day-log tree
/// * `output_path` - Path where the archive will be written; parent
///   directories are created as needed
///
/// # Errors
///
/// Returns `AppError::Storage` if listing or fetching an object fails, and
/// `AppError::Io` if the archive cannot be built or written.
pub fn create_backup(
    store: &dyn ObjectStore,
    base_path: &str,
    output_path: &Path,
) -> AppResult<BackupReport> {
    let start_time = Instant::now();
    info!("Creating backup of {} to {:?}", base_path, output_path);

    let keys = store.list(base_path).map_err(|e| {
        StorageError::with_cause(Operation::Backup, "failed to list day logs", e)
    })?;
    debug!("Found {} day logs", keys.len());

    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut tar = tar::Builder::new(encoder);
    let prefix = format!("{}/", base_path.trim_end_matches('/'));

    for key in &keys {
        let object = store.get(key).map_err(|e| {
            StorageError::with_cause(Operation::Backup, format!("failed to fetch {}", key), e)
        })?;
        let name = key.strip_prefix(&prefix).unwrap_or(key);

        let mut header = tar::Header::new_gnu();
        header.set_size(object.content.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(chrono::Utc::now().timestamp().max(0) as u64);

        debug!("Adding to archive: {}", name);
        tar.append_data(&mut header, name, object.content.as_slice())
            .map_err(|e| archive_error(&format!("Failed to add {} to archive", name), e))?;
    }

    let encoder = tar
        .into_inner()
        .map_err(|e| archive_error("Failed to finalize tar archive", e))?;
    let tar_gz_bytes = encoder
        .finish()
        .map_err(|e| archive_error("Failed to finish gzip compression", e))?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| archive_error("Failed to create output directory", e))?;
    }
    fs::write(output_path, &tar_gz_bytes)
        .map_err(|e| archive_error("Failed to write backup file", e))?;

    let mut hasher = Hasher::new();
    hasher.update(&tar_gz_bytes);
    let checksum = hasher.finalize().to_hex().to_string();

    let report = BackupReport {
        total_days: keys.len(),
        archive_size: tar_gz_bytes.len() as u64,
        checksum,
        duration: start_time.elapsed(),
    };
    info!(
        "Backup complete: {} day logs, {} bytes, checksum {}",
        report.total_days, report.archive_size, report.checksum
    );
    Ok(report)
}
