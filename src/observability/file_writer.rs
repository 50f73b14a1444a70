//! Size-rotated log file used as a tracing writer.
//!
//! The terminal driver prints the calculator display on stdout, so logs can be
//! redirected to a file instead of stderr. When the file grows past its size
//! limit it is shifted to `<name>.1`, older backups move up one number, and
//! anything beyond [`MAX_BACKUP_FILES`] is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// Default size threshold before rotation (5 MB).
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Number of rotated backups kept next to the live file.
pub const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe append-only log file with size-based rotation.
///
/// The file is opened lazily on the first write, so construction cannot fail.
pub struct LogFile {
    path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<File>>,
}

impl LogFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self::with_max_bytes(path, DEFAULT_MAX_FILE_SIZE_BYTES)
    }

    #[must_use]
    pub const fn with_max_bytes(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate_if_needed(&self, file: &mut Option<File>) -> io::Result<()> {
        let Ok(metadata) = fs::metadata(&self.path) else {
            return Ok(());
        };
        if metadata.len() < self.max_bytes {
            return Ok(());
        }

        *file = None;
        let oldest = self.backup_path(MAX_BACKUP_FILES);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..MAX_BACKUP_FILES).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }

    fn write_locked(&self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        self.rotate_if_needed(&mut file)?;

        if file.is_none() {
            *file = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            );
        }
        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file unavailable"))?;
        handle.write_all(buf)?;
        handle.flush()?;
        Ok(buf.len())
    }
}

impl Write for &LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_locked(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.as_mut().map_or(Ok(()), |f| f.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = &'a LogFile;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

impl std::fmt::Debug for LogFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogFile::new(dir.path().join("calc.log"));

        (&log).write_all(b"first\n").unwrap();
        (&log).write_all(b"second\n").unwrap();

        let text = fs::read_to_string(log.path()).unwrap();
        assert_eq!(text, "first\nsecond\n");
    }

    #[test]
    fn rotates_and_keeps_bounded_backups() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogFile::with_max_bytes(dir.path().join("calc.log"), 8);

        for i in 0..6 {
            (&log).write_all(format!("line-{i}-xx\n").as_bytes()).unwrap();
        }

        assert_eq!(fs::read_to_string(log.path()).unwrap(), "line-5-xx\n");
        assert_eq!(fs::read_to_string(log.backup_path(1)).unwrap(), "line-4-xx\n");
        assert!(log.backup_path(MAX_BACKUP_FILES).exists());
        assert!(!log.backup_path(MAX_BACKUP_FILES + 1).exists());
    }
}
