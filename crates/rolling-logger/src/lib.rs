//! Rolling Logger
//!
//! File logger for the desktop host: size-based rotation on disk plus a
//! circular buffer of the most recent lines in memory. Installed as the
//! global `tracing` subscriber; `log` records are bridged into it.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

/// Rotation and buffering limits
#[derive(Debug, Clone, Copy)]
pub struct LoggerConfig {
    /// Rotate once the active file grows past this many bytes
    pub max_bytes: u64,
    /// Rotated archives kept next to the active file
    pub keep_files: usize,
    /// Lines held in memory
    pub buffer_lines: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            keep_files: 3,
            buffer_lines: 200,
        }
    }
}

#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    /// A global subscriber was already installed
    AlreadyInitialized,
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "Log file error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "Logger already initialized"),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<io::Error> for LoggerError {
    fn from(e: io::Error) -> Self {
        LoggerError::Io(e)
    }
}

struct ActiveFile {
    path: PathBuf,
    file: File,
    written: u64,
}

impl ActiveFile {
    fn open(path: PathBuf) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self { path, file, written })
    }

    fn archive_path(&self, n: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{}", n));
        PathBuf::from(name)
    }

    /// `app.log` -> `app.log.1` -> ... -> `app.log.<keep>` (dropped beyond)
    fn rotate(&mut self, keep: usize) -> io::Result<()> {
        self.file.flush()?;
        if keep == 0 {
            self.file = File::create(&self.path)?;
            self.written = 0;
            return Ok(());
        }
        let _ = fs::remove_file(self.archive_path(keep));
        for n in (1..keep).rev() {
            let from = self.archive_path(n);
            if from.exists() {
                fs::rename(&from, self.archive_path(n + 1))?;
            }
        }
        fs::rename(&self.path, self.archive_path(1))?;
        *self = Self::open(self.path.clone())?;
        Ok(())
    }
}

/// Cloneable writer shared by every formatted event
#[derive(Clone)]
pub struct RollingWriter {
    file: Arc<Mutex<ActiveFile>>,
    recent: Arc<Mutex<VecDeque<String>>>,
    config: LoggerConfig,
}

impl RollingWriter {
    /// Opens (or continues) `<dir>/<app_name>.log`
    pub fn new(dir: impl AsRef<Path>, app_name: &str, config: LoggerConfig) -> io::Result<Self> {
        fs::create_dir_all(dir.as_ref())?;
        let path = dir.as_ref().join(format!("{}.log", app_name));
        Ok(Self {
            file: Arc::new(Mutex::new(ActiveFile::open(path)?)),
            recent: Arc::new(Mutex::new(VecDeque::with_capacity(config.buffer_lines))),
            config,
        })
    }

    pub fn path(&self) -> PathBuf {
        self.file
            .lock()
            .map(|f| f.path.clone())
            .unwrap_or_default()
    }

    /// Most recent lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        self.recent
            .lock()
            .map(|r| r.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn remember(&self, buf: &[u8]) {
        let Ok(mut recent) = self.recent.lock() else {
            return;
        };
        for line in String::from_utf8_lossy(buf).lines() {
            if line.is_empty() {
                continue;
            }
            if recent.len() == self.config.buffer_lines {
                recent.pop_front();
            }
            if self.config.buffer_lines > 0 {
                recent.push_back(line.to_string());
            }
        }
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut active = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if active.written > 0 && active.written + buf.len() as u64 > self.config.max_bytes {
            active.rotate(self.config.keep_files)?;
        }
        active.file.write_all(buf)?;
        active.written += buf.len() as u64;
        drop(active);
        self.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.lock() {
            Ok(mut active) => active.file.flush(),
            Err(_) => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

static WRITER: OnceLock<RollingWriter> = OnceLock::new();

/// Installs the global subscriber with default limits; returns the active log path
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<PathBuf, LoggerError> {
    init_logger_with(log_dir, app_name, LoggerConfig::default())
}

pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    config: LoggerConfig,
) -> Result<PathBuf, LoggerError> {
    let writer = RollingWriter::new(log_dir, app_name, config)?;
    let path = writer.path();

    tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    let _ = WRITER.set(writer);
    tracing::info!("Logging to {}", path.display());
    Ok(path)
}

/// Lines captured since startup (empty before `init_logger`)
pub fn recent_lines() -> Vec<String> {
    WRITER.get().map(RollingWriter::recent_lines).unwrap_or_default()
}

pub fn info(msg: &str) {
    log::info!("{}", msg);
}

pub fn warn(msg: &str) {
    log::warn!("{}", msg);
}

pub fn error(msg: &str) {
    log::error!("{}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Events arrive as one write per formatted line, as the fmt layer emits them
    fn small() -> LoggerConfig {
        LoggerConfig {
            max_bytes: 64,
            keep_files: 2,
            buffer_lines: 3,
        }
    }

    #[test]
    fn rotates_when_full() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::new(dir.path(), "Test", small()).unwrap();

        for i in 0..10 {
            writer
                .write_all(format!("line number {:02} padded to be long\n", i).as_bytes())
                .unwrap();
        }
        writer.flush().unwrap();

        assert!(dir.path().join("Test.log").exists());
        assert!(dir.path().join("Test.log.1").exists());
        assert!(dir.path().join("Test.log.2").exists());
        assert!(!dir.path().join("Test.log.3").exists());
        let active = fs::read_to_string(dir.path().join("Test.log")).unwrap();
        assert!(active.contains("line number 09"));
    }

    #[test]
    fn keeps_last_lines_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::new(dir.path(), "Test", small()).unwrap();

        for i in 0..5 {
            writer.write_all(format!("entry {}\n", i).as_bytes()).unwrap();
        }

        assert_eq!(writer.recent_lines(), ["entry 2", "entry 3", "entry 4"]);
    }

    #[test]
    fn appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Test.log"), "earlier\n").unwrap();

        let mut writer = RollingWriter::new(dir.path(), "Test", LoggerConfig::default()).unwrap();
        writer.write_all(b"later\n").unwrap();

        let content = fs::read_to_string(dir.path().join("Test.log")).unwrap();
        assert_eq!(content, "earlier\nlater\n");
    }
}
