//! Rolling File Logger
//!
//! Writes `tracing` events (and `log` records bridged into `tracing`) to a
//! size-rotated file under the application's log directory, and keeps the
//! most recent lines in a circular buffer so a shell can show them.
//!
//! Files: `<app>.log` is the live file, `<app>.1.log` the previous one, and
//! so on up to `max_files - 1`.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use log::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Logger errors
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("log file error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

/// Rotation and buffer limits
#[derive(Debug, Clone, Copy)]
pub struct LoggerConfig {
    /// Rotate once the live file would grow past this size
    pub max_file_bytes: u64,
    /// Files kept on disk, live file included
    pub max_files: usize,
    /// Lines kept in the in-memory buffer
    pub buffer_lines: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_files: 3,
            buffer_lines: 200,
        }
    }
}

struct RollingFile {
    dir: PathBuf,
    stem: String,
    file: Option<File>,
    written: u64,
    max_bytes: u64,
    max_files: usize,
}

impl RollingFile {
    fn open(dir: &Path, stem: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let mut rolling = Self {
            dir: dir.to_path_buf(),
            stem: stem.to_string(),
            file: None,
            written: 0,
            max_bytes,
            max_files: max_files.max(1),
        };
        rolling.reopen()?;
        Ok(rolling)
    }

    /// Open the live file for appending, picking up its current size
    fn reopen(&mut self) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(self.path_for(0))?;
        self.written = file.metadata()?.len();
        self.file = Some(file);
        Ok(())
    }

    fn path_for(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.dir.join(format!("{}.log", self.stem))
        } else {
            self.dir.join(format!("{}.{}.log", self.stem, index))
        }
    }

    fn rotate(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }

        for index in (1..self.max_files).rev() {
            let from = self.path_for(index - 1);
            if !from.exists() {
                continue;
            }
            let to = self.path_for(index);
            if to.exists() {
                fs::remove_file(&to)?;
            }
            fs::rename(&from, &to)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.path_for(0))?;
        self.file = Some(file);
        self.written = 0;
        Ok(())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let len = buf.len() as u64;
        let mut rotate_err = None;
        if self.written > 0 && self.written + len > self.max_bytes {
            if let Err(e) = self.rotate() {
                // Keep logging into whatever live file is there
                self.reopen()?;
                rotate_err = Some(e);
            }
        }
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return Err(io::Error::new(io::ErrorKind::Other, "log file closed")),
        };
        file.write_all(buf)?;
        self.written += len;
        match rotate_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct Inner {
    file: Mutex<RollingFile>,
    recent: Mutex<VecDeque<String>>,
    capacity: usize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handle to an opened rolling log
///
/// Cheap to clone; every clone writes to the same file and buffer.
#[derive(Clone)]
pub struct LoggerHandle {
    inner: Arc<Inner>,
}

impl LoggerHandle {
    /// Open (or continue) `<app_name>.log` in `log_dir`
    pub fn open(log_dir: &Path, app_name: &str, config: LoggerConfig) -> io::Result<Self> {
        let file = RollingFile::open(log_dir, app_name, config.max_file_bytes, config.max_files)?;
        Ok(Self {
            inner: Arc::new(Inner {
                file: Mutex::new(file),
                recent: Mutex::new(VecDeque::with_capacity(config.buffer_lines)),
                capacity: config.buffer_lines,
            }),
        })
    }

    /// Write one already-formatted chunk (one or more lines)
    pub fn write_chunk(&self, chunk: &[u8]) -> io::Result<()> {
        lock(&self.inner.file).write_all(chunk)?;

        if self.inner.capacity == 0 {
            return Ok(());
        }
        let text = String::from_utf8_lossy(chunk);
        let mut recent = lock(&self.inner.recent);
        for line in text.lines().filter(|l| !l.is_empty()) {
            if recent.len() == self.inner.capacity {
                recent.pop_front();
            }
            recent.push_back(line.to_string());
        }
        Ok(())
    }

    /// Write a single timestamped record, bypassing the subscriber
    pub fn log(&self, level: Level, message: &str) -> io::Result<()> {
        let line = format!(
            "{} {:>5} {}\n",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
            level,
            message
        );
        self.write_chunk(line.as_bytes())
    }

    /// Most recent lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        lock(&self.inner.recent).iter().cloned().collect()
    }

    /// Path of the live log file
    pub fn current_path(&self) -> PathBuf {
        lock(&self.inner.file).path_for(0)
    }
}

/// Buffers one formatted event and commits it on drop
pub struct EventWriter {
    handle: LoggerHandle,
    buf: Vec<u8>,
}

impl Write for EventWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let chunk = std::mem::take(&mut self.buf);
        self.handle.write_chunk(&chunk)
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LoggerHandle {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter {
            handle: self.clone(),
            buf: Vec::new(),
        }
    }
}

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

/// Initialize the global logger with default limits
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<LoggerHandle, LoggerError> {
    init_logger_with(log_dir, app_name, LoggerConfig::default())
}

/// Initialize the global logger
///
/// Installs a `tracing` fmt subscriber (filter from `RUST_LOG`, default
/// `info`) whose output goes to the rolling file. `log` records are picked
/// up by the subscriber's log bridge.
pub fn init_logger_with(
    log_dir: PathBuf,
    app_name: &str,
    config: LoggerConfig,
) -> Result<LoggerHandle, LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let handle = LoggerHandle::open(&log_dir, app_name, config)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(handle.clone())
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    LOGGER
        .set(handle.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::info!(log_dir = %log_dir.display(), app = app_name, "rolling logger initialized");
    Ok(handle)
}

/// The global logger, if initialized
pub fn handle() -> Option<&'static LoggerHandle> {
    LOGGER.get()
}

fn write_global(level: Level, message: &str) -> Result<(), LoggerError> {
    let handle = LOGGER.get().ok_or(LoggerError::NotInitialized)?;
    handle.log(level, message)?;
    Ok(())
}

/// Write an info record straight to the log file
pub fn info(message: &str) -> Result<(), LoggerError> {
    write_global(Level::Info, message)
}

/// Write an error record straight to the log file
pub fn error(message: &str) -> Result<(), LoggerError> {
    write_global(Level::Error, message)
}
