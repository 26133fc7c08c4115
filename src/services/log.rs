use crate::services::store::project_dirs;
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const INFO_MARK: &str = "🟢";
const ERROR_MARK: &str = "🔴";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

impl LogLevel {
    fn mark(&self) -> &'static str {
        match self {
            Self::Info => INFO_MARK,
            Self::Error => ERROR_MARK,
        }
    }
}

/// One activity line: `<utc time> <mark> <event> <mode|*> <details>`.
#[derive(Debug, Clone)]
pub struct LogEntry<'a> {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub mode: Option<&'a str>,
    pub event: &'a str,
    pub details: Option<&'a str>,
}

impl fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.level.mark(),
            self.event,
            self.mode.unwrap_or("*"),
            self.details.unwrap_or("")
        )
    }
}

/// Append-only activity log of export and rules operations.
pub struct ActivityLogger {
    path: PathBuf,
}

impl ActivityLogger {
    /// Logger writing `activity.log` in the platform data dir.
    pub fn new() -> crate::Result<Self> {
        let dir = project_dirs()?.data_local_dir().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self::at(dir.join("activity.log")))
    }

    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn append(&self, entry: &LogEntry<'_>) -> crate::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{entry}")?;
        Ok(())
    }

    fn record(&self, level: LogLevel, mode: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
        self.append(&LogEntry {
            timestamp: Utc::now(),
            level,
            mode,
            event,
            details,
        })
    }

    pub fn info(&self, mode: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
        self.record(LogLevel::Info, mode, event, details)
    }

    pub fn error(&self, mode: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
        self.record(LogLevel::Error, mode, event, details)
    }

    /// Stored lines, newest first.
    pub fn read_logs(&self, errors_only: bool) -> crate::Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }
        let reader = BufReader::new(fs::File::open(&self.path)?);
        let mut lines = reader
            .lines()
            .filter(|line| match line {
                Ok(text) => !errors_only || text.contains(ERROR_MARK),
                Err(_) => true,
            })
            .collect::<std::io::Result<Vec<_>>>()?;
        lines.reverse();
        Ok(lines)
    }
}
