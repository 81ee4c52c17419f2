use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use env_logger::{Builder, Target};
use log::{info, LevelFilter, Record};
use std::{
    fmt,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Identifies one invocation. Names both the log file and the output csv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunId(String);

impl RunId {
    pub fn now() -> Self {
        Self(Local::now().format("user_suspension_%d-%m-%y_%H%M%S").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The log file for a single run.
pub struct Session {
    run_id: RunId,
    log_path: PathBuf,
    file: File,
}

impl Session {
    /// Create `<logs_dir>/<run_id>.log`, creating the directory if it doesn't exist yet.
    pub fn create(logs_dir: impl AsRef<Path>, run_id: RunId) -> Result<Self> {
        let logs_dir = logs_dir.as_ref();
        fs::create_dir_all(logs_dir).map_err(|source| Error::LogFile { path: logs_dir.to_owned(), source })?;
        let log_path = logs_dir.join(format!("{}.log", run_id));
        let file = File::create(&log_path).map_err(|source| Error::LogFile { path: log_path.clone(), source })?;
        Ok(Self { run_id, log_path, file })
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Route the `log` macros into this session's file. Returns `false` if a logger was already
    /// installed in this process, in which case records keep going wherever that one sends them.
    pub fn install_logger(&self) -> Result<bool> {
        let file = self.file.try_clone().map_err(|source| Error::LogFile { path: self.log_path.clone(), source })?;
        let installed = Builder::new()
            .filter_level(LevelFilter::Info)
            .filter_module("suspension", LevelFilter::Debug)
            .parse_default_env()
            .target(Target::Pipe(Box::new(file)))
            .format(|buf, record| write_line(buf, Local::now(), record))
            .try_init()
            .is_ok();
        if installed {
            info!("TASK_ID: {}", self.run_id);
            info!("{}", banner("START LOGGER"));
            info!("Create log file: {}", self.log_path.display());
        }
        Ok(installed)
    }
}

/// One log line: `<YYYY-mm-dd HH:MM:SS,mmm> - <LEVEL> - <message>`.
fn write_line(out: &mut impl Write, now: DateTime<Local>, record: &Record) -> io::Result<()> {
    writeln!(out, "{} - {} - {}", now.format("%Y-%m-%d %H:%M:%S,%3f"), record.level(), record.args())
}

/// Stage header written to the log, e.g. `========= SUSPEND USERS =========`.
pub fn banner(stage: &str) -> String {
    format!("{0} {1} {0}", "=".repeat(9), stage)
}
