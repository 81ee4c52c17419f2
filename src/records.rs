use crate::{
    error::{Error, Result},
    session::RunId,
};
use reqwest::StatusCode;
use std::{
    fmt,
    fs::OpenOptions,
    path::{Path, PathBuf},
};

pub const OUTPUT_HEADER: [&str; 4] = ["id", "created_at", "login_id", "status"];

/// Read user ids from the first column of a csv file, skipping the header row.
///
/// Ids are returned untrimmed and in file order. A row whose first field is empty still produces an
/// (empty) id, but blank lines are skipped entirely.
pub fn read_input(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let input_error = |source: csv::Error| Error::Input { path: path.to_owned(), source };
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path).map_err(input_error)?;
    // An empty file has no header row to discard
    if reader.byte_headers().map_err(input_error)?.is_empty() {
        return Err(Error::EmptyInput { path: path.to_owned() });
    }
    let mut user_ids = Vec::new();
    for record in reader.records() {
        let record = record.map_err(input_error)?;
        if let Some(user_id) = record.get(0) {
            user_ids.push(user_id.to_owned());
        }
    }
    Ok(user_ids)
}

/// Outcome of one suspension attempt, as written to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspensionStatus {
    Successful,
    Failed,
}

impl SuspensionStatus {
    /// Only a 200 counts as a successful suspension.
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::OK {
            SuspensionStatus::Successful
        } else {
            SuspensionStatus::Failed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SuspensionStatus::Successful => "Suspension Successful",
            SuspensionStatus::Failed => "Suspension Failed",
        }
    }
}

impl fmt::Display for SuspensionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub id: String,
    pub created_at: String,
    pub login_id: String,
    pub status: SuspensionStatus,
}

/// The csv file results are appended to. Opened and closed again on every write, so everything appended
/// so far is on disk if the run stops part way through.
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
}

impl OutputFile {
    /// Create `<dir>/<run_id>.csv` containing just the header row, replacing any existing file.
    pub fn create(dir: impl AsRef<Path>, run_id: &RunId) -> Result<Self> {
        let path = dir.as_ref().join(format!("{}.csv", run_id));
        let output_error = |source: csv::Error| Error::Output { path: path.clone(), source };
        let mut writer = csv::Writer::from_path(&path).map_err(output_error)?;
        writer.write_record(OUTPUT_HEADER).map_err(output_error)?;
        writer.flush().map_err(|e| output_error(e.into()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a single result row.
    pub fn append(&self, record: &ResultRecord) -> Result<()> {
        let output_error = |source: csv::Error| Error::Output { path: self.path.clone(), source };
        let file = OpenOptions::new().append(true).open(&self.path).map_err(|e| output_error(e.into()))?;
        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record([
                record.id.as_str(),
                record.created_at.as_str(),
                record.login_id.as_str(),
                record.status.as_str(),
            ])
            .map_err(output_error)?;
        writer.flush().map_err(|e| output_error(e.into()))?;
        Ok(())
    }
}
