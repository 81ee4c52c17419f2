use reqwest::StatusCode;
use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way a suspension run can stop early. Each of these ends the process with exit code 1.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing configuration value {0}")]
    MissingConfig(&'static str),
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("couldn't create log file {}: {source}", path.display())]
    LogFile { path: PathBuf, source: io::Error },
    #[error("Not authorized (status {status}). Check the API token")]
    Unauthorized { status: StatusCode },
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("couldn't build url for user {user_id:?}")]
    UserUrl { user_id: String },
    #[error("error reading input file {}: {source}", path.display())]
    Input { path: PathBuf, source: csv::Error },
    #[error("input file {} has no header row", path.display())]
    EmptyInput { path: PathBuf },
    #[error("error writing output file {}: {source}", path.display())]
    Output { path: PathBuf, source: csv::Error },
}

impl Error {
    pub(crate) fn request(url: &reqwest::Url, source: reqwest::Error) -> Self {
        Error::Request { url: url.to_string(), source }
    }
}
