use crate::error::{Error, Result};
use reqwest::Url;
use std::{env, fmt, path::PathBuf};

pub const BASE_URL_VAR: &str = "CANVAS_BASE_URL";
pub const TOKEN_VAR: &str = "CANVAS_TOKEN";
pub const INPUT_FILE_VAR: &str = "INPUT_FILE_PATH";

/// Everything a run needs to know about where to send requests and which files to touch.
#[derive(Clone)]
pub struct Config {
    pub base_url: Url,
    pub token: String,
    pub input_file: PathBuf,
    pub logs_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn new(base_url: &str, token: impl Into<String>, input_file: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            token: token.into(),
            input_file: input_file.into(),
            logs_dir: PathBuf::from("logs"),
            output_dir: PathBuf::from("."),
        })
    }

    /// Build a config from the environment, loading a `.env` file first if one is present.
    /// An explicit `input_file` takes precedence over `INPUT_FILE_PATH`.
    pub fn from_env(input_file: Option<PathBuf>) -> Result<Self> {
        dotenv::dotenv().ok();
        let base_url = env::var(BASE_URL_VAR).map_err(|_| Error::MissingConfig(BASE_URL_VAR))?;
        let token = env::var(TOKEN_VAR).map_err(|_| Error::MissingConfig(TOKEN_VAR))?;
        let input_file = match input_file {
            Some(path) => path,
            None => env::var_os(INPUT_FILE_VAR).map(PathBuf::from).ok_or(Error::MissingConfig(INPUT_FILE_VAR))?,
        };
        Self::new(&base_url, token, input_file)
    }

    pub fn with_logs_dir(mut self, logs_dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = logs_dir.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("input_file", &self.input_file)
            .field("logs_dir", &self.logs_dir)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

/// Parse the API base url, making sure its path ends in `/` so endpoint paths are appended to it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let invalid = |reason: &str| Error::InvalidBaseUrl { url: raw.to_owned(), reason: reason.to_owned() };
    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid("scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("url cannot be used as a base"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = Config::new("https://school.instructure.com/canvas", "token", "users.csv").unwrap();
        assert_eq!(config.base_url.as_str(), "https://school.instructure.com/canvas/");

        let config = Config::new("https://school.instructure.com", "token", "users.csv").unwrap();
        assert_eq!(config.base_url.as_str(), "https://school.instructure.com/");
    }

    #[test]
    fn test_base_url_rejects_other_schemes() {
        assert!(matches!(
            Config::new("ftp://school.instructure.com", "token", "users.csv"),
            Err(Error::InvalidBaseUrl { .. })
        ));
        assert!(matches!(Config::new("not a url", "token", "users.csv"), Err(Error::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_defaults_and_overrides() {
        let config = Config::new("http://localhost:8080", "token", "users.csv").unwrap();
        assert_eq!(config.logs_dir, PathBuf::from("logs"));
        assert_eq!(config.output_dir, PathBuf::from("."));
        let config = config.with_logs_dir("/tmp/logs").with_output_dir("/tmp/out");
        assert_eq!(config.logs_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::new("http://localhost:8080", "super-secret", "users.csv").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
