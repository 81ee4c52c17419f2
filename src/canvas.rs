use crate::error::{Error, Result};
use json::JsonValue;
use log::{debug, warn};
use reqwest::{StatusCode, Url};
use std::sync::Arc;

/// Client object for making Canvas API calls. Uses `Arc` internally to be cheaply cloneable.
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
    data: Arc<ClientData>,
}

struct ClientData {
    base_url: Url,
    token: String,
}

/// What came back from a suspend request. The two fields are empty when the body didn't carry them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspendResponse {
    pub status: StatusCode,
    pub created_at: String,
    pub login_id: String,
}

impl Client {
    /// Construct a new Canvas client. `base_url` should end in `/`, as [`crate::Config`] guarantees.
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            data: Arc::new(ClientData { base_url, token: token.into() }),
        }
    }

    /// Make a GET request to the accounts listing to check that the token is accepted.
    /// Anything other than exactly 200 counts as unauthorized.
    pub async fn validate_token(&self) -> Result<()> {
        let url = self.endpoint(&["api", "v1", "accounts", ""])?;
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.data.token)
            .send()
            .await
            .map_err(|e| Error::request(&url, e))?;
        let status = response.status();
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(Error::Unauthorized { status })
        }
    }

    /// Suspend a single user with a PUT request. A non-200 status is returned to the caller rather than
    /// treated as an error; only transport failures are errors here.
    ///
    /// `.` and `..` are refused with [`Error::UserUrl`] without sending anything, since as path segments
    /// they would address the users collection (or nothing) instead of a user.
    pub async fn suspend_user(&self, user_id: &str) -> Result<SuspendResponse> {
        if user_id == "." || user_id == ".." {
            return Err(Error::UserUrl { user_id: user_id.to_owned() });
        }
        let url = self
            .endpoint(&["api", "v1", "users", user_id])
            .map_err(|_| Error::UserUrl { user_id: user_id.to_owned() })?;
        debug!("PUT {}", url);
        let response = self
            .client
            .put(url.clone())
            .bearer_auth(&self.data.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(suspend_body().dump())
            .send()
            .await
            .map_err(|e| Error::request(&url, e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| Error::request(&url, e))?;
        let (created_at, login_id) = match json::parse(&body) {
            Ok(details) => (field_text(&details["created_at"]), field_text(&details["login_id"])),
            Err(error) => {
                warn!("user {}: response body (status {}) is not json: {}", user_id, status, error);
                (String::new(), String::new())
            }
        };
        Ok(SuspendResponse { status, created_at, login_id })
    }

    /// Append path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.data.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl {
                url: self.data.base_url.to_string(),
                reason: "url cannot be used as a base".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// `{"user": {"event": "suspend"}}`
fn suspend_body() -> JsonValue {
    let mut user = JsonValue::new_object();
    user["event"] = "suspend".into();
    let mut body = JsonValue::new_object();
    body["user"] = user;
    body
}

/// Text to record for a response field: strings as-is, other values as json, missing or null as empty.
fn field_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        value => match value.as_str() {
            Some(text) => text.to_owned(),
            None => value.dump(),
        },
    }
}
