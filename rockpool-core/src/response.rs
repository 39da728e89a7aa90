//! Response values and body access.

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Error reading a response or request body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BodyError {
    /// No body was attached to the message.
    #[error("no body attached")]
    Missing,
    /// The body could not be decoded as the requested type.
    #[error("body decode error: {0}")]
    Decode(String),
}

/// An HTTP-shaped response value.
///
/// Passed through the transport unchanged: a mock hands one to a connection's
/// resolution method, and the code under test receives exactly that value.
///
/// # Examples
///
/// ```
/// use rockpool_core::Response;
/// use http::StatusCode;
///
/// let res = Response::ok("awesome");
/// assert_eq!(res.status(), StatusCode::OK);
/// assert_eq!(res.text(), Some("awesome"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: StatusCode,
    url: Option<String>,
    headers: HeaderMap,
    body: Option<String>,
}

impl Response {
    /// Create a `200 OK` response with a body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            url: None,
            headers: HeaderMap::new(),
            body: Some(body.into()),
        }
    }

    /// Create a response with an explicit status and no body.
    pub fn with_status(status: StatusCode) -> Self {
        Self {
            status,
            url: None,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Attach a body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Record the URL this response answers for.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach headers, replacing any existing ones.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// The response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The URL this response answers for, when recorded.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The raw body text, if present.
    pub fn text(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BodyError::Missing`] when there is no body, or
    /// [`BodyError::Decode`] when it is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BodyError> {
        let body = self.body.as_deref().ok_or(BodyError::Missing)?;
        serde_json::from_str(body).map_err(|e| BodyError::Decode(e.to_string()))
    }
}
