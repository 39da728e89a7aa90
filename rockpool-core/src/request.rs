//! Request descriptors.

use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;

use crate::response::BodyError;

/// An HTTP-shaped request descriptor.
///
/// This is a plain value holder: it carries what the caller asked for and
/// nothing about how (or whether) it gets sent. Backends treat it as opaque
/// beyond validating the URL.
///
/// # Examples
///
/// ```
/// use rockpool_core::Request;
/// use http::Method;
///
/// let req = Request::get("https://example.com/data.json");
/// assert_eq!(req.method(), &Method::GET);
/// assert_eq!(req.url(), "https://example.com/data.json");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<String>,
}

impl Request {
    /// Create a request with an explicit method.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a POST request carrying a body.
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: HeaderMap::new(),
            body: Some(body.into()),
        }
    }

    /// Attach headers, replacing any existing ones.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The target URL, exactly as supplied.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The raw body, if one was attached.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BodyError::Missing`] when no body was attached, or
    /// [`BodyError::Decode`] when it is not valid JSON for `T`.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, BodyError> {
        let body = self.body.as_deref().ok_or(BodyError::Missing)?;
        serde_json::from_str(body).map_err(|e| BodyError::Decode(e.to_string()))
    }
}
