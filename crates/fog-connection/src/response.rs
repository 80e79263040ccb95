//! HTTP response types

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::error::Error;

/// Result type returned by every connection operation
pub type Response<R, E = Error> = Result<R, E>;

/// HTTP response with status, headers and the fully read body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    headers: BTreeMap<String, Vec<String>>,
    body: Vec<u8>,
}

impl RawResponse {
    /// Create a response from its parts
    pub fn new(status: u16, headers: BTreeMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Get the HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response status is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the response status is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Response headers, keyed by lower-case name
    ///
    /// Repeated headers keep every value in arrival order. Values that are not
    /// valid UTF-8 are decoded lossily.
    pub fn headers(&self) -> &BTreeMap<String, Vec<String>> {
        &self.headers
    }

    /// First value of a header, ignoring case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_all(name).first().map(String::as_str)
    }

    /// Every value of a header, ignoring case
    pub fn header_all(&self, name: &str) -> &[String] {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Get the response body as bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Get the response body as text
    pub fn text(&self) -> Response<String> {
        String::from_utf8(self.body.clone()).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Get the response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Response<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }
}
