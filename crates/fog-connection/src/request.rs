//! Per-request options

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::response::Response;

/// HTTP method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// GET
    #[default]
    Get,
    /// HEAD
    Head,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
}

impl Method {
    /// Upper-case method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for a single request
///
/// `path` is joined with the connection's base path before the request is
/// handed to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    /// HTTP method
    pub method: Method,
    /// Request path
    pub path: Option<String>,
    /// Query string pairs, appended in order
    pub query: Vec<(String, String)>,
    /// Headers for this request only
    pub headers: BTreeMap<String, String>,
    /// Request body
    pub body: Option<Vec<u8>>,
    /// Acceptable status codes; empty accepts any status
    pub expects: Vec<u16>,
}

impl RequestParams {
    /// Request with the given method and path
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// PUT request
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// DELETE request
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Set the method
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Append a query pair
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set a raw body
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `body` as JSON and set the content type
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Response<Self> {
        let bytes = serde_json::to_vec(body)?;
        Ok(self
            .header("Content-Type", "application/json")
            .body(bytes))
    }

    /// Accept only the listed status codes
    pub fn expects(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.expects = statuses.into_iter().collect();
        self
    }

    /// Whether `status` satisfies [`RequestParams::expects`]
    pub fn accepts(&self, status: u16) -> bool {
        self.expects.is_empty() || self.expects.contains(&status)
    }
}
