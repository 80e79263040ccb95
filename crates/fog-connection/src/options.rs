//! Connection options
//!
//! [`ConnectionOptions`] is what callers hand to [`crate::Connection::new`]. It
//! is validated once, at construction, into [`TransportParams`]: the settings
//! forwarded to the [`crate::Connector`] every time a client handle is built.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;
use crate::response::Response;

/// Crate version embedded in the `User-Agent` header
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Product token that prefixes the `User-Agent` header
pub const USER_AGENT_PREFIX: &str = "fog";

/// Name of the user agent header
pub const USER_AGENT_HEADER: &str = "User-Agent";

/// The `User-Agent` value sent on every request, e.g. `fog/0.1.0`
pub fn user_agent() -> String {
    format!("{}/{}", USER_AGENT_PREFIX, VERSION)
}

/// Drop any caller supplied `User-Agent`, ignoring case
pub(crate) fn strip_user_agent(headers: &mut BTreeMap<String, String>) {
    headers.retain(|key, value| {
        let is_user_agent = key.eq_ignore_ascii_case(USER_AGENT_HEADER);
        if is_user_agent {
            tracing::warn!("Ignoring caller supplied User-Agent: {}", value);
        }
        !is_user_agent
    });
}

/// Options accepted when building a [`crate::Connection`]
///
/// `base_path` and `path` are mutually exclusive: `base_path` is prepended to
/// every request path, `path` is a default forwarded to the client as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionOptions {
    /// Prefix joined with the path of every request
    pub base_path: Option<String>,
    /// Default request path (construction only)
    pub path: Option<String>,
    /// Keep response bodies for logging and status errors. Defaults to `true`.
    pub debug_response: Option<bool>,
    /// Overrides the positional `persistent` flag when set
    pub persistent: Option<bool>,
    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// Connect timeout in seconds
    pub connect_timeout_secs: Option<u64>,
    /// Whole request timeout in seconds
    pub read_timeout_secs: Option<u64>,
    /// Proxy for outgoing requests
    pub proxy: Option<Url>,
    /// Only proxy hosts matching this pattern
    pub proxy_host_matcher: Option<String>,
    /// Accept invalid TLS certificates
    pub accept_invalid_certs: bool,
}

impl ConnectionOptions {
    /// Set the base path
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Set the default request path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Enable or disable response debugging
    pub fn debug_response(mut self, debug: bool) -> Self {
        self.debug_response = Some(debug);
        self
    }

    /// Override the persistence flag
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = Some(persistent);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = Some(secs);
        self
    }

    /// Set the request timeout
    pub fn read_timeout_secs(mut self, secs: u64) -> Self {
        self.read_timeout_secs = Some(secs);
        self
    }

    /// Route all requests through a proxy
    pub fn proxy(mut self, url: Url) -> Self {
        self.proxy = Some(url);
        self.proxy_host_matcher = None;
        self
    }

    /// Route requests whose host matches `pattern` through a proxy
    pub fn proxy_with_matcher(mut self, url: Url, pattern: impl Into<String>) -> Self {
        self.proxy = Some(url);
        self.proxy_host_matcher = Some(pattern.into());
        self
    }

    /// Accept invalid TLS certificates
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Validate the options and split them into the base path and the
    /// params forwarded to the connector.
    pub(crate) fn validate(self, persistent: bool) -> Response<(Option<String>, TransportParams)> {
        if self.base_path.is_some() && self.path.is_some() {
            return Err(Error::InvalidArgument(
                "path is not allowed together with base_path".to_string(),
            ));
        }

        let proxy = match self.proxy {
            Some(url) => {
                let matcher = self
                    .proxy_host_matcher
                    .as_deref()
                    .map(Regex::new)
                    .transpose()
                    .map_err(|e| Error::Proxy(format!("Invalid proxy pattern: {}", e)))?;
                Some(ProxyConfig { url, matcher })
            }
            None if self.proxy_host_matcher.is_some() => {
                return Err(Error::InvalidArgument(
                    "proxy_host_matcher requires a proxy".to_string(),
                ));
            }
            None => None,
        };

        let mut headers = self.headers;
        let mut seen = BTreeSet::new();
        for key in headers.keys() {
            if !seen.insert(key.to_ascii_lowercase()) {
                return Err(Error::InvalidArgument(format!(
                    "header {} is set more than once",
                    key
                )));
            }
        }
        strip_user_agent(&mut headers);
        headers.insert(USER_AGENT_HEADER.to_string(), user_agent());

        let params = TransportParams {
            headers,
            path: self.path,
            persistent: self.persistent.unwrap_or(persistent),
            debug_response: self.debug_response.unwrap_or(true),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            read_timeout: self.read_timeout_secs.map(Duration::from_secs),
            proxy,
            accept_invalid_certs: self.accept_invalid_certs,
        };

        Ok((self.base_path, params))
    }
}

/// Proxy settings for the client
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Proxy URL
    pub url: Url,
    /// Host pattern; `None` proxies all traffic
    pub matcher: Option<Regex>,
}

/// Validated settings used to build a client handle
#[derive(Debug, Clone)]
pub struct TransportParams {
    /// Default headers, always including `User-Agent`
    pub headers: BTreeMap<String, String>,
    /// Default request path
    pub path: Option<String>,
    /// Reuse connections across requests
    pub persistent: bool,
    /// Keep response bodies for logging and status errors
    pub debug_response: bool,
    /// Connect timeout
    pub connect_timeout: Option<Duration>,
    /// Whole request timeout
    pub read_timeout: Option<Duration>,
    /// Proxy settings
    pub proxy: Option<ProxyConfig>,
    /// Accept invalid TLS certificates
    pub accept_invalid_certs: bool,
}

impl TransportParams {
    /// The `User-Agent` header value
    pub fn user_agent(&self) -> Option<&str> {
        self.headers.get(USER_AGENT_HEADER).map(String::as_str)
    }
}
