//! Seam between [`crate::Connection`] and the HTTP library it wraps
//!
//! A [`Connector`] builds a [`Transport`] (the live client handle) from the
//! connection URL and its validated [`TransportParams`]. The connection calls
//! the connector once on construction and again on every reset.

use std::fmt::Debug;

use url::Url;

use crate::options::TransportParams;
use crate::request::RequestParams;
use crate::response::{RawResponse, Response};

/// Live client handle owned by a connection
#[async_trait::async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Execute one request.
    ///
    /// `params.path` already has the connection's base path applied.
    async fn request(&self, params: RequestParams) -> Response<RawResponse>;
}

/// Factory for [`Transport`] handles
pub trait Connector: Send + Sync + Debug {
    /// Client handle built by this connector
    type Transport: Transport;

    /// Build a new client handle for `url`
    fn connect(&self, url: &Url, params: &TransportParams) -> Response<Self::Transport>;
}
