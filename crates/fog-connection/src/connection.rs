//! Connection adapter

use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::backends::ReqwestConnector;
use crate::error::Error;
use crate::options::{strip_user_agent, ConnectionOptions, TransportParams};
use crate::path::effective_path;
use crate::request::RequestParams;
use crate::response::{RawResponse, Response};
use crate::transport::{Connector, Transport};

/// HTTP connection to a single endpoint
///
/// Owns one client handle built by its [`Connector`]. Every request has the
/// configured base path joined onto its path before it is forwarded.
#[derive(Debug)]
pub struct Connection<C: Connector = ReqwestConnector> {
    connector: C,
    url: Url,
    base_path: Option<String>,
    params: TransportParams,
    transport: C::Transport,
}

impl Connection<ReqwestConnector> {
    /// Create a connection backed by reqwest.
    ///
    /// Fails with [`Error::InvalidArgument`] when `url` is blank or not an
    /// absolute URL, or when both `base_path` and `path` are set in `options`.
    pub fn new(url: &str, persistent: bool, options: ConnectionOptions) -> Response<Self> {
        Self::with_connector(ReqwestConnector, url, persistent, options)
    }
}

impl<C: Connector> Connection<C> {
    /// Create a connection whose client handles are built by `connector`
    pub fn with_connector(
        connector: C,
        url: &str,
        persistent: bool,
        options: ConnectionOptions,
    ) -> Response<Self> {
        let url = parse_url(url)?;
        let (base_path, params) = options.validate(persistent)?;
        let transport = connector.connect(&url, &params)?;

        tracing::debug!(
            "Connection to {} created (persistent: {}, base path: {})",
            url,
            params.persistent,
            base_path.as_deref().unwrap_or("none")
        );

        Ok(Self {
            connector,
            url,
            base_path,
            params,
            transport,
        })
    }

    /// Forward a request to the client, joining the base path with
    /// `params.path`.
    #[instrument(skip(self, params), fields(method = %params.method, url = %self.url))]
    pub async fn request(&self, mut params: RequestParams) -> Response<RawResponse> {
        params.path = effective_path(self.base_path.as_deref(), params.path.as_deref());
        strip_user_agent(&mut params.headers);
        self.transport.request(params).await
    }

    /// Forward a request and deserialize a successful JSON response
    pub async fn request_json<R>(&self, params: RequestParams) -> Response<R>
    where
        R: DeserializeOwned,
    {
        let response = self.request(params).await?;

        if !response.is_success() {
            return Err(Error::Status {
                status: response.status(),
                message: response.text().unwrap_or_default(),
            });
        }

        response.json()
    }

    /// Discard the client handle and build a new one with the same
    /// settings.
    #[instrument(skip(self), fields(url = %self.url))]
    pub fn reset(&mut self) -> Response<()> {
        self.transport = self.connector.connect(&self.url, &self.params)?;
        tracing::debug!("Connection reset");
        Ok(())
    }

    /// Target URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Base path prepended to request paths
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Whether connections are reused across requests
    pub fn is_persistent(&self) -> bool {
        self.params.persistent
    }

    /// Settings the client handle was built with
    pub fn transport_params(&self) -> &TransportParams {
        &self.params
    }

    /// Current client handle
    pub fn transport(&self) -> &C::Transport {
        &self.transport
    }
}

fn parse_url(url: &str) -> Response<Url> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::InvalidArgument("url is required".to_string()));
    }

    let url = Url::parse(url)?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidArgument(format!(
            "url must be absolute: {}",
            url
        )));
    }

    Ok(url)
}
