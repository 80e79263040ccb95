//! reqwest-based transport

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use url::Url;

use crate::error::Error;
use crate::options::TransportParams;
use crate::request::{Method, RequestParams};
use crate::response::{RawResponse, Response};
use crate::transport::{Connector, Transport};

/// Builds [`ReqwestTransport`] handles
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestConnector;

impl Connector for ReqwestConnector {
    type Transport = ReqwestTransport;

    fn connect(&self, url: &Url, params: &TransportParams) -> Response<ReqwestTransport> {
        let mut builder = reqwest::Client::builder()
            .default_headers(default_headers(params)?)
            .danger_accept_invalid_certs(params.accept_invalid_certs);

        if !params.persistent {
            builder = builder.pool_max_idle_per_host(0);
        }

        if let Some(timeout) = params.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        if let Some(timeout) = params.read_timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_config) = &params.proxy {
            let proxy_url = proxy_config.url.to_string();
            let proxy = if let Some(matcher) = proxy_config.matcher.clone() {
                reqwest::Proxy::custom(move |url| {
                    if matcher.is_match(url.host_str().unwrap_or("")) {
                        Some(proxy_url.clone())
                    } else {
                        None
                    }
                })
            } else {
                reqwest::Proxy::all(&proxy_url).map_err(|e| Error::Proxy(e.to_string()))?
            };
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(Error::from)?;

        Ok(ReqwestTransport {
            client,
            url: url.clone(),
            default_path: params.path.clone(),
            debug_response: params.debug_response,
        })
    }
}

fn default_headers(params: &TransportParams) -> Response<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (key, value) in &params.headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| Error::InvalidArgument(format!("Invalid header name {}: {}", key, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidArgument(format!("Invalid value for {}: {}", key, e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Client handle backed by a [`reqwest::Client`]
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    url: Url,
    default_path: Option<String>,
    debug_response: bool,
}

impl ReqwestTransport {
    /// URL the request is sent to: the connection URL with its path replaced
    /// by the request (or default) path and the query pairs appended.
    fn resolve_url(&self, params: &RequestParams) -> Url {
        let mut url = self.url.clone();

        if let Some(path) = params.path.as_deref().or(self.default_path.as_deref()) {
            url.set_path(&format!("/{}", path.trim_start_matches('/')));
        }

        if !params.query.is_empty() {
            url.query_pairs_mut().extend_pairs(params.query.iter());
        }

        url
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Head => reqwest::Method::HEAD,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
        Method::Options => reqwest::Method::OPTIONS,
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn request(&self, params: RequestParams) -> Response<RawResponse> {
        let url = self.resolve_url(&params);
        let mut request = self
            .client
            .request(to_reqwest_method(params.method), url.clone());

        for (key, value) in &params.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        if let Some(body) = params.body.clone() {
            request = request.body(body);
        }

        let response = request.send().await.map_err(Error::from)?;
        let status = response.status().as_u16();
        let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in response.headers() {
            headers
                .entry(name.as_str().to_string())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }
        let body = response.bytes().await.map_err(Error::from)?.to_vec();
        let response = RawResponse::new(status, headers, body);

        if self.debug_response {
            tracing::debug!(
                "{} {} -> {} ({} headers, {} bytes)",
                params.method,
                url,
                status,
                response.headers().len(),
                response.bytes().len()
            );
        }

        if !params.accepts(status) {
            let message = if self.debug_response {
                response.text().unwrap_or_default()
            } else {
                StatusCode::from_u16(status)
                    .ok()
                    .and_then(|code| code.canonical_reason())
                    .unwrap_or_default()
                    .to_string()
            };
            return Err(Error::Status { status, message });
        }

        Ok(response)
    }
}
