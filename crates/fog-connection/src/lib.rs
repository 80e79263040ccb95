//! HTTP connection wrapper
//!
//! A [`Connection`] configures a `User-Agent` header, optional persistent
//! connections and a base path, then hands requests to an underlying HTTP
//! client (reqwest by default, or any [`Connector`]).
//!
//! # Example
//!
//! ```no_run
//! use fog_connection::{Connection, ConnectionOptions, RequestParams, Response};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Bucket {
//!     name: String,
//! }
//!
//! async fn example() -> Response<Vec<Bucket>> {
//!     let options = ConnectionOptions::default().base_path("v1");
//!     let connection = Connection::new("https://storage.example.com", true, options)?;
//!
//!     // GET https://storage.example.com/v1/buckets
//!     connection.request_json(RequestParams::get("/buckets")).await
//! }
//! ```

mod backends;
mod connection;
mod error;
mod options;
mod path;
mod request;
mod response;
mod transport;

pub use backends::{ReqwestConnector, ReqwestTransport};
pub use connection::Connection;
pub use error::Error;
pub use options::{
    user_agent, ConnectionOptions, ProxyConfig, TransportParams, USER_AGENT_HEADER,
    USER_AGENT_PREFIX, VERSION,
};
pub use path::join_path;
pub use request::{Method, RequestParams};
pub use response::{RawResponse, Response};
pub use transport::{Connector, Transport};
