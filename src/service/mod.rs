/*!
 * Transport to the remote processing service.
 *
 * The service does all of the actual subtitle and video work. This module
 * only knows how to POST a JSON body to a route and hand back what came
 * back:
 * - `http`: the reqwest-backed client used by the binary
 */

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::errors::TransportError;

/// Value of `message` that marks a successful reply
pub const SUCCESS_MESSAGE: &str = "success";

/// A reply whose body parsed as JSON
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReply {
    /// HTTP status code
    pub status_code: u16,
    /// `message` field, when it is a string
    pub message: Option<String>,
    /// `error` field, when it is a string
    pub error: Option<String>,
}

impl ServiceReply {
    /// Pick the interesting fields out of a parsed body.
    ///
    /// Any JSON shape is accepted; fields that are missing or not strings
    /// are simply absent.
    pub fn from_json(status_code: u16, body: &Value) -> Self {
        let field = |name: &str| body.get(name).and_then(|v| v.as_str()).map(str::to_string);
        Self {
            status_code,
            message: field("message"),
            error: field("error"),
        }
    }

    /// 2xx status and `message == "success"`
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code) && self.message.as_deref() == Some(SUCCESS_MESSAGE)
    }
}

/// Anything that can carry a request to the processing service
#[async_trait]
pub trait ProcessingService: Send + Sync + Debug {
    /// POST `body` as JSON to `path` and parse the reply.
    ///
    /// Exactly one attempt; no retries happen at this level.
    async fn post_json(&self, path: &str, body: &Value) -> Result<ServiceReply, TransportError>;

    /// Check that the service answers at all
    async fn health_check(&self) -> Result<(), TransportError>;
}

pub mod http;

pub use http::HttpService;
