//! HTTP transport over the node's digest API.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{Error, ErrorCode, Result};

use super::{NodeRejection, OperationReceipt, SendResponse, Transport};

/// The digest API wraps every payload in a `data` field; absent or null
/// data means "not recorded yet".
#[derive(Debug, Deserialize)]
struct DigestEnvelope {
    #[serde(default)]
    data: Option<OperationReceipt>,
}

/// Talks to a node's HTTP API, optionally through a delegate relay.
///
/// With a delegate configured, every request goes to the delegate with the
/// real target URL carried in the `uri` query parameter — the relaying
/// scheme the network's public gateways expect.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
    delegate: Option<Url>,
}

impl HttpTransport {
    /// Builds a transport against an API base URL.
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
            delegate: None,
        }
    }

    /// Routes all requests through a delegate relay.
    pub fn with_delegate(mut self, delegate: Url) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// The API base URL.
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let target = self.base.join(path).map_err(|e| {
            Error::detail(ErrorCode::NoApi, format!("bad API endpoint {path:?}: {e}"))
        })?;
        match &self.delegate {
            None => Ok(target),
            Some(delegate) => {
                let mut relayed = delegate.clone();
                relayed
                    .query_pairs_mut()
                    .append_pair("uri", target.as_str());
                Ok(relayed)
            }
        }
    }
}

fn transport_error(context: &str, err: reqwest::Error) -> Error {
    Error::detail(ErrorCode::Unknown, format!("{context}: {err}"))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, operation: &Value, headers: &[(String, String)]) -> Result<SendResponse> {
        let url = self.endpoint("builder/send")?;
        debug!(%url, "submitting operation");

        let mut request = self.client.post(url).json(operation);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error("send failed", e))?;
        let status = response.status();
        if status.is_success() {
            let body = response
                .json::<Value>()
                .await
                .map_err(|e| transport_error("bad acceptance body", e))?;
            Ok(SendResponse::Accepted { body })
        } else {
            let message = response.text().await.unwrap_or_default();
            Ok(SendResponse::Rejected(NodeRejection {
                status: status.as_u16(),
                message,
            }))
        }
    }

    async fn get_operation(&self, fact_hash: &str) -> Result<Option<OperationReceipt>> {
        let url = self.endpoint(&format!("block/operation/{fact_hash}"))?;
        debug!(%url, "polling operation");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error("lookup failed", e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let envelope = response
                    .json::<DigestEnvelope>()
                    .await
                    .map_err(|e| transport_error("bad receipt body", e))?;
                Ok(envelope.data)
            }
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(Error::detail(
                    ErrorCode::Unknown,
                    format!("node answered {status}: {message}"),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_against_the_base() {
        let transport = HttpTransport::new(Url::parse("http://localhost:54320/").unwrap());
        assert_eq!(
            transport.endpoint("builder/send").unwrap().as_str(),
            "http://localhost:54320/builder/send"
        );
        assert_eq!(
            transport.endpoint("block/operation/abc").unwrap().as_str(),
            "http://localhost:54320/block/operation/abc"
        );
    }

    #[test]
    fn delegate_wraps_the_target_url() {
        let transport = HttpTransport::new(Url::parse("http://node:54320/").unwrap())
            .with_delegate(Url::parse("http://relay:9000/relay").unwrap());
        let url = transport.endpoint("builder/send").unwrap();
        assert_eq!(url.host_str(), Some("relay"));
        let query = url.query().unwrap();
        assert!(query.starts_with("uri="));
        assert!(query.contains("builder%2Fsend"));
    }

    #[test]
    fn receipt_envelope_parses_null_data_as_none() {
        let absent: DigestEnvelope = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(absent.data.is_none());

        let present: DigestEnvelope = serde_json::from_str(
            r#"{"data": {"in_state": true, "height": 7, "reason": null}}"#,
        )
        .unwrap();
        let receipt = present.data.unwrap();
        assert!(receipt.in_state);
        assert_eq!(receipt.height, Some(7));
    }
}
