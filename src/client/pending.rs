//! Polling a submitted operation until the chain reports on it.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config;
use crate::error::{ensure, ErrorCode, Result};

use super::{OperationReceipt, Transport};

/// A submitted operation awaiting block inclusion.
///
/// Holds the fact hash to poll for and the node's acceptance body.
/// Distinct pending operations are fully independent — polling one implies
/// nothing about another, and no cross-operation ordering is provided.
pub struct PendingOperation<'a> {
    transport: &'a dyn Transport,
    fact_hash: String,
    accepted: Value,
}

impl std::fmt::Debug for PendingOperation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingOperation")
            .field("fact_hash", &self.fact_hash)
            .finish_non_exhaustive()
    }
}

impl<'a> PendingOperation<'a> {
    pub(crate) fn new(transport: &'a dyn Transport, fact_hash: String, accepted: Value) -> Self {
        Self {
            transport,
            fact_hash,
            accepted,
        }
    }

    /// The fact hash the chain will record the operation under.
    pub fn fact_hash(&self) -> &str {
        &self.fact_hash
    }

    /// The node's acceptance body, as returned by the submission call.
    pub fn accepted_body(&self) -> &Value {
        &self.accepted
    }

    /// Polls with the default timeout and interval.
    pub async fn wait_default(&self) -> Result<OperationReceipt> {
        self.wait(
            config::DEFAULT_WAIT_TIMEOUT_MS,
            config::DEFAULT_WAIT_INTERVAL_MS,
        )
        .await
    }

    /// Polls every `interval_ms` until the operation shows up in a block
    /// or `timeout_ms` elapses.
    ///
    /// Both values must be positive and the timeout strictly larger than
    /// the interval. A receipt is returned as soon as one exists — also
    /// when `in_state` is false; interpreting the failure `reason` is the
    /// caller's decision. Exceeding the timeout fails with `EC_TIME_OUT`;
    /// the loop has no other cancellation path.
    pub async fn wait(&self, timeout_ms: u64, interval_ms: u64) -> Result<OperationReceipt> {
        ensure(
            timeout_ms > 0,
            ErrorCode::InvalidFloat,
            "timeout must be a positive integer",
        )?;
        ensure(
            interval_ms > 0,
            ErrorCode::InvalidFloat,
            "interval must be a positive integer",
        )?;
        ensure(
            timeout_ms > interval_ms,
            ErrorCode::InvalidFloat,
            "timeout must be larger than interval",
        )?;

        let mut elapsed_ms = 0u64;
        while elapsed_ms < timeout_ms {
            if let Some(receipt) = self.transport.get_operation(&self.fact_hash).await? {
                if receipt.in_state {
                    info!(fact = %self.fact_hash, "operation is in state");
                } else {
                    warn!(
                        fact = %self.fact_hash,
                        reason = receipt.reason.as_deref().unwrap_or("unknown"),
                        "operation failed on chain"
                    );
                }
                return Ok(receipt);
            }
            debug!(fact = %self.fact_hash, elapsed_ms, "operation not yet in a block");
            tokio::time::sleep(Duration::from_millis(interval_ms)).await;
            elapsed_ms += interval_ms;
        }

        Err(crate::error::Error::detail(
            ErrorCode::TimeOut,
            format!("timeout reached ({} seconds)", timeout_ms as f64 / 1000.0),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use crate::client::{SendResponse, Transport};
    use crate::error::Error;

    /// Never finds the operation; counts the polls.
    struct NeverReady {
        polls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for NeverReady {
        async fn send(&self, _op: &Value, _headers: &[(String, String)]) -> Result<SendResponse> {
            Ok(SendResponse::Accepted { body: json!({}) })
        }

        async fn get_operation(&self, _fact_hash: &str) -> Result<Option<OperationReceipt>> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    /// Delivers a receipt after a fixed number of misses.
    struct ReadyAfter {
        misses: AtomicUsize,
        receipt: OperationReceipt,
    }

    #[async_trait]
    impl Transport for ReadyAfter {
        async fn send(&self, _op: &Value, _headers: &[(String, String)]) -> Result<SendResponse> {
            Ok(SendResponse::Accepted { body: json!({}) })
        }

        async fn get_operation(&self, _fact_hash: &str) -> Result<Option<OperationReceipt>> {
            if self.misses.load(Ordering::SeqCst) > 0 {
                self.misses.fetch_sub(1, Ordering::SeqCst);
                Ok(None)
            } else {
                Ok(Some(self.receipt.clone()))
            }
        }
    }

    fn pending(transport: &dyn Transport) -> PendingOperation<'_> {
        PendingOperation::new(transport, "fakehash".to_owned(), json!({}))
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_fires_after_one_or_two_polls() {
        let transport = NeverReady {
            polls: AtomicUsize::new(0),
        };
        let err = pending(&transport).wait(1500, 1000).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TimeOut);
        let polls = transport.polls.load(Ordering::SeqCst);
        assert!((1..=2).contains(&polls), "polled {polls} times");
    }

    #[tokio::test(start_paused = true)]
    async fn receipt_ends_the_loop_early() {
        let transport = ReadyAfter {
            misses: AtomicUsize::new(2),
            receipt: OperationReceipt {
                in_state: true,
                height: Some(42),
                ..Default::default()
            },
        };
        let receipt = pending(&transport).wait(10_000, 1_000).await.unwrap();
        assert!(receipt.in_state);
        assert_eq!(receipt.height, Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_receipt_is_returned_not_raised() {
        let transport = ReadyAfter {
            misses: AtomicUsize::new(0),
            receipt: OperationReceipt {
                in_state: false,
                reason: Some("Invalid signing".to_owned()),
                ..Default::default()
            },
        };
        let receipt = pending(&transport).wait(10_000, 1_000).await.unwrap();
        assert!(!receipt.in_state);
        assert_eq!(receipt.reason.as_deref(), Some("Invalid signing"));
    }

    #[tokio::test]
    async fn parameter_validation() {
        let transport = NeverReady {
            polls: AtomicUsize::new(0),
        };
        let p = pending(&transport);
        assert_eq!(p.wait(0, 1).await.unwrap_err().code, ErrorCode::InvalidFloat);
        assert_eq!(p.wait(10, 0).await.unwrap_err().code, ErrorCode::InvalidFloat);
        assert_eq!(
            p.wait(1000, 1000).await.unwrap_err().code,
            ErrorCode::InvalidFloat
        );
        // No validation failure may leak a poll.
        assert_eq!(transport.polls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        struct Failing;

        #[async_trait]
        impl Transport for Failing {
            async fn send(
                &self,
                _op: &Value,
                _headers: &[(String, String)],
            ) -> Result<SendResponse> {
                Ok(SendResponse::Accepted { body: json!({}) })
            }

            async fn get_operation(
                &self,
                _fact_hash: &str,
            ) -> Result<Option<OperationReceipt>> {
                Err(Error::detail(ErrorCode::Unknown, "connection refused"))
            }
        }

        let transport = Failing;
        let err = pending(&transport).wait(5_000, 1_000).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unknown);
    }
}
