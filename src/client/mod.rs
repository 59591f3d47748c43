//! # Client
//!
//! Submission and inclusion-polling over a pluggable [`Transport`]. The
//! pre-flight guards live here, not in the transport: an unsigned or
//! oversized operation fails locally with a typed error and the transport
//! is never invoked.

mod http;
mod pending;

pub use http::HttpTransport;
pub use pending::PendingOperation;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::config;
use crate::error::{assign_code_from_error_message, ensure, Error, ErrorCode, Result};
use crate::fact::Fact;
use crate::operation::Operation;

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// What the node reports once an operation is found in a block.
///
/// `in_state == false` means the operation was processed and rejected;
/// `reason` then carries the node's free-text explanation, classifiable
/// via [`assign_code_from_error_message`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationReceipt {
    /// Whether the operation took effect.
    #[serde(default)]
    pub in_state: bool,
    /// Failure reason when `in_state` is false.
    #[serde(default)]
    pub reason: Option<String>,
    /// Block height containing the operation.
    #[serde(default)]
    pub height: Option<u64>,
    /// When the containing block was confirmed.
    #[serde(default)]
    pub confirmed_at: Option<String>,
    /// Index of the operation within its block.
    #[serde(default)]
    pub index: Option<u64>,
    /// The operation as the node recorded it.
    #[serde(default)]
    pub operation: Option<Value>,
}

/// A node's rejection of a submission, before any block was involved.
#[derive(Debug, Clone)]
pub struct NodeRejection {
    /// HTTP status the node answered with.
    pub status: u16,
    /// The node's free-text error message.
    pub message: String,
}

/// Outcome of handing an operation to the node.
#[derive(Debug, Clone)]
pub enum SendResponse {
    /// The node accepted the operation into its mempool.
    Accepted {
        /// The node's acceptance body, as returned.
        body: Value,
    },
    /// The node refused the operation outright.
    Rejected(NodeRejection),
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// The wire collaborator: ships hinted JSON out, pulls receipts back.
///
/// Implementations own their endpoint configuration (API base, delegate).
/// [`get_operation`](Transport::get_operation) returns `None` while the
/// fact has not yet been recorded in a block.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Submits a hinted operation.
    async fn send(&self, operation: &Value, headers: &[(String, String)]) -> Result<SendResponse>;

    /// Looks up an operation by its fact hash.
    async fn get_operation(&self, fact_hash: &str) -> Result<Option<OperationReceipt>>;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Submits operations over a transport, enforcing the pre-flight guards.
#[derive(Debug)]
pub struct Client<T: Transport> {
    transport: T,
}

impl<T: Transport> Client<T> {
    /// Wraps a transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submits a signed operation and returns a handle for polling its
    /// inclusion.
    ///
    /// Guards, in order, before the transport sees anything:
    /// - `EC_EMPTY_SIGN` when the operation carries no signature;
    /// - `EC_OP_SIZE_EXCEEDED` when the wire form exceeds
    ///   [`config::MAX_OPERATION_SIZE`] bytes.
    ///
    /// A node rejection surfaces as `EC_TRANSACTION_REVERTED`, its message
    /// annotated with the classified `P..D..` code.
    pub async fn send<F: Fact>(&self, operation: &Operation<F>) -> Result<PendingOperation<'_>> {
        self.send_with_headers(operation, &[]).await
    }

    /// [`send`](Self::send) with extra request headers.
    pub async fn send_with_headers<F: Fact>(
        &self,
        operation: &Operation<F>,
        headers: &[(String, String)],
    ) -> Result<PendingOperation<'_>> {
        ensure(
            operation.is_signed(),
            ErrorCode::EmptySign,
            "signature is required before sending the operation",
        )?;
        let hinted = operation.to_hinted_json();
        let size = hinted.to_string().len();
        ensure(
            size <= config::MAX_OPERATION_SIZE,
            ErrorCode::OpSizeExceeded,
            format!(
                "operation is {size} bytes, the allowed limit is {} bytes",
                config::MAX_OPERATION_SIZE
            ),
        )?;

        let fact_hash = operation.fact().hash().to_string();
        match self.transport.send(&hinted, headers).await? {
            SendResponse::Accepted { body } => {
                info!(fact = %fact_hash, "operation accepted by the node");
                Ok(PendingOperation::new(&self.transport, fact_hash, body))
            }
            SendResponse::Rejected(rejection) => {
                let code = assign_code_from_error_message(&rejection.message);
                warn!(
                    fact = %fact_hash,
                    status = rejection.status,
                    code = %code,
                    "operation rejected by the node"
                );
                Err(Error::detail(
                    ErrorCode::TransactionReverted,
                    format!("[{code}] {}", rejection.message),
                ))
            }
        }
    }

    /// Looks up an operation by fact hash. `None` means not yet recorded
    /// in a block.
    pub async fn get_operation(&self, fact_hash: &str) -> Result<Option<OperationReceipt>> {
        self.transport.get_operation(fact_hash).await
    }

    /// Looks up several operations by fact hash, skipping the ones not yet
    /// recorded.
    ///
    /// The hash list is validated up front: within
    /// [`config::FACT_HASHES_IN_QUERY`], duplicate-free, and every entry a
    /// well-formed rendered fact hash — any violation fails before the
    /// first lookup.
    pub async fn get_operations(&self, fact_hashes: &[String]) -> Result<Vec<OperationReceipt>> {
        crate::error::ensure_range_len(
            fact_hashes.len(),
            &config::FACT_HASHES_IN_QUERY,
            ErrorCode::InvalidFactHash,
            "fact hashes",
        )?;
        crate::error::ensure_no_duplicates(
            fact_hashes.iter(),
            ErrorCode::InvalidFactHash,
            "fact hash",
        )?;
        for hash in fact_hashes {
            crate::fact::FactHash::parse(hash)?;
        }

        let mut receipts = Vec::new();
        for hash in fact_hashes {
            if let Some(receipt) = self.transport.get_operation(hash).await? {
                receipts.push(receipt);
            }
        }
        Ok(receipts)
    }
}
