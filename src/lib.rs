// Copyright (c) 2026 the mitum-sdk authors. MIT License.
// See LICENSE for details.

//! # mitum-sdk — Client SDK for the Mitum blockchain
//!
//! Everything a client needs to put an operation on chain: build typed
//! facts, encode them canonically, sign them, ship them to a node, and
//! poll for the inclusion result. Nothing here talks to chain state — an
//! operation is validated structurally, signed locally, and judged
//! remotely.
//!
//! ## Architecture
//!
//! - **hint** — The type-tag registry. Every serialized entity
//!   self-identifies with a versioned hint string the node dispatches on.
//! - **common** — Primitive value types: addresses, amounts, currency ids,
//!   capped strings, timestamps, tokens. Validating constructors, canonical
//!   bytes, immutable values.
//! - **key** — Rendered keys, weighted multisig key sets with checksum
//!   addresses, and the Ed25519 keypair.
//! - **crypto** — SHA-256 content hashing and base58 rendering.
//! - **fact** — The fact contract and the currency-family facts. A fact is
//!   hashed at construction and immutable after.
//! - **operation** — The signing envelope: network binding, signature
//!   accumulation, the wire JSON projection.
//! - **client** — Pre-flight guards, the pluggable transport, and the
//!   inclusion-polling loop.
//! - **error** — Process error codes, node error classification, and the
//!   assertion helpers behind every validating constructor.
//! - **config** — Chain-imposed limits and protocol constants.
//!
//! ## The shape of a submission
//!
//! ```no_run
//! use mitum_sdk::client::{Client, HttpTransport};
//! use mitum_sdk::common::{Address, Amount, Token};
//! use mitum_sdk::fact::currency::{TransferFact, TransferItem};
//! use mitum_sdk::key::Keypair;
//! use mitum_sdk::operation::{NetworkId, Operation};
//!
//! # async fn demo() -> mitum_sdk::error::Result<()> {
//! let sender = Address::new("4rwpiYxm1oLB4K6FM4Ewjn9ggvMy9hN62mdxZyjrKa8Smca")?;
//! let receiver = Address::new("8gdEbdy7qaNoy6J8LXRdGmAenzkS5BH21qBqRM4KTmPBmca")?;
//! let amount = Amount::from_parts("100", "PEN")?;
//!
//! let fact = TransferFact::new(
//!     Token::random(),
//!     sender,
//!     vec![TransferItem::new(receiver, vec![amount])?],
//! )?;
//!
//! let mut operation = Operation::new(NetworkId::new("mitum")?, fact);
//! operation.sign(&Keypair::generate());
//!
//! let client = Client::new(HttpTransport::new("http://localhost:54320/".parse().unwrap()));
//! let pending = client.send(&operation).await?;
//! let receipt = pending.wait_default().await?;
//! assert!(receipt.in_state);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod common;
pub mod config;
pub mod crypto;
pub mod error;
pub mod fact;
pub mod hint;
pub mod key;
pub mod operation;
