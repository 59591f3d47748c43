//! # Protocol Constants
//!
//! Every chain-imposed limit the SDK enforces lives here. These values are
//! part of the network contract: an operation that violates one of them is
//! rejected by the chain anyway, so the SDK refuses it locally before it
//! ever reaches the transport.

use std::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// Operation Limits
// ---------------------------------------------------------------------------

/// Maximum serialized operation size in bytes, measured as the UTF-8 length
/// of the hinted JSON form. Anything larger fails the pre-flight size guard
/// and is never sent.
pub const MAX_OPERATION_SIZE: usize = 262_144;

/// Allowed number of items in a batch fact.
pub const ITEMS_IN_FACT: RangeInclusive<usize> = 1..=100;

/// Allowed number of amounts inside a single item.
pub const AMOUNTS_IN_ITEM: RangeInclusive<usize> = 1..=10;

/// Allowed number of weighted keys in a multisig account key set.
pub const KEYS_IN_ACCOUNT: RangeInclusive<usize> = 1..=100;

/// Allowed number of fact hashes in a single multi-operation query.
pub const FACT_HASHES_IN_QUERY: RangeInclusive<usize> = 1..=20;

// ---------------------------------------------------------------------------
// Key Parameters
// ---------------------------------------------------------------------------

/// Allowed weight of a single key in a key set.
pub const WEIGHT: RangeInclusive<u8> = 1..=100;

/// Allowed signing threshold of a key set.
pub const THRESHOLD: RangeInclusive<u8> = 1..=100;

/// Raw key material length in bytes (ed25519 seed and public key alike).
pub const KEY_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// String Forms
// ---------------------------------------------------------------------------

/// Suffix appended to regular account addresses.
pub const ADDRESS_SUFFIX: &str = "mca";

/// Suffix appended to consensus node addresses.
pub const NODE_ADDRESS_SUFFIX: &str = "sas";

/// Suffix appended to public key strings.
pub const PUBLIC_KEY_SUFFIX: &str = "mpu";

/// Suffix appended to private key strings.
pub const PRIVATE_KEY_SUFFIX: &str = "mpr";

/// Every suffix above is exactly this long.
pub const SUFFIX_LENGTH: usize = 3;

/// Total rendered address length, suffix included.
pub const ADDRESS_LENGTH: RangeInclusive<usize> = 40..=50;

/// Maximum byte length of a [`LongString`](crate::common::LongString).
pub const MAX_LONG_STRING_LEN: usize = 1_024;

/// Rendered fact hash length (base58 of a 32-byte digest).
pub const FACT_HASH_LENGTH: RangeInclusive<usize> = 43..=44;

// ---------------------------------------------------------------------------
// Hints
// ---------------------------------------------------------------------------

/// Version tag appended to every hint. Bumped only by a coordinated network
/// upgrade; the SDK never mixes versions within one process.
pub const HINT_VERSION: &str = "v0.0.1";

// ---------------------------------------------------------------------------
// Polling
// ---------------------------------------------------------------------------

/// Default total polling window when waiting for block inclusion, in
/// milliseconds.
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default pause between inclusion polls, in milliseconds.
pub const DEFAULT_WAIT_INTERVAL_MS: u64 = 1_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_have_declared_length() {
        for s in [
            ADDRESS_SUFFIX,
            NODE_ADDRESS_SUFFIX,
            PUBLIC_KEY_SUFFIX,
            PRIVATE_KEY_SUFFIX,
        ] {
            assert_eq!(s.len(), SUFFIX_LENGTH);
        }
    }

    #[test]
    fn suffixes_are_distinct() {
        let all = [
            ADDRESS_SUFFIX,
            NODE_ADDRESS_SUFFIX,
            PUBLIC_KEY_SUFFIX,
            PRIVATE_KEY_SUFFIX,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn ranges_are_sane() {
        assert!(ITEMS_IN_FACT.start() <= ITEMS_IN_FACT.end());
        assert!(AMOUNTS_IN_ITEM.start() <= AMOUNTS_IN_ITEM.end());
        assert!(KEYS_IN_ACCOUNT.start() <= KEYS_IN_ACCOUNT.end());
        assert!(*WEIGHT.start() >= 1 && *THRESHOLD.start() >= 1);
    }

    #[test]
    fn polling_defaults_compose() {
        // The wait loop requires timeout > interval; the defaults must
        // satisfy their own precondition.
        assert!(DEFAULT_WAIT_TIMEOUT_MS > DEFAULT_WAIT_INTERVAL_MS);
    }
}
