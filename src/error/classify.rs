//! Classification of free-text node error messages.
//!
//! The node reports rejection reasons as prose. Integrations need structure,
//! so each known failure category carries a list of keyword substrings; a
//! message is classified by which categories' keywords it contains. The
//! override and collapse precedence below is a compatibility contract with
//! existing integrations and must not be reordered or generalized:
//!
//! - `DCODE`: a `CA_DISALLOW` match wins outright; otherwise more than one
//!   match collapses to `COMPLEX`, zero matches to `UNDEFINED`.
//! - `PCODE`: an `IV_BASE_NODE_OP` match wins outright; otherwise more than
//!   one match collapses to `AMBIGUOUS`, zero matches to `UNDEFINED`.
//!
//! Categories with an empty keyword list are sentinels (they only appear as
//! classification *results*) and never participate in matching.

/// One row of a node error-code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeCode {
    /// Stable short code, e.g. `"P02"` or `"D501"`.
    pub code: &'static str,
    /// Substrings that select this category. Empty for sentinel rows.
    pub keywords: &'static [&'static str],
    /// What the category means, for diagnostics.
    pub description: &'static str,
}

// ---------------------------------------------------------------------------
// PCODE — which validation phase on the node failed
// ---------------------------------------------------------------------------

/// Node process error codes, in match order.
pub static PCODE: &[NodeCode] = &[
    NodeCode {
        code: "P0A",
        keywords: &[],
        description: "Ambiguous error",
    },
    NodeCode {
        code: "P0N",
        keywords: &["Too Many Requests"],
        description: "Error from network",
    },
    NodeCode {
        code: "P00",
        keywords: &[],
        description: "Undefined error",
    },
    NodeCode {
        code: "P01",
        keywords: &["Invalid BaseOperation"],
        description: "Error from IsValid(BaseOperation)",
    },
    NodeCode {
        code: "P02",
        keywords: &["Invalid BaseNodeOperation"],
        description: "Error from IsValid(BaseNodeOperation)",
    },
    NodeCode {
        code: "P03",
        keywords: &["Invalid BaseState"],
        description: "Error from IsValid(BaseState)",
    },
    NodeCode {
        code: "P04",
        keywords: &["Invalid fact"],
        description: "Error from IsValid(Fact)",
    },
    NodeCode {
        code: "P05",
        keywords: &["Invalid item"],
        description: "Error from IsValid(Item)",
    },
    NodeCode {
        code: "P06",
        keywords: &["PreProcess"],
        description: "Error from PreProcess",
    },
    NodeCode {
        code: "P07",
        keywords: &["Decode Json"],
        description: "Error from DecodeJSON",
    },
    NodeCode {
        code: "P08",
        keywords: &["Decode Bson"],
        description: "Error from DecodeBSON",
    },
];

const PCODE_UNDEFINED: &str = "P00";
const PCODE_AMBIGUOUS: &str = "P0A";
const PCODE_IV_BASE_NODE_OP: &str = "P02";

// ---------------------------------------------------------------------------
// DCODE — which domain rule was violated
// ---------------------------------------------------------------------------

/// Node domain error codes, in match order.
pub static DCODE: &[NodeCode] = &[
    NodeCode {
        code: "D00A",
        keywords: &[],
        description: "Ambiguous error",
    },
    NodeCode {
        code: "D00C",
        keywords: &[],
        description: "Complex error with multiple DCODE",
    },
    NodeCode {
        code: "D00D",
        keywords: &[],
        description: "Operation dependent error",
    },
    NodeCode {
        code: "D000",
        keywords: &[],
        description: "Undefined error",
    },
    NodeCode {
        code: "D101",
        keywords: &[],
        description: "Empty or null data",
    },
    NodeCode {
        code: "D102",
        keywords: &["Array length"],
        description: "The provided array exceeds the allowed length.",
    },
    NodeCode {
        code: "D103",
        keywords: &["Value out of range"],
        description: "The variable exceeds the allowed range.",
    },
    NodeCode {
        code: "D104",
        keywords: &["Invalid value"],
        description: "Invalid string, insufficient balance, invalid state change etc.",
    },
    NodeCode {
        code: "D105",
        keywords: &["Duplicated value"],
        description: "The item contains duplicate values.",
    },
    NodeCode {
        code: "D106",
        keywords: &["Self targeted"],
        description: "Duplicate account addresses provided in an invalid manner.",
    },
    NodeCode {
        code: "D201",
        keywords: &["Invalid signing"],
        description: "The private key does not match the address, a node sign is \
                      required, or the multisig threshold is not met",
    },
    NodeCode {
        code: "D202",
        keywords: &["Invalid user signing"],
        description: "Alternative signature for an account-abstraction operation is not valid",
    },
    NodeCode {
        code: "D301",
        keywords: &["Account not authorized"],
        description: "The sender account does not have permission to execute the operation.",
    },
    NodeCode {
        code: "D302",
        keywords: &["Contract account not allowed"],
        description: "A contract account cannot be used as sender, receiver etc.",
    },
    NodeCode {
        code: "D303",
        keywords: &["Invalid Auth Type"],
        description: "Problem with authentication_id in an account-abstraction operation.",
    },
    NodeCode {
        code: "D304",
        keywords: &["Contract account restricted"],
        description: "Contract account balance is frozen; the owner cannot withdraw.",
    },
    NodeCode {
        code: "D401",
        keywords: &[],
        description: "Insufficient token or point balance.",
    },
    NodeCode {
        code: "D501",
        keywords: &["Currency not found"],
        description: "The currency cannot be found on the blockchain.",
    },
    NodeCode {
        code: "D502",
        keywords: &["Account not found", "Contract account not found"],
        description: "The account or contract account cannot be found on the blockchain.",
    },
    NodeCode {
        code: "D503",
        keywords: &["Service not found"],
        description: "The service cannot be found in the given contract.",
    },
    NodeCode {
        code: "D504",
        keywords: &["State not found"],
        description: "The state cannot be found on the blockchain.",
    },
    NodeCode {
        code: "D505",
        keywords: &["Currency exist"],
        description: "The currency already exists on the blockchain.",
    },
    NodeCode {
        code: "D506",
        keywords: &["Account exist", "Contract account exist"],
        description: "The account or contract account already exists on the blockchain.",
    },
    NodeCode {
        code: "D507",
        keywords: &["Service exist"],
        description: "The contract already contains the service.",
    },
    NodeCode {
        code: "D508",
        keywords: &["State exist"],
        description: "The state already exists on the blockchain.",
    },
    NodeCode {
        code: "D509",
        keywords: &["already in state"],
        description: "The operation already exists on the blockchain; check its fact hash.",
    },
];

const DCODE_UNDEFINED: &str = "D000";
const DCODE_COMPLEX: &str = "D00C";
const DCODE_CA_DISALLOW: &str = "D302";

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Collects, in table order, the code of every row with at least one
/// keyword contained in `message`. Sentinel rows never match.
fn find_codes(table: &[NodeCode], message: &str) -> Vec<&'static str> {
    table
        .iter()
        .filter(|row| !row.keywords.is_empty())
        .filter(|row| row.keywords.iter().any(|kw| message.contains(kw)))
        .map(|row| row.code)
        .collect()
}

/// Maps a node's free-text error message to a combined `P..D..` code.
///
/// Pure categorization only — no semantic recovery is attempted. A message
/// matching nothing in either table yields `"P00D000"`.
pub fn assign_code_from_error_message(message: &str) -> String {
    let mut pcodes = find_codes(PCODE, message);
    let mut dcodes = find_codes(DCODE, message);

    if pcodes.is_empty() {
        pcodes.push(PCODE_UNDEFINED);
    }
    if dcodes.is_empty() {
        dcodes.push(DCODE_UNDEFINED);
    }

    if dcodes.contains(&DCODE_CA_DISALLOW) {
        dcodes = vec![DCODE_CA_DISALLOW];
    } else if dcodes.len() > 1 {
        dcodes = vec![DCODE_COMPLEX];
    }

    if pcodes.contains(&PCODE_IV_BASE_NODE_OP) {
        pcodes = vec![PCODE_IV_BASE_NODE_OP];
    } else if pcodes.len() > 1 {
        pcodes = vec![PCODE_AMBIGUOUS];
    }

    format!("{}{}", pcodes[0], dcodes[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_message_is_undefined_in_both_spaces() {
        assert_eq!(assign_code_from_error_message("gremlins in the relay"), "P00D000");
    }

    #[test]
    fn single_match_per_space() {
        let code = assign_code_from_error_message(
            "processing failed: Invalid fact; Currency not found",
        );
        assert_eq!(code, "P04D501");
    }

    #[test]
    fn base_node_op_overrides_other_pcode_matches() {
        // "Too Many Requests" also matches the network category, but the
        // BaseNodeOperation category outranks everything else.
        let code =
            assign_code_from_error_message("Invalid BaseNodeOperation: Too Many Requests");
        assert!(code.starts_with("P02"));
    }

    #[test]
    fn multiple_pcode_matches_collapse_to_ambiguous() {
        let code = assign_code_from_error_message(
            "Invalid BaseOperation while PreProcess ran",
        );
        assert!(code.starts_with("P0A"));
    }

    #[test]
    fn multiple_dcode_matches_collapse_to_complex() {
        let code = assign_code_from_error_message(
            "Account not found; Service not found",
        );
        assert_eq!(code, "P00D00C");
    }

    #[test]
    fn ca_disallow_overrides_multi_match_collapse() {
        let code = assign_code_from_error_message(
            "Contract account restricted and Contract account not allowed",
        );
        assert_eq!(code, "P00D302");
    }

    #[test]
    fn both_keywords_of_one_row_count_once() {
        // Two keywords of the same category must not trigger the COMPLEX
        // collapse on their own.
        let code = assign_code_from_error_message(
            "Account not found, also Contract account not found",
        );
        assert_eq!(code, "P00D502");
    }

    #[test]
    fn sentinel_rows_never_match() {
        // No keyword list may be empty-string matched into everything.
        for row in PCODE.iter().chain(DCODE.iter()) {
            for kw in row.keywords {
                assert!(!kw.is_empty(), "row {} has an empty keyword", row.code);
            }
        }
    }

    #[test]
    fn combined_code_shape() {
        let code = assign_code_from_error_message("Invalid signing");
        assert_eq!(code, "P00D201");
    }
}
