//! The hint registry: canonical type tags for every operation kind.
//!
//! One enum per operation family, one arm per kind. Every kind has a fact
//! tag and an operation tag; batch kinds additionally have an item tag.
//! Tags must match the network's decoder byte-for-byte — treat every
//! string below as frozen.

use super::{Hint, Role};

macro_rules! family {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $kind:ident => { fact: $fact:literal, operation: $op:literal $(, item: $item:literal)? } ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $kind, )+
        }

        impl $name {
            /// Tag of this kind's fact.
            pub const fn fact_tag(self) -> &'static str {
                match self {
                    $( Self::$kind => $fact, )+
                }
            }

            /// Tag of this kind's operation envelope.
            pub const fn operation_tag(self) -> &'static str {
                match self {
                    $( Self::$kind => $op, )+
                }
            }

            /// Tag of this kind's batch item, when the kind is batched.
            pub const fn item_tag(self) -> Option<&'static str> {
                match self {
                    $( Self::$kind => family!(@item $($item)?), )+
                }
            }
        }
    };
    (@item $item:literal) => { Some($item) };
    (@item) => { None };
}

family! {
    /// Currency-family kinds, including the contract-account extension.
    CurrencyKind {
        CreateAccount => {
            fact: "mitum-currency-create-account-operation-fact",
            operation: "mitum-currency-create-account-operation",
            item: "mitum-currency-create-account-multiple-amounts"
        },
        UpdateKey => {
            fact: "mitum-currency-update-key-operation-fact",
            operation: "mitum-currency-update-key-operation"
        },
        Transfer => {
            fact: "mitum-currency-transfer-operation-fact",
            operation: "mitum-currency-transfer-operation",
            item: "mitum-currency-transfer-item-multi-amounts"
        },
        RegisterCurrency => {
            fact: "mitum-currency-register-currency-operation-fact",
            operation: "mitum-currency-register-currency-operation"
        },
        UpdateCurrency => {
            fact: "mitum-currency-update-currency-operation-fact",
            operation: "mitum-currency-update-currency-operation"
        },
        Mint => {
            fact: "mitum-currency-mint-operation-fact",
            operation: "mitum-currency-mint-operation"
        },
        CreateContractAccount => {
            fact: "mitum-extension-create-contract-account-operation-fact",
            operation: "mitum-extension-create-contract-account-operation",
            item: "mitum-extension-create-contract-account-multiple-amounts"
        },
        Withdraw => {
            fact: "mitum-extension-withdraw-operation-fact",
            operation: "mitum-extension-withdraw-operation",
            item: "mitum-extension-contract-account-withdraw-multi-amounts"
        },
        UpdateHandler => {
            fact: "mitum-extension-update-handler-operation-fact",
            operation: "mitum-extension-update-handler-operation"
        },
    }
}

family! {
    /// Fungible-token contract kinds.
    TokenKind {
        RegisterModel => {
            fact: "mitum-token-register-model-operation-fact",
            operation: "mitum-token-register-model-operation"
        },
        Mint => {
            fact: "mitum-token-mint-operation-fact",
            operation: "mitum-token-mint-operation"
        },
        Transfer => {
            fact: "mitum-token-transfer-operation-fact",
            operation: "mitum-token-transfer-operation"
        },
        Transfers => {
            fact: "mitum-token-transfers-operation-fact",
            operation: "mitum-token-transfers-operation",
            item: "mitum-token-transfers-item"
        },
        Approve => {
            fact: "mitum-token-approve-operation-fact",
            operation: "mitum-token-approve-operation"
        },
        Approves => {
            fact: "mitum-token-approves-operation-fact",
            operation: "mitum-token-approves-operation",
            item: "mitum-token-approves-item"
        },
        Burn => {
            fact: "mitum-token-burn-operation-fact",
            operation: "mitum-token-burn-operation"
        },
        TransferFrom => {
            fact: "mitum-token-transfer-from-operation-fact",
            operation: "mitum-token-transfer-from-operation"
        },
        TransfersFrom => {
            fact: "mitum-token-transfers-from-operation-fact",
            operation: "mitum-token-transfers-from-operation",
            item: "mitum-token-transfers-from-item"
        },
    }
}

family! {
    /// Point contract kinds. Structurally the token family under another
    /// prefix.
    PointKind {
        RegisterModel => {
            fact: "mitum-point-register-model-operation-fact",
            operation: "mitum-point-register-model-operation"
        },
        Mint => {
            fact: "mitum-point-mint-operation-fact",
            operation: "mitum-point-mint-operation"
        },
        Transfer => {
            fact: "mitum-point-transfer-operation-fact",
            operation: "mitum-point-transfer-operation"
        },
        Transfers => {
            fact: "mitum-point-transfers-operation-fact",
            operation: "mitum-point-transfers-operation",
            item: "mitum-point-transfers-item"
        },
        Approve => {
            fact: "mitum-point-approve-operation-fact",
            operation: "mitum-point-approve-operation"
        },
        Approves => {
            fact: "mitum-point-approves-operation-fact",
            operation: "mitum-point-approves-operation",
            item: "mitum-point-approves-item"
        },
        Burn => {
            fact: "mitum-point-burn-operation-fact",
            operation: "mitum-point-burn-operation"
        },
        TransferFrom => {
            fact: "mitum-point-transfer-from-operation-fact",
            operation: "mitum-point-transfer-from-operation"
        },
        TransfersFrom => {
            fact: "mitum-point-transfers-from-operation-fact",
            operation: "mitum-point-transfers-from-operation",
            item: "mitum-point-transfers-from-item"
        },
    }
}

family! {
    /// NFT contract kinds.
    NftKind {
        RegisterModel => {
            fact: "mitum-nft-register-model-operation-fact",
            operation: "mitum-nft-register-model-operation"
        },
        UpdateModelConfig => {
            fact: "mitum-nft-update-model-config-operation-fact",
            operation: "mitum-nft-update-model-config-operation"
        },
        Mint => {
            fact: "mitum-nft-mint-operation-fact",
            operation: "mitum-nft-mint-operation",
            item: "mitum-nft-mint-item"
        },
        ApproveAll => {
            fact: "mitum-nft-approve-all-operation-fact",
            operation: "mitum-nft-approve-all-operation",
            item: "mitum-nft-approve-all-item"
        },
        Approve => {
            fact: "mitum-nft-approve-operation-fact",
            operation: "mitum-nft-approve-operation",
            item: "mitum-nft-approve-item"
        },
        Transfer => {
            fact: "mitum-nft-transfer-operation-fact",
            operation: "mitum-nft-transfer-operation",
            item: "mitum-nft-transfer-item"
        },
        AddSignature => {
            fact: "mitum-nft-add-signature-operation-fact",
            operation: "mitum-nft-add-signature-operation",
            item: "mitum-nft-add-signature-item"
        },
    }
}

family! {
    /// DAO contract kinds.
    DaoKind {
        RegisterModel => {
            fact: "mitum-dao-register-model-operation-fact",
            operation: "mitum-dao-register-model-operation"
        },
        UpdateModelConfig => {
            fact: "mitum-dao-update-model-config-operation-fact",
            operation: "mitum-dao-update-model-config-operation"
        },
        Propose => {
            fact: "mitum-dao-propose-operation-fact",
            operation: "mitum-dao-propose-operation"
        },
        CancelProposal => {
            fact: "mitum-dao-cancel-proposal-operation-fact",
            operation: "mitum-dao-cancel-proposal-operation"
        },
        Register => {
            fact: "mitum-dao-register-operation-fact",
            operation: "mitum-dao-register-operation"
        },
        PreSnap => {
            fact: "mitum-dao-pre-snap-operation-fact",
            operation: "mitum-dao-pre-snap-operation"
        },
        PostSnap => {
            fact: "mitum-dao-post-snap-operation-fact",
            operation: "mitum-dao-post-snap-operation"
        },
        Vote => {
            fact: "mitum-dao-vote-operation-fact",
            operation: "mitum-dao-vote-operation"
        },
        Execute => {
            fact: "mitum-dao-execute-operation-fact",
            operation: "mitum-dao-execute-operation"
        },
    }
}

family! {
    /// Verifiable-credential contract kinds.
    CredentialKind {
        RegisterModel => {
            fact: "mitum-credential-register-model-operation-fact",
            operation: "mitum-credential-register-model-operation"
        },
        AddTemplate => {
            fact: "mitum-credential-add-template-operation-fact",
            operation: "mitum-credential-add-template-operation"
        },
        Issue => {
            fact: "mitum-credential-issue-operation-fact",
            operation: "mitum-credential-issue-operation",
            item: "mitum-credential-issue-item"
        },
        Revoke => {
            fact: "mitum-credential-revoke-operation-fact",
            operation: "mitum-credential-revoke-operation",
            item: "mitum-credential-revoke-item"
        },
    }
}

family! {
    /// Data-storage contract kinds.
    StorageKind {
        RegisterModel => {
            fact: "mitum-storage-register-model-operation-fact",
            operation: "mitum-storage-register-model-operation"
        },
        CreateData => {
            fact: "mitum-storage-create-data-operation-fact",
            operation: "mitum-storage-create-data-operation"
        },
        CreateDatas => {
            fact: "mitum-storage-create-datas-operation-fact",
            operation: "mitum-storage-create-datas-operation",
            item: "mitum-storage-create-datas-item"
        },
        DeleteData => {
            fact: "mitum-storage-delete-data-operation-fact",
            operation: "mitum-storage-delete-data-operation"
        },
        UpdateData => {
            fact: "mitum-storage-update-data-operation-fact",
            operation: "mitum-storage-update-data-operation"
        },
        UpdateDatas => {
            fact: "mitum-storage-update-datas-operation-fact",
            operation: "mitum-storage-update-datas-operation",
            item: "mitum-storage-update-datas-item"
        },
    }
}

family! {
    /// Trusted-timestamp contract kinds.
    TimestampKind {
        RegisterModel => {
            fact: "mitum-timestamp-register-model-operation-fact",
            operation: "mitum-timestamp-register-model-operation"
        },
        Issue => {
            fact: "mitum-timestamp-issue-operation-fact",
            operation: "mitum-timestamp-issue-operation"
        },
    }
}

family! {
    /// Payment contract kinds.
    PaymentKind {
        RegisterModel => {
            fact: "mitum-payment-register-model-operation-fact",
            operation: "mitum-payment-register-model-operation"
        },
        Deposit => {
            fact: "mitum-payment-deposit-operation-fact",
            operation: "mitum-payment-deposit-operation"
        },
        UpdateAccountSetting => {
            fact: "mitum-payment-update-account-setting-operation-fact",
            operation: "mitum-payment-update-account-setting-operation"
        },
        Withdraw => {
            fact: "mitum-payment-withdraw-operation-fact",
            operation: "mitum-payment-withdraw-operation"
        },
        Transfer => {
            fact: "mitum-payment-transfer-operation-fact",
            operation: "mitum-payment-transfer-operation"
        },
    }
}

// ---------------------------------------------------------------------------
// OperationKind
// ---------------------------------------------------------------------------

/// Any operation kind, across all families.
///
/// The single entry point for `(kind, role) -> Hint` resolution. A `None`
/// from [`resolve`](Self::resolve) means the kind has no tag for that role
/// — a programmer error at the call site, not a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Currency(CurrencyKind),
    Token(TokenKind),
    Point(PointKind),
    Nft(NftKind),
    Dao(DaoKind),
    Credential(CredentialKind),
    Storage(StorageKind),
    Timestamp(TimestampKind),
    Payment(PaymentKind),
}

impl OperationKind {
    /// The raw tag for the given role.
    pub const fn tag(self, role: Role) -> Option<&'static str> {
        macro_rules! per_family {
            ($kind:expr) => {
                match role {
                    Role::Fact => Some($kind.fact_tag()),
                    Role::Operation => Some($kind.operation_tag()),
                    Role::Item => $kind.item_tag(),
                }
            };
        }
        match self {
            Self::Currency(k) => per_family!(k),
            Self::Token(k) => per_family!(k),
            Self::Point(k) => per_family!(k),
            Self::Nft(k) => per_family!(k),
            Self::Dao(k) => per_family!(k),
            Self::Credential(k) => per_family!(k),
            Self::Storage(k) => per_family!(k),
            Self::Timestamp(k) => per_family!(k),
            Self::Payment(k) => per_family!(k),
        }
    }

    /// The [`Hint`] for the given role.
    pub fn resolve(self, role: Role) -> Option<Hint> {
        self.tag(role).map(Hint::new)
    }

    /// The raw fact tag. Every kind has one.
    pub const fn fact_tag(self) -> &'static str {
        match self {
            Self::Currency(k) => k.fact_tag(),
            Self::Token(k) => k.fact_tag(),
            Self::Point(k) => k.fact_tag(),
            Self::Nft(k) => k.fact_tag(),
            Self::Dao(k) => k.fact_tag(),
            Self::Credential(k) => k.fact_tag(),
            Self::Storage(k) => k.fact_tag(),
            Self::Timestamp(k) => k.fact_tag(),
            Self::Payment(k) => k.fact_tag(),
        }
    }

    /// The raw operation tag. Every kind has one.
    pub const fn operation_tag(self) -> &'static str {
        match self {
            Self::Currency(k) => k.operation_tag(),
            Self::Token(k) => k.operation_tag(),
            Self::Point(k) => k.operation_tag(),
            Self::Nft(k) => k.operation_tag(),
            Self::Dao(k) => k.operation_tag(),
            Self::Credential(k) => k.operation_tag(),
            Self::Storage(k) => k.operation_tag(),
            Self::Timestamp(k) => k.operation_tag(),
            Self::Payment(k) => k.operation_tag(),
        }
    }

    /// The fact hint. Every kind has one.
    pub fn fact_hint(self) -> Hint {
        Hint::new(self.fact_tag())
    }

    /// The operation-envelope hint. Every kind has one.
    pub fn operation_hint(self) -> Hint {
        Hint::new(self.operation_tag())
    }

    /// The batch-item hint, for kinds that are batched.
    pub fn item_hint(self) -> Option<Hint> {
        self.resolve(Role::Item)
    }
}
