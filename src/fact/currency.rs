//! Currency-family facts.
//!
//! The account-originated intents (create-account, transfer, withdraw,
//! update-key) and the node-originated mint. Batch facts validate their
//! items before anything is hashed: item counts within range, per-item
//! amounts non-empty and currency-unique, and no duplicate target across
//! items in one fact.

use std::fmt;

use serde_json::{json, Value};

use crate::common::{Address, Amount, CurrencyId, Token};
use crate::config;
use crate::error::{ensure, ensure_no_duplicates, ensure_range_len, ErrorCode, Result};
use crate::hint::{CurrencyKind, Hint, OperationKind};
use crate::key::Keys;

use super::{base_hinted_json, extend_json, hash_parts, Fact, FactHash};

const fn item_hint(kind: CurrencyKind) -> Hint {
    // Compile-time assertion: evaluating this with a non-batch kind fails
    // the build, not the process.
    match kind.item_tag() {
        Some(tag) => Hint::new(tag),
        None => panic!("kind has no item tag"),
    }
}

const CREATE_ACCOUNT_ITEM_HINT: Hint = item_hint(CurrencyKind::CreateAccount);
const TRANSFER_ITEM_HINT: Hint = item_hint(CurrencyKind::Transfer);
const WITHDRAW_ITEM_HINT: Hint = item_hint(CurrencyKind::Withdraw);

// ---------------------------------------------------------------------------
// Shared item pieces
// ---------------------------------------------------------------------------

fn validate_amounts(amounts: &[Amount]) -> Result<()> {
    ensure_range_len(
        amounts.len(),
        &config::AMOUNTS_IN_ITEM,
        ErrorCode::InvalidAmounts,
        "item amounts",
    )?;
    ensure_no_duplicates(
        amounts.iter().map(|a| a.currency().to_string()),
        ErrorCode::InvalidAmounts,
        "item currency",
    )
}

fn amounts_bytes(amounts: &[Amount]) -> Vec<u8> {
    let mut buf = Vec::new();
    for amount in amounts {
        buf.extend_from_slice(&amount.to_bytes());
    }
    buf
}

fn amounts_json(amounts: &[Amount]) -> Vec<Value> {
    amounts.iter().map(Amount::to_hinted_json).collect()
}

// ---------------------------------------------------------------------------
// CreateAccountItem
// ---------------------------------------------------------------------------

/// One new account in a create-account batch: its key set and the initial
/// balances to fund it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountItem {
    keys: Keys,
    amounts: Vec<Amount>,
}

impl CreateAccountItem {
    /// Builds an item. Amount list must be non-empty, within range, and
    /// currency-unique.
    pub fn new(keys: Keys, amounts: Vec<Amount>) -> Result<Self> {
        validate_amounts(&amounts)?;
        Ok(Self { keys, amounts })
    }

    /// The address the new account will get — the batch-level dedup key.
    pub fn address(&self) -> Address {
        self.keys.address()
    }

    /// Canonical bytes: key set, then amounts in array order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.keys.to_bytes();
        buf.extend_from_slice(&amounts_bytes(&self.amounts));
        buf
    }

    /// The tagged JSON projection.
    pub fn to_hinted_json(&self) -> Value {
        json!({
            "_hint": CREATE_ACCOUNT_ITEM_HINT.to_string(),
            "keys": self.keys.to_hinted_json(),
            "amounts": amounts_json(&self.amounts),
        })
    }
}

// ---------------------------------------------------------------------------
// TransferItem / WithdrawItem
// ---------------------------------------------------------------------------

/// One receiver in a transfer batch with the amounts it gets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferItem {
    receiver: Address,
    amounts: Vec<Amount>,
}

impl TransferItem {
    /// Builds an item. Amount list must be non-empty, within range, and
    /// currency-unique.
    pub fn new(receiver: Address, amounts: Vec<Amount>) -> Result<Self> {
        validate_amounts(&amounts)?;
        Ok(Self { receiver, amounts })
    }

    /// The receiving address.
    pub fn receiver(&self) -> &Address {
        &self.receiver
    }

    /// Canonical bytes: receiver, then amounts in array order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.receiver.to_bytes();
        buf.extend_from_slice(&amounts_bytes(&self.amounts));
        buf
    }

    /// The tagged JSON projection.
    pub fn to_hinted_json(&self) -> Value {
        json!({
            "_hint": TRANSFER_ITEM_HINT.to_string(),
            "receiver": self.receiver.as_str(),
            "amounts": amounts_json(&self.amounts),
        })
    }
}

/// One withdrawal from a contract account in a withdraw batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawItem {
    target: Address,
    amounts: Vec<Amount>,
}

impl WithdrawItem {
    /// Builds an item. Amount list must be non-empty, within range, and
    /// currency-unique.
    pub fn new(target: Address, amounts: Vec<Amount>) -> Result<Self> {
        validate_amounts(&amounts)?;
        Ok(Self { target, amounts })
    }

    /// The contract account withdrawn from.
    pub fn target(&self) -> &Address {
        &self.target
    }

    /// Canonical bytes: target, then amounts in array order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.target.to_bytes();
        buf.extend_from_slice(&amounts_bytes(&self.amounts));
        buf
    }

    /// The tagged JSON projection.
    pub fn to_hinted_json(&self) -> Value {
        json!({
            "_hint": WITHDRAW_ITEM_HINT.to_string(),
            "target": self.target.as_str(),
            "amounts": amounts_json(&self.amounts),
        })
    }
}

// ---------------------------------------------------------------------------
// CreateAccountFact
// ---------------------------------------------------------------------------

/// Creates one or more accounts, funded by the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountFact {
    token: Token,
    sender: Address,
    items: Vec<CreateAccountItem>,
    hash: FactHash,
}

impl CreateAccountFact {
    /// Builds and hashes the fact. Item count must be within range and no
    /// two items may create the same address.
    pub fn new(token: Token, sender: Address, items: Vec<CreateAccountItem>) -> Result<Self> {
        ensure_range_len(
            items.len(),
            &config::ITEMS_IN_FACT,
            ErrorCode::InvalidItems,
            "create-account items",
        )?;
        ensure_no_duplicates(
            items.iter().map(|i| i.address().to_string()),
            ErrorCode::InvalidItems,
            "new account address",
        )?;
        let body = body_with_items(&sender, items.iter().map(CreateAccountItem::to_bytes));
        let hash = hash_parts(
            OperationKind::Currency(CurrencyKind::CreateAccount).fact_hint(),
            &token,
            &body,
        );
        Ok(Self {
            token,
            sender,
            items,
            hash,
        })
    }

    /// The funding account.
    pub fn sender(&self) -> &Address {
        &self.sender
    }

    /// The items, in declared order.
    pub fn items(&self) -> &[CreateAccountItem] {
        &self.items
    }
}

impl Fact for CreateAccountFact {
    fn hint(&self) -> Hint {
        OperationKind::Currency(CurrencyKind::CreateAccount).fact_hint()
    }

    fn operation_hint(&self) -> Hint {
        OperationKind::Currency(CurrencyKind::CreateAccount).operation_hint()
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn hash(&self) -> &FactHash {
        &self.hash
    }

    fn body_bytes(&self) -> Vec<u8> {
        body_with_items(&self.sender, self.items.iter().map(CreateAccountItem::to_bytes))
    }

    fn to_hinted_json(&self) -> Value {
        extend_json(
            base_hinted_json(self),
            json!({
                "sender": self.sender.as_str(),
                "items": self.items.iter().map(CreateAccountItem::to_hinted_json).collect::<Vec<_>>(),
            }),
        )
    }
}

// ---------------------------------------------------------------------------
// TransferFact
// ---------------------------------------------------------------------------

/// Transfers amounts from the sender to one or more receivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFact {
    token: Token,
    sender: Address,
    items: Vec<TransferItem>,
    hash: FactHash,
}

impl TransferFact {
    /// Builds and hashes the fact. Item count must be within range and no
    /// receiver may appear twice.
    pub fn new(token: Token, sender: Address, items: Vec<TransferItem>) -> Result<Self> {
        ensure_range_len(
            items.len(),
            &config::ITEMS_IN_FACT,
            ErrorCode::InvalidItems,
            "transfer items",
        )?;
        ensure_no_duplicates(
            items.iter().map(|i| i.receiver().to_string()),
            ErrorCode::InvalidItems,
            "receiver",
        )?;
        let body = body_with_items(&sender, items.iter().map(TransferItem::to_bytes));
        let hash = hash_parts(
            OperationKind::Currency(CurrencyKind::Transfer).fact_hint(),
            &token,
            &body,
        );
        Ok(Self {
            token,
            sender,
            items,
            hash,
        })
    }

    /// Builds a batch transfer from paired receiver/amount lists.
    ///
    /// The lists must be the same length; a mismatch is a construction
    /// failure raised before any item exists or anything is hashed.
    pub fn batch(
        token: Token,
        sender: Address,
        receivers: Vec<Address>,
        amounts: Vec<Vec<Amount>>,
    ) -> Result<Self> {
        ensure(
            receivers.len() == amounts.len(),
            ErrorCode::InvalidItems,
            format!(
                "receivers and amounts differ in length: {} vs {}",
                receivers.len(),
                amounts.len()
            ),
        )?;
        let items = receivers
            .into_iter()
            .zip(amounts)
            .map(|(receiver, amounts)| TransferItem::new(receiver, amounts))
            .collect::<Result<Vec<_>>>()?;
        Self::new(token, sender, items)
    }

    /// The paying account.
    pub fn sender(&self) -> &Address {
        &self.sender
    }

    /// The items, in declared order.
    pub fn items(&self) -> &[TransferItem] {
        &self.items
    }
}

impl Fact for TransferFact {
    fn hint(&self) -> Hint {
        OperationKind::Currency(CurrencyKind::Transfer).fact_hint()
    }

    fn operation_hint(&self) -> Hint {
        OperationKind::Currency(CurrencyKind::Transfer).operation_hint()
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn hash(&self) -> &FactHash {
        &self.hash
    }

    fn body_bytes(&self) -> Vec<u8> {
        body_with_items(&self.sender, self.items.iter().map(TransferItem::to_bytes))
    }

    fn to_hinted_json(&self) -> Value {
        extend_json(
            base_hinted_json(self),
            json!({
                "sender": self.sender.as_str(),
                "items": self.items.iter().map(TransferItem::to_hinted_json).collect::<Vec<_>>(),
            }),
        )
    }
}

// ---------------------------------------------------------------------------
// WithdrawFact
// ---------------------------------------------------------------------------

/// Withdraws amounts from one or more contract accounts the sender owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawFact {
    token: Token,
    sender: Address,
    items: Vec<WithdrawItem>,
    hash: FactHash,
}

impl WithdrawFact {
    /// Builds and hashes the fact. Item count must be within range and no
    /// target may appear twice.
    pub fn new(token: Token, sender: Address, items: Vec<WithdrawItem>) -> Result<Self> {
        ensure_range_len(
            items.len(),
            &config::ITEMS_IN_FACT,
            ErrorCode::InvalidItems,
            "withdraw items",
        )?;
        ensure_no_duplicates(
            items.iter().map(|i| i.target().to_string()),
            ErrorCode::InvalidItems,
            "withdraw target",
        )?;
        let body = body_with_items(&sender, items.iter().map(WithdrawItem::to_bytes));
        let hash = hash_parts(
            OperationKind::Currency(CurrencyKind::Withdraw).fact_hint(),
            &token,
            &body,
        );
        Ok(Self {
            token,
            sender,
            items,
            hash,
        })
    }

    /// The owning account.
    pub fn sender(&self) -> &Address {
        &self.sender
    }

    /// The items, in declared order.
    pub fn items(&self) -> &[WithdrawItem] {
        &self.items
    }
}

impl Fact for WithdrawFact {
    fn hint(&self) -> Hint {
        OperationKind::Currency(CurrencyKind::Withdraw).fact_hint()
    }

    fn operation_hint(&self) -> Hint {
        OperationKind::Currency(CurrencyKind::Withdraw).operation_hint()
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn hash(&self) -> &FactHash {
        &self.hash
    }

    fn body_bytes(&self) -> Vec<u8> {
        body_with_items(&self.sender, self.items.iter().map(WithdrawItem::to_bytes))
    }

    fn to_hinted_json(&self) -> Value {
        extend_json(
            base_hinted_json(self),
            json!({
                "sender": self.sender.as_str(),
                "items": self.items.iter().map(WithdrawItem::to_hinted_json).collect::<Vec<_>>(),
            }),
        )
    }
}

// ---------------------------------------------------------------------------
// UpdateKeyFact
// ---------------------------------------------------------------------------

/// Replaces the sender account's key set. Non-batch: one account, one new
/// key set, fees in one currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateKeyFact {
    token: Token,
    sender: Address,
    keys: Keys,
    currency: CurrencyId,
    hash: FactHash,
}

impl UpdateKeyFact {
    /// Builds and hashes the fact.
    pub fn new(token: Token, sender: Address, keys: Keys, currency: CurrencyId) -> Result<Self> {
        let body = update_key_body(&sender, &keys, &currency);
        let hash = hash_parts(
            OperationKind::Currency(CurrencyKind::UpdateKey).fact_hint(),
            &token,
            &body,
        );
        Ok(Self {
            token,
            sender,
            keys,
            currency,
            hash,
        })
    }

    /// The account whose keys change.
    pub fn sender(&self) -> &Address {
        &self.sender
    }

    /// The replacement key set.
    pub fn keys(&self) -> &Keys {
        &self.keys
    }
}

fn update_key_body(sender: &Address, keys: &Keys, currency: &CurrencyId) -> Vec<u8> {
    let mut buf = sender.to_bytes();
    buf.extend_from_slice(&keys.to_bytes());
    buf.extend_from_slice(&currency.to_bytes());
    buf
}

impl Fact for UpdateKeyFact {
    fn hint(&self) -> Hint {
        OperationKind::Currency(CurrencyKind::UpdateKey).fact_hint()
    }

    fn operation_hint(&self) -> Hint {
        OperationKind::Currency(CurrencyKind::UpdateKey).operation_hint()
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn hash(&self) -> &FactHash {
        &self.hash
    }

    fn body_bytes(&self) -> Vec<u8> {
        update_key_body(&self.sender, &self.keys, &self.currency)
    }

    fn to_hinted_json(&self) -> Value {
        extend_json(
            base_hinted_json(self),
            json!({
                "sender": self.sender.as_str(),
                "keys": self.keys.to_hinted_json(),
                "currency": self.currency.as_str(),
            }),
        )
    }
}

// ---------------------------------------------------------------------------
// MintFact
// ---------------------------------------------------------------------------

/// Mints new currency directly to a receiver. Node-originated: the token
/// is the issuing timestamp and there is no sender — the chain requires a
/// node signature instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintFact {
    token: Token,
    receiver: Address,
    amount: Amount,
    hash: FactHash,
}

impl MintFact {
    /// Builds and hashes the fact with the current time as token.
    pub fn new(receiver: Address, amount: Amount) -> Result<Self> {
        Self::with_token(Token::now(), receiver, amount)
    }

    /// Builds and hashes the fact with an explicit token, for callers that
    /// need reproducible facts.
    pub fn with_token(token: Token, receiver: Address, amount: Amount) -> Result<Self> {
        let body = mint_body(&receiver, &amount);
        let hash = hash_parts(
            OperationKind::Currency(CurrencyKind::Mint).fact_hint(),
            &token,
            &body,
        );
        Ok(Self {
            token,
            receiver,
            amount,
            hash,
        })
    }

    /// The receiving account.
    pub fn receiver(&self) -> &Address {
        &self.receiver
    }

    /// The minted amount.
    pub fn amount(&self) -> &Amount {
        &self.amount
    }
}

fn mint_body(receiver: &Address, amount: &Amount) -> Vec<u8> {
    let mut buf = receiver.to_bytes();
    buf.extend_from_slice(&amount.to_bytes());
    buf
}

impl Fact for MintFact {
    fn hint(&self) -> Hint {
        OperationKind::Currency(CurrencyKind::Mint).fact_hint()
    }

    fn operation_hint(&self) -> Hint {
        OperationKind::Currency(CurrencyKind::Mint).operation_hint()
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn hash(&self) -> &FactHash {
        &self.hash
    }

    fn body_bytes(&self) -> Vec<u8> {
        mint_body(&self.receiver, &self.amount)
    }

    fn to_hinted_json(&self) -> Value {
        extend_json(
            base_hinted_json(self),
            json!({
                "receiver": self.receiver.as_str(),
                "amount": self.amount.to_hinted_json(),
            }),
        )
    }
}

impl fmt::Display for MintFact {
    /// `"<receiver>-<currency>"` — a log-friendly label, not a hash and
    /// not security-relevant.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.receiver, self.amount.currency())
    }
}

fn body_with_items<I>(sender: &Address, items: I) -> Vec<u8>
where
    I: Iterator<Item = Vec<u8>>,
{
    let mut buf = sender.to_bytes();
    for item in items {
        buf.extend_from_slice(&item);
    }
    buf
}
