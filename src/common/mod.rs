//! Primitive value types.
//!
//! Canonical wrappers for everything a fact is made of: addresses,
//! arbitrary-precision amounts, currency identifiers, capped strings, and
//! timestamps. Each type exposes a validating constructor, a canonical
//! byte encoding, and (where the wire form is tagged) a hinted JSON
//! projection. All of them are immutable after construction — there is no
//! way to hold one in an invalid state.

mod address;
mod big;
mod currency;
mod string;
mod time;

pub use address::{Address, NodeAddress};
pub use big::Big;
pub use currency::{Amount, CurrencyId};
pub use string::LongString;
pub use time::{TimeStamp, Token};
