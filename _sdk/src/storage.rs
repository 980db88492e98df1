//! Ledger access for chaincode
//!
//! [`Ledger`] is the raw key-value collaborator the host provides. [`Storage`]
//! layers JSON encoding on top so records stay self-describing on the ledger.

use crate::context::Context;
use crate::error::{ContractError, ContractResult};
use crate::ffi;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Raw key-value state exposed by the host runtime.
///
/// `get` on a key that was never written returns empty bytes on the Silica
/// host; implementations must not invent a value for missing keys.
pub trait Ledger {
    fn put(&mut self, key: &str, value: &[u8]) -> ContractResult<()>;

    fn get(&self, key: &str) -> ContractResult<Vec<u8>>;
}

impl<L: Ledger + ?Sized> Ledger for &mut L {
    fn put(&mut self, key: &str, value: &[u8]) -> ContractResult<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> ContractResult<Vec<u8>> {
        (**self).get(key)
    }
}

/// Ledger backed by the host `state_read` / `state_write` imports
#[derive(Clone, Debug)]
pub struct HostLedger {
    account: String,
}

impl HostLedger {
    /// Bind to the state of the contract executing in `ctx`.
    pub fn new(ctx: &Context) -> Self {
        Self {
            account: String::from(ctx.contract_address()),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }
}

impl Ledger for HostLedger {
    fn put(&mut self, key: &str, value: &[u8]) -> ContractResult<()> {
        ffi::write_storage(&self.account, key, value)
    }

    fn get(&self, key: &str) -> ContractResult<Vec<u8>> {
        ffi::read_storage(&self.account, key)
    }
}

/// Typed view over a [`Ledger`]
pub struct Storage<L> {
    ledger: L,
}

impl<L: Ledger> Storage<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    /// Get a value, `None` when the key holds no bytes
    pub fn get<T>(&self, key: &str) -> ContractResult<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let data = self.ledger.get(key)?;
        if data.is_empty() {
            return Ok(None);
        }
        let value =
            serde_json::from_slice(&data).map_err(|_| ContractError::DeserializationFailed)?;
        Ok(Some(value))
    }

    /// Encode and store a value
    pub fn set<T>(&mut self, key: &str, value: &T) -> ContractResult<()>
    where
        T: Serialize,
    {
        let data = encode(value)?;
        self.ledger.put(key, &data)
    }

    /// Read the stored bytes untouched
    pub fn get_raw(&self, key: &str) -> ContractResult<Vec<u8>> {
        self.ledger.get(key)
    }

    pub fn put_raw(&mut self, key: &str, value: &[u8]) -> ContractResult<()> {
        self.ledger.put(key, value)
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn into_inner(self) -> L {
        self.ledger
    }
}

/// Encode a value in the ledger wire format (JSON)
pub fn encode<T: Serialize>(value: &T) -> ContractResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|_| ContractError::SerializationFailed)
}
