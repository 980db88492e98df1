//! Business Registry
//!
//! Chaincode that seeds a single business record into the ledger key-value
//! state and serves it back by ID.
//!
//! ## Entry Points
//! - `init` - Write the seed business record (also reachable as invoke `init`)
//! - `invoke` - Dispatch state-changing functions by name
//! - `query` - Dispatch read-only functions by name (`getBusiness`)
//! - `run` - Legacy alias for `invoke`
//!
//! Every export reads a postcard [`Invocation`] from the call data, returns `0`
//! on success and the error's status code otherwise. Query payloads are passed
//! back through the host return-data channel.

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

#[cfg(target_arch = "wasm32")]
use alloc::boxed::Box;

use chaincode_sdk::prelude::*;

/// Invoke function that (re)writes the seed record
pub const FN_INIT: &str = "init";

/// Query function that reads one business by ID
pub const FN_GET_BUSINESS: &str = "getBusiness";

/// Position of the business ID in `getBusiness` arguments.
///
/// Deployed clients send the ID as the second argument, so index 1 is kept.
pub const GET_BUSINESS_ID_ARG: usize = 1;

/// Status returned by an export that completed without error
pub const STATUS_OK: i32 = 0;

const SEED_ID: &str = "B1";
const SEED_NAME: &str = "Local Bank";
const SEED_STREET: &str = "123 Elm Street";
const SEED_ZIP: &str = "2345";

/// Business record as stored on the ledger.
///
/// The wire names of `street` and `zip` are `NumberOfTransactions` and
/// `Status`; existing ledger entries use them, so they must not change.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Business {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "NumberOfTransactions")]
    pub street: String,
    #[serde(rename = "Status")]
    pub zip: String,
}

impl Business {
    /// The record written on initialization
    pub fn seed() -> Self {
        Self {
            id: SEED_ID.to_string(),
            name: SEED_NAME.to_string(),
            street: SEED_STREET.to_string(),
            zip: SEED_ZIP.to_string(),
        }
    }
}

/// Record store handler over an injected ledger.
///
/// Holds no state of its own; every call goes straight to the ledger.
pub struct RecordStore<L> {
    storage: Storage<L>,
}

impl<L: Ledger> RecordStore<L> {
    pub fn new(ledger: L) -> Self {
        Self {
            storage: Storage::new(ledger),
        }
    }

    /// Write the seed business under its own ID, overwriting any previous value.
    pub fn initialize(&mut self) -> ContractResult<()> {
        let bank = Business::seed();

        if let Err(err) = self.storage.set(&bank.id, &bank) {
            log("Error creating business during initialization");
            return Err(err);
        }
        Ok(())
    }

    /// Run a state-changing function by name.
    pub fn invoke(&mut self, function: &str, args: &[String]) -> ContractResult<Vec<u8>> {
        log(&format!("invoke is running {}", function));

        let result = Self::invoke_router()?.dispatch(self, function, args);
        if let Err(ContractError::UnknownFunction(_)) = &result {
            log(&format!("invoke did not find func: {}", function));
        }
        result
    }

    /// Run a read-only function by name.
    pub fn query(&mut self, function: &str, args: &[String]) -> ContractResult<Vec<u8>> {
        log(&format!("query is running {}", function));

        let result = Self::query_router()?.dispatch(self, function, args);
        if let Err(ContractError::UnknownQuery(_)) = &result {
            log(&format!("query did not find func: {}", function));
        }
        result
    }

    /// Raw bytes stored under `id`.
    ///
    /// A key that was never written yields whatever the ledger returns for it
    /// (empty bytes on the Silica host).
    pub fn get_record(&self, id: &str) -> ContractResult<Vec<u8>> {
        log("Start getBusiness");
        log(&format!("Looking for business with ID {}", id));

        self.storage.get_raw(id).map_err(|source| {
            log("Failed to get business from ledger");
            ContractError::RecordFetch {
                id: id.to_string(),
                source: Box::new(source),
            }
        })
    }

    pub fn ledger(&self) -> &L {
        self.storage.ledger()
    }

    pub fn into_ledger(self) -> L {
        self.storage.into_inner()
    }

    fn invoke_router() -> ContractResult<Router<Self>> {
        Router::new(EntryKind::Invoke).route(FN_INIT, Self::init_handler)
    }

    fn query_router() -> ContractResult<Router<Self>> {
        Router::new(EntryKind::Query).route(FN_GET_BUSINESS, Self::get_business_handler)
    }

    fn init_handler(store: &mut Self, _args: &[String]) -> ContractResult<Vec<u8>> {
        store.initialize()?;
        Ok(Vec::new())
    }

    fn get_business_handler(store: &mut Self, args: &[String]) -> ContractResult<Vec<u8>> {
        let id = match args.get(GET_BUSINESS_ID_ARG) {
            Some(id) => id,
            None => {
                log("getBusiness called without a business ID");
                return Err(ContractError::InvalidArgument(format!(
                    "{} expects the business ID at argument {}",
                    FN_GET_BUSINESS, GET_BUSINESS_ID_ARG
                )));
            }
        };
        store.get_record(id)
    }
}

/// Initialize entry point, called by the host on deployment
#[unsafe(no_mangle)]
pub extern "C" fn init() -> i32 {
    execute("init", FN_INIT, |store, _call| {
        store.initialize()?;
        Ok(Vec::new())
    })
}

/// Invoke entry point
#[unsafe(no_mangle)]
pub extern "C" fn invoke() -> i32 {
    execute("invoke", "", |store, call| store.invoke(&call.function, &call.args))
}

/// Query entry point
#[unsafe(no_mangle)]
pub extern "C" fn query() -> i32 {
    execute("query", "", |store, call| store.query(&call.function, &call.args))
}

/// Legacy entry point kept for older peers; forwards to `invoke`
#[unsafe(no_mangle)]
pub extern "C" fn run() -> i32 {
    execute("run", "", |store, call| {
        log(&format!("run is running {}", call.function));
        store.invoke(&call.function, &call.args)
    })
}

fn execute<F>(entry: &str, default_function: &str, handler: F) -> i32
where
    F: FnOnce(&mut RecordStore<HostLedger>, &Invocation) -> ContractResult<Vec<u8>>,
{
    match execute_with_host(default_function, handler) {
        Ok(()) => STATUS_OK,
        Err(err) => {
            log(&format!("{} failed: {}", entry, err));
            err.code()
        }
    }
}

fn execute_with_host<F>(default_function: &str, handler: F) -> ContractResult<()>
where
    F: FnOnce(&mut RecordStore<HostLedger>, &Invocation) -> ContractResult<Vec<u8>>,
{
    let ctx = try_context()?;
    let call = ctx.invocation(default_function)?;
    let mut store = RecordStore::new(HostLedger::new(&ctx));

    let payload = handler(&mut store, &call)?;
    ctx.return_bytes(&payload)
}
