//! # Chaincode SDK
//!
//! Rust SDK for writing key-value ledger chaincode on the Silica runtime.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chaincode_sdk::prelude::*;
//!
//! fn remember(value: &str) -> ContractResult<()> {
//!     let ctx = try_context()?;
//!     let mut storage = Storage::new(HostLedger::new(&ctx));
//!     storage.set("last", &value.to_string())?;
//!     log("stored last value");
//!     Ok(())
//! }
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod context;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod ffi;
pub mod storage;

/// Common imports for chaincode development
pub mod prelude {
    pub use crate::context::{Context, Invocation, try_context};
    pub use crate::dispatch::{EntryKind, Handler, Router};
    pub use crate::error::{ContractError, ContractResult};
    pub use crate::events::{emit, log};
    pub use crate::storage::{HostLedger, Ledger, Storage};

    pub use alloc::format;
    pub use alloc::string::{String, ToString};
    pub use alloc::vec::Vec;
    pub use serde::{Deserialize, Serialize};
}
