//! Execution context for chaincode

use crate::error::{ContractError, ContractResult};
use crate::ffi;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

const MIN_ADDRESS_LEN: usize = 10;
const MAX_ADDRESS_LEN: usize = 100;

/// Function name and string arguments supplied by the host for one call.
///
/// Encoded with postcard in the call-data buffer.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Invocation {
    pub function: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(function: &str, args: &[&str]) -> Self {
        Self {
            function: String::from(function),
            args: args.iter().map(|arg| String::from(*arg)).collect(),
        }
    }

    /// Encode the envelope the way the host delivers it.
    pub fn encode(&self) -> ContractResult<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|_| ContractError::SerializationFailed)
    }

    pub fn decode(bytes: &[u8]) -> ContractResult<Self> {
        postcard::from_bytes(bytes).map_err(|_| ContractError::DeserializationFailed)
    }
}

/// Execution context for the current transaction
#[derive(Clone, Debug)]
pub struct Context {
    sender: String,
    contract_address: String,
}

impl Context {
    /// Get the transaction sender address
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Get the current contract address, which namespaces its ledger state
    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    /// Read the raw call data payload provided with this invocation.
    pub fn call_data(&self) -> ContractResult<Vec<u8>> {
        ffi::read_call_data()
    }

    /// Decode the call envelope.
    ///
    /// Empty call data yields `default_function` with no arguments, which is
    /// how the host calls `init` on deployment.
    pub fn invocation(&self, default_function: &str) -> ContractResult<Invocation> {
        let data = self.call_data()?;
        if data.is_empty() {
            return Ok(Invocation::new(default_function, &[]));
        }
        Invocation::decode(&data)
    }

    /// Write raw return bytes to the host without additional serialization.
    pub fn return_bytes(&self, data: &[u8]) -> ContractResult<()> {
        ffi::write_return_data(data)
    }
}

/// Attempt to fetch the current execution context with validation.
pub fn try_context() -> ContractResult<Context> {
    let sender = ffi::get_sender_address();
    let contract_address = ffi::get_contract_addr();

    validate_address(&sender, "sender")?;
    validate_address(&contract_address, "contract address")?;

    Ok(Context {
        sender,
        contract_address,
    })
}

fn validate_address(address: &str, field: &str) -> ContractResult<()> {
    if address.is_empty() {
        return Err(ContractError::InvalidArgument(alloc::format!(
            "{} cannot be empty",
            field
        )));
    }
    if !(MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&address.len()) {
        return Err(ContractError::InvalidArgument(alloc::format!(
            "Invalid {} length",
            field
        )));
    }
    Ok(())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::ffi::mock;

    fn prepare_mock_env() -> mock::Session {
        let session = mock::isolate();
        mock::set_sender("chert1sender000000000000000000");
        mock::set_contract_address("chert1contract0000000000000000");
        session
    }

    #[test]
    fn context_initializes_from_mock_runtime() {
        let _session = prepare_mock_env();

        let ctx = try_context().expect("context should be available");

        assert_eq!(ctx.sender(), "chert1sender000000000000000000");
        assert_eq!(ctx.contract_address(), "chert1contract0000000000000000");
    }

    #[test]
    fn context_rejects_invalid_addresses() {
        let _session = prepare_mock_env();
        mock::set_sender("");

        let err = try_context().expect_err("empty sender must be rejected");
        assert!(matches!(err, ContractError::InvalidArgument(_)));

        mock::set_sender("chert1sender000000000000000000");
        mock::set_contract_address("short");
        let err = try_context().expect_err("short address must be rejected");
        assert!(matches!(err, ContractError::InvalidArgument(_)));
    }

    #[test]
    fn empty_call_data_defaults_to_named_function() {
        let _session = prepare_mock_env();
        let ctx = try_context().expect("context should be available");

        let invocation = ctx.invocation("init").expect("decode envelope");
        assert_eq!(invocation, Invocation::new("init", &[]));
    }

    #[test]
    fn invocation_roundtrip_through_call_data() {
        let _session = prepare_mock_env();
        let sent = Invocation::new("getBusiness", &["ignored", "B1"]);
        mock::set_call_data(&sent.encode().expect("encode envelope"));

        let ctx = try_context().expect("context should be available");
        let received = ctx.invocation("init").expect("decode envelope");
        assert_eq!(received, sent);
    }

    #[test]
    fn malformed_call_data_is_rejected() {
        let _session = prepare_mock_env();
        mock::set_call_data(&[0xff, 0xff, 0xff]);

        let ctx = try_context().expect("context should be available");
        let err = ctx.invocation("init").expect_err("garbage must not decode");
        assert_eq!(err, ContractError::DeserializationFailed);
    }

    #[test]
    fn return_bytes_reach_the_host() {
        let _session = prepare_mock_env();
        let ctx = try_context().expect("context should be available");

        ctx.return_bytes(b"payload").expect("return data must succeed");
        assert_eq!(mock::take_return_data(), b"payload");
    }
}
