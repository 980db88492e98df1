//! Error types for chaincode

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

/// Chaincode execution errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// Storage read operation failed
    StorageReadFailed,

    /// Storage write operation failed
    StorageWriteFailed,

    /// Failed to serialize data
    SerializationFailed,

    /// Failed to deserialize data
    DeserializationFailed,

    /// Invalid argument provided
    InvalidArgument(String),

    /// Failed to read call data for the current invocation
    CallDataUnavailable,

    /// Failed to return data to the runtime
    ReturnDataWriteFailed,

    /// No invoke handler is registered under this name
    UnknownFunction(String),

    /// No query handler is registered under this name
    UnknownQuery(String),

    /// Reading a record from the ledger failed
    RecordFetch {
        id: String,
        source: Box<ContractError>,
    },

    /// Custom error with message
    Custom(String),
}

impl ContractError {
    /// Status code reported to the host when an entry point fails.
    ///
    /// Zero is reserved for success.
    pub fn code(&self) -> i32 {
        match self {
            ContractError::Custom(_) => 1,
            ContractError::StorageReadFailed => 2,
            ContractError::StorageWriteFailed => 3,
            ContractError::SerializationFailed => 4,
            ContractError::DeserializationFailed => 5,
            ContractError::InvalidArgument(_) => 6,
            ContractError::CallDataUnavailable => 7,
            ContractError::ReturnDataWriteFailed => 8,
            ContractError::UnknownFunction(_) => 9,
            ContractError::UnknownQuery(_) => 10,
            ContractError::RecordFetch { .. } => 11,
        }
    }
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractError::StorageReadFailed => write!(f, "Storage read failed"),
            ContractError::StorageWriteFailed => write!(f, "Storage write failed"),
            ContractError::SerializationFailed => write!(f, "Serialization failed"),
            ContractError::DeserializationFailed => write!(f, "Deserialization failed"),
            ContractError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            ContractError::CallDataUnavailable => write!(f, "Call data unavailable"),
            ContractError::ReturnDataWriteFailed => write!(f, "Unable to write return data"),
            ContractError::UnknownFunction(name) => {
                write!(f, "Received unknown function invocation: {}", name)
            }
            ContractError::UnknownQuery(name) => {
                write!(f, "Received unknown function query: {}", name)
            }
            ContractError::RecordFetch { id, source } => {
                write!(f, "Failed to get record {} from ledger: {}", id, source)
            }
            ContractError::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

/// Result type for chaincode operations
pub type ContractResult<T> = Result<T, ContractError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn record_fetch_display_includes_cause() {
        let err = ContractError::RecordFetch {
            id: "B1".to_string(),
            source: Box::new(ContractError::StorageReadFailed),
        };
        assert_eq!(
            err.to_string(),
            "Failed to get record B1 from ledger: Storage read failed"
        );
    }

    #[wasm_bindgen_test]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn status_codes_are_non_zero() {
        let errors = [
            ContractError::StorageReadFailed,
            ContractError::StorageWriteFailed,
            ContractError::UnknownFunction("x".to_string()),
            ContractError::UnknownQuery("x".to_string()),
            ContractError::Custom("x".to_string()),
        ];
        for err in errors {
            assert_ne!(err.code(), 0);
        }
    }
}
