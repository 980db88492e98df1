//! Event emission and diagnostic logging for chaincode

use crate::ffi;
use serde::Serialize;

/// Emit an event that can be indexed by off-chain services
pub fn emit<T: Serialize>(topic: &str, data: &T) {
    if let Ok(data_bytes) = postcard::to_allocvec(data) {
        ffi::emit_event_internal(topic, &data_bytes);
    }
}

/// Write a diagnostic line to the host log
pub fn log(message: &str) {
    ffi::log_message(message);
}

/// Helper macro for creating structured events with string fields
#[macro_export]
macro_rules! event {
    ($topic:expr, $($field:ident: $value:expr),* $(,)?) => {
        {
            #[derive(serde::Serialize)]
            struct EventData {
                $($field: $crate::prelude::String),*
            }

            let event_data = EventData {
                $($field: $crate::prelude::format!("{}", $value)),*
            };

            $crate::events::emit($topic, &event_data);
        }
    };
}
