//! Foreign Function Interface for host functions
//!
//! These functions are provided by the Silica runtime and give chaincode
//! access to the ledger key-value state. When running tests on the native
//! host, we provide a deterministic mock runtime so chaincode can be
//! exercised without a full blockchain node.

use crate::error::ContractResult;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(target_arch = "wasm32")]
mod host {
    use crate::error::{ContractError, ContractResult};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    // Host function imports from the runtime
    #[link(wasm_import_module = "env")]
    unsafe extern "C" {
        pub fn state_read(
            account_ptr: i32,
            account_len: i32,
            key_ptr: i32,
            key_len: i32,
            value_ptr: i32,
            value_len_ptr: i32,
        ) -> i32;

        pub fn state_write(
            account_ptr: i32,
            account_len: i32,
            key_ptr: i32,
            key_len: i32,
            value_ptr: i32,
            value_len: i32,
        ) -> i32;

        pub fn log(msg_ptr: i32, msg_len: i32);

        pub fn emit_event(topic_ptr: i32, topic_len: i32, data_ptr: i32, data_len: i32);

        pub fn get_sender(buffer_ptr: i32) -> i32;
        pub fn get_contract_address(buffer_ptr: i32) -> i32;

        pub fn get_call_data_length() -> i32;
        pub fn read_call_data(buffer_ptr: i32, buffer_len: i32) -> i32;
        pub fn write_return_data(buffer_ptr: i32, buffer_len: i32) -> i32;
    }

    const MAX_VALUE_SIZE: usize = 65_536;
    const ADDRESS_BUFFER_SIZE: usize = 128;

    pub fn read_storage(account: &str, key: &str) -> ContractResult<Vec<u8>> {
        let mut value = vec![0_u8; MAX_VALUE_SIZE];
        let mut value_len: i32 = 0;

        let result = unsafe {
            state_read(
                account.as_ptr() as i32,
                account.len() as i32,
                key.as_ptr() as i32,
                key.len() as i32,
                value.as_mut_ptr() as i32,
                &mut value_len as *mut i32 as i32,
            )
        };

        if result != 0 || value_len < 0 || value_len as usize > MAX_VALUE_SIZE {
            return Err(ContractError::StorageReadFailed);
        }
        value.truncate(value_len as usize);
        Ok(value)
    }

    pub fn write_storage(account: &str, key: &str, value: &[u8]) -> ContractResult<()> {
        let result = unsafe {
            state_write(
                account.as_ptr() as i32,
                account.len() as i32,
                key.as_ptr() as i32,
                key.len() as i32,
                value.as_ptr() as i32,
                value.len() as i32,
            )
        };

        if result == 0 {
            Ok(())
        } else {
            Err(ContractError::StorageWriteFailed)
        }
    }

    pub fn log_message(message: &str) {
        unsafe {
            log(message.as_ptr() as i32, message.len() as i32);
        }
    }

    pub fn emit_event_internal(topic: &str, data: &[u8]) {
        unsafe {
            emit_event(
                topic.as_ptr() as i32,
                topic.len() as i32,
                data.as_ptr() as i32,
                data.len() as i32,
            );
        }
    }

    fn read_address(fetch: unsafe extern "C" fn(i32) -> i32) -> String {
        let mut buffer = vec![0_u8; ADDRESS_BUFFER_SIZE];
        let len = unsafe { fetch(buffer.as_mut_ptr() as i32) };
        let len = (len.max(0) as usize).min(ADDRESS_BUFFER_SIZE);
        buffer.truncate(len);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    pub fn sender() -> String {
        read_address(get_sender)
    }

    pub fn contract_address() -> String {
        read_address(get_contract_address)
    }

    pub fn read_call_data_internal() -> ContractResult<Vec<u8>> {
        let len = unsafe { get_call_data_length() };
        if len < 0 {
            return Err(ContractError::CallDataUnavailable);
        }
        if len == 0 {
            return Ok(Vec::new());
        }

        let mut buffer = vec![0_u8; len as usize];
        let result = unsafe { read_call_data(buffer.as_mut_ptr() as i32, len) };
        if result == 0 {
            Ok(buffer)
        } else {
            Err(ContractError::CallDataUnavailable)
        }
    }

    pub fn write_return_data_internal(data: &[u8]) -> ContractResult<()> {
        let result = unsafe { write_return_data(data.as_ptr() as i32, data.len() as i32) };
        if result == 0 {
            Ok(())
        } else {
            Err(ContractError::ReturnDataWriteFailed)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use crate::error::{ContractError, ContractResult};
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use spin::{Mutex, MutexGuard};

    #[derive(Clone, Debug)]
    pub struct EventRecord {
        pub topic: String,
        pub data: Vec<u8>,
    }

    /// Number of storage calls that reached the mock ledger.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct StorageOps {
        pub reads: u64,
        pub writes: u64,
    }

    #[derive(Default)]
    pub struct MockRuntime {
        storage: BTreeMap<(String, String), Vec<u8>>,
        sender: String,
        contract_address: String,
        call_data: Vec<u8>,
        return_data: Vec<u8>,
        events: Vec<EventRecord>,
        logs: Vec<String>,
        fail_reads: bool,
        fail_writes: bool,
        ops: StorageOps,
    }

    impl MockRuntime {
        fn reset(&mut self) {
            *self = MockRuntime::default();
        }

        fn storage_key(account: &str, key: &str) -> (String, String) {
            (account.to_string(), key.to_string())
        }

        fn read_storage(&mut self, account: &str, key: &str) -> ContractResult<Vec<u8>> {
            self.ops.reads += 1;
            if self.fail_reads {
                return Err(ContractError::StorageReadFailed);
            }
            let lookup = Self::storage_key(account, key);
            Ok(self.storage.get(&lookup).cloned().unwrap_or_default())
        }

        fn write_storage(&mut self, account: &str, key: &str, value: &[u8]) -> ContractResult<()> {
            self.ops.writes += 1;
            if self.fail_writes {
                return Err(ContractError::StorageWriteFailed);
            }
            let lookup = Self::storage_key(account, key);
            if value.is_empty() {
                self.storage.remove(&lookup);
            } else {
                self.storage.insert(lookup, value.to_vec());
            }
            Ok(())
        }
    }

    static MOCK_RUNTIME: Mutex<Option<MockRuntime>> = Mutex::new(None);
    static SESSION_LOCK: Mutex<()> = Mutex::new(());

    pub fn with_runtime<F, R>(f: F) -> R
    where
        F: FnOnce(&mut MockRuntime) -> R,
    {
        let mut guard = MOCK_RUNTIME.lock();
        let runtime = guard.get_or_insert_with(MockRuntime::default);
        f(runtime)
    }

    /// Exclusive access to the mock runtime for the lifetime of the guard.
    pub struct Session {
        _lock: MutexGuard<'static, ()>,
    }

    pub fn isolate() -> Session {
        let lock = SESSION_LOCK.lock();
        with_runtime(|rt| rt.reset());
        Session { _lock: lock }
    }

    pub fn read_storage(account: &str, key: &str) -> ContractResult<Vec<u8>> {
        with_runtime(|rt| rt.read_storage(account, key))
    }

    pub fn write_storage(account: &str, key: &str, value: &[u8]) -> ContractResult<()> {
        with_runtime(|rt| rt.write_storage(account, key, value))
    }

    pub fn log_message(message: &str) {
        with_runtime(|rt| rt.logs.push(message.to_string()));
    }

    pub fn emit_event_internal(topic: &str, data: &[u8]) {
        with_runtime(|rt| {
            rt.events.push(EventRecord {
                topic: topic.to_string(),
                data: data.to_vec(),
            })
        });
    }

    pub fn sender() -> String {
        with_runtime(|rt| rt.sender.clone())
    }

    pub fn contract_address() -> String {
        with_runtime(|rt| rt.contract_address.clone())
    }

    pub fn read_call_data_internal() -> ContractResult<Vec<u8>> {
        with_runtime(|rt| Ok(rt.call_data.clone()))
    }

    pub fn write_return_data_internal(data: &[u8]) -> ContractResult<()> {
        with_runtime(|rt| {
            rt.return_data = data.to_vec();
            Ok(())
        })
    }

    pub fn set_sender(sender: &str) {
        with_runtime(|rt| rt.sender = sender.to_string());
    }

    pub fn set_contract_address(addr: &str) {
        with_runtime(|rt| rt.contract_address = addr.to_string());
    }

    pub fn set_call_data(data: &[u8]) {
        with_runtime(|rt| rt.call_data = data.to_vec());
    }

    pub fn fail_reads(enabled: bool) {
        with_runtime(|rt| rt.fail_reads = enabled);
    }

    pub fn fail_writes(enabled: bool) {
        with_runtime(|rt| rt.fail_writes = enabled);
    }

    pub fn storage_ops() -> StorageOps {
        with_runtime(|rt| rt.ops)
    }

    pub fn take_events() -> Vec<EventRecord> {
        with_runtime(|rt| core::mem::take(&mut rt.events))
    }

    pub fn take_logs() -> Vec<String> {
        with_runtime(|rt| core::mem::take(&mut rt.logs))
    }

    pub fn take_return_data() -> Vec<u8> {
        with_runtime(|rt| core::mem::take(&mut rt.return_data))
    }

    pub fn inspect_storage(account: &str, key: &str) -> Vec<u8> {
        with_runtime(|rt| {
            let lookup = MockRuntime::storage_key(account, key);
            rt.storage.get(&lookup).cloned().unwrap_or_default()
        })
    }

    pub fn snapshot_storage() -> BTreeMap<(String, String), Vec<u8>> {
        with_runtime(|rt| rt.storage.clone())
    }
}

pub(crate) fn read_storage(account: &str, key: &str) -> ContractResult<Vec<u8>> {
    host::read_storage(account, key)
}

pub(crate) fn write_storage(account: &str, key: &str, value: &[u8]) -> ContractResult<()> {
    host::write_storage(account, key, value)
}

pub(crate) fn log_message(message: &str) {
    host::log_message(message);
}

pub(crate) fn emit_event_internal(topic: &str, data: &[u8]) {
    host::emit_event_internal(topic, data);
}

pub(crate) fn get_sender_address() -> String {
    host::sender()
}

pub(crate) fn get_contract_addr() -> String {
    host::contract_address()
}

pub(crate) fn read_call_data() -> ContractResult<Vec<u8>> {
    host::read_call_data_internal()
}

pub(crate) fn write_return_data(data: &[u8]) -> ContractResult<()> {
    host::write_return_data_internal(data)
}

/// Native stand-in for the Silica runtime, used by unit tests.
#[cfg(not(target_arch = "wasm32"))]
pub mod mock {
    use super::host;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    pub use host::{EventRecord, Session, StorageOps};

    /// Serialize access to the shared runtime and start from a clean state.
    ///
    /// Tests touching the mock must hold the returned guard; the runtime is
    /// process-global and the test harness runs tests on several threads.
    pub fn isolate() -> Session {
        host::isolate()
    }

    pub fn set_sender(sender: &str) {
        host::set_sender(sender);
    }

    pub fn set_contract_address(addr: &str) {
        host::set_contract_address(addr);
    }

    pub fn set_call_data(data: &[u8]) {
        host::set_call_data(data);
    }

    /// Make every subsequent `state_read` fail.
    pub fn fail_reads(enabled: bool) {
        host::fail_reads(enabled);
    }

    /// Make every subsequent `state_write` fail.
    pub fn fail_writes(enabled: bool) {
        host::fail_writes(enabled);
    }

    pub fn storage_ops() -> StorageOps {
        host::storage_ops()
    }

    pub fn take_events() -> Vec<EventRecord> {
        host::take_events()
    }

    pub fn take_logs() -> Vec<String> {
        host::take_logs()
    }

    pub fn take_return_data() -> Vec<u8> {
        host::take_return_data()
    }

    pub fn inspect_storage(account: &str, key: &str) -> Vec<u8> {
        host::inspect_storage(account, key)
    }

    pub fn snapshot_storage() -> BTreeMap<(String, String), Vec<u8>> {
        host::snapshot_storage()
    }
}
