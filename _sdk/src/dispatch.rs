//! Name-based dispatch for chaincode entry points
//!
//! A [`Router`] maps function names to handlers over some state `S`. Routes are
//! validated when they are registered, so calling an unregistered name is a
//! plain lookup miss reported as [`ContractError::UnknownFunction`] or
//! [`ContractError::UnknownQuery`] depending on the entry point.

use crate::error::{ContractError, ContractResult};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Handler signature: state, call arguments, returned payload
pub type Handler<S> = fn(&mut S, &[String]) -> ContractResult<Vec<u8>>;

/// Which host entry point a router serves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Invoke,
    Query,
}

impl EntryKind {
    fn miss(self, function: &str) -> ContractError {
        match self {
            EntryKind::Invoke => ContractError::UnknownFunction(function.to_string()),
            EntryKind::Query => ContractError::UnknownQuery(function.to_string()),
        }
    }
}

pub struct Router<S> {
    kind: EntryKind,
    routes: BTreeMap<&'static str, Handler<S>>,
}

impl<S> Router<S> {
    pub fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            routes: BTreeMap::new(),
        }
    }

    /// Register `handler` under `name`; empty and duplicate names are rejected.
    pub fn route(mut self, name: &'static str, handler: Handler<S>) -> ContractResult<Self> {
        if name.trim().is_empty() {
            return Err(ContractError::InvalidArgument(
                "Function name cannot be empty".to_string(),
            ));
        }
        if self.routes.contains_key(name) {
            return Err(ContractError::InvalidArgument(format!(
                "Function {} registered twice",
                name
            )));
        }
        self.routes.insert(name, handler);
        Ok(self)
    }

    pub fn contains(&self, function: &str) -> bool {
        self.routes.contains_key(function)
    }

    /// Registered function names in sorted order
    pub fn names(&self) -> Vec<&'static str> {
        self.routes.keys().copied().collect()
    }

    /// Run the handler registered for `function`.
    pub fn dispatch(
        &self,
        state: &mut S,
        function: &str,
        args: &[String],
    ) -> ContractResult<Vec<u8>> {
        match self.routes.get(function) {
            Some(handler) => handler(state, args),
            None => Err(self.kind.miss(function)),
        }
    }
}
