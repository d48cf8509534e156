//! Caller-owned request context.
//!
//! A `Session` carries what used to travel through process globals: the
//! user's token, an optional backend override, and values one handler
//! produces for a later one (a fetched transcript, say). Each caller owns
//! its session; nothing here is shared.

use std::collections::HashMap;

use serde_json::Value;

use crate::descriptor::RequestDescriptor;

#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    base_url: Option<String>,
    values: HashMap<String, Value>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// Fill in the session token and base URL where `descriptor` leaves
    /// them unset.
    pub fn scope<D>(&self, descriptor: RequestDescriptor<D>) -> RequestDescriptor<D> {
        let descriptor = match &self.token {
            Some(token) if !descriptor.has_token() => descriptor.token(token),
            _ => descriptor,
        };
        match &self.base_url {
            Some(base_url) if !descriptor.has_base_url() => descriptor.base_url(base_url),
            _ => descriptor,
        }
    }

    /// Store `value` under `key`, returning the previous value.
    pub fn remember(&mut self, key: &str, value: Value) -> Option<Value> {
        self.values.insert(key.to_string(), value)
    }

    pub fn recall(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn forget(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }
}
