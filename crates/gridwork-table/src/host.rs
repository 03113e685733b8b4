//! Integration seams with the host's request/response cycle.
//!
//! The dispatch core never owns HTTP plumbing; the host implements these
//! traits and hands them in per request.

use std::collections::HashMap;

/// Read access to the inbound request's parameters.
pub trait RequestSource {
    /// First value for a key, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// All values for a key; empty when absent.
    fn get_all(&self, key: &str) -> Vec<String>;
}

/// Yields the location the user came from, for the post-action redirect.
pub trait ReferrerResolver {
    fn current_referrer(&self) -> String;
}

/// Externally-owned response object the dispatcher sets a redirect on.
pub trait ResponseCarrier {
    fn set_redirect(&mut self, to: &str);
}

/// In-memory [`RequestSource`] backed by a parameter map. Useful for tests
/// and non-HTTP hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryRequest {
    params: HashMap<String, Vec<String>>,
}

impl MemoryRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one value under a key.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.entry(key.into()).or_default().push(value.into());
        self
    }
}

impl RequestSource for MemoryRequest {
    fn get(&self, key: &str) -> Option<String> {
        self.params.get(key).and_then(|values| values.first().cloned())
    }

    fn get_all(&self, key: &str) -> Vec<String> {
        self.params.get(key).cloned().unwrap_or_default()
    }
}
