//! Ordered registry of the actions configured on one listing.

use crate::error::ActionError;
use crate::types::ActionDescriptor;

/// Slug-keyed collection of action descriptors, iterated in registration
/// order.
///
/// Built once per listing render and read-only afterwards, so it may be
/// shared across concurrent dispatches. Registration order is the
/// documented match order.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: Vec<(String, ActionDescriptor)>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action under a slug.
    ///
    /// Malformed configuration is rejected here, at build time: an empty or
    /// duplicate slug, or a descriptor with no handler.
    pub fn register(
        &mut self,
        slug: impl Into<String>,
        descriptor: ActionDescriptor,
    ) -> Result<(), ActionError> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(ActionError::InvalidDescriptor(
                "action slug must not be empty".to_string(),
            ));
        }
        if self.get(&slug).is_some() {
            return Err(ActionError::InvalidDescriptor(format!(
                "action slug already registered: {slug}"
            )));
        }
        if descriptor.handler.is_none() {
            return Err(ActionError::InvalidDescriptor(format!(
                "action has no handler: {slug}"
            )));
        }
        self.actions.push((slug, descriptor));
        Ok(())
    }

    /// All registered actions, in registration order.
    pub fn list(&self) -> impl Iterator<Item = (&str, &ActionDescriptor)> {
        self.actions
            .iter()
            .map(|(slug, descriptor)| (slug.as_str(), descriptor))
    }

    /// Look up a descriptor by its registry slug.
    pub fn get(&self, slug: &str) -> Option<&ActionDescriptor> {
        self.actions
            .iter()
            .find(|(key, _)| key == slug)
            .map(|(_, descriptor)| descriptor)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
