//! Descriptor expansion: fills a shorthand action descriptor out to its
//! fully-populated form.

use gridwork_core::TablePresets;

use crate::error::ActionError;
use crate::types::ActionDescriptor;

/// Expands partial descriptors by applying context-wide presets.
///
/// Expansion is idempotent and never mutates its input: only unset fields
/// are filled, so expanding an already-expanded descriptor returns an equal
/// value.
#[derive(Debug, Clone, Default)]
pub struct ActionExpander {
    presets: TablePresets,
}

impl ActionExpander {
    pub fn new(presets: TablePresets) -> Self {
        Self { presets }
    }

    /// Produce the fully-populated descriptor for a registry entry.
    ///
    /// `slug` is the registry key; it is adopted when the raw descriptor
    /// carries no slug of its own. Fails with
    /// [`ActionError::InvalidDescriptor`] when no handler remains after
    /// expansion.
    pub fn expand(
        &self,
        slug: &str,
        raw: &ActionDescriptor,
    ) -> Result<ActionDescriptor, ActionError> {
        let mut expanded = raw.clone();

        if expanded.slug.is_empty() {
            expanded.slug = slug.to_string();
        }

        if expanded.label.is_none() {
            expanded.label = Some(title_case(&expanded.slug));
        }

        for (key, value) in &self.presets.default_attributes {
            expanded
                .attributes
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }

        if expanded.confirm.is_none() {
            expanded.confirm = Some(self.presets.confirm_by_default);
        }

        if expanded.handler.is_none() {
            return Err(ActionError::InvalidDescriptor(format!(
                "action has no handler after expansion: {}",
                expanded.slug
            )));
        }

        Ok(expanded)
    }
}

/// Title-case a slug: `delete_all` / `delete-all` become `Delete All`.
fn title_case(slug: &str) -> String {
    slug.split(['-', '_', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
