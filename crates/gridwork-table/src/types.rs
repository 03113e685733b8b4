//! Core types and value objects for table action dispatch.
//!
//! Defines action descriptors, handler references, notices, and the
//! per-request dispatch input/output pairs.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::handler::{InlineHandler, TableAction};
use crate::host::RequestSource;

// =============================================================================
// Enums
// =============================================================================

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Success => write!(f, "success"),
            NoticeLevel::Info => write!(f, "info"),
            NoticeLevel::Warning => write!(f, "warning"),
            NoticeLevel::Error => write!(f, "error"),
        }
    }
}

// =============================================================================
// Handler references
// =============================================================================

/// The handler attached to an action descriptor, in one of three shapes.
///
/// Exactly one shape is carried per descriptor: a symbolic name resolved
/// through the handler catalog, an inline function value, or a capability
/// object implementing [`TableAction`].
#[derive(Clone)]
pub enum HandlerRef {
    /// Symbolic name looked up in the catalog at resolve time.
    Named(String),
    /// Function value invoked with the dispatch context and target ids.
    Inline(InlineHandler),
    /// Capability object used as-is; consulted for authorization.
    Capability(Arc<dyn TableAction>),
}

impl HandlerRef {
    /// Convenience constructor wrapping a closure as an inline handler.
    pub fn inline<F>(f: F) -> Self
    where
        F: Fn(&crate::dispatcher::DispatchContext, &[String]) -> Result<(), crate::error::ActionError>
            + Send
            + Sync
            + 'static,
    {
        HandlerRef::Inline(Arc::new(f))
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
            HandlerRef::Inline(_) => f.write_str("Inline(..)"),
            HandlerRef::Capability(_) => f.write_str("Capability(..)"),
        }
    }
}

/// Identity comparison: names compare by value, function values and
/// capability objects by pointer. Sufficient for the expansion-idempotency
/// contract, which never replaces a populated handler.
impl PartialEq for HandlerRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HandlerRef::Named(a), HandlerRef::Named(b)) => a == b,
            (HandlerRef::Inline(a), HandlerRef::Inline(b)) => Arc::ptr_eq(a, b),
            (HandlerRef::Capability(a), HandlerRef::Capability(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// =============================================================================
// Domain structs
// =============================================================================

/// One configured action available on a listing.
///
/// A raw descriptor may leave most fields unset; [`crate::ActionExpander`]
/// fills the defaults. The slug is immutable once registered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionDescriptor {
    /// Unique identifier of the action within its registry. When empty, the
    /// registry key is adopted during expansion.
    pub slug: String,
    /// Presentation label; derived from the slug when absent.
    pub label: Option<String>,
    /// Presentation metadata, opaque to the dispatch core.
    pub attributes: serde_json::Map<String, serde_json::Value>,
    /// Whether the UI should ask for confirmation; preset-filled when unset.
    pub confirm: Option<bool>,
    /// The handler to run. Must be populated by the time the descriptor is
    /// registered.
    pub handler: Option<HandlerRef>,
}

impl ActionDescriptor {
    /// Create a descriptor carrying only a handler; everything else is
    /// filled by expansion.
    pub fn new(handler: HandlerRef) -> Self {
        Self {
            handler: Some(handler),
            ..Self::default()
        }
    }

    /// Override the slug the registry key would otherwise provide.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Set an explicit presentation label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach one presentation attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Set the confirmation policy explicitly.
    pub fn with_confirm(mut self, confirm: bool) -> Self {
        self.confirm = Some(confirm);
        self
    }
}

/// A user-facing message accumulated during action handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// The inbound trigger for one dispatch attempt.
#[derive(Debug, Clone, Default)]
pub struct DispatchRequest {
    /// Raw action identifier submitted by the caller; equals
    /// `prefix + slug` for the targeted action. Absent on plain page views.
    pub action_key: Option<String>,
    /// Identifiers of the records the action applies to; may be empty.
    pub target_ids: Vec<String>,
}

impl DispatchRequest {
    pub fn new(action_key: Option<String>, target_ids: Vec<String>) -> Self {
        Self {
            action_key,
            target_ids,
        }
    }

    /// Read the dispatch input from a request source using the listing's
    /// parameter convention: the action key under `{prefix}action`, the
    /// target ids under `{prefix}id`.
    pub fn from_source(prefix: &str, source: &dyn RequestSource) -> Self {
        let action_key = source
            .get(&format!("{prefix}action"))
            .filter(|key| !key.is_empty());
        let target_ids = source.get_all(&format!("{prefix}id"));
        Self {
            action_key,
            target_ids,
        }
    }
}

/// Outcome of a dispatch attempt.
#[derive(Debug, Clone, Default)]
pub struct DispatchResult {
    /// Whether a handler actually ran.
    pub executed: bool,
    /// Slug of the matched action, if any.
    pub matched_slug: Option<String>,
    /// Notices flushed from the request-scoped sink after invocation.
    pub notices: Vec<Notice>,
    /// Where the host should navigate next; set whenever an action key was
    /// present on the request.
    pub redirect: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================
