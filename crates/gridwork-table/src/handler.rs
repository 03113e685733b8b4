//! Action handler contracts and the symbolic-name catalog.
//!
//! A handler comes in one of three shapes (see
//! [`HandlerRef`](crate::types::HandlerRef)); this module defines the
//! capability trait behind the object shape, the type alias behind the
//! inline shape, and the catalog that backs symbolic names.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::dispatcher::DispatchContext;
use crate::error::ActionError;

/// Capability contract for an action handler object.
#[async_trait]
pub trait TableAction: Send + Sync {
    /// Whether the current context may run this action.
    ///
    /// Only a `false` return suppresses invocation; the default is allowed.
    fn authorize(&self, _ctx: &DispatchContext) -> bool {
        true
    }

    /// Run the action against the selected record ids.
    async fn handle(&self, ctx: &DispatchContext, ids: &[String]) -> Result<(), ActionError>;
}

/// Inline handler shape: a function value with the fixed call signature
/// `(context, ids)`. Inline handlers carry no authorization of their own.
pub type InlineHandler =
    Arc<dyn Fn(&DispatchContext, &[String]) -> Result<(), ActionError> + Send + Sync>;

/// Catalog mapping symbolic handler names to capability objects.
///
/// Populated at startup; looked up by exact key at resolve time. A name may
/// be registered globally (`"Delete"`) or scoped to one listing's entity
/// type (`"orders.Delete"`); the resolver prefers the scoped entry.
#[derive(Clone, Default)]
pub struct HandlerCatalog {
    handlers: HashMap<String, Arc<dyn TableAction>>,
}

impl HandlerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a symbolic name. Overwrites any existing
    /// entry for the same name.
    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn TableAction>) {
        let name = name.into();
        debug!(name = %name, "Registered action handler");
        self.handlers.insert(name, handler);
    }

    /// Look up a handler by exact name.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn TableAction>> {
        self.handlers.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
