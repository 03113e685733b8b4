//! Handler resolution: turns a descriptor's declared handler reference into
//! a uniform invokable bound to the dispatch context.

use std::sync::Arc;

use crate::dispatcher::DispatchContext;
use crate::error::ActionError;
use crate::handler::{HandlerCatalog, InlineHandler, TableAction};
use crate::types::ActionDescriptor;

/// Resolves each [`HandlerRef`](crate::types::HandlerRef) shape to an
/// [`Invocable`].
///
/// Symbolic names go through the catalog: the listing-scoped key
/// `"{scope}.{name}"` is tried first so a listing-specific handler shadows a
/// global one, then the bare name.
#[derive(Clone, Default)]
pub struct HandlerResolver {
    catalog: HandlerCatalog,
}

impl HandlerResolver {
    pub fn new(catalog: HandlerCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve the descriptor's handler for the given context.
    pub fn resolve(
        &self,
        descriptor: &ActionDescriptor,
        ctx: &DispatchContext,
    ) -> Result<Invocable, ActionError> {
        use crate::types::HandlerRef;

        let handler = descriptor.handler.as_ref().ok_or_else(|| {
            ActionError::InvalidDescriptor(format!("action has no handler: {}", descriptor.slug))
        })?;

        match handler {
            HandlerRef::Named(name) => {
                let scoped = if ctx.scope.is_empty() {
                    None
                } else {
                    self.catalog.resolve(&format!("{}.{}", ctx.scope, name))
                };
                let resolved = scoped
                    .or_else(|| self.catalog.resolve(name))
                    .ok_or_else(|| ActionError::HandlerNotFound(name.clone()))?;
                Ok(Invocable::capability(resolved))
            }
            HandlerRef::Inline(f) => Ok(Invocable::inline(Arc::clone(f))),
            HandlerRef::Capability(obj) => Ok(Invocable::capability(Arc::clone(obj))),
        }
    }
}

/// A resolved handler with a uniform authorize/invoke surface.
pub struct Invocable {
    kind: InvocableKind,
}

enum InvocableKind {
    Inline(InlineHandler),
    Capability(Arc<dyn TableAction>),
}

impl std::fmt::Debug for Invocable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            InvocableKind::Inline(_) => "Inline",
            InvocableKind::Capability(_) => "Capability",
        };
        f.debug_struct("Invocable").field("kind", &kind).finish()
    }
}

impl Invocable {
    fn inline(f: InlineHandler) -> Self {
        Self {
            kind: InvocableKind::Inline(f),
        }
    }

    fn capability(handler: Arc<dyn TableAction>) -> Self {
        Self {
            kind: InvocableKind::Capability(handler),
        }
    }

    /// Whether the context may run this handler. Inline handlers carry no
    /// authorization of their own and are always allowed; capability objects
    /// are asked.
    pub fn authorize(&self, ctx: &DispatchContext) -> bool {
        match &self.kind {
            InvocableKind::Inline(_) => true,
            InvocableKind::Capability(handler) => handler.authorize(ctx),
        }
    }

    /// Run the handler with the fixed `(context, ids)` binding.
    pub async fn invoke(&self, ctx: &DispatchContext, ids: &[String]) -> Result<(), ActionError> {
        match &self.kind {
            InvocableKind::Inline(f) => f(ctx, ids),
            InvocableKind::Capability(handler) => handler.handle(ctx, ids).await,
        }
    }
}
