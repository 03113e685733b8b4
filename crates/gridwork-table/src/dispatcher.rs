//! Action dispatch: matches an incoming request to a registered action and
//! runs its handler.
//!
//! One dispatch is handled start-to-finish within one inbound request. The
//! dispatcher owns no shared mutable state; the registry it reads is
//! immutable after construction and the notice sink lives on the per-request
//! context.

use tracing::debug;

use crate::error::ActionError;
use crate::expander::ActionExpander;
use crate::host::{ReferrerResolver, RequestSource, ResponseCarrier};
use crate::notices::NoticeSink;
use crate::registry::ActionRegistry;
use crate::resolver::HandlerResolver;
use crate::types::{ActionDescriptor, DispatchRequest, DispatchResult};

/// Per-request context a handler runs against.
///
/// Construct a fresh one per inbound request: the notice sink it carries is
/// request-scoped by contract.
#[derive(Clone, Default)]
pub struct DispatchContext {
    /// Namespacing token disambiguating multiple listings on one page;
    /// immutable per listing instance.
    pub prefix: String,
    /// The listing's entity scope, used for scoped handler-catalog lookups.
    pub scope: String,
    /// Request-scoped sink handlers push user-facing messages into.
    pub notices: NoticeSink,
}

impl DispatchContext {
    pub fn new(prefix: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            scope: scope.into(),
            notices: NoticeSink::new(),
        }
    }
}

/// Orchestrates matching, expansion, resolution, authorization, invocation,
/// and reporting for one listing's actions.
pub struct ActionDispatcher {
    registry: ActionRegistry,
    expander: ActionExpander,
    resolver: HandlerResolver,
}

impl ActionDispatcher {
    pub fn new(
        registry: ActionRegistry,
        expander: ActionExpander,
        resolver: HandlerResolver,
    ) -> Self {
        Self {
            registry,
            expander,
            resolver,
        }
    }

    /// Handle one dispatch attempt.
    ///
    /// With no action key on the request this is a benign no-op: nothing
    /// runs, no notices, no redirect, and normal page rendering continues.
    /// When a key is present the redirect back to the referrer is always set
    /// on the response, whatever the match/authorization outcome. Handler
    /// errors propagate verbatim; they are never masked here.
    pub async fn dispatch(
        &self,
        request: &DispatchRequest,
        ctx: &DispatchContext,
        referrer: &dyn ReferrerResolver,
        response: &mut dyn ResponseCarrier,
    ) -> Result<DispatchResult, ActionError> {
        let mut result = DispatchResult::default();

        let action_key = match request.action_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => {
                debug!("no action key submitted; nothing to dispatch");
                return Ok(result);
            }
        };

        match self.find_match(action_key, ctx)? {
            Some(descriptor) => {
                debug!(slug = %descriptor.slug, "matched table action");
                result.matched_slug = Some(descriptor.slug.clone());

                let handler = self.resolver.resolve(&descriptor, ctx)?;

                if handler.authorize(ctx) {
                    handler.invoke(ctx, &request.target_ids).await?;
                    result.executed = true;
                    result.notices = ctx.notices.drain();
                } else {
                    debug!(slug = %descriptor.slug, "authorization denied; skipping invocation");
                }
            }
            None => {
                // Stale or foreign key; tolerated silently.
                debug!(action_key, "no registered action matches");
            }
        }

        // An action key was submitted, so route back to where the user came
        // from regardless of outcome.
        let redirect = referrer.current_referrer();
        response.set_redirect(&redirect);
        result.redirect = Some(redirect);

        Ok(result)
    }

    /// Read the dispatch input off the host request, then dispatch.
    pub async fn dispatch_from(
        &self,
        source: &dyn RequestSource,
        ctx: &DispatchContext,
        referrer: &dyn ReferrerResolver,
        response: &mut dyn ResponseCarrier,
    ) -> Result<DispatchResult, ActionError> {
        let request = DispatchRequest::from_source(&ctx.prefix, source);
        self.dispatch(&request, ctx, referrer, response).await
    }

    /// First registered action whose computed key `prefix + slug` equals the
    /// submitted key. First-registration order is the documented tie-break
    /// should two descriptors expand to the same computed key.
    fn find_match(
        &self,
        action_key: &str,
        ctx: &DispatchContext,
    ) -> Result<Option<ActionDescriptor>, ActionError> {
        for (slug, raw) in self.registry.list() {
            let expanded = self.expander.expand(slug, raw)?;
            if action_key == format!("{}{}", ctx.prefix, expanded.slug) {
                return Ok(Some(expanded));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{HandlerCatalog, TableAction};
    use crate::host::MemoryRequest;
    use crate::types::HandlerRef;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StaticReferrer;

    impl ReferrerResolver for StaticReferrer {
        fn current_referrer(&self) -> String {
            "/admin/orders".to_string()
        }
    }

    #[derive(Default)]
    struct RecordedResponse {
        redirect: Option<String>,
    }

    impl ResponseCarrier for RecordedResponse {
        fn set_redirect(&mut self, to: &str) {
            self.redirect = Some(to.to_string());
        }
    }

    struct CountingAction {
        allow: bool,
        calls: AtomicUsize,
    }

    impl CountingAction {
        fn new(allow: bool) -> Arc<Self> {
            Arc::new(Self {
                allow,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TableAction for CountingAction {
        fn authorize(&self, _ctx: &DispatchContext) -> bool {
            self.allow
        }

        async fn handle(&self, ctx: &DispatchContext, ids: &[String]) -> Result<(), ActionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ctx.notices.success(format!("{} rows handled", ids.len()));
            Ok(())
        }
    }

    fn dispatcher_for(registry: ActionRegistry) -> ActionDispatcher {
        ActionDispatcher::new(
            registry,
            ActionExpander::default(),
            HandlerResolver::new(HandlerCatalog::new()),
        )
    }

    fn request(key: Option<&str>, ids: &[&str]) -> DispatchRequest {
        DispatchRequest::new(
            key.map(String::from),
            ids.iter().map(|id| id.to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn test_no_action_key_is_a_noop() {
        let mut registry = ActionRegistry::new();
        registry
            .register(
                "delete",
                crate::types::ActionDescriptor::new(HandlerRef::Capability(
                    CountingAction::new(true) as _,
                )),
            )
            .unwrap();
        let dispatcher = dispatcher_for(registry);

        let ctx = DispatchContext::new("tbl_", "orders");
        let mut response = RecordedResponse::default();
        let result = dispatcher
            .dispatch(&request(None, &[]), &ctx, &StaticReferrer, &mut response)
            .await
            .unwrap();

        assert!(!result.executed);
        assert!(result.matched_slug.is_none());
        assert!(result.notices.is_empty());
        assert!(result.redirect.is_none());
        assert!(response.redirect.is_none());
    }

    #[tokio::test]
    async fn test_empty_action_key_is_a_noop() {
        let dispatcher = dispatcher_for(ActionRegistry::new());
        let ctx = DispatchContext::new("tbl_", "orders");
        let mut response = RecordedResponse::default();

        let result = dispatcher
            .dispatch(&request(Some(""), &[]), &ctx, &StaticReferrer, &mut response)
            .await
            .unwrap();

        assert!(!result.executed);
        assert!(result.redirect.is_none());
    }

    #[tokio::test]
    async fn test_exact_key_match_runs_handler() {
        let action = CountingAction::new(true);
        let mut registry = ActionRegistry::new();
        registry
            .register(
                "delete",
                crate::types::ActionDescriptor::new(HandlerRef::Capability(
                    Arc::clone(&action) as _
                )),
            )
            .unwrap();
        registry
            .register(
                "archive",
                crate::types::ActionDescriptor::new(HandlerRef::Capability(
                    CountingAction::new(true) as _,
                )),
            )
            .unwrap();
        let dispatcher = dispatcher_for(registry);

        let ctx = DispatchContext::new("tbl_", "orders");
        let mut response = RecordedResponse::default();
        let result = dispatcher
            .dispatch(
                &request(Some("tbl_delete"), &["7", "9"]),
                &ctx,
                &StaticReferrer,
                &mut response,
            )
            .await
            .unwrap();

        assert!(result.executed);
        assert_eq!(result.matched_slug.as_deref(), Some("delete"));
        assert_eq!(action.calls(), 1);
        assert_eq!(result.notices.len(), 1);
        assert_eq!(result.notices[0].message, "2 rows handled");
        assert_eq!(result.redirect.as_deref(), Some("/admin/orders"));
        assert_eq!(response.redirect.as_deref(), Some("/admin/orders"));
    }

    #[tokio::test]
    async fn test_partial_key_matches_nothing() {
        let action = CountingAction::new(true);
        let mut registry = ActionRegistry::new();
        registry
            .register(
                "delete",
                crate::types::ActionDescriptor::new(HandlerRef::Capability(
                    Arc::clone(&action) as _
                )),
            )
            .unwrap();
        let dispatcher = dispatcher_for(registry);

        let ctx = DispatchContext::new("tbl_", "orders");
        let mut response = RecordedResponse::default();
        let result = dispatcher
            .dispatch(
                &request(Some("tbl_del"), &[]),
                &ctx,
                &StaticReferrer,
                &mut response,
            )
            .await
            .unwrap();

        assert!(!result.executed);
        assert!(result.matched_slug.is_none());
        assert!(result.notices.is_empty());
        assert_eq!(action.calls(), 0);
        // The key was present, so the redirect is still set.
        assert_eq!(result.redirect.as_deref(), Some("/admin/orders"));
    }

    #[tokio::test]
    async fn test_first_registered_wins_on_collision() {
        // Two raw descriptors whose own slug fields collide after expansion.
        let first = CountingAction::new(true);
        let second = CountingAction::new(true);
        let mut registry = ActionRegistry::new();
        registry
            .register(
                "a",
                crate::types::ActionDescriptor::new(HandlerRef::Capability(
                    Arc::clone(&first) as _
                ))
                .with_slug("dup"),
            )
            .unwrap();
        registry
            .register(
                "b",
                crate::types::ActionDescriptor::new(HandlerRef::Capability(
                    Arc::clone(&second) as _,
                ))
                .with_slug("dup"),
            )
            .unwrap();
        let dispatcher = dispatcher_for(registry);

        let ctx = DispatchContext::new("tbl_", "orders");
        let mut response = RecordedResponse::default();
        let result = dispatcher
            .dispatch(
                &request(Some("tbl_dup"), &[]),
                &ctx,
                &StaticReferrer,
                &mut response,
            )
            .await
            .unwrap();

        assert!(result.executed);
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_denied_authorization_skips_invocation() {
        let action = CountingAction::new(false);
        let mut registry = ActionRegistry::new();
        registry
            .register(
                "delete",
                crate::types::ActionDescriptor::new(HandlerRef::Capability(
                    Arc::clone(&action) as _
                )),
            )
            .unwrap();
        let dispatcher = dispatcher_for(registry);

        let ctx = DispatchContext::new("tbl_", "orders");
        let mut response = RecordedResponse::default();
        let result = dispatcher
            .dispatch(
                &request(Some("tbl_delete"), &["1"]),
                &ctx,
                &StaticReferrer,
                &mut response,
            )
            .await
            .unwrap();

        assert!(!result.executed);
        assert_eq!(result.matched_slug.as_deref(), Some("delete"));
        assert_eq!(action.calls(), 0);
        assert!(result.notices.is_empty());
        // Denial still reports and redirects.
        assert_eq!(result.redirect.as_deref(), Some("/admin/orders"));
    }

    #[tokio::test]
    async fn test_allowed_capability_is_invoked() {
        let action = CountingAction::new(true);
        let mut registry = ActionRegistry::new();
        registry
            .register(
                "delete",
                crate::types::ActionDescriptor::new(HandlerRef::Capability(
                    Arc::clone(&action) as _
                )),
            )
            .unwrap();
        let dispatcher = dispatcher_for(registry);

        let ctx = DispatchContext::new("tbl_", "orders");
        let mut response = RecordedResponse::default();
        dispatcher
            .dispatch(
                &request(Some("tbl_delete"), &[]),
                &ctx,
                &StaticReferrer,
                &mut response,
            )
            .await
            .unwrap();

        assert_eq!(action.calls(), 1);
    }

    #[tokio::test]
    async fn test_inline_handler_is_always_authorized() {
        let mut registry = ActionRegistry::new();
        registry
            .register(
                "export",
                crate::types::ActionDescriptor::new(HandlerRef::inline(|ctx, ids| {
                    ctx.notices.info(format!("exported {}", ids.len()));
                    Ok(())
                })),
            )
            .unwrap();
        let dispatcher = dispatcher_for(registry);

        let ctx = DispatchContext::new("tbl_", "orders");
        let mut response = RecordedResponse::default();
        let result = dispatcher
            .dispatch(
                &request(Some("tbl_export"), &["4"]),
                &ctx,
                &StaticReferrer,
                &mut response,
            )
            .await
            .unwrap();

        assert!(result.executed);
        assert_eq!(result.notices[0].message, "exported 1");
    }

    #[tokio::test]
    async fn test_handler_error_propagates() {
        let mut registry = ActionRegistry::new();
        registry
            .register(
                "explode",
                crate::types::ActionDescriptor::new(HandlerRef::inline(|_, _| {
                    Err(ActionError::HandlerFailed("storage offline".to_string()))
                })),
            )
            .unwrap();
        let dispatcher = dispatcher_for(registry);

        let ctx = DispatchContext::new("tbl_", "orders");
        let mut response = RecordedResponse::default();
        let err = dispatcher
            .dispatch(
                &request(Some("tbl_explode"), &[]),
                &ctx,
                &StaticReferrer,
                &mut response,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::HandlerFailed(_)));
        assert!(err.to_string().contains("storage offline"));
    }

    #[tokio::test]
    async fn test_named_handler_resolved_through_catalog() {
        let action = CountingAction::new(true);
        let mut catalog = HandlerCatalog::new();
        catalog.register("orders.Delete", Arc::clone(&action) as _);

        let mut registry = ActionRegistry::new();
        registry
            .register(
                "delete",
                crate::types::ActionDescriptor::new(HandlerRef::Named("Delete".to_string())),
            )
            .unwrap();
        let dispatcher = ActionDispatcher::new(
            registry,
            ActionExpander::default(),
            HandlerResolver::new(catalog),
        );

        let ctx = DispatchContext::new("tbl_", "orders");
        let mut response = RecordedResponse::default();
        let result = dispatcher
            .dispatch(
                &request(Some("tbl_delete"), &["1"]),
                &ctx,
                &StaticReferrer,
                &mut response,
            )
            .await
            .unwrap();

        assert!(result.executed);
        assert_eq!(action.calls(), 1);
    }

    #[tokio::test]
    async fn test_unresolvable_named_handler_is_a_configuration_error() {
        let mut registry = ActionRegistry::new();
        registry
            .register(
                "delete",
                crate::types::ActionDescriptor::new(HandlerRef::Named("Delete".to_string())),
            )
            .unwrap();
        let dispatcher = dispatcher_for(registry);

        let ctx = DispatchContext::new("tbl_", "orders");
        let mut response = RecordedResponse::default();
        let err = dispatcher
            .dispatch(
                &request(Some("tbl_delete"), &[]),
                &ctx,
                &StaticReferrer,
                &mut response,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::HandlerNotFound(_)));
    }

    #[tokio::test]
    async fn test_dispatch_from_reads_request_parameters() {
        let action = CountingAction::new(true);
        let mut registry = ActionRegistry::new();
        registry
            .register(
                "delete",
                crate::types::ActionDescriptor::new(HandlerRef::Capability(
                    Arc::clone(&action) as _
                )),
            )
            .unwrap();
        let dispatcher = dispatcher_for(registry);

        let source = MemoryRequest::new()
            .insert("tbl_action", "tbl_delete")
            .insert("tbl_id", "11")
            .insert("tbl_id", "12");

        let ctx = DispatchContext::new("tbl_", "orders");
        let mut response = RecordedResponse::default();
        let result = dispatcher
            .dispatch_from(&source, &ctx, &StaticReferrer, &mut response)
            .await
            .unwrap();

        assert!(result.executed);
        assert_eq!(result.notices[0].message, "2 rows handled");
    }

    #[tokio::test]
    async fn test_prefix_isolates_listings() {
        // Same slug registered on two listings; only the matching prefix
        // dispatches.
        let action = CountingAction::new(true);
        let mut registry = ActionRegistry::new();
        registry
            .register(
                "delete",
                crate::types::ActionDescriptor::new(HandlerRef::Capability(
                    Arc::clone(&action) as _
                )),
            )
            .unwrap();
        let dispatcher = dispatcher_for(registry);

        let ctx = DispatchContext::new("other_", "orders");
        let mut response = RecordedResponse::default();
        let result = dispatcher
            .dispatch(
                &request(Some("tbl_delete"), &[]),
                &ctx,
                &StaticReferrer,
                &mut response,
            )
            .await
            .unwrap();

        assert!(!result.executed);
        assert_eq!(action.calls(), 0);
    }
}
