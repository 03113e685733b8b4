//! Table action dispatch core for Gridwork.
//!
//! A listing (table of records) exposes a set of named actions a user can
//! trigger against selected rows. This crate matches an incoming request to
//! a registered action, expands the action's configuration, resolves its
//! handler, enforces authorization, runs it, and reports the outcome back to
//! the host's request/response cycle.

pub mod dispatcher;
pub mod error;
pub mod expander;
pub mod filter;
pub mod handler;
pub mod host;
pub mod notices;
pub mod registry;
pub mod resolver;
pub mod types;

pub use dispatcher::{ActionDispatcher, DispatchContext};
pub use error::ActionError;
pub use expander::ActionExpander;
pub use filter::ApplyTableFilters;
pub use handler::{HandlerCatalog, InlineHandler, TableAction};
pub use host::{MemoryRequest, ReferrerResolver, RequestSource, ResponseCarrier};
pub use notices::NoticeSink;
pub use registry::ActionRegistry;
pub use resolver::{HandlerResolver, Invocable};
pub use types::{
    ActionDescriptor, DispatchRequest, DispatchResult, HandlerRef, Notice, NoticeLevel,
};
