//! Request-scoped notice sink.
//!
//! Handlers push user-facing messages here during invocation; the dispatcher
//! drains the sink at the end of the same request. A sink must be freshly
//! constructed per request — sharing one across requests in a long-lived
//! process leaks notices between users.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::types::{Notice, NoticeLevel};

/// Append-only queue of user-facing messages for one request.
///
/// Cheaply cloneable; clones share the same queue so a handler can hold its
/// own handle while the dispatcher drains at reporting time.
#[derive(Clone, Default)]
pub struct NoticeSink {
    queue: Arc<Mutex<VecDeque<Notice>>>,
}

impl NoticeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notice.
    pub fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        self.queue
            .lock()
            .unwrap()
            .push_back(Notice::new(level, message));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    /// Remove and return all accumulated notices, in push order.
    pub fn drain(&self) -> Vec<Notice> {
        self.queue.lock().unwrap().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().unwrap().is_empty()
    }
}
