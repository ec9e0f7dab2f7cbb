//! The request-scoped carrier: an immutable property stack plus well-known
//! identity values.
//!
//! `push_property` never mutates; it returns a new carrier whose stack has a
//! fresh head node, so a child scope can layer properties without affecting
//! the parent held elsewhere. Lookup walks newest-first, which also defines
//! shadowing inside the stack.

use crate::value::Value;
use std::sync::Arc;

#[derive(Debug)]
struct Node {
    key: String,
    value: Value,
    next: Option<Arc<Node>>,
}

/// A cheaply cloneable carrier attached to a unit of work.
#[derive(Debug, Clone, Default)]
pub struct Context {
    stack: Option<Arc<Node>>,
    request_id: Option<String>,
    correlation_id: Option<String>,
    user_id: Option<String>,
    session_id: Option<String>,
    trace_id: Option<String>,
    span_id: Option<String>,
}

impl Context {
    /// An empty carrier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A carrier with `(key, value)` pushed onto the property stack.
    #[must_use]
    pub fn push_property(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut child = self.clone();
        child.stack = Some(Arc::new(Node {
            key: key.into(),
            value: value.into(),
            next: self.stack.clone(),
        }));
        child
    }

    /// Looks up a stacked property, newest entry first.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        let mut node = self.stack.as_deref();
        while let Some(n) = node {
            if n.key == key {
                return Some(&n.value);
            }
            node = n.next.as_deref();
        }
        None
    }

    /// Visits every stack entry newest-first, shadowed entries included.
    pub(crate) fn for_each_property(&self, mut f: impl FnMut(&str, &Value)) {
        let mut node = self.stack.as_deref();
        while let Some(n) = node {
            f(&n.key, &n.value);
            node = n.next.as_deref();
        }
    }

    /// Number of stack nodes, shadowed entries included.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut count = 0;
        let mut node = self.stack.as_deref();
        while let Some(n) = node {
            count += 1;
            node = n.next.as_deref();
        }
        count
    }

    /// Sets the request id carried by this context.
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Sets the correlation id carried by this context.
    #[must_use]
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Sets the user id carried by this context.
    #[must_use]
    pub fn with_user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    /// Sets the session id carried by this context.
    #[must_use]
    pub fn with_session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    /// Sets the distributed trace id carried by this context.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Sets the span id carried by this context.
    #[must_use]
    pub fn with_span_id(mut self, id: impl Into<String>) -> Self {
        self.span_id = Some(id.into());
        self
    }

    /// Request id, if set.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Correlation id, if set.
    #[must_use]
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// User id, if set.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Session id, if set.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Trace id, if set.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Span id, if set.
    #[must_use]
    pub fn span_id(&self) -> Option<&str> {
        self.span_id.as_deref()
    }
}

/// Convenience free function mirroring the carrier method.
#[must_use]
pub fn push_property(ctx: &Context, key: impl Into<String>, value: impl Into<Value>) -> Context {
    ctx.push_property(key, value)
}
