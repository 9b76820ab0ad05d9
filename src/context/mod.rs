//! Application contexts and user sessions.
//!
//! Both are owned by the hosting server; the registry only uses their
//! attribute slots to attach itself. Dropping a context or session drops
//! whatever registry was attached to it.

mod attributes;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub use attributes::Attributes;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an [`AppContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

/// Process-unique identity of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One deployed application.
#[derive(Debug)]
pub struct AppContext {
    id: ContextId,
    attributes: Attributes,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            id: ContextId(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed)),
            attributes: Attributes::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> ContextId {
        self.id
    }

    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// One user session inside an application context.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    context: Arc<AppContext>,
    attributes: Attributes,
}

impl Session {
    pub fn new(context: Arc<AppContext>) -> Self {
        Self {
            id: SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed)),
            context,
            attributes: Attributes::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Application context this session belongs to.
    #[inline]
    pub fn context(&self) -> &Arc<AppContext> {
        &self.context
    }

    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
