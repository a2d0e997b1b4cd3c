//! Rendering-agnostic toast payloads
//!
//! The core never renders anything. It only carries content through to
//! observers, which decide how to present it.

use std::sync::Arc;

use serde_json::Value;

/// Content producer evaluated by the renderer at draw time
pub type ContentFn = Arc<dyn Fn() -> Content + Send + Sync>;

/// Payload of a toast title or description
#[derive(Clone)]
pub enum Content {
    /// Plain text
    Text(String),
    /// Pre-built element tree, opaque to the core
    Element(Value),
    /// Content computed when the renderer asks for it
    Deferred(ContentFn),
}

impl Content {
    /// Create text content
    pub fn text(s: impl Into<String>) -> Self {
        Content::Text(s.into())
    }

    /// Create an opaque element
    pub fn element(tree: Value) -> Self {
        Content::Element(tree)
    }

    /// Create content evaluated lazily by the renderer
    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn() -> Content + Send + Sync + 'static,
    {
        Content::Deferred(Arc::new(f))
    }

    /// Text, if this is plain text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Evaluate deferred content down to a concrete value
    pub fn resolve(&self) -> Content {
        match self {
            Content::Deferred(f) => f().resolve(),
            other => other.clone(),
        }
    }
}

impl std::fmt::Debug for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Content::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Content::Element(v) => f.debug_tuple("Element").field(v).finish(),
            Content::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Content::Text(a), Content::Text(b)) => a == b,
            (Content::Element(a), Content::Element(b)) => a == b,
            (Content::Deferred(a), Content::Deferred(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl From<Value> for Content {
    fn from(v: Value) -> Self {
        Content::Element(v)
    }
}
