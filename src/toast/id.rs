//! Toast identities
//!
//! A toast is identified either by a caller-supplied string or number, or by a
//! number drawn from the [`IdAllocator`] when the caller supplies nothing
//! usable.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Identity of a toast record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToastId {
    /// Numeric id (allocated or caller-supplied)
    Num(u64),
    /// Caller-supplied string id
    Str(String),
}

impl ToastId {
    /// Whether this id can be used as-is.
    ///
    /// Numbers are always usable; strings only when non-empty. An unusable id
    /// is replaced by a freshly allocated one.
    pub fn is_usable(&self) -> bool {
        match self {
            ToastId::Num(_) => true,
            ToastId::Str(s) => !s.is_empty(),
        }
    }

    /// Numeric value, if this is a numeric id
    pub fn as_num(&self) -> Option<u64> {
        match self {
            ToastId::Num(n) => Some(*n),
            ToastId::Str(_) => None,
        }
    }
}

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToastId::Num(n) => write!(f, "{}", n),
            ToastId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ToastId {
    fn from(n: u64) -> Self {
        ToastId::Num(n)
    }
}

impl From<&str> for ToastId {
    fn from(s: &str) -> Self {
        ToastId::Str(s.to_string())
    }
}

impl From<String> for ToastId {
    fn from(s: String) -> Self {
        ToastId::Str(s)
    }
}

/// Monotonic id source, starting at 1
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    /// Create an allocator whose first id is 1
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Issue the next id
    pub fn next(&self) -> ToastId {
        ToastId::Num(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Use `requested` when usable, otherwise allocate
    pub fn resolve(&self, requested: Option<ToastId>) -> ToastId {
        match requested {
            Some(id) if id.is_usable() => id,
            _ => self.next(),
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
