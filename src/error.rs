//! Error types
//!
//! Core toaster operations are infallible. Errors only arise around bound
//! futures: computing content for a settled operation, or losing the driver
//! task before it reports an outcome.

use thiserror::Error;

/// Result alias for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by caller-supplied content functions
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which binder branch was computing content when a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Success,
    Error,
    Description,
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Branch::Success => write!(f, "success"),
            Branch::Error => write!(f, "error"),
            Branch::Description => write!(f, "description"),
        }
    }
}

/// Crate error type
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied content function failed while a bound future settled
    #[error("failed to compute {branch} content: {message}")]
    ContentComputation { branch: Branch, message: String },

    /// A future was bound outside of a tokio runtime
    #[error("no tokio runtime available to drive the bound future")]
    NoRuntime,
}

impl Error {
    pub(crate) fn content(branch: Branch, source: &BoxError) -> Self {
        Error::ContentComputation {
            branch,
            message: source.to_string(),
        }
    }
}

/// Outcome error of [`PromiseHandle::unwrap`](crate::promise::PromiseHandle::unwrap)
#[derive(Debug, Error)]
pub enum PromiseError<E> {
    /// The bound future failed with this reason
    #[error("bound future rejected")]
    Rejected(E),

    /// The binder task was dropped or panicked
    #[error("bound future was interrupted before settling")]
    Interrupted,
}

impl<E> PromiseError<E> {
    /// Return the original rejection reason, if any
    pub fn into_rejection(self) -> Option<E> {
        match self {
            PromiseError::Rejected(e) => Some(e),
            PromiseError::Interrupted => None,
        }
    }
}
