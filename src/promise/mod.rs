//! Async binding between futures and toasts
//!
//! ```text
//!   promise(future, options)
//!        │
//!        ├─ loading? ──► create(kind = loading, bound)
//!        │
//!        ▼ (spawned task)
//!   future settles ──► classify ──┬─ content  ──► create(kind = default)
//!                                 ├─ failure  ──► error field ──► create(kind = error)
//!                                 ├─ plain    ──► success field ─► create(kind = success)
//!                                 └─ nothing  ──► dismiss(id)
//!        │
//!        └─► finally hook ──► PromiseHandle::unwrap() resolves
//! ```

pub mod binder;
pub mod classify;
pub mod options;

pub use binder::PromiseHandle;
pub use classify::{sniff_json, Classification, Classifier};
pub use options::{
    DescriptionField, ErrorField, Failure, Field, MessageFuture, PromiseMessage, PromiseOptions,
    Settled, SuccessField,
};
