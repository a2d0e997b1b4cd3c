//! Toast registry
//!
//! The registry is the single source of truth for toast state: the full
//! history of records in insertion order, and the set of ids currently
//! considered dismissed.
//!
//! # Architecture
//!
//! ```text
//!                        ToastRegistry
//!              ┌──────────────────────────────┐
//!              │ toasts:    Vec<Toast>        │  history, never shrinks
//!              │ index:     ToastId -> pos    │
//!              │ dismissed: HashSet<ToastId>  │  "is it active?"
//!              └──────────────────────────────┘
//!                 ▲ upsert / dismiss      │ active / history
//!                 │                       ▼
//!             [Toaster]              [Renderers, queries]
//! ```
//!
//! Dismissal and history are independent: dismissing keeps the record, and
//! recreating an id removes it from the dismissed set without touching its
//! place in history.

pub mod store;

pub use store::{ToastRegistry, Upserted};
