//! Toast data model
//!
//! - Identities and the id allocator
//! - Rendering-agnostic content
//! - Records, kinds and producer input

pub mod content;
pub mod id;
pub mod record;

pub use content::{Content, ContentFn};
pub use id::{IdAllocator, ToastId};
pub use record::{Toast, ToastDuration, ToastInput, ToastKind};
