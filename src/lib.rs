//! Channel-routed toast notification state
//!
//! `toast-rs` keeps the state behind toast notifications: an ordered history
//! of records keyed by id, the set of ids that were dismissed, and a router
//! that fans every creation, update and dismissal out to the observers
//! (rendering surfaces) registered for the record's channel. Producers never
//! learn which surfaces, if any, are listening.
//!
//! # Example
//!
//! ```no_run
//! use toast_rs::{PromiseOptions, ToastEvent, ToastInput, Toaster};
//!
//! # async fn demo() -> toast_rs::Result<()> {
//! let toaster = Toaster::new();
//!
//! let _surface = toaster.subscribe("default", |event: &ToastEvent| {
//!     println!("{:?}", event);
//! });
//!
//! toaster.success("Saved", ToastInput::new().description("All changes stored"));
//!
//! let options = PromiseOptions::<u32, String>::new()
//!     .loading("Uploading...")
//!     .success("Uploaded")
//!     .error("Upload failed");
//! if let Some(handle) = toaster.promise(async { Ok(3) }, Some(options))? {
//!     let _files = handle.unwrap().await;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Channels
//!
//! Every record belongs to a channel (`"default"` unless set). Observers
//! subscribe to exactly one channel; [`Toaster::channel`] gives a producer
//! facade pinned to one.

pub mod channel;
pub mod config;
pub mod error;
pub mod promise;
pub mod registry;
pub mod router;
pub mod scheduler;
pub mod toast;
pub mod toaster;

pub use channel::ChannelToaster;
pub use config::{ToasterConfig, DEFAULT_CHANNEL};
pub use error::{BoxError, Error, PromiseError, Result};
pub use promise::{Classification, Failure, Field, PromiseHandle, PromiseMessage, PromiseOptions, Settled};
pub use registry::ToastRegistry;
pub use router::{EventStream, Observer, Router, Subscription, ToastEvent};
pub use scheduler::{FrameQueue, FrameScheduler};
pub use toast::{Content, Toast, ToastDuration, ToastId, ToastInput, ToastKind};
pub use toaster::{global, toast, Toaster};
