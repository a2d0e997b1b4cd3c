//! Channel-keyed observer routing
//!
//! The router maps a channel name to the observers currently registered for
//! it. Publishing fans an event out to every observer of one channel, in
//! registration order, synchronously. Nothing is queued for observers that
//! subscribe later.
//!
//! # Architecture
//!
//! ```text
//!                           Router
//!              ┌──────────────────────────────┐
//!              │ channels: HashMap<String,    │
//!              │   Vec<(observer_id,          │
//!              │        Arc<dyn Observer>)>   │
//!              │ >                            │
//!              └──────────────┬───────────────┘
//!                             │ publish("chat", event)
//!              ┌──────────────┼──────────────┐
//!              ▼              ▼              ▼
//!         [Observer]     [Observer]     [EventStream]
//!          on_event()     on_event()     mpsc -> recv()
//! ```
//!
//! A channel's entry exists only while it has at least one observer.
//!
//! While any publish is running, frame tasks handed to the router are held
//! and run once the outermost publish returns, so deferred work never reaches
//! an observer that is still handling an event.

pub mod event;
pub mod subscription;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use crate::scheduler::FrameTask;

pub use event::ToastEvent;
pub use subscription::{EventStream, Observer, Subscription};

type ObserverList = Vec<(u64, Arc<dyn Observer>)>;

/// Publishes in progress and the frame tasks waiting for them
#[derive(Default)]
struct FrameState {
    depth: usize,
    held: Vec<FrameTask>,
}

pub(crate) struct RouterInner {
    channels: Mutex<HashMap<String, ObserverList>>,
    frames: Mutex<FrameState>,
    next_observer_id: AtomicU64,
}

impl RouterInner {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, ObserverList>> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn frames(&self) -> MutexGuard<'_, FrameState> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn remove(&self, channel: &str, observer_id: u64) {
        let mut channels = self.lock();

        if let Some(observers) = channels.get_mut(channel) {
            observers.retain(|(id, _)| *id != observer_id);

            tracing::debug!(
                channel = channel,
                observer_id = observer_id,
                observers = observers.len(),
                "Observer removed"
            );

            if observers.is_empty() {
                channels.remove(channel);
            }
        }
    }
}

/// Marks one publish as running; releases held frame tasks when the
/// outermost one ends
struct PublishGuard<'a> {
    inner: &'a RouterInner,
}

impl<'a> PublishGuard<'a> {
    fn enter(inner: &'a RouterInner) -> Self {
        inner.frames().depth += 1;
        Self { inner }
    }
}

impl Drop for PublishGuard<'_> {
    fn drop(&mut self) {
        let released = {
            let mut frames = self.inner.frames();
            frames.depth -= 1;
            if frames.depth > 0 || std::thread::panicking() {
                return;
            }
            std::mem::take(&mut frames.held)
        };

        if !released.is_empty() {
            tracing::trace!(tasks = released.len(), "Running frame tasks held during publish");
        }
        for task in released {
            task();
        }
    }
}

/// Fan-out of toast events to per-channel observers
///
/// Cheap to clone; clones share the same observer table.
#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterInner>,
}

impl Router {
    /// Create an empty router
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RouterInner {
                channels: Mutex::new(HashMap::new()),
                frames: Mutex::new(FrameState::default()),
                next_observer_id: AtomicU64::new(1),
            }),
        }
    }

    /// Register an observer for a channel
    ///
    /// Registering the same observer twice yields two independent
    /// subscriptions.
    pub fn subscribe<O: Observer>(&self, channel: impl Into<String>, observer: O) -> Subscription {
        self.subscribe_arc(channel, Arc::new(observer))
    }

    /// Register a shared observer for a channel
    pub fn subscribe_arc(
        &self,
        channel: impl Into<String>,
        observer: Arc<dyn Observer>,
    ) -> Subscription {
        let channel = channel.into();
        let observer_id = self.inner.next_observer_id.fetch_add(1, Ordering::Relaxed);

        let mut channels = self.inner.lock();
        let observers = channels.entry(channel.clone()).or_default();
        observers.push((observer_id, observer));

        tracing::debug!(
            channel = %channel,
            observer_id = observer_id,
            observers = observers.len(),
            "Observer added"
        );

        Subscription {
            router: Arc::downgrade(&self.inner),
            channel,
            observer_id,
            active: true,
        }
    }

    /// Subscribe a buffered async stream to a channel
    pub fn stream(&self, channel: impl Into<String>) -> EventStream {
        self.stream_with_backlog(channel, Vec::new())
    }

    /// Subscribe a stream that yields `backlog` before any live event
    pub fn stream_with_backlog(
        &self,
        channel: impl Into<String>,
        backlog: impl IntoIterator<Item = ToastEvent>,
    ) -> EventStream {
        let (tx, rx) = mpsc::unbounded_channel();
        for event in backlog {
            let _ = tx.send(event);
        }
        let subscription = self.subscribe(channel, move |event: &ToastEvent| {
            // Receiver gone means the stream was dropped mid-publish
            let _ = tx.send(event.clone());
        });

        EventStream { subscription, rx }
    }

    /// Deliver an event to every observer of a channel
    ///
    /// Returns the number of observers notified; 0 when the channel has none.
    pub fn publish(&self, channel: &str, event: &ToastEvent) -> usize {
        // Snapshot so observers can re-enter the router
        let observers: Vec<Arc<dyn Observer>> = match self.inner.lock().get(channel) {
            Some(list) => list.iter().map(|(_, o)| Arc::clone(o)).collect(),
            None => return 0,
        };

        let _frame = PublishGuard::enter(&self.inner);
        for observer in &observers {
            observer.on_event(event);
        }

        observers.len()
    }

    /// Whether any publish is running right now, on any thread
    pub fn is_publishing(&self) -> bool {
        self.inner.frames().depth > 0
    }

    /// Hold `task` until the outermost running publish returns
    ///
    /// Gives the task back when nothing is publishing, for the caller to run
    /// or schedule.
    pub(crate) fn hold_while_publishing(&self, task: FrameTask) -> Option<FrameTask> {
        let mut frames = self.inner.frames();
        if frames.depth > 0 {
            frames.held.push(task);
            None
        } else {
            Some(task)
        }
    }

    /// Number of observers registered on a channel
    pub fn observer_count(&self, channel: &str) -> usize {
        self.inner.lock().get(channel).map_or(0, Vec::len)
    }

    /// Whether a channel currently has observers
    pub fn has_observers(&self, channel: &str) -> bool {
        self.inner.lock().contains_key(channel)
    }

    /// Number of channels with at least one observer
    pub fn channel_count(&self) -> usize {
        self.inner.lock().len()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("channels", &self.channel_count())
            .finish()
    }
}
