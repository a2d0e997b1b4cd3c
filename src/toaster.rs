//! Toast lifecycle controller
//!
//! [`Toaster`] is the context object producers and renderers share. It owns
//! the id allocator, the registry and the router, and turns producer calls
//! into registry writes plus events for the matching channel's observers.
//!
//! A process-wide instance is available through [`global`]; tests and
//! embedders that want isolation construct their own with [`Toaster::new`].

use std::sync::{Arc, OnceLock};

use crate::channel::ChannelToaster;
use crate::config::ToasterConfig;
use crate::scheduler::FrameTask;
use crate::registry::{ToastRegistry, Upserted};
use crate::router::{EventStream, Observer, Router, Subscription, ToastEvent};
use crate::toast::{Content, IdAllocator, Toast, ToastId, ToastInput, ToastKind};

struct Inner {
    config: ToasterConfig,
    ids: IdAllocator,
    registry: ToastRegistry,
    router: Router,
}

/// Shared toast state: registry, router and id allocator
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Toaster {
    inner: Arc<Inner>,
}

impl Toaster {
    /// Create a toaster with default configuration
    pub fn new() -> Self {
        Self::with_config(ToasterConfig::default())
    }

    /// Create a toaster with custom configuration
    pub fn with_config(config: ToasterConfig) -> Self {
        let registry = ToastRegistry::with_default_channel(config.default_channel.clone());

        Self {
            inner: Arc::new(Inner {
                config,
                ids: IdAllocator::new(),
                registry,
                router: Router::new(),
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ToasterConfig {
        &self.inner.config
    }

    /// Name of the implicit channel
    pub fn default_channel(&self) -> &str {
        &self.inner.config.default_channel
    }

    /// Get the registry
    pub fn registry(&self) -> &ToastRegistry {
        &self.inner.registry
    }

    /// Get the router
    pub fn router(&self) -> &Router {
        &self.inner.router
    }

    /// Resolve the id a create call would use without creating anything
    pub(crate) fn resolve_id(&self, requested: Option<ToastId>) -> ToastId {
        self.inner.ids.resolve(requested)
    }

    /// Create a toast, or update the existing one with the same id
    ///
    /// Clears the id from the dismissed set. Observers of the record's channel
    /// get [`ToastEvent::Created`] for a new id and [`ToastEvent::Updated`]
    /// otherwise. Returns the effective id.
    pub fn create(&self, mut input: ToastInput) -> ToastId {
        let id = self.resolve_id(input.id.take());

        let Upserted { toast, created } = self.inner.registry.upsert(id.clone(), input);
        let channel = toast.channel_or(self.default_channel()).to_string();

        let event = if created {
            ToastEvent::Created(toast)
        } else {
            ToastEvent::Updated(toast)
        };
        let delivered = self.inner.router.publish(&channel, &event);

        tracing::trace!(toast = %id, channel = %channel, observers = delivered, "Toast published");

        id
    }

    /// Create a toast of a given kind with a title
    fn create_kind(&self, kind: ToastKind, title: impl Into<Content>, input: ToastInput) -> ToastId {
        self.create(input.kind(kind).title(title))
    }

    /// Plain message; an existing record keeps its kind
    pub fn message(&self, title: impl Into<Content>, input: ToastInput) -> ToastId {
        self.create(input.title(title))
    }

    /// Success toast
    pub fn success(&self, title: impl Into<Content>, input: ToastInput) -> ToastId {
        self.create_kind(ToastKind::Success, title, input)
    }

    /// Error toast
    pub fn error(&self, title: impl Into<Content>, input: ToastInput) -> ToastId {
        self.create_kind(ToastKind::Error, title, input)
    }

    /// Warning toast
    pub fn warning(&self, title: impl Into<Content>, input: ToastInput) -> ToastId {
        self.create_kind(ToastKind::Warning, title, input)
    }

    /// Info toast
    pub fn info(&self, title: impl Into<Content>, input: ToastInput) -> ToastId {
        self.create_kind(ToastKind::Info, title, input)
    }

    /// Loading toast
    pub fn loading(&self, title: impl Into<Content>, input: ToastInput) -> ToastId {
        self.create_kind(ToastKind::Loading, title, input)
    }

    /// Caller-rendered toast
    ///
    /// The id is settled first so `render` can bake it into the content
    /// (e.g. for a close button that dismisses this very toast).
    pub fn custom<F>(&self, render: F, mut input: ToastInput) -> ToastId
    where
        F: FnOnce(&ToastId) -> Content,
    {
        let id = self.resolve_id(input.id.take());
        let content = render(&id);
        self.create(input.id(id).kind(ToastKind::Custom).title(content))
    }

    /// Dismiss toasts
    ///
    /// - `id` given: marks it dismissed and publishes the dismissal on the
    ///   next frame, to `channel` if given, else the record's own channel.
    ///   A dismissal issued while any publish is running is held until the
    ///   outermost publish returns.
    /// - only `channel` given: dismisses every active record on it.
    /// - neither: dismisses every record, each announced on its own channel.
    ///
    /// Returns `id` unchanged.
    pub fn dismiss(&self, id: Option<ToastId>, channel: Option<&str>) -> Option<ToastId> {
        match (&id, channel) {
            (Some(id), _) => self.dismiss_one(id, channel),
            (None, Some(channel)) => {
                for toast in self.inner.registry.dismiss_all(Some(channel)) {
                    self.publish_dismissal(channel, toast.id);
                }
            }
            (None, None) => {
                for toast in self.inner.registry.dismiss_all(None) {
                    let channel = toast.channel_or(self.default_channel()).to_string();
                    self.publish_dismissal(&channel, toast.id);
                }
            }
        }

        id
    }

    /// Dismiss one toast by id
    pub fn dismiss_id(&self, id: impl Into<ToastId>) -> ToastId {
        let id = id.into();
        self.dismiss_one(&id, None);
        id
    }

    /// Dismiss every active toast on a channel
    pub fn dismiss_channel(&self, channel: &str) {
        self.dismiss(None, Some(channel));
    }

    /// Dismiss every toast on every channel
    pub fn dismiss_all(&self) {
        self.dismiss(None, None);
    }

    fn dismiss_one(&self, id: &ToastId, channel: Option<&str>) {
        self.inner.registry.dismiss(id);

        let channel = match channel {
            Some(channel) => channel.to_string(),
            None => self
                .inner
                .registry
                .get(id)
                .and_then(|t| t.channel)
                .unwrap_or_else(|| self.default_channel().to_string()),
        };

        let router = self.inner.router.clone();
        let event = ToastEvent::Dismissed { id: id.clone() };
        let deliver: FrameTask = Box::new(move || {
            router.publish(&channel, &event);
        });

        // Called from an observer: wait for the running publish instead
        let Some(deliver) = self.inner.router.hold_while_publishing(deliver) else {
            tracing::trace!(toast = %id, "Dismissal held until publish returns");
            return;
        };

        let router = self.inner.router.clone();
        self.inner.config.frame_scheduler.schedule(Box::new(move || {
            if let Some(deliver) = router.hold_while_publishing(deliver) {
                deliver();
            }
        }));
    }

    fn publish_dismissal(&self, channel: &str, id: ToastId) {
        self.inner
            .router
            .publish(channel, &ToastEvent::Dismissed { id });
    }

    /// Active records, optionally limited to one channel
    pub fn active(&self, channel: Option<&str>) -> Vec<Toast> {
        self.inner.registry.active(channel)
    }

    /// Every record ever created, dismissed ones included
    pub fn history(&self) -> Vec<Toast> {
        self.inner.registry.history()
    }

    /// Look up one record
    pub fn get(&self, id: &ToastId) -> Option<Toast> {
        self.inner.registry.get(id)
    }

    /// Register an observer for a channel
    ///
    /// With `replay_on_subscribe` configured, the observer first receives a
    /// `Created` event for each record already active on the channel.
    pub fn subscribe<O: Observer>(&self, channel: impl Into<String>, observer: O) -> Subscription {
        if self.inner.config.replay_on_subscribe {
            self.subscribe_with_replay(channel, observer)
        } else {
            self.inner.router.subscribe(channel, observer)
        }
    }

    /// Register an observer, replaying currently active records to it first
    pub fn subscribe_with_replay<O: Observer>(
        &self,
        channel: impl Into<String>,
        observer: O,
    ) -> Subscription {
        let channel = channel.into();
        for toast in self.inner.registry.active(Some(&channel)) {
            observer.on_event(&ToastEvent::Created(toast));
        }
        self.inner.router.subscribe(channel, observer)
    }

    /// Subscribe an async event stream to a channel
    pub fn events(&self, channel: impl Into<String>) -> EventStream {
        let channel = channel.into();
        let backlog = if self.inner.config.replay_on_subscribe {
            self.inner
                .registry
                .active(Some(&channel))
                .into_iter()
                .map(ToastEvent::Created)
                .collect()
        } else {
            Vec::new()
        };
        self.inner.router.stream_with_backlog(channel, backlog)
    }

    /// Producer facade bound to one channel
    pub fn channel(&self, name: impl Into<String>) -> ChannelToaster {
        ChannelToaster::new(self.clone(), name)
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Toaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toaster")
            .field("config", &self.inner.config)
            .field("records", &self.inner.registry.len())
            .field("router", &self.inner.router)
            .finish()
    }
}

static GLOBAL: OnceLock<Toaster> = OnceLock::new();

/// Process-wide toaster with default configuration
pub fn global() -> &'static Toaster {
    GLOBAL.get_or_init(Toaster::new)
}

/// Show a plain message on the process-wide toaster
pub fn toast(title: impl Into<Content>) -> ToastId {
    global().message(title, ToastInput::new())
}
