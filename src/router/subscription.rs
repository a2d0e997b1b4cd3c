//! Observer handles
//!
//! A [`Subscription`] owns its place in a channel's observer list. Dropping it
//! (or calling [`Subscription::unsubscribe`]) removes exactly that observer.

use std::pin::Pin;
use std::sync::Weak;
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::sync::mpsc;

use super::event::ToastEvent;
use super::RouterInner;

/// Receives events for the channels it is subscribed to
///
/// Observers run synchronously inside `publish`, in registration order. They
/// may call back into the toaster; no router lock is held while they run.
pub trait Observer: Send + Sync + 'static {
    /// Handle one event
    fn on_event(&self, event: &ToastEvent);
}

impl<F> Observer for F
where
    F: Fn(&ToastEvent) + Send + Sync + 'static,
{
    fn on_event(&self, event: &ToastEvent) {
        self(event)
    }
}

/// Handle to one registered observer
#[must_use = "dropping a Subscription unsubscribes its observer"]
pub struct Subscription {
    pub(super) router: Weak<RouterInner>,
    pub(super) channel: String,
    pub(super) observer_id: u64,
    pub(super) active: bool,
}

impl Subscription {
    /// Channel this observer listens on
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Remove the observer now
    pub fn unsubscribe(mut self) {
        self.remove();
    }

    /// Keep the observer registered for the router's lifetime
    pub fn detach(mut self) {
        self.active = false;
    }

    fn remove(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        if let Some(router) = self.router.upgrade() {
            router.remove(&self.channel, self.observer_id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("observer_id", &self.observer_id)
            .field("active", &self.active)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Channel observer exposed as an async stream of events
///
/// Events are buffered without bound until read.
#[derive(Debug)]
pub struct EventStream {
    pub(super) subscription: Subscription,
    pub(super) rx: mpsc::UnboundedReceiver<ToastEvent>,
}

impl EventStream {
    /// Wait for the next event
    pub async fn recv(&mut self) -> Option<ToastEvent> {
        self.rx.recv().await
    }

    /// Take the next event if one is already buffered
    pub fn try_recv(&mut self) -> Option<ToastEvent> {
        self.rx.try_recv().ok()
    }

    /// Drain every buffered event
    pub fn drain(&mut self) -> Vec<ToastEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Channel this stream listens on
    pub fn channel(&self) -> &str {
        self.subscription.channel()
    }

    /// Stop listening; already buffered events are discarded
    pub fn close(self) {
        self.subscription.unsubscribe();
    }
}

impl Stream for EventStream {
    type Item = ToastEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
