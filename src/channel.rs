//! Producer facade bound to one channel
//!
//! A [`ChannelToaster`] has the same producer surface as [`Toaster`] but
//! pins every call to one channel. Building one touches nothing; it only
//! holds a toaster clone and the channel name.

use std::future::Future;

use crate::error::Result;
use crate::promise::{PromiseHandle, PromiseOptions};
use crate::router::{EventStream, Observer, Subscription};
use crate::toast::{Content, Toast, ToastId, ToastInput};
use crate::toaster::Toaster;

/// Toaster calls pre-bound to a channel
#[derive(Debug, Clone)]
pub struct ChannelToaster {
    toaster: Toaster,
    channel: String,
}

impl ChannelToaster {
    /// Bind `toaster` to `channel`
    pub fn new(toaster: Toaster, channel: impl Into<String>) -> Self {
        Self {
            toaster,
            channel: channel.into(),
        }
    }

    /// Channel name
    pub fn name(&self) -> &str {
        &self.channel
    }

    /// Underlying toaster
    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    fn pin(&self, input: ToastInput) -> ToastInput {
        input.channel(self.channel.clone())
    }

    /// Create or update a toast on this channel
    pub fn create(&self, input: ToastInput) -> ToastId {
        self.toaster.create(self.pin(input))
    }

    /// Plain message; an existing record keeps its kind
    pub fn message(&self, title: impl Into<Content>, input: ToastInput) -> ToastId {
        self.toaster.message(title, self.pin(input))
    }

    /// Success toast
    pub fn success(&self, title: impl Into<Content>, input: ToastInput) -> ToastId {
        self.toaster.success(title, self.pin(input))
    }

    /// Error toast
    pub fn error(&self, title: impl Into<Content>, input: ToastInput) -> ToastId {
        self.toaster.error(title, self.pin(input))
    }

    /// Warning toast
    pub fn warning(&self, title: impl Into<Content>, input: ToastInput) -> ToastId {
        self.toaster.warning(title, self.pin(input))
    }

    /// Info toast
    pub fn info(&self, title: impl Into<Content>, input: ToastInput) -> ToastId {
        self.toaster.info(title, self.pin(input))
    }

    /// Loading toast
    pub fn loading(&self, title: impl Into<Content>, input: ToastInput) -> ToastId {
        self.toaster.loading(title, self.pin(input))
    }

    /// Caller-rendered toast; `render` gets the settled id
    pub fn custom<F>(&self, render: F, input: ToastInput) -> ToastId
    where
        F: FnOnce(&ToastId) -> Content,
    {
        self.toaster.custom(render, self.pin(input))
    }

    /// Bind a future; its records stay on this channel
    pub fn promise<T, E, Fut>(
        &self,
        future: Fut,
        options: Option<PromiseOptions<T, E>>,
    ) -> Result<Option<PromiseHandle<T, E>>>
    where
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let options = options.map(|o| o.channel(self.channel.clone()));
        self.toaster.promise(future, options)
    }

    /// Bind the future returned by `producer`
    pub fn promise_with<T, E, P, Fut>(
        &self,
        producer: P,
        options: Option<PromiseOptions<T, E>>,
    ) -> Result<Option<PromiseHandle<T, E>>>
    where
        P: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let options = options.map(|o| o.channel(self.channel.clone()));
        self.toaster.promise_with(producer, options)
    }

    /// Dismiss one toast, or every active toast on this channel
    ///
    /// The dismissal is announced on this channel either way.
    pub fn dismiss(&self, id: Option<ToastId>) -> Option<ToastId> {
        self.toaster.dismiss(id, Some(&self.channel))
    }

    /// Every record created on this channel, dismissed ones included
    pub fn history(&self) -> Vec<Toast> {
        self.toaster.registry().history_for(&self.channel)
    }

    /// Active records on this channel
    pub fn toasts(&self) -> Vec<Toast> {
        self.toaster.active(Some(&self.channel))
    }

    /// Register an observer for this channel
    pub fn subscribe<O: Observer>(&self, observer: O) -> Subscription {
        self.toaster.subscribe(self.channel.clone(), observer)
    }

    /// Async event stream for this channel
    pub fn events(&self) -> EventStream {
        self.toaster.events(self.channel.clone())
    }
}
