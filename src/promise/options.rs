//! Configuration for binding a future to a toast

use std::future::Future;
use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};

use crate::error::BoxError;
use crate::toast::{Content, ToastId, ToastInput};

use super::classify::{Classification, Classifier};

/// What a settled branch shows
#[derive(Debug, Clone, PartialEq)]
pub enum PromiseMessage {
    /// Use as the title
    Content(Content),
    /// Merge these fields into the terminal record
    Extended(ToastInput),
}

impl From<Content> for PromiseMessage {
    fn from(c: Content) -> Self {
        PromiseMessage::Content(c)
    }
}

impl From<&str> for PromiseMessage {
    fn from(s: &str) -> Self {
        PromiseMessage::Content(Content::from(s))
    }
}

impl From<String> for PromiseMessage {
    fn from(s: String) -> Self {
        PromiseMessage::Content(Content::from(s))
    }
}

impl From<ToastInput> for PromiseMessage {
    fn from(input: ToastInput) -> Self {
        PromiseMessage::Extended(input)
    }
}

/// Future produced by a computed field
pub type MessageFuture = BoxFuture<'static, Result<PromiseMessage, BoxError>>;

/// Computes success content from the resolved value
pub type SuccessFn<T> = dyn Fn(&T) -> MessageFuture + Send + Sync;
/// Computes error content from the failure
pub type ErrorFn<E> = dyn for<'a> Fn(Failure<'a, E>) -> MessageFuture + Send + Sync;
/// Computes a description from either outcome
pub type DescriptionFn<T, E> = dyn for<'a> Fn(Settled<'a, T, E>) -> MessageFuture + Send + Sync;

pub type SuccessField<T> = Field<SuccessFn<T>>;
pub type ErrorField<E> = Field<ErrorFn<E>>;
pub type DescriptionField<T, E> = Field<DescriptionFn<T, E>>;

/// A configuration value that is either fixed or computed from the outcome
///
/// Computing closures must pull what they need out of the outcome before
/// returning their future; the future itself cannot borrow it.
pub enum Field<F: ?Sized> {
    Literal(PromiseMessage),
    Computed(Arc<F>),
}

fn ready(message: PromiseMessage) -> MessageFuture {
    future::ready(Ok(message)).boxed()
}

fn boxed_message<Fut, M>(fut: Fut) -> MessageFuture
where
    Fut: Future<Output = Result<M, BoxError>> + Send + 'static,
    M: Into<PromiseMessage>,
{
    fut.map(|res| {
        res.map(|m| {
            let message: PromiseMessage = m.into();
            message
        })
    })
    .boxed()
}

impl<F: ?Sized> Field<F> {
    /// Fixed value
    pub fn literal(message: impl Into<PromiseMessage>) -> Self {
        Field::Literal(message.into())
    }

    /// The literal value, if this field is not computed
    pub fn as_literal(&self) -> Option<&PromiseMessage> {
        match self {
            Field::Literal(m) => Some(m),
            Field::Computed(_) => None,
        }
    }
}

impl<T> Field<SuccessFn<T>> {
    /// Content computed synchronously from the resolved value
    pub fn with<G, M>(g: G) -> Self
    where
        G: Fn(&T) -> M + Send + Sync + 'static,
        M: Into<PromiseMessage>,
    {
        Field::Computed(Arc::new(move |value: &T| -> MessageFuture {
            ready(g(value).into())
        }))
    }

    /// Content computed asynchronously from the resolved value; may fail
    pub fn computed<G, Fut, M>(g: G) -> Self
    where
        G: Fn(&T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<M, BoxError>> + Send + 'static,
        M: Into<PromiseMessage>,
    {
        Field::Computed(Arc::new(move |value: &T| -> MessageFuture {
            boxed_message(g(value))
        }))
    }

    pub(crate) fn evaluate(&self, value: &T) -> MessageFuture {
        match self {
            Field::Literal(m) => ready(m.clone()),
            Field::Computed(f) => f(value),
        }
    }
}

impl<E> Field<ErrorFn<E>> {
    /// Content computed synchronously from the failure
    pub fn with<G, M>(g: G) -> Self
    where
        G: for<'a> Fn(Failure<'a, E>) -> M + Send + Sync + 'static,
        M: Into<PromiseMessage>,
    {
        Field::Computed(Arc::new(move |failure: Failure<'_, E>| -> MessageFuture {
            ready(g(failure).into())
        }))
    }

    /// Content computed asynchronously from the failure; may fail
    pub fn computed<G, Fut, M>(g: G) -> Self
    where
        G: for<'a> Fn(Failure<'a, E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<M, BoxError>> + Send + 'static,
        M: Into<PromiseMessage>,
    {
        Field::Computed(Arc::new(move |failure: Failure<'_, E>| -> MessageFuture {
            boxed_message(g(failure))
        }))
    }

    pub(crate) fn evaluate(&self, failure: Failure<'_, E>) -> MessageFuture {
        match self {
            Field::Literal(m) => ready(m.clone()),
            Field::Computed(f) => f(failure),
        }
    }
}

impl<T, E> Field<DescriptionFn<T, E>> {
    /// Description computed synchronously from the outcome
    pub fn with<G, M>(g: G) -> Self
    where
        G: for<'a> Fn(Settled<'a, T, E>) -> M + Send + Sync + 'static,
        M: Into<PromiseMessage>,
    {
        Field::Computed(Arc::new(move |outcome: Settled<'_, T, E>| -> MessageFuture {
            ready(g(outcome).into())
        }))
    }

    /// Description computed asynchronously from the outcome; may fail
    pub fn computed<G, Fut, M>(g: G) -> Self
    where
        G: for<'a> Fn(Settled<'a, T, E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<M, BoxError>> + Send + 'static,
        M: Into<PromiseMessage>,
    {
        Field::Computed(Arc::new(move |outcome: Settled<'_, T, E>| -> MessageFuture {
            boxed_message(g(outcome))
        }))
    }

    pub(crate) fn evaluate(&self, outcome: Settled<'_, T, E>) -> MessageFuture {
        match self {
            Field::Literal(m) => ready(m.clone()),
            Field::Computed(f) => f(outcome),
        }
    }
}

impl<F: ?Sized> Clone for Field<F> {
    fn clone(&self) -> Self {
        match self {
            Field::Literal(m) => Field::Literal(m.clone()),
            Field::Computed(f) => Field::Computed(Arc::clone(f)),
        }
    }
}

impl<F: ?Sized> std::fmt::Debug for Field<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Literal(m) => f.debug_tuple("Literal").field(m).finish(),
            Field::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<F: ?Sized> From<&str> for Field<F> {
    fn from(s: &str) -> Self {
        Field::literal(s)
    }
}

impl<F: ?Sized> From<String> for Field<F> {
    fn from(s: String) -> Self {
        Field::literal(s)
    }
}

impl<F: ?Sized> From<Content> for Field<F> {
    fn from(c: Content) -> Self {
        Field::literal(c)
    }
}

impl<F: ?Sized> From<ToastInput> for Field<F> {
    fn from(input: ToastInput) -> Self {
        Field::literal(input)
    }
}

/// Why a bound future counts as failed, borrowed for content functions
pub enum Failure<'a, E> {
    /// Resolved with a response-like value that is not ok
    Status { status: u16 },
    /// Resolved with an error-like value
    Errored { message: &'a str },
    /// The future itself failed
    Rejected(&'a E),
}

impl<E> Clone for Failure<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Failure<'_, E> {}

impl<E: std::fmt::Debug> std::fmt::Debug for Failure<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Status { status } => f.debug_struct("Status").field("status", status).finish(),
            Failure::Errored { message } => {
                f.debug_struct("Errored").field("message", message).finish()
            }
            Failure::Rejected(e) => f.debug_tuple("Rejected").field(e).finish(),
        }
    }
}

impl<E> Failure<'_, E> {
    /// Text for a failure detected from the resolved value's shape
    ///
    /// `None` for rejections, whose text depends on `E`.
    pub fn shape_text(&self) -> Option<String> {
        match self {
            Failure::Status { status } => Some(format!("HTTP error! status: {}", status)),
            Failure::Errored { message } => Some(message.to_string()),
            Failure::Rejected(_) => None,
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for Failure<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Rejected(e) => write!(f, "{}", e),
            _ => f.write_str(&self.shape_text().unwrap_or_default()),
        }
    }
}

/// Outcome handed to description functions
pub enum Settled<'a, T, E> {
    Resolved(&'a T),
    Failed(Failure<'a, E>),
}

impl<T, E> Clone for Settled<'_, T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, E> Copy for Settled<'_, T, E> {}

/// How a bound future maps onto toast transitions
pub struct PromiseOptions<T, E> {
    /// Base fields for the loading record (id, channel, duration, ...)
    pub toast: ToastInput,
    /// Shown immediately while the future is pending
    pub loading: Option<Content>,
    /// Shown when the future succeeds
    pub success: Option<SuccessField<T>>,
    /// Shown when the future fails
    pub error: Option<ErrorField<E>>,
    /// Description for whichever terminal record is shown
    pub description: Option<DescriptionField<T, E>>,
    /// Maps a resolved value onto a branch; everything is plain without one
    pub classify: Option<Classifier<T>>,
    /// Runs once the future settled and the terminal record was written
    pub finally: Option<Box<dyn FnOnce() + Send>>,
}

impl<T, E> PromiseOptions<T, E> {
    /// Empty options
    pub fn new() -> Self {
        Self {
            toast: ToastInput::new(),
            loading: None,
            success: None,
            error: None,
            description: None,
            classify: None,
            finally: None,
        }
    }

    /// Base toast fields
    pub fn toast(mut self, input: ToastInput) -> Self {
        self.toast = input;
        self
    }

    /// Id for the loading record
    pub fn id(mut self, id: impl Into<ToastId>) -> Self {
        self.toast.id = Some(id.into());
        self
    }

    /// Channel for every record this binding writes
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.toast.channel = Some(channel.into());
        self
    }

    /// Loading content
    pub fn loading(mut self, content: impl Into<Content>) -> Self {
        self.loading = Some(content.into());
        self
    }

    /// Success content
    pub fn success(mut self, field: impl Into<SuccessField<T>>) -> Self {
        self.success = Some(field.into());
        self
    }

    /// Error content
    pub fn error(mut self, field: impl Into<ErrorField<E>>) -> Self {
        self.error = Some(field.into());
        self
    }

    /// Description content
    pub fn description(mut self, field: impl Into<DescriptionField<T, E>>) -> Self {
        self.description = Some(field.into());
        self
    }

    /// Classifier for resolved values
    pub fn classify<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> Classification + Send + Sync + 'static,
    {
        self.classify = Some(Arc::new(f));
        self
    }

    /// Completion hook
    pub fn finally<F>(mut self, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.finally = Some(Box::new(f));
        self
    }
}

impl<E> PromiseOptions<serde_json::Value, E> {
    /// Classify resolved JSON by shape (legacy, see [`sniff_json`](super::classify::sniff_json))
    pub fn sniff_shapes(self) -> Self {
        self.classify(super::classify::sniff_json)
    }
}

impl<T, E> Default for PromiseOptions<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> std::fmt::Debug for PromiseOptions<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromiseOptions")
            .field("toast", &self.toast)
            .field("loading", &self.loading)
            .field("success", &self.success)
            .field("error", &self.error)
            .field("description", &self.description)
            .field("classify", &self.classify.is_some())
            .field("finally", &self.finally.is_some())
            .finish()
    }
}
