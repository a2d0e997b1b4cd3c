//! Toast records and producer input
//!
//! [`ToastInput`] is what producers hand to the toaster: every field is
//! optional. [`Toast`] is the record kept in history and delivered to
//! observers, produced from an input on first sight of an id and merged with
//! later inputs sharing that id.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content::Content;
use super::id::ToastId;

/// Visual intent of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Default,
    Success,
    Error,
    Warning,
    Info,
    Loading,
    /// Caller-rendered content
    Custom,
}

/// How long a toast stays on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastDuration {
    /// Auto-close after this long
    Timed(Duration),
    /// Stays until dismissed
    Infinite,
}

impl ToastDuration {
    /// Timed duration in milliseconds
    pub fn millis(ms: u64) -> Self {
        ToastDuration::Timed(Duration::from_millis(ms))
    }
}

/// Producer-side description of a toast
///
/// Absent fields keep whatever the existing record has when the id is
/// already known.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastInput {
    pub id: Option<ToastId>,
    pub channel: Option<String>,
    pub kind: Option<ToastKind>,
    pub title: Option<Content>,
    pub description: Option<Content>,
    pub dismissible: Option<bool>,
    pub duration: Option<ToastDuration>,
    /// Presentation options passed through untouched
    pub options: Map<String, Value>,
    pub(crate) bound: Option<bool>,
}

impl ToastInput {
    /// Create an empty input
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id
    pub fn id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Route to a channel
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Set the kind
    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<Content>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<Content>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set whether the user may close the toast
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    /// Set the on-screen duration
    pub fn duration(mut self, duration: ToastDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Add a presentation option
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub(crate) fn bound(mut self, bound: bool) -> Self {
        self.bound = Some(bound);
        self
    }

    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn overlay(mut self, other: ToastInput) -> Self {
        self.id = other.id.or(self.id);
        self.channel = other.channel.or(self.channel);
        self.kind = other.kind.or(self.kind);
        self.title = other.title.or(self.title);
        self.description = other.description.or(self.description);
        self.dismissible = other.dismissible.or(self.dismissible);
        self.duration = other.duration.or(self.duration);
        self.options.extend(other.options);
        self.bound = other.bound.or(self.bound);
        self
    }
}

/// A toast as stored in history and seen by observers
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    /// `None` routes to the default channel
    pub channel: Option<String>,
    pub kind: ToastKind,
    pub title: Option<Content>,
    pub description: Option<Content>,
    pub dismissible: bool,
    pub duration: Option<ToastDuration>,
    pub options: Map<String, Value>,
    /// True while a bound future for this id has not settled
    pub bound: bool,
}

impl Toast {
    /// Build a new record from producer input
    pub(crate) fn from_input(id: ToastId, input: ToastInput) -> Self {
        Self {
            id,
            channel: input.channel,
            kind: input.kind.unwrap_or_default(),
            title: input.title,
            description: input.description,
            dismissible: input.dismissible.unwrap_or(true),
            duration: input.duration,
            options: input.options,
            bound: input.bound.unwrap_or(false),
        }
    }

    /// Merge later input into this record, keeping fields the input omits
    pub(crate) fn merge(&mut self, input: ToastInput) {
        if let Some(channel) = input.channel {
            self.channel = Some(channel);
        }
        if let Some(kind) = input.kind {
            self.kind = kind;
        }
        if let Some(title) = input.title {
            self.title = Some(title);
        }
        if let Some(description) = input.description {
            self.description = Some(description);
        }
        if let Some(dismissible) = input.dismissible {
            self.dismissible = dismissible;
        }
        if let Some(duration) = input.duration {
            self.duration = Some(duration);
        }
        if let Some(bound) = input.bound {
            self.bound = bound;
        }
        self.options.extend(input.options);
    }

    /// Channel this record routes to
    pub fn channel_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.channel.as_deref().unwrap_or(default)
    }

    /// Whether this record routes to `channel`
    pub fn routes_to(&self, channel: &str, default: &str) -> bool {
        self.channel_or(default) == channel
    }
}
