//! Toast registry implementation
//!
//! Keeps every toast ever created, in insertion order, plus the set of ids
//! currently considered dismissed. Records are never removed; dismissal only
//! flips membership in the dismissed set.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use crate::toast::{Toast, ToastId, ToastInput};

/// Result of an upsert
#[derive(Debug, Clone)]
pub struct Upserted {
    /// The record after the write
    pub toast: Toast,
    /// True when the id was not known before
    pub created: bool,
}

#[derive(Debug, Default)]
struct State {
    /// History in insertion order
    toasts: Vec<Toast>,
    /// Position of each id in `toasts`
    index: HashMap<ToastId, usize>,
    /// Ids considered dismissed
    dismissed: HashSet<ToastId>,
}

/// Central store for toast records
///
/// Thread-safe via `RwLock`. Every write is a single critical section, so an
/// upsert can never observe a half-applied dismissal.
#[derive(Debug)]
pub struct ToastRegistry {
    state: RwLock<State>,

    /// Channel that records without an explicit channel belong to
    default_channel: String,
}

impl ToastRegistry {
    /// Create a registry whose implicit channel is `"default"`
    pub fn new() -> Self {
        Self::with_default_channel("default")
    }

    /// Create a registry with a custom implicit channel name
    pub fn with_default_channel(default_channel: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(State::default()),
            default_channel: default_channel.into(),
        }
    }

    /// Name of the implicit channel
    pub fn default_channel(&self) -> &str {
        &self.default_channel
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a new record or merge into the existing one with the same id
    ///
    /// The id leaves the dismissed set either way. History order is not
    /// touched by updates.
    pub fn upsert(&self, id: ToastId, input: ToastInput) -> Upserted {
        let mut state = self.write();

        state.dismissed.remove(&id);

        let existing = state.index.get(&id).copied();
        if let Some(pos) = existing {
            let toast = &mut state.toasts[pos];
            toast.merge(input);

            tracing::debug!(
                toast = %id,
                channel = toast.channel_or(&self.default_channel),
                kind = ?toast.kind,
                "Toast updated"
            );

            Upserted {
                toast: toast.clone(),
                created: false,
            }
        } else {
            let toast = Toast::from_input(id.clone(), input);
            let pos = state.toasts.len();
            state.toasts.push(toast.clone());
            state.index.insert(id.clone(), pos);

            tracing::debug!(
                toast = %id,
                channel = toast.channel_or(&self.default_channel),
                kind = ?toast.kind,
                "Toast created"
            );

            Upserted {
                toast,
                created: true,
            }
        }
    }

    /// Mark an id as dismissed
    ///
    /// Returns false if it was already dismissed. Unknown ids are accepted.
    pub fn dismiss(&self, id: &ToastId) -> bool {
        let inserted = self.write().dismissed.insert(id.clone());
        if inserted {
            tracing::debug!(toast = %id, "Toast dismissed");
        }
        inserted
    }

    /// Dismiss many records at once
    ///
    /// With a channel, dismisses the records currently active on it and
    /// returns them. Without one, dismisses every known record and returns
    /// the whole history.
    pub fn dismiss_all(&self, channel: Option<&str>) -> Vec<Toast> {
        let mut state = self.write();

        let affected: Vec<Toast> = match channel {
            Some(channel) => state
                .toasts
                .iter()
                .filter(|t| {
                    !state.dismissed.contains(&t.id) && t.routes_to(channel, &self.default_channel)
                })
                .cloned()
                .collect(),
            None => state.toasts.clone(),
        };

        for toast in &affected {
            state.dismissed.insert(toast.id.clone());
        }

        tracing::debug!(
            channel = channel.unwrap_or("*"),
            count = affected.len(),
            "Toasts dismissed"
        );

        affected
    }

    /// Records not in the dismissed set, optionally limited to one channel
    pub fn active(&self, channel: Option<&str>) -> Vec<Toast> {
        let state = self.read();

        state
            .toasts
            .iter()
            .filter(|t| !state.dismissed.contains(&t.id))
            .filter(|t| channel.map_or(true, |c| t.routes_to(c, &self.default_channel)))
            .cloned()
            .collect()
    }

    /// Full history in insertion order, dismissed records included
    pub fn history(&self) -> Vec<Toast> {
        self.read().toasts.clone()
    }

    /// History limited to one channel
    pub fn history_for(&self, channel: &str) -> Vec<Toast> {
        self.read()
            .toasts
            .iter()
            .filter(|t| t.routes_to(channel, &self.default_channel))
            .cloned()
            .collect()
    }

    /// Look up a record by id
    pub fn get(&self, id: &ToastId) -> Option<Toast> {
        let state = self.read();
        state.index.get(id).map(|&pos| state.toasts[pos].clone())
    }

    /// Check whether an id is in the dismissed set
    pub fn is_dismissed(&self, id: &ToastId) -> bool {
        self.read().dismissed.contains(id)
    }

    /// Check whether an id is known and not dismissed
    pub fn is_active(&self, id: &ToastId) -> bool {
        let state = self.read();
        state.index.contains_key(id) && !state.dismissed.contains(id)
    }

    /// Set the bound-future flag without producing an update
    pub(crate) fn set_bound(&self, id: &ToastId, bound: bool) {
        let mut state = self.write();
        let existing = state.index.get(id).copied();
        if let Some(pos) = existing {
            state.toasts[pos].bound = bound;
        }
    }

    /// Number of records in history
    pub fn len(&self) -> usize {
        self.read().toasts.len()
    }

    /// Whether history is empty
    pub fn is_empty(&self) -> bool {
        self.read().toasts.is_empty()
    }
}

impl Default for ToastRegistry {
    fn default() -> Self {
        Self::new()
    }
}
