//! Toaster configuration

use crate::scheduler::{FrameQueue, FrameScheduler};

/// Name of the implicit channel
pub const DEFAULT_CHANNEL: &str = "default";

/// Toaster configuration options
#[derive(Debug, Clone)]
pub struct ToasterConfig {
    /// Channel for records and calls that name none
    pub default_channel: String,

    /// Where deferred dismissal events are delivered
    pub frame_scheduler: FrameScheduler,

    /// Replay active records to observers that subscribe late
    pub replay_on_subscribe: bool,
}

impl Default for ToasterConfig {
    fn default() -> Self {
        Self {
            default_channel: DEFAULT_CHANNEL.to_string(),
            frame_scheduler: FrameScheduler::Tokio,
            replay_on_subscribe: false,
        }
    }
}

impl ToasterConfig {
    /// Set the implicit channel name
    pub fn default_channel(mut self, channel: impl Into<String>) -> Self {
        self.default_channel = channel.into();
        self
    }

    /// Set the frame scheduler
    pub fn frame_scheduler(mut self, scheduler: FrameScheduler) -> Self {
        self.frame_scheduler = scheduler;
        self
    }

    /// Deliver dismissals inline instead of on the next frame
    pub fn immediate_dismissals(mut self) -> Self {
        self.frame_scheduler = FrameScheduler::Immediate;
        self
    }

    /// Queue dismissals on a frame queue the embedder drains
    pub fn manual_frames(mut self, queue: FrameQueue) -> Self {
        self.frame_scheduler = FrameScheduler::Manual(queue);
        self
    }

    /// Send active records to every new observer before live events
    pub fn replay_on_subscribe(mut self, enabled: bool) -> Self {
        self.replay_on_subscribe = enabled;
        self
    }
}
