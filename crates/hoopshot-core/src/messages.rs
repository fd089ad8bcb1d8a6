use serde::{Deserialize, Serialize};

use crate::time::Tick;

/// A transient HUD message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    /// First tick at which the message is no longer shown.
    pub expires_at: Tick,
}

/// Holds the single visible HUD message and clears it once its tick passes.
///
/// A newer message replaces whatever is currently shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBoard {
    visible: Option<Message>,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self { visible: None }
    }

    /// Show `text` from tick `now` for `duration` ticks.
    pub fn show(&mut self, text: impl Into<String>, now: Tick, duration: Tick) {
        self.visible = Some(Message {
            text: text.into(),
            expires_at: now.saturating_add(duration),
        });
    }

    /// Drop the visible message if it has expired at `now`.
    pub fn expire(&mut self, now: Tick) {
        if self.visible.as_ref().is_some_and(|m| now >= m.expires_at) {
            self.visible = None;
        }
    }

    /// Currently visible message, if any.
    pub fn current(&self) -> Option<&Message> {
        self.visible.as_ref()
    }
}
