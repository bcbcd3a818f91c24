use serde::{Deserialize, Serialize};

/// How the render loop waits between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventPolicy {
    /// Redraw continuously, returning from event polling immediately.
    #[default]
    Poll,
    /// Sleep until the next input event arrives.
    Wait,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub event_policy: EventPolicy,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 480,
            title: "Hello World".to_string(),
            event_policy: EventPolicy::Poll,
            vsync: true,
        }
    }
}
