use crate::controller::WindowController;
use crate::lifecycle::CloseOutcome;
use crate::surface::OverlaySurface;
use serde::{Deserialize, Serialize};

pub const SET_IGNORE_MOUSE_EVENTS: &str = "set-ignore-mouse-events";
pub const APP_CLOSE: &str = "app-close";

/// Platform hints accompanying a passthrough toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseIgnoreOptions {
    /// Keep delivering `mousemove` to the content while click-through.
    #[serde(default)]
    pub forward: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayMessage {
    SetIgnoreMouseEvents {
        ignore: bool,
        options: MouseIgnoreOptions,
    },
    AppClose,
}

impl RelayMessage {
    pub fn channel(&self) -> &'static str {
        match self {
            Self::SetIgnoreMouseEvents { .. } => SET_IGNORE_MOUSE_EVENTS,
            Self::AppClose => APP_CLOSE,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("malformed relay message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unknown relay channel `{0}`")]
    UnknownChannel(String),
    #[error("invalid argument for `{channel}`: {reason}")]
    InvalidArgument {
        channel: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// No window exists; the message was dropped.
    NoWindow,
    MouseIgnore { applied: bool },
    Closed(CloseOutcome),
}

/// Forward one relayed message to the controller's current window.
pub fn dispatch<S: OverlaySurface>(
    controller: &mut WindowController<S>,
    message: RelayMessage,
) -> RelayOutcome {
    let channel = message.channel();
    let outcome = match message {
        RelayMessage::SetIgnoreMouseEvents { ignore, options } => {
            match controller.set_ignore_mouse_events(ignore, &options) {
                Some(applied) => RelayOutcome::MouseIgnore { applied },
                None => RelayOutcome::NoWindow,
            }
        }
        RelayMessage::AppClose => match controller.close_window() {
            CloseOutcome::NoWindow => RelayOutcome::NoWindow,
            other => RelayOutcome::Closed(other),
        },
    };
    if outcome == RelayOutcome::NoWindow {
        tracing::debug!(channel, "relay message dropped: no overlay window");
    }
    outcome
}
