//! Web view side of the relay: the script injected into the content and the
//! decoder for the JSON bodies it posts back.

use crate::relay::{MouseIgnoreOptions, RelayError, RelayMessage, APP_CLOSE, SET_IGNORE_MOUSE_EVENTS};
use serde::Deserialize;
use serde_json::Value;

/// Injected before any page script runs.
pub const INIT_SCRIPT: &str = r#"(function () {
  if (window.overlay) {
    return;
  }
  function send(channel, args) {
    window.ipc.postMessage(JSON.stringify({ channel: channel, args: args }));
  }
  window.overlay = {
    setIgnoreMouseEvents: function (ignore, options) {
      send('set-ignore-mouse-events', options === undefined ? [ignore] : [ignore, options]);
    },
    close: function () {
      send('app-close', []);
    }
  };
  if (!window.ipcRenderer) {
    window.ipcRenderer = {
      send: function (channel) {
        send(channel, Array.prototype.slice.call(arguments, 1));
      }
    };
  }
  window.__overlayForwardMouseMove = function (x, y) {
    var target = document.elementFromPoint(x, y) || document.documentElement;
    if (!target) {
      return;
    }
    target.dispatchEvent(new MouseEvent('mousemove', {
      clientX: x,
      clientY: y,
      bubbles: true,
      cancelable: true,
      view: window
    }));
  };
})();"#;

#[derive(Debug, Deserialize)]
struct IpcEnvelope {
    channel: String,
    #[serde(default)]
    args: Vec<Value>,
}

pub fn parse_ipc_body(body: &str) -> Result<RelayMessage, RelayError> {
    let envelope: IpcEnvelope = serde_json::from_str(body)?;
    match envelope.channel.as_str() {
        SET_IGNORE_MOUSE_EVENTS => {
            let ignore = match envelope.args.first() {
                Some(Value::Bool(ignore)) => *ignore,
                Some(other) => {
                    return Err(RelayError::InvalidArgument {
                        channel: SET_IGNORE_MOUSE_EVENTS,
                        reason: format!("expected boolean, got {other}"),
                    })
                }
                None => {
                    return Err(RelayError::InvalidArgument {
                        channel: SET_IGNORE_MOUSE_EVENTS,
                        reason: "missing ignore flag".into(),
                    })
                }
            };
            let options = match envelope.args.get(1) {
                None | Some(Value::Null) => MouseIgnoreOptions::default(),
                Some(value) => serde_json::from_value(value.clone()).map_err(|err| {
                    RelayError::InvalidArgument {
                        channel: SET_IGNORE_MOUSE_EVENTS,
                        reason: err.to_string(),
                    }
                })?,
            };
            Ok(RelayMessage::SetIgnoreMouseEvents { ignore, options })
        }
        APP_CLOSE => Ok(RelayMessage::AppClose),
        other => Err(RelayError::UnknownChannel(other.to_string())),
    }
}

/// Script delivering a synthetic `mousemove` at CSS pixel `(x, y)`.
pub fn forward_mouse_move_script(x: f64, y: f64) -> String {
    format!("window.__overlayForwardMouseMove && window.__overlayForwardMouseMove({x:.1}, {y:.1});")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_script_posts_both_channels() {
        assert!(INIT_SCRIPT.contains(SET_IGNORE_MOUSE_EVENTS));
        assert!(INIT_SCRIPT.contains(APP_CLOSE));
        assert!(INIT_SCRIPT.contains("window.ipc.postMessage"));
    }

    #[test]
    fn forward_script_targets_bridge_hook() {
        let script = forward_mouse_move_script(12.0, 40.5);
        assert!(script.contains("__overlayForwardMouseMove(12.0, 40.5)"));
    }
}
