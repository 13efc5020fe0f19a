use crate::lifecycle::ShutdownPolicy;
use crate::surface::WindowSpec;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Start-up configuration. Window geometry and flags are not part of it: the
/// overlay is always built from [`WindowSpec::overlay`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Native window title. Never shown because the window is frameless, but
    /// task switchers and accessibility tools still read it.
    #[serde(default = "default_title")]
    pub title: String,
    /// Content loaded into the web view. Relative paths resolve against the
    /// working directory; `http://` and `https://` URLs are loaded as-is.
    #[serde(default = "default_entry_point")]
    pub entry_point: String,
    /// Keep the process alive once the last window closes, waiting for
    /// re-activation. Defaults to `true` on macOS only.
    #[serde(default = "default_stay_resident")]
    pub stay_resident_on_close: bool,
    /// Interval in milliseconds between cursor samples while mouse-move
    /// forwarding is active.
    #[serde(default = "default_forward_poll_ms")]
    pub forward_poll_ms: u64,
    #[serde(default)]
    pub open_devtools: bool,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_title() -> String {
    "Overlay".into()
}

fn default_entry_point() -> String {
    "index.html".into()
}

fn default_stay_resident() -> bool {
    cfg!(target_os = "macos")
}

fn default_forward_poll_ms() -> u64 {
    16
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: default_title(),
            entry_point: default_entry_point(),
            stay_resident_on_close: default_stay_resident(),
            forward_poll_ms: default_forward_poll_ms(),
            open_devtools: false,
            debug_logging: false,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file.as_ref().map(PathBuf::from)
    }

    pub fn shutdown_policy(&self) -> ShutdownPolicy {
        ShutdownPolicy {
            stay_resident: self.stay_resident_on_close,
        }
    }

    /// Resolve `entry_point` to the URL handed to the web view.
    pub fn entry_url(&self, base_dir: &Path) -> anyhow::Result<Url> {
        let entry = self.entry_point.trim();
        if entry.starts_with("http://") || entry.starts_with("https://") || entry.starts_with("file://")
        {
            return Url::parse(entry).with_context(|| format!("invalid entry point URL {entry}"));
        }
        let path = Path::new(entry);
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        };
        if !absolute.exists() {
            tracing::warn!(path = %absolute.display(), "overlay content entry point does not exist");
        }
        Url::from_file_path(&absolute)
            .map_err(|_| anyhow::anyhow!("entry point {} is not a valid file path", absolute.display()))
    }

    pub fn window_spec(&self, base_dir: &Path) -> anyhow::Result<WindowSpec> {
        Ok(WindowSpec::overlay(self.title.clone(), self.entry_url(base_dir)?))
    }
}
