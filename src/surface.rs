//! Seam between the window controller and the native window.

use crate::relay::MouseIgnoreOptions;
use std::fmt::Debug;
use url::Url;

/// Fixed visual and behavioural flags of an overlay window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub transparent: bool,
    pub decorations: bool,
    pub always_on_top: bool,
    pub entry_point: Url,
}

pub const OVERLAY_WIDTH: u32 = 800;
pub const OVERLAY_HEIGHT: u32 = 150;

impl WindowSpec {
    /// The overlay window: 800x150, transparent, frameless, always on top.
    pub fn overlay(title: impl Into<String>, entry_point: Url) -> Self {
        Self {
            title: title.into(),
            width: OVERLAY_WIDTH,
            height: OVERLAY_HEIGHT,
            transparent: true,
            decorations: false,
            always_on_top: true,
            entry_point,
        }
    }
}

pub trait OverlaySurface {
    type Id: Copy + PartialEq + Debug;

    fn id(&self) -> Self::Id;

    /// Make the window transparent to pointer input (`ignore = true`) or
    /// capture it again. Errors mean the platform refused the change.
    fn set_ignore_mouse_events(
        &mut self,
        ignore: bool,
        options: &MouseIgnoreOptions,
    ) -> anyhow::Result<()>;

    fn ignores_mouse_events(&self) -> bool;

    /// Called once per event-loop turn. Returns `true` while the surface has
    /// periodic work pending (mouse-move forwarding).
    fn poll(&mut self) -> bool {
        false
    }

    /// Destroy the native window.
    fn close(self)
    where
        Self: Sized,
    {
    }
}

pub trait SurfaceFactory {
    type Surface: OverlaySurface;

    fn create(&mut self, spec: &WindowSpec) -> anyhow::Result<Self::Surface>;
}
