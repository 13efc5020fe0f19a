//! winit window + wry web view implementation of [`OverlaySurface`].

use crate::app::UserEvent;
use crate::bridge::{forward_mouse_move_script, INIT_SCRIPT};
use crate::cursor::{
    current_cursor_position, global_cursor_query_supported, CursorForwarder, ForwardStep,
    WindowBounds, CURSOR_IN_LOGICAL_UNITS,
};
use crate::relay::MouseIgnoreOptions;
use crate::surface::{OverlaySurface, SurfaceFactory, WindowSpec};
use anyhow::{anyhow, Context};
use winit::dpi::LogicalSize;
use winit::event_loop::{EventLoopProxy, EventLoopWindowTarget};
use winit::window::{Window, WindowBuilder, WindowId, WindowLevel};
use wry::{WebView, WebViewBuilder};

pub struct WebviewSurface {
    // Dropped before `window`.
    webview: WebView,
    window: Window,
    ignore: bool,
    forward: bool,
    forwarder: CursorForwarder,
}

impl WebviewSurface {
    pub fn window(&self) -> &Window {
        &self.window
    }

    fn bounds(&self) -> Option<WindowBounds> {
        let pos = self.window.inner_position().ok()?;
        let size = self.window.inner_size();
        let scale = self.window.scale_factor();
        if CURSOR_IN_LOGICAL_UNITS {
            let pos = pos.to_logical::<f64>(scale);
            let size = size.to_logical::<f64>(scale);
            return Some(WindowBounds {
                x: pos.x.round() as i32,
                y: pos.y.round() as i32,
                width: size.width.round() as u32,
                height: size.height.round() as u32,
                scale_factor: 1.0,
            });
        }
        Some(WindowBounds {
            x: pos.x,
            y: pos.y,
            width: size.width,
            height: size.height,
            scale_factor: scale,
        })
    }
}

impl OverlaySurface for WebviewSurface {
    type Id = WindowId;

    fn id(&self) -> WindowId {
        self.window.id()
    }

    fn set_ignore_mouse_events(
        &mut self,
        ignore: bool,
        options: &MouseIgnoreOptions,
    ) -> anyhow::Result<()> {
        self.window
            .set_cursor_hittest(!ignore)
            .map_err(|err| anyhow!("cursor hit-test change failed: {err}"))?;
        self.ignore = ignore;
        let forward = ignore && options.forward;
        if forward && !self.forward && !global_cursor_query_supported() {
            tracing::debug!("mouse-move forwarding unavailable on this platform");
        }
        if !forward {
            self.forwarder.reset();
        }
        self.forward = forward;
        Ok(())
    }

    fn ignores_mouse_events(&self) -> bool {
        self.ignore
    }

    fn poll(&mut self) -> bool {
        if !self.forward {
            return false;
        }
        let Some(bounds) = self.bounds() else {
            return true;
        };
        match self.forwarder.step(current_cursor_position(), &bounds) {
            ForwardStep::Move(x, y) => {
                if let Err(err) = self.webview.evaluate_script(&forward_mouse_move_script(x, y)) {
                    tracing::warn!("failed to forward mouse move: {err}");
                }
                true
            }
            step => step.keeps_polling(),
        }
    }
}

pub struct WebviewFactory<'a> {
    target: &'a EventLoopWindowTarget<UserEvent>,
    proxy: EventLoopProxy<UserEvent>,
    open_devtools: bool,
}

impl<'a> WebviewFactory<'a> {
    pub fn new(
        target: &'a EventLoopWindowTarget<UserEvent>,
        proxy: EventLoopProxy<UserEvent>,
        open_devtools: bool,
    ) -> Self {
        Self {
            target,
            proxy,
            open_devtools,
        }
    }
}

impl SurfaceFactory for WebviewFactory<'_> {
    type Surface = WebviewSurface;

    fn create(&mut self, spec: &WindowSpec) -> anyhow::Result<WebviewSurface> {
        let level = if spec.always_on_top {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        };
        let window = WindowBuilder::new()
            .with_title(spec.title.as_str())
            .with_inner_size(LogicalSize::new(spec.width as f64, spec.height as f64))
            .with_resizable(false)
            .with_transparent(spec.transparent)
            .with_decorations(spec.decorations)
            .with_window_level(level)
            .build(self.target)
            .context("failed to create overlay window")?;

        let window_id = window.id();
        let proxy = self.proxy.clone();
        let webview = WebViewBuilder::new(&window)
            .with_transparent(spec.transparent)
            .with_devtools(self.open_devtools)
            .with_initialization_script(INIT_SCRIPT)
            .with_url(spec.entry_point.as_str())
            .with_ipc_handler(move |request: wry::http::Request<String>| {
                let body = request.into_body();
                if proxy.send_event(UserEvent::Ipc { window_id, body }).is_err() {
                    tracing::debug!("relay message after event loop closed");
                }
            })
            .build()
            .context("failed to create overlay web view")?;

        if self.open_devtools {
            webview.open_devtools();
        }

        Ok(WebviewSurface {
            webview,
            window,
            ignore: false,
            forward: false,
            forwarder: CursorForwarder::new(),
        })
    }
}
