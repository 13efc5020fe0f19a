use crate::lifecycle::{can_transition, CloseOutcome, ShutdownDecision, ShutdownPolicy, WindowState};
use crate::relay::MouseIgnoreOptions;
use crate::surface::{OverlaySurface, SurfaceFactory, WindowSpec};

/// Owns the overlay windows and the policy applied when the last one closes.
///
/// Creating while a window exists yields a second independent window; the
/// newest one is the target of relayed messages.
pub struct WindowController<S: OverlaySurface> {
    spec: WindowSpec,
    policy: ShutdownPolicy,
    windows: Vec<S>,
    ready: bool,
}

impl<S: OverlaySurface> WindowController<S> {
    pub fn new(spec: WindowSpec, policy: ShutdownPolicy) -> Self {
        Self {
            spec,
            policy,
            windows: Vec::new(),
            ready: false,
        }
    }

    pub fn spec(&self) -> &WindowSpec {
        &self.spec
    }

    pub fn policy(&self) -> ShutdownPolicy {
        self.policy
    }

    pub fn state(&self) -> WindowState {
        if self.windows.is_empty() {
            WindowState::Absent
        } else {
            WindowState::Active
        }
    }

    /// Whether application-ready has been seen.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn current(&self) -> Option<&S> {
        self.windows.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut S> {
        self.windows.last_mut()
    }

    /// Passthrough state of the current window, `None` when absent.
    pub fn passthrough(&self) -> Option<bool> {
        self.current().map(|w| w.ignores_mouse_events())
    }

    pub fn create_window<F>(&mut self, factory: &mut F) -> anyhow::Result<()>
    where
        F: SurfaceFactory<Surface = S>,
    {
        let from = self.state();
        let surface = factory.create(&self.spec)?;
        tracing::info!(
            id = ?surface.id(),
            width = self.spec.width,
            height = self.spec.height,
            url = %self.spec.entry_point,
            "overlay window created"
        );
        self.windows.push(surface);
        debug_assert!(can_transition(from, self.state()));
        Ok(())
    }

    /// Application-ready. Only the first call creates a window.
    pub fn on_ready<F>(&mut self, factory: &mut F) -> anyhow::Result<()>
    where
        F: SurfaceFactory<Surface = S>,
    {
        if self.ready {
            return Ok(());
        }
        self.ready = true;
        self.create_window(factory)
    }

    /// Re-activation. Recreates the window only when none exists; returns
    /// whether one was created.
    pub fn on_activate<F>(&mut self, factory: &mut F) -> anyhow::Result<bool>
    where
        F: SurfaceFactory<Surface = S>,
    {
        if !self.windows.is_empty() {
            return Ok(false);
        }
        tracing::debug!("activated with no overlay window; recreating");
        self.create_window(factory)?;
        Ok(true)
    }

    /// Platform resume: the first one is application-ready, later ones are
    /// re-activation. Returns whether a window was created.
    pub fn on_resumed<F>(&mut self, factory: &mut F) -> anyhow::Result<bool>
    where
        F: SurfaceFactory<Surface = S>,
    {
        if self.ready {
            self.on_activate(factory)
        } else {
            self.on_ready(factory)?;
            Ok(true)
        }
    }

    /// Apply passthrough to the current window. `None` when no window exists,
    /// otherwise whether the platform accepted the change.
    pub fn set_ignore_mouse_events(
        &mut self,
        ignore: bool,
        options: &MouseIgnoreOptions,
    ) -> Option<bool> {
        let window = self.windows.last_mut()?;
        match window.set_ignore_mouse_events(ignore, options) {
            Ok(()) => {
                tracing::trace!(ignore, forward = options.forward, "mouse passthrough updated");
                Some(true)
            }
            Err(err) => {
                tracing::warn!(ignore, "platform rejected mouse passthrough: {err:#}");
                Some(false)
            }
        }
    }

    /// Close the current window as if the content asked for it.
    pub fn close_window(&mut self) -> CloseOutcome {
        match self.windows.pop() {
            Some(window) => self.finish_close(window),
            None => CloseOutcome::NoWindow,
        }
    }

    /// The platform closed (or asked to close) the window with `id`.
    pub fn on_window_closed(&mut self, id: S::Id) -> CloseOutcome {
        match self.windows.iter().position(|w| w.id() == id) {
            Some(index) => {
                let window = self.windows.remove(index);
                self.finish_close(window)
            }
            None => CloseOutcome::NoWindow,
        }
    }

    /// Quit-all handling once no windows remain.
    pub fn on_all_windows_closed(&self) -> ShutdownDecision {
        let decision = self.policy.on_all_windows_closed();
        tracing::info!(?decision, "all overlay windows closed");
        decision
    }

    /// Run per-turn surface work; `true` while any surface needs polling.
    pub fn poll(&mut self) -> bool {
        let mut pending = false;
        for window in &mut self.windows {
            pending |= window.poll();
        }
        pending
    }

    fn finish_close(&mut self, window: S) -> CloseOutcome {
        let id = window.id();
        window.close();
        tracing::info!(?id, "overlay window closed");
        if self.windows.is_empty() {
            CloseOutcome::AllClosed(self.on_all_windows_closed())
        } else {
            CloseOutcome::Closed {
                remaining: self.windows.len(),
            }
        }
    }
}
