use crate::bridge::parse_ipc_body;
use crate::controller::WindowController;
use crate::lifecycle::{CloseOutcome, ShutdownDecision};
use crate::platform::{WebviewFactory, WebviewSurface};
use crate::relay::{self, RelayOutcome};
use crate::settings::Settings;
use anyhow::Context;
use std::time::{Duration, Instant};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget};
use winit::window::WindowId;

#[derive(Debug)]
pub enum UserEvent {
    /// Raw IPC body posted by the content of `window_id`.
    Ipc { window_id: WindowId, body: String },
}

/// Control flow for the next loop turn. Forwarding needs a timed wake-up;
/// GTK (web view host on Linux) must be pumped regularly.
pub fn next_control_flow(now: Instant, needs_polling: bool, interval: Duration) -> ControlFlow {
    if needs_polling || cfg!(target_os = "linux") {
        ControlFlow::WaitUntil(now + interval)
    } else {
        ControlFlow::Wait
    }
}

/// Whether a close outcome ends the event loop.
pub fn should_exit(outcome: CloseOutcome) -> bool {
    matches!(outcome, CloseOutcome::AllClosed(ShutdownDecision::Exit))
}

struct OverlayApp {
    controller: WindowController<WebviewSurface>,
    proxy: EventLoopProxy<UserEvent>,
    open_devtools: bool,
    poll_interval: Duration,
    failure: Option<anyhow::Error>,
}

impl OverlayApp {
    fn handle(&mut self, event: Event<UserEvent>, elwt: &EventLoopWindowTarget<UserEvent>) {
        match event {
            Event::Resumed => {
                let mut factory = WebviewFactory::new(elwt, self.proxy.clone(), self.open_devtools);
                if let Err(err) = self.controller.on_resumed(&mut factory) {
                    tracing::error!("{err:#}");
                    self.failure = Some(err);
                    elwt.exit();
                }
            }
            Event::UserEvent(UserEvent::Ipc { window_id, body }) => {
                let message = match parse_ipc_body(&body) {
                    Ok(message) => message,
                    Err(err) => {
                        tracing::warn!(?window_id, "dropping relay message: {err}");
                        return;
                    }
                };
                tracing::debug!(?window_id, channel = message.channel(), "relay message");
                if let RelayOutcome::Closed(outcome) = relay::dispatch(&mut self.controller, message) {
                    self.apply_close(outcome, elwt);
                }
            }
            Event::WindowEvent {
                window_id,
                event: WindowEvent::CloseRequested | WindowEvent::Destroyed,
            } => {
                let outcome = self.controller.on_window_closed(window_id);
                self.apply_close(outcome, elwt);
            }
            Event::AboutToWait => {
                #[cfg(target_os = "linux")]
                while gtk::events_pending() {
                    gtk::main_iteration_do(false);
                }
                let polling = self.controller.poll();
                elwt.set_control_flow(next_control_flow(Instant::now(), polling, self.poll_interval));
            }
            Event::LoopExiting => {
                tracing::info!("overlay event loop exiting");
            }
            _ => {}
        }
    }

    fn apply_close(&self, outcome: CloseOutcome, elwt: &EventLoopWindowTarget<UserEvent>) {
        if should_exit(outcome) {
            elwt.exit();
        }
    }
}

pub fn run(settings: Settings) -> anyhow::Result<()> {
    let base_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let spec = settings.window_spec(&base_dir)?;

    #[cfg(target_os = "linux")]
    gtk::init().context("failed to initialise GTK")?;

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event()
        .build()
        .context("failed to create event loop")?;

    let mut app = OverlayApp {
        controller: WindowController::new(spec, settings.shutdown_policy()),
        proxy: event_loop.create_proxy(),
        open_devtools: settings.open_devtools,
        poll_interval: Duration::from_millis(settings.forward_poll_ms.max(1)),
        failure: None,
    };

    event_loop
        .run(|event, elwt| app.handle(event, elwt))
        .context("overlay event loop failed")?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
