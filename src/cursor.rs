use once_cell::sync::Lazy;
use std::sync::Mutex;

static MOCK_CURSOR: Lazy<Mutex<Option<(i32, i32)>>> = Lazy::new(|| Mutex::new(None));

/// Serialises tests that install a mock cursor position.
pub static MOCK_CURSOR_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// macOS reports the cursor in points rather than physical pixels.
pub const CURSOR_IN_LOGICAL_UNITS: bool = cfg!(target_os = "macos");

pub fn set_mock_cursor_position(pos: Option<(i32, i32)>) {
    if let Ok(mut guard) = MOCK_CURSOR.lock() {
        *guard = pos;
    }
}

pub fn clear_mock_cursor_position() {
    set_mock_cursor_position(None);
}

pub fn mock_cursor_position_is_set() -> bool {
    MOCK_CURSOR.lock().map(|g| g.is_some()).unwrap_or(false)
}

/// Whether this build can query the global cursor at all.
pub fn global_cursor_query_supported() -> bool {
    cfg!(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "linux"
    ))
}

/// Return the current cursor position in screen coordinates, or `None` when
/// the platform query is unavailable or fails (e.g. no X display).
pub fn current_cursor_position() -> Option<(i32, i32)> {
    if let Ok(guard) = MOCK_CURSOR.lock() {
        if let Some(pos) = *guard {
            return Some(pos);
        }
    }

    #[cfg(target_os = "windows")]
    {
        use windows::Win32::Foundation::POINT;
        use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;
        let mut pt = POINT::default();
        if unsafe { GetCursorPos(&mut pt) }.is_ok() {
            Some((pt.x, pt.y))
        } else {
            None
        }
    }

    #[cfg(target_os = "linux")]
    {
        use std::ptr;
        use x11::xlib;
        unsafe {
            let display = xlib::XOpenDisplay(ptr::null());
            if display.is_null() {
                return None;
            }
            let root = xlib::XDefaultRootWindow(display);
            let mut root_ret = 0;
            let mut child_ret = 0;
            let mut root_x = 0;
            let mut root_y = 0;
            let mut win_x = 0;
            let mut win_y = 0;
            let mut mask = 0;
            let status = xlib::XQueryPointer(
                display,
                root,
                &mut root_ret,
                &mut child_ret,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            );
            xlib::XCloseDisplay(display);
            if status == 0 {
                None
            } else {
                Some((root_x, root_y))
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        use core_graphics::event::CGEvent;
        use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
        let source = CGEventSource::new(CGEventSourceStateID::CombinedSessionState).ok()?;
        let event = CGEvent::new(source).ok()?;
        let loc = event.location();
        Some((loc.x.round() as i32, loc.y.round() as i32))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

/// Client area of a window, in the same units as the cursor position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Cursor units per CSS pixel.
    pub scale_factor: f64,
}

impl WindowBounds {
    pub fn contains(&self, (px, py): (i32, i32)) -> bool {
        let right = self.x as i64 + self.width as i64;
        let bottom = self.y as i64 + self.height as i64;
        (px as i64) >= self.x as i64
            && (px as i64) < right
            && (py as i64) >= self.y as i64
            && (py as i64) < bottom
    }

    /// Convert a screen point to CSS pixels relative to the client area.
    pub fn to_local_css(&self, (px, py): (i32, i32)) -> (f64, f64) {
        let scale = if self.scale_factor > 0.0 {
            self.scale_factor
        } else {
            1.0
        };
        (
            (px - self.x) as f64 / scale,
            (py - self.y) as f64 / scale,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForwardStep {
    /// No cursor sample; stop scheduling wake-ups.
    Unavailable,
    /// Cursor outside the window or unchanged.
    Idle,
    /// Deliver a `mousemove` at these CSS pixels.
    Move(f64, f64),
}

impl ForwardStep {
    pub fn keeps_polling(self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

/// Decides which cursor samples become forwarded `mousemove` events: only
/// those inside the window that differ from the last forwarded one.
#[derive(Debug, Default)]
pub struct CursorForwarder {
    last: Option<(i32, i32)>,
}

impl CursorForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, cursor: Option<(i32, i32)>, bounds: &WindowBounds) -> ForwardStep {
        let Some(pos) = cursor else {
            return ForwardStep::Unavailable;
        };
        if !bounds.contains(pos) {
            self.last = None;
            return ForwardStep::Idle;
        }
        if self.last == Some(pos) {
            return ForwardStep::Idle;
        }
        self.last = Some(pos);
        let (x, y) = bounds.to_local_css(pos);
        ForwardStep::Move(x, y)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
