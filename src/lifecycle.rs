#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Absent,
    Active,
}

impl WindowState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Absent -> Active on creation, Active -> Absent on close. Toggling mouse
/// passthrough is the Active self-loop.
pub fn can_transition(from: WindowState, to: WindowState) -> bool {
    matches!(
        (from, to),
        (WindowState::Absent, WindowState::Active)
            | (WindowState::Active, WindowState::Absent)
            | (WindowState::Active, WindowState::Active)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownDecision {
    Exit,
    StayResident,
}

/// What happens when the last overlay window goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShutdownPolicy {
    pub stay_resident: bool,
}

impl ShutdownPolicy {
    /// Policy matching the platform convention of the build target.
    pub fn for_current_platform() -> Self {
        Self {
            stay_resident: cfg!(target_os = "macos"),
        }
    }

    pub fn on_all_windows_closed(self) -> ShutdownDecision {
        if self.stay_resident {
            ShutdownDecision::StayResident
        } else {
            ShutdownDecision::Exit
        }
    }
}

/// Result of closing the relay's target window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    NoWindow,
    Closed { remaining: usize },
    AllClosed(ShutdownDecision),
}
