//! Device lifecycle state
//!
//! The vendor SDK leaves open/closed tracking to the caller and surfaces
//! misuse as cryptic status codes. The facade tracks the lifecycle
//! explicitly instead and fails fast on operations against a device that
//! is not open.

use std::fmt;

/// Lifecycle state of the scanner as seen by this client
///
/// `open_device` transitions Unopened/Closed to Opened; `close_device`
/// transitions Opened to Closed. Every other operation requires Opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceState {
    /// No `open_device` call has succeeded yet
    #[default]
    Unopened,

    /// Device is open; hardware access is exclusively held
    Opened,

    /// Device was open and has been closed; may be reopened
    Closed,
}

impl DeviceState {
    /// Check if operations against the hardware are currently allowed
    pub fn is_open(self) -> bool {
        matches!(self, Self::Opened)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unopened => "unopened",
            Self::Opened => "opened",
            Self::Closed => "closed",
        };
        write!(f, "{}", name)
    }
}
