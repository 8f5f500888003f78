//! Scanner device identifiers

use std::fmt;

/// Identifies a physical scanner attached to the host.
///
/// The vendor SDK addresses devices by a 16-bit ID and reserves one value
/// as an auto-detect sentinel: pass [`DeviceId::Auto`] to let the driver
/// pick whichever scanner is connected.
///
/// `Option<u16>` converts directly, matching the "absent means auto"
/// convention of the vendor API:
///
/// ```
/// use nbiobsp_types::DeviceId;
///
/// assert_eq!(DeviceId::from(None), DeviceId::Auto);
/// assert_eq!(DeviceId::from(Some(5)), DeviceId::Id(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceId {
    /// Auto-detect the connected scanner
    Auto,

    /// A specific device ID as enumerated by the vendor driver
    Id(u16),
}

impl DeviceId {
    /// Raw value of the vendor's auto-detect sentinel (NBioAPI_DEVICE_ID_AUTO)
    pub const AUTO_RAW: u16 = 255;

    /// Raw 16-bit value passed to the vendor SDK
    pub fn to_raw(self) -> u16 {
        match self {
            Self::Auto => Self::AUTO_RAW,
            Self::Id(id) => id,
        }
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::Auto
    }
}

impl From<u16> for DeviceId {
    fn from(id: u16) -> Self {
        Self::Id(id)
    }
}

impl From<Option<u16>> for DeviceId {
    fn from(id: Option<u16>) -> Self {
        match id {
            Some(id) => Self::Id(id),
            None => Self::Auto,
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "AUTO"),
            Self::Id(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_raw_value() {
        assert_eq!(DeviceId::Auto.to_raw(), 255);
    }

    #[test]
    fn test_literal_id_raw_value() {
        assert_eq!(DeviceId::Id(5).to_raw(), 5);
        assert_eq!(DeviceId::Id(0).to_raw(), 0);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(DeviceId::from(None), DeviceId::Auto);
        assert_eq!(DeviceId::from(Some(5)), DeviceId::Id(5));
    }

    #[test]
    fn test_default_is_auto() {
        assert_eq!(DeviceId::default(), DeviceId::Auto);
    }

    #[test]
    fn test_display() {
        assert_eq!(DeviceId::Auto.to_string(), "AUTO");
        assert_eq!(DeviceId::Id(3).to_string(), "3");
    }
}
