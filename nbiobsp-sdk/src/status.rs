//! Vendor status codes
//!
//! The vendor SDK reports every outcome as a 32-bit status; zero is
//! success. The nonzero space is vendor-defined and only partially
//! documented — the constants below are the codes observed in practice,
//! grouped by the vendor's numbering bases. [`describe`] provides the
//! fallback wording used when the library itself cannot be asked for a
//! description.

/// Raw status code as returned by every vendor entry point
pub type RawStatus = u32;

/// Success status
pub const ERROR_NONE: RawStatus = 0;

/// Known vendor status codes
pub mod codes {
    use super::RawStatus;

    // General errors (base 0x0100)
    pub const INVALID_HANDLE: RawStatus = 0x0101;
    pub const INVALID_POINTER: RawStatus = 0x0102;
    pub const FUNCTION_FAIL: RawStatus = 0x0104;
    pub const UNKNOWN_FORMAT: RawStatus = 0x010D;

    // Device errors (base 0x0200)
    pub const DEVICE_OPEN_FAIL: RawStatus = 0x0201;
    pub const INVALID_DEVICE_ID: RawStatus = 0x0202;
    pub const DEVICE_ALREADY_OPENED: RawStatus = 0x0204;
    pub const DEVICE_NOT_OPENED: RawStatus = 0x0205;
    pub const DEVICE_BUSY: RawStatus = 0x0206;

    // Capture errors (base 0x0300)
    pub const USER_CANCEL: RawStatus = 0x0301;
    pub const CAPTURE_TIMEOUT: RawStatus = 0x0302;
    pub const CAPTURE_FAIL: RawStatus = 0x0303;
}

/// Fallback description for a vendor status code
///
/// Used by [`crate::FakeSdk`] for all codes and by [`crate::NativeSdk`]
/// when the loaded library does not export a description entry point.
pub fn describe(status: RawStatus) -> &'static str {
    match status {
        ERROR_NONE => "Success",
        codes::INVALID_HANDLE => "Invalid SDK or template handle",
        codes::INVALID_POINTER => "Invalid pointer argument",
        codes::FUNCTION_FAIL => "Vendor function failed",
        codes::UNKNOWN_FORMAT => "Unknown template encoding format",
        codes::DEVICE_OPEN_FAIL => "Failed to open device",
        codes::INVALID_DEVICE_ID => "Invalid device ID",
        codes::DEVICE_ALREADY_OPENED => "Device is already opened",
        codes::DEVICE_NOT_OPENED => "Device is not opened",
        codes::DEVICE_BUSY => "Device is busy",
        codes::USER_CANCEL => "Capture cancelled by user",
        codes::CAPTURE_TIMEOUT => "No finger presented before timeout",
        codes::CAPTURE_FAIL => "Capture failed",
        _ => "Unknown vendor status",
    }
}
