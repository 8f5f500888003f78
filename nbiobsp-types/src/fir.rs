//! Fingerprint Information Record (FIR) types
//!
//! A captured fingerprint lives inside the vendor SDK as an opaque handle
//! (HFIR). This module defines the handle newtype, the text-encoded
//! serialization of a record, and the format selector for that encoding.
//! Template bytes are never inspected on this side of the boundary.

use std::fmt;

use crate::error::{Error, Result};

/// Opaque handle to a captured fingerprint template (vendor HFIR).
///
/// Produced by `capture`, consumed by verify/match and text encoding.
/// The template's binary structure and lifetime are fully managed by the
/// vendor SDK; this is just the ticket for referring to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FirHandle(u32);

impl FirHandle {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FirHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HFIR(0x{:08X})", self.0)
    }
}

/// Text-encoding format selector (vendor FIR_FORMAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum FirFormat {
    /// Vendor-proprietary standard format
    #[default]
    Standard = 0,

    /// ISO 19794-2 compact format
    Iso = 1,

    /// ANSI 378 format
    Ansi = 2,
}

impl From<FirFormat> for u32 {
    fn from(format: FirFormat) -> u32 {
        format as u32
    }
}

impl TryFrom<u32> for FirFormat {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::Standard),
            1 => Ok(Self::Iso),
            2 => Ok(Self::Ansi),
            _ => Err(Error::UnknownFormat(value)),
        }
    }
}

/// Text-encoded fingerprint record (vendor FIR_TEXTENCODE)
///
/// A serialized template as an opaque string payload plus the format
/// metadata it was produced with. The payload format is vendor-defined
/// (a long alphanumeric token using `*` and `/` as separators) and must
/// be carried verbatim; nothing here parses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEncodedFir {
    /// Serialized template payload, vendor-defined and opaque
    pub text_fir: String,

    /// Whether the vendor produced the payload as a wide-character string
    pub is_wide: bool,

    /// Encoding format the payload was produced with
    pub format: FirFormat,
}

impl TextEncodedFir {
    pub fn new(text_fir: String, is_wide: bool, format: FirFormat) -> Self {
        Self {
            text_fir,
            is_wide,
            format,
        }
    }

    /// Wrap a stored payload string back into a text-encoded record.
    ///
    /// No vendor round-trip happens here: the payload is taken verbatim
    /// and validated lazily, only if the record later feeds an operation
    /// that needs a true template handle. Defaults to the standard
    /// format and narrow characters, matching what the SDK emits when
    /// not asked otherwise.
    pub fn from_payload(payload: impl Into<String>) -> Self {
        Self {
            text_fir: payload.into(),
            is_wide: false,
            format: FirFormat::Standard,
        }
    }

    pub fn len(&self) -> usize {
        self.text_fir.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text_fir.is_empty()
    }
}

impl fmt::Display for TextEncodedFir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TextFIR[{:?}, wide={}, len={}]",
            self.format,
            self.is_wide,
            self.text_fir.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_handle_roundtrip() {
        let handle = FirHandle::from_raw(0xDEAD_BEEF);
        assert_eq!(handle.as_raw(), 0xDEAD_BEEF);
    }

    #[test]
    fn test_format_conversion() {
        assert_eq!(u32::from(FirFormat::Standard), 0);
        assert_eq!(FirFormat::try_from(1).unwrap(), FirFormat::Iso);
    }

    #[test]
    fn test_unknown_format() {
        let result = FirFormat::try_from(99);
        assert!(matches!(result, Err(Error::UnknownFormat(99))));
    }

    #[test]
    fn test_default_format_is_standard() {
        assert_eq!(FirFormat::default(), FirFormat::Standard);
    }

    #[test]
    fn test_from_payload_preserves_text() {
        // Shaped like the vendor's observed output: alphanumeric run with
        // '*' and '/' separators.
        let payload = "AQAAABQAAAAy*AAA/EAAAAENSUQB";
        let fir = TextEncodedFir::from_payload(payload);

        assert_eq!(fir.text_fir, payload);
        assert!(!fir.is_wide);
        assert_eq!(fir.format, FirFormat::Standard);
    }

    proptest! {
        #[test]
        fn prop_payload_carried_verbatim(payload in ".*") {
            let fir = TextEncodedFir::from_payload(payload.clone());
            prop_assert_eq!(fir.text_fir, payload);
        }
    }
}
