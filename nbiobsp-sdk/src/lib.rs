//! # nbiobsp-sdk
//!
//! Vendor SDK boundary for NITGEN NBioBSP fingerprint scanners.
//!
//! This crate defines the capability set the closed-source vendor library
//! exposes and provides two implementations of it:
//! - [`NativeSdk`] — the real binding, loading `NBioBSP.dll` at startup and
//!   resolving its C entry points
//! - [`FakeSdk`] — an in-memory substitute for tests and hardware-free
//!   development
//!
//! All matching, quality scoring, and image processing happen inside the
//! vendor library; nothing here interprets template contents.

pub mod error;
pub mod fake;
pub mod ffi;
pub mod native;
pub mod status;

pub use error::{Error, Result};
pub use fake::FakeSdk;
pub use native::NativeSdk;
pub use status::{ERROR_NONE, RawStatus};

use nbiobsp_types::{FirFormat, FirHandle, TextEncodedFir};

/// File name of the main vendor library (driver + matcher)
pub const NBIO_MAIN_LIBRARY: &str = "NBioBSP.dll";

/// File name of the vendor's .NET wrapper, shipped alongside the main
/// library and required by the vendor's installation
pub const NBIO_DOTNET_WRAPPER: &str = "NITGEN.SDK.NBioBSP.dll";

/// Capability set of the vendor SDK
///
/// Every method mirrors one vendor entry point and reports outcomes the way
/// the vendor does: a raw numeric status (0 is success) plus an output
/// value. Status interpretation and success/failure normalization belong to
/// the caller, keeping this trait a faithful image of the C surface.
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait VendorSdk: Send {
    /// Acquire exclusive access to the scanner with the given raw device ID
    fn open_device(&mut self, raw_id: u16) -> RawStatus;

    /// Release the scanner with the given raw device ID
    fn close_device(&mut self, raw_id: u16) -> RawStatus;

    /// Poll whether a finger currently rests on the sensor
    fn check_finger(&mut self) -> (RawStatus, bool);

    /// Capture one scan; blocks until a scan completes or the vendor's
    /// internal timeout elapses
    fn capture(&mut self) -> (RawStatus, FirHandle);

    /// Single-template verification (comparison target is vendor-internal)
    fn verify(&mut self, fir: FirHandle) -> (RawStatus, bool);

    /// Explicit pairwise match of two templates
    fn verify_match(&mut self, fir: FirHandle, reference: FirHandle) -> (RawStatus, bool);

    /// Serialize a template handle into its text encoding
    fn text_from_handle(
        &mut self,
        fir: FirHandle,
        wide: bool,
        format: FirFormat,
    ) -> (RawStatus, TextEncodedFir);

    /// Human-readable description of a vendor status code
    fn error_description(&self, status: RawStatus) -> String;
}
