//! # nbiobsp
//!
//! Unofficial Rust client for NITGEN NBioBSP fingerprint scanners
//! (Hamster series).
//!
//! ## Features
//!
//! - Small facade over the vendor SDK: open/close, finger check, capture,
//!   verify/match, text encoding
//! - Explicit device state machine with fail-fast "not open" errors
//! - Typed errors separating missing vendor files from vendor call failures
//! - Pluggable backend: the native binding for real hardware, a fake for
//!   tests and development
//!
//! ## Quick Start
//!
//! ```
//! use nbiobsp::{Device, FakeSdk};
//!
//! fn main() -> nbiobsp::Result<()> {
//!     // Swap FakeSdk for Device::load("C:/NITGEN/SDK") on real hardware
//!     let mut sdk = FakeSdk::new();
//!     sdk.set_finger_present(true);
//!
//!     let mut device = Device::with_backend(Box::new(sdk));
//!     device.open_device(None)?;
//!
//!     if device.check_finger()? {
//!         let fir = device.capture()?;
//!         let text = device.template_to_text(fir, false, None)?;
//!         println!("Captured template: {}", text);
//!     }
//!
//!     device.close_device(None)?;
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod error;
pub mod state;

// Re-exports
pub use device::Device;
pub use error::{Error, Result};
pub use state::DeviceState;

// Re-export types and backends
pub use nbiobsp_sdk::{FakeSdk, NativeSdk, VendorSdk};
pub use nbiobsp_types::{DeviceId, FirFormat, FirHandle, TextEncodedFir};
