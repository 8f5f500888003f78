//! Type definitions for nbiobsp

pub mod device_id;
pub mod error;
pub mod fir;

pub use device_id::DeviceId;
pub use error::{Error, Result};
pub use fir::{FirFormat, FirHandle, TextEncodedFir};
