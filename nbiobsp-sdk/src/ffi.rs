//! Raw C surface of the vendor library
//!
//! Entry-point signatures and structures of `NBioBSP.dll` as documented in
//! the vendor's C SDK reference. Symbols are resolved at load time by
//! [`crate::NativeSdk`]; nothing else in the workspace touches this module.

use std::ffi::{c_char, c_int, c_void};

/// Opaque SDK instance handle produced by `NBioAPI_Init`
pub type NBioApiHandle = u32;

/// Raw vendor HFIR value
pub type RawHfir = u32;

/// Capture purpose: template intended for verification
pub const FIR_PURPOSE_VERIFY: u32 = 0x01;

/// `InputFir::form` tag: the union member carries an HFIR pointer
pub const FIR_FORM_HANDLE: u32 = 0x01;

/// Let the device use its own configured capture timeout
pub const DEVICE_DEFAULT_TIMEOUT: c_int = -1;

/// Vendor NBioAPI_INPUT_FIR: a tagged union handing one of the FIR
/// representations to verify/match entry points
#[repr(C)]
pub struct InputFir {
    pub form: u32,
    pub fir: *const c_void,
}

/// Vendor NBioAPI_FIR_TEXTENCODE as filled by `GetTextFIRFromHandle`.
/// The payload buffer is vendor-allocated and must be released with
/// `NBioAPI_FreeTextFIR`.
#[repr(C)]
pub struct RawTextEncode {
    pub is_wide_char: c_int,
    pub text_fir: *mut c_char,
}

pub type InitFn = unsafe extern "C" fn(*mut NBioApiHandle) -> u32;
pub type TerminateFn = unsafe extern "C" fn(NBioApiHandle) -> u32;
pub type OpenDeviceFn = unsafe extern "C" fn(NBioApiHandle, u16) -> u32;
pub type CloseDeviceFn = unsafe extern "C" fn(NBioApiHandle, u16) -> u32;
pub type CheckFingerFn = unsafe extern "C" fn(NBioApiHandle, *mut c_int) -> u32;
pub type CaptureFn =
    unsafe extern "C" fn(NBioApiHandle, u32, *mut RawHfir, c_int, *mut c_void, *mut c_void) -> u32;
pub type VerifyFn =
    unsafe extern "C" fn(NBioApiHandle, *const InputFir, *mut c_int, *mut c_void) -> u32;
pub type VerifyMatchFn = unsafe extern "C" fn(
    NBioApiHandle,
    *const InputFir,
    *const InputFir,
    *mut c_int,
    *mut c_void,
) -> u32;
pub type GetTextFirFromHandleFn =
    unsafe extern "C" fn(NBioApiHandle, RawHfir, *mut RawTextEncode, c_int, u32) -> u32;
pub type FreeTextFirFn = unsafe extern "C" fn(NBioApiHandle, *mut RawTextEncode) -> u32;
pub type GetErrorDescriptionFn = unsafe extern "C" fn(u32, *mut c_char, c_int) -> u32;

/// Exported symbol names (NUL-terminated for libloading)
pub mod symbols {
    pub const INIT: &[u8] = b"NBioAPI_Init\0";
    pub const TERMINATE: &[u8] = b"NBioAPI_Terminate\0";
    pub const OPEN_DEVICE: &[u8] = b"NBioAPI_OpenDevice\0";
    pub const CLOSE_DEVICE: &[u8] = b"NBioAPI_CloseDevice\0";
    pub const CHECK_FINGER: &[u8] = b"NBioAPI_CheckFinger\0";
    pub const CAPTURE: &[u8] = b"NBioAPI_Capture\0";
    pub const VERIFY: &[u8] = b"NBioAPI_Verify\0";
    pub const VERIFY_MATCH: &[u8] = b"NBioAPI_VerifyMatch\0";
    pub const GET_TEXT_FIR_FROM_HANDLE: &[u8] = b"NBioAPI_GetTextFIRFromHandle\0";
    pub const FREE_TEXT_FIR: &[u8] = b"NBioAPI_FreeTextFIR\0";
    pub const GET_ERROR_DESCRIPTION: &[u8] = b"NBioAPI_GetErrorDescription\0";
}
