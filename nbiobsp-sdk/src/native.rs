//! Native vendor binding
//!
//! Loads `NBioBSP.dll` at startup, resolves its entry points once, and owns
//! the SDK instance handle for the life of the process. Both vendor files
//! must be present in the given directory before anything is loaded; there
//! is no fallback or simulation mode on this path.

use std::ffi::{CStr, c_int};
use std::path::Path;
use std::ptr;

use libloading::Library;
use tracing::{info, trace, warn};

use nbiobsp_types::{FirFormat, FirHandle, TextEncodedFir};

use crate::error::{Error, Result};
use crate::ffi;
use crate::status::{self, ERROR_NONE, RawStatus};
use crate::{NBIO_DOTNET_WRAPPER, NBIO_MAIN_LIBRARY, VendorSdk};

/// Entry points resolved from the vendor library.
///
/// Plain fn pointers copied out of their `libloading::Symbol`s; they stay
/// valid for as long as the `Library` they came from is alive.
struct ApiTable {
    init: ffi::InitFn,
    terminate: ffi::TerminateFn,
    open_device: ffi::OpenDeviceFn,
    close_device: ffi::CloseDeviceFn,
    check_finger: ffi::CheckFingerFn,
    capture: ffi::CaptureFn,
    verify: ffi::VerifyFn,
    verify_match: ffi::VerifyMatchFn,
    get_text_fir_from_handle: ffi::GetTextFirFromHandleFn,
    free_text_fir: ffi::FreeTextFirFn,

    // Not exported by every SDK build; absent means we fall back to the
    // local description table.
    get_error_description: Option<ffi::GetErrorDescriptionFn>,
}

impl ApiTable {
    /// # Safety
    ///
    /// `lib` must be the vendor library; the resolved pointers are only
    /// valid while it stays loaded.
    unsafe fn resolve(lib: &Library) -> Result<Self> {
        unsafe {
            Ok(Self {
                init: resolve_symbol(lib, ffi::symbols::INIT)?,
                terminate: resolve_symbol(lib, ffi::symbols::TERMINATE)?,
                open_device: resolve_symbol(lib, ffi::symbols::OPEN_DEVICE)?,
                close_device: resolve_symbol(lib, ffi::symbols::CLOSE_DEVICE)?,
                check_finger: resolve_symbol(lib, ffi::symbols::CHECK_FINGER)?,
                capture: resolve_symbol(lib, ffi::symbols::CAPTURE)?,
                verify: resolve_symbol(lib, ffi::symbols::VERIFY)?,
                verify_match: resolve_symbol(lib, ffi::symbols::VERIFY_MATCH)?,
                get_text_fir_from_handle: resolve_symbol(
                    lib,
                    ffi::symbols::GET_TEXT_FIR_FROM_HANDLE,
                )?,
                free_text_fir: resolve_symbol(lib, ffi::symbols::FREE_TEXT_FIR)?,
                get_error_description: resolve_symbol(lib, ffi::symbols::GET_ERROR_DESCRIPTION)
                    .ok(),
            })
        }
    }
}

unsafe fn resolve_symbol<T: Copy>(lib: &Library, name: &'static [u8]) -> Result<T> {
    let symbol = unsafe { lib.get::<T>(name) }.map_err(|source| Error::MissingSymbol {
        name: String::from_utf8_lossy(&name[..name.len() - 1]).into_owned(),
        source,
    })?;
    Ok(*symbol)
}

/// Real vendor SDK binding
///
/// One instance owns one SDK handle obtained from `NBioAPI_Init`; the
/// handle is released with `NBioAPI_Terminate` on drop.
pub struct NativeSdk {
    api: ApiTable,
    handle: ffi::NBioApiHandle,
    _lib: Library,
}

impl NativeSdk {
    /// Load the vendor SDK from `dir`.
    ///
    /// Both vendor files ([`NBIO_MAIN_LIBRARY`] and [`NBIO_DOTNET_WRAPPER`])
    /// must exist in `dir`; the first absent one fails the load with
    /// [`Error::MissingDependency`] naming it, before any library code runs.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let main = dir.join(NBIO_MAIN_LIBRARY);
        let wrapper = dir.join(NBIO_DOTNET_WRAPPER);

        for path in [&main, &wrapper] {
            if !path.exists() {
                return Err(Error::MissingDependency { path: path.clone() });
            }
        }

        let lib = unsafe { Library::new(&main) }.map_err(|source| Error::Load {
            path: main.clone(),
            source,
        })?;
        let api = unsafe { ApiTable::resolve(&lib) }?;

        let mut handle: ffi::NBioApiHandle = 0;
        let status = unsafe { (api.init)(&mut handle) };
        if status != ERROR_NONE {
            return Err(Error::Init { status });
        }

        info!("Vendor SDK loaded from {} (handle=0x{:08X})", main.display(), handle);

        Ok(Self {
            api,
            handle,
            _lib: lib,
        })
    }
}

impl VendorSdk for NativeSdk {
    fn open_device(&mut self, raw_id: u16) -> RawStatus {
        let status = unsafe { (self.api.open_device)(self.handle, raw_id) };
        trace!("NBioAPI_OpenDevice({}) -> 0x{:04X}", raw_id, status);
        status
    }

    fn close_device(&mut self, raw_id: u16) -> RawStatus {
        let status = unsafe { (self.api.close_device)(self.handle, raw_id) };
        trace!("NBioAPI_CloseDevice({}) -> 0x{:04X}", raw_id, status);
        status
    }

    fn check_finger(&mut self) -> (RawStatus, bool) {
        let mut present: c_int = 0;
        let status = unsafe { (self.api.check_finger)(self.handle, &mut present) };
        trace!("NBioAPI_CheckFinger -> 0x{:04X}, present={}", status, present);
        (status, present != 0)
    }

    fn capture(&mut self) -> (RawStatus, FirHandle) {
        let mut raw: ffi::RawHfir = 0;

        // Purpose and timeout are fixed by this wrapper; audit data and
        // window options are not surfaced.
        let status = unsafe {
            (self.api.capture)(
                self.handle,
                ffi::FIR_PURPOSE_VERIFY,
                &mut raw,
                ffi::DEVICE_DEFAULT_TIMEOUT,
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };
        trace!("NBioAPI_Capture -> 0x{:04X}, hfir=0x{:08X}", status, raw);
        (status, FirHandle::from_raw(raw))
    }

    fn verify(&mut self, fir: FirHandle) -> (RawStatus, bool) {
        let raw = fir.as_raw();
        let input = ffi::InputFir {
            form: ffi::FIR_FORM_HANDLE,
            fir: (&raw as *const ffi::RawHfir).cast(),
        };

        let mut is_same: c_int = 0;
        let status =
            unsafe { (self.api.verify)(self.handle, &input, &mut is_same, ptr::null_mut()) };
        trace!("NBioAPI_Verify({}) -> 0x{:04X}, same={}", fir, status, is_same);
        (status, is_same != 0)
    }

    fn verify_match(&mut self, fir: FirHandle, reference: FirHandle) -> (RawStatus, bool) {
        let raw = fir.as_raw();
        let raw_ref = reference.as_raw();
        let input = ffi::InputFir {
            form: ffi::FIR_FORM_HANDLE,
            fir: (&raw as *const ffi::RawHfir).cast(),
        };
        let input_ref = ffi::InputFir {
            form: ffi::FIR_FORM_HANDLE,
            fir: (&raw_ref as *const ffi::RawHfir).cast(),
        };

        let mut is_same: c_int = 0;
        let status = unsafe {
            (self.api.verify_match)(
                self.handle,
                &input,
                &input_ref,
                &mut is_same,
                ptr::null_mut(),
            )
        };
        trace!(
            "NBioAPI_VerifyMatch({}, {}) -> 0x{:04X}, same={}",
            fir, reference, status, is_same
        );
        (status, is_same != 0)
    }

    fn text_from_handle(
        &mut self,
        fir: FirHandle,
        wide: bool,
        format: FirFormat,
    ) -> (RawStatus, TextEncodedFir) {
        let mut raw = ffi::RawTextEncode {
            is_wide_char: wide as c_int,
            text_fir: ptr::null_mut(),
        };

        let status = unsafe {
            (self.api.get_text_fir_from_handle)(
                self.handle,
                fir.as_raw(),
                &mut raw,
                wide as c_int,
                format.into(),
            )
        };
        trace!("NBioAPI_GetTextFIRFromHandle({}) -> 0x{:04X}", fir, status);

        if status != ERROR_NONE {
            return (status, TextEncodedFir::new(String::new(), wide, format));
        }

        // The payload is read byte-wise up to the first NUL; the vendor
        // buffer is released immediately after copying.
        let text = if raw.text_fir.is_null() {
            String::new()
        } else {
            unsafe { CStr::from_ptr(raw.text_fir) }
                .to_string_lossy()
                .into_owned()
        };
        if !raw.text_fir.is_null() {
            let free_status = unsafe { (self.api.free_text_fir)(self.handle, &mut raw) };
            if free_status != ERROR_NONE {
                warn!("NBioAPI_FreeTextFIR failed with 0x{:04X}", free_status);
            }
        }

        let is_wide = raw.is_wide_char != 0;
        (status, TextEncodedFir::new(text, is_wide, format))
    }

    fn error_description(&self, status: RawStatus) -> String {
        if let Some(get_description) = self.api.get_error_description {
            let mut buf = [0; 256];
            let ret = unsafe { get_description(status, buf.as_mut_ptr(), buf.len() as c_int) };
            if ret == ERROR_NONE {
                let text = unsafe { CStr::from_ptr(buf.as_ptr()) }.to_string_lossy();
                if !text.is_empty() {
                    return text.into_owned();
                }
            }
        }
        status::describe(status).to_owned()
    }
}

impl Drop for NativeSdk {
    fn drop(&mut self) {
        let status = unsafe { (self.api.terminate)(self.handle) };
        if status != ERROR_NONE {
            warn!("NBioAPI_Terminate failed with 0x{:04X}", status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nbiobsp-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_fails_on_missing_main_library() {
        let dir = scratch_dir("no-main");

        let result = NativeSdk::load(&dir);

        match result {
            Err(Error::MissingDependency { path }) => {
                assert_eq!(path.file_name().unwrap(), NBIO_MAIN_LIBRARY);
            }
            other => panic!("Expected MissingDependency, got {:?}", other.err()),
        }

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_fails_on_missing_wrapper() {
        let dir = scratch_dir("no-wrapper");
        fs::write(dir.join(NBIO_MAIN_LIBRARY), b"not a real library").unwrap();

        let result = NativeSdk::load(&dir);

        match result {
            Err(Error::MissingDependency { path }) => {
                assert_eq!(path.file_name().unwrap(), NBIO_DOTNET_WRAPPER);
            }
            other => panic!("Expected MissingDependency, got {:?}", other.err()),
        }

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_with_both_files_passes_dependency_check() {
        let dir = scratch_dir("both-present");
        fs::write(dir.join(NBIO_MAIN_LIBRARY), b"not a real library").unwrap();
        fs::write(dir.join(NBIO_DOTNET_WRAPPER), b"not a real library").unwrap();

        // Past the file check the dummy fails at dynamic-load time, which
        // must surface as Load rather than MissingDependency.
        let result = NativeSdk::load(&dir);
        assert!(matches!(result, Err(Error::Load { .. })));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    #[ignore] // Only run with the vendor SDK installed
    fn test_load_real_sdk() {
        let dir = std::env::var("NBIO_SDK_DIR").expect("set NBIO_SDK_DIR");
        let sdk = NativeSdk::load(&dir).unwrap();
        drop(sdk);
    }
}
