//! In-memory substitute backend
//!
//! Implements the full vendor capability set without hardware: templates
//! are deterministic synthetic byte strings, the match outcome and finger
//! presence are configurable, and any call can be forced to fail with a
//! chosen status. Device state is enforced the way a real scanner behaves,
//! so operations before `open_device` report `DEVICE_NOT_OPENED`.

use std::collections::HashMap;

use bytes::Bytes;

use nbiobsp_types::{FirFormat, FirHandle, TextEncodedFir};

use crate::status::{self, ERROR_NONE, RawStatus, codes};
use crate::VendorSdk;

/// Fake vendor SDK for tests and hardware-free development
#[derive(Debug, Default)]
pub struct FakeSdk {
    open_raw_id: Option<u16>,
    last_opened_raw_id: Option<u16>,
    finger_present: bool,
    same_finger: bool,
    forced_status: Option<RawStatus>,
    templates: HashMap<u32, Bytes>,
    next_handle: u32,
}

impl FakeSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a finger on (or lift it off) the simulated sensor
    pub fn set_finger_present(&mut self, present: bool) {
        self.finger_present = present;
    }

    /// Configure the outcome every verify/match call reports
    pub fn set_match_result(&mut self, same_finger: bool) {
        self.same_finger = same_finger;
    }

    /// Force every subsequent call to fail with `status`
    pub fn fail_with(&mut self, status: RawStatus) {
        self.forced_status = Some(status);
    }

    /// Clear a forced failure
    pub fn clear_failure(&mut self) {
        self.forced_status = None;
    }

    /// Raw device ID of the currently open device, if any
    pub fn open_raw_id(&self) -> Option<u16> {
        self.open_raw_id
    }

    /// Raw device ID the last `open_device` call was issued with
    pub fn last_opened_raw_id(&self) -> Option<u16> {
        self.last_opened_raw_id
    }

    /// Register a reference template directly, bypassing capture
    pub fn enroll(&mut self, data: impl Into<Bytes>) -> FirHandle {
        let handle = self.new_handle();
        self.templates.insert(handle.as_raw(), data.into());
        handle
    }

    /// Synthetic template bytes behind a handle, if it exists
    pub fn template_data(&self, fir: FirHandle) -> Option<&Bytes> {
        self.templates.get(&fir.as_raw())
    }

    fn new_handle(&mut self) -> FirHandle {
        self.next_handle += 1;
        FirHandle::from_raw(self.next_handle)
    }

    fn synthetic_template(serial: u32) -> Bytes {
        // Deterministic per handle so repeated captures are distinguishable
        let data: Vec<u8> = (0..32u32)
            .map(|i| (i as u8).wrapping_mul(31).wrapping_add(serial as u8))
            .collect();
        Bytes::from(data)
    }

    fn gate(&self) -> RawStatus {
        if let Some(status) = self.forced_status {
            return status;
        }
        if self.open_raw_id.is_none() {
            return codes::DEVICE_NOT_OPENED;
        }
        ERROR_NONE
    }
}

impl VendorSdk for FakeSdk {
    fn open_device(&mut self, raw_id: u16) -> RawStatus {
        self.last_opened_raw_id = Some(raw_id);
        if let Some(status) = self.forced_status {
            return status;
        }
        if self.open_raw_id.is_some() {
            return codes::DEVICE_ALREADY_OPENED;
        }
        self.open_raw_id = Some(raw_id);
        ERROR_NONE
    }

    fn close_device(&mut self, _raw_id: u16) -> RawStatus {
        if let Some(status) = self.forced_status {
            return status;
        }
        if self.open_raw_id.is_none() {
            return codes::DEVICE_NOT_OPENED;
        }
        self.open_raw_id = None;
        ERROR_NONE
    }

    fn check_finger(&mut self) -> (RawStatus, bool) {
        let status = self.gate();
        if status != ERROR_NONE {
            return (status, false);
        }
        (ERROR_NONE, self.finger_present)
    }

    fn capture(&mut self) -> (RawStatus, FirHandle) {
        let status = self.gate();
        if status != ERROR_NONE {
            return (status, FirHandle::from_raw(0));
        }
        if !self.finger_present {
            return (codes::CAPTURE_TIMEOUT, FirHandle::from_raw(0));
        }
        let handle = self.new_handle();
        self.templates
            .insert(handle.as_raw(), Self::synthetic_template(handle.as_raw()));
        (ERROR_NONE, handle)
    }

    fn verify(&mut self, fir: FirHandle) -> (RawStatus, bool) {
        let status = self.gate();
        if status != ERROR_NONE {
            return (status, false);
        }
        if !self.templates.contains_key(&fir.as_raw()) {
            return (codes::INVALID_HANDLE, false);
        }
        (ERROR_NONE, self.same_finger)
    }

    fn verify_match(&mut self, fir: FirHandle, reference: FirHandle) -> (RawStatus, bool) {
        let status = self.gate();
        if status != ERROR_NONE {
            return (status, false);
        }
        if !self.templates.contains_key(&fir.as_raw())
            || !self.templates.contains_key(&reference.as_raw())
        {
            return (codes::INVALID_HANDLE, false);
        }
        (ERROR_NONE, self.same_finger)
    }

    fn text_from_handle(
        &mut self,
        fir: FirHandle,
        wide: bool,
        format: FirFormat,
    ) -> (RawStatus, TextEncodedFir) {
        let empty = TextEncodedFir::new(String::new(), wide, format);
        let status = self.gate();
        if status != ERROR_NONE {
            return (status, empty);
        }
        let Some(data) = self.templates.get(&fir.as_raw()) else {
            return (codes::INVALID_HANDLE, empty);
        };
        let payload = hex::encode(data);
        (ERROR_NONE, TextEncodedFir::new(payload, wide, format))
    }

    fn error_description(&self, status: RawStatus) -> String {
        status::describe(status).to_owned()
    }
}
