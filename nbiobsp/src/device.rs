//! High-level device interface

use std::path::Path;

use tracing::{debug, info, trace, warn};

use nbiobsp_sdk::{ERROR_NONE, NativeSdk, RawStatus, VendorSdk};
use nbiobsp_types::{DeviceId, FirFormat, FirHandle, TextEncodedFir};

use crate::error::{Error, Result};
use crate::state::DeviceState;

/// NITGEN fingerprint scanner
///
/// High-level facade over the vendor SDK: one instance wraps one SDK
/// backend and mediates every caller intent (open, close, check, capture,
/// verify, match, encode) into vendor calls, normalizing vendor status
/// codes into typed errors.
///
/// All operations are synchronous and blocking; `capture` blocks for the
/// duration of a physical scan. The client adds no locking of its own —
/// `&mut self` on every operation makes single-threaded use the only
/// pattern the borrow checker admits, matching the vendor's model of one
/// client per process.
///
/// # Examples
///
/// ```no_run
/// use nbiobsp::Device;
///
/// fn main() -> nbiobsp::Result<()> {
///     let mut device = Device::load("C:/Program Files/NITGEN/SDK")?;
///
///     device.open_device(None)?;
///
///     let fir = device.capture()?;
///     let same = device.verify(fir)?;
///     println!("Same finger: {}", same);
///
///     device.close_device(None)?;
///     Ok(())
/// }
/// ```
pub struct Device {
    sdk: Box<dyn VendorSdk>,
    state: DeviceState,
}

impl Device {
    /// Load the native vendor SDK from `dir` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Either required vendor library file is absent (`NBioBSP.dll`,
    ///   `NITGEN.SDK.NBioBSP.dll`) — check with
    ///   [`Error::is_missing_dependency`]
    /// - The library fails to load or initialize
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let sdk = NativeSdk::load(dir)?;
        Ok(Self::with_backend(Box::new(sdk)))
    }

    /// Wrap an already-constructed backend (the fake, a mock, or a
    /// pre-loaded native SDK)
    pub fn with_backend(sdk: Box<dyn VendorSdk>) -> Self {
        Self {
            sdk,
            state: DeviceState::default(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Check if the device is open
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Open the scanner for communication; pass `None` to auto-detect.
    ///
    /// Acquires exclusive access to the hardware — must be paired with
    /// [`Device::close_device`], or the device stays locked for other
    /// processes until this process exits.
    pub fn open_device(&mut self, id: impl Into<DeviceId>) -> Result<()> {
        if self.state.is_open() {
            return Err(Error::AlreadyOpen);
        }

        let id = id.into();
        info!("Opening device {}...", id);

        let status = self.sdk.open_device(id.to_raw());
        self.check(status)?;

        self.state = DeviceState::Opened;
        info!("Device {} opened", id);
        Ok(())
    }

    /// Close the opened scanner; pass `None` to auto-detect.
    pub fn close_device(&mut self, id: impl Into<DeviceId>) -> Result<()> {
        self.ensure_open()?;

        let id = id.into();
        info!("Closing device {}...", id);

        let status = self.sdk.close_device(id.to_raw());
        self.check(status)?;

        self.state = DeviceState::Closed;
        info!("Device {} closed", id);
        Ok(())
    }

    /// Check if a finger currently rests on the sensor.
    ///
    /// Purely advisory: consumes nothing and can be polled repeatedly.
    pub fn check_finger(&mut self) -> Result<bool> {
        self.ensure_open()?;
        debug!("Checking for finger...");

        let (status, present) = self.sdk.check_finger();
        self.check(status)?;

        Ok(present)
    }

    /// Capture one fingerprint scan.
    ///
    /// Blocks until the vendor SDK completes a scan or its internal
    /// timeout elapses with no finger presented. There is no cancellation
    /// beyond what the vendor itself offers.
    pub fn capture(&mut self) -> Result<FirHandle> {
        self.ensure_open()?;
        debug!("Capturing fingerprint...");

        let (status, fir) = self.sdk.capture();
        self.check(status)?;

        debug!("Captured {}", fir);
        Ok(fir)
    }

    /// Verify a template via the vendor's single-template entry point.
    ///
    /// The comparison target of that entry point is vendor-internal; see
    /// [`Device::match_templates`] for an explicit pairwise comparison.
    pub fn verify(&mut self, fir: FirHandle) -> Result<bool> {
        self.verify_core(fir, None)
    }

    /// Check whether two templates come from the same finger.
    ///
    /// Scoring and threshold live entirely inside the vendor SDK.
    pub fn match_templates(&mut self, fir: FirHandle, reference: FirHandle) -> Result<bool> {
        self.verify_core(fir, Some(reference))
    }

    /// Serialize a template into its text encoding.
    ///
    /// `format` defaults to the vendor's standard format when `None`.
    pub fn template_to_text(
        &mut self,
        fir: FirHandle,
        wide: bool,
        format: Option<FirFormat>,
    ) -> Result<TextEncodedFir> {
        self.ensure_open()?;

        let format = format.unwrap_or_default();
        debug!("Encoding {} as {:?} text", fir, format);

        let (status, text) = self.sdk.text_from_handle(fir, wide, format);
        self.check(status)?;

        Ok(text)
    }

    /// Wrap a stored payload string back into a text-encoded record.
    ///
    /// No vendor call happens here; the payload is carried verbatim and
    /// validated lazily by whatever operation later consumes the record.
    pub fn text_to_template(payload: impl Into<String>) -> TextEncodedFir {
        TextEncodedFir::from_payload(payload)
    }

    // Helper methods

    /// One funnel for both comparison operations: a present reference
    /// selects the pairwise match entry point, an absent one the vendor's
    /// single-template verify. The two vendor calls are distinct and no
    /// further semantics are assumed about either.
    fn verify_core(&mut self, fir: FirHandle, reference: Option<FirHandle>) -> Result<bool> {
        self.ensure_open()?;

        let (status, same) = match reference {
            Some(reference) => {
                debug!("Matching {} against {}", fir, reference);
                self.sdk.verify_match(fir, reference)
            }
            None => {
                debug!("Verifying {}", fir);
                self.sdk.verify(fir)
            }
        };
        self.check(status)?;

        Ok(same)
    }

    fn ensure_open(&self) -> Result<()> {
        if !self.state.is_open() {
            return Err(Error::NotOpen);
        }
        Ok(())
    }

    /// Normalize a vendor status: zero is success, anything else becomes
    /// a [`Error::Vendor`] carrying the vendor's description of the code.
    fn check(&mut self, status: RawStatus) -> Result<()> {
        trace!("Vendor status: 0x{:04X}", status);

        if status == ERROR_NONE {
            return Ok(());
        }

        let description = self.sdk.error_description(status);
        Err(Error::Vendor {
            status,
            description,
        })
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        if self.state.is_open() {
            warn!("Device dropped while still open; close_device releases the hardware lock");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use nbiobsp_sdk::status::{self, codes};
    use nbiobsp_sdk::{FakeSdk, MockVendorSdk};
    use pretty_assertions::assert_eq;

    fn fake_device(configure: impl FnOnce(&mut FakeSdk)) -> Device {
        let mut sdk = FakeSdk::new();
        configure(&mut sdk);
        Device::with_backend(Box::new(sdk))
    }

    fn open_fake(configure: impl FnOnce(&mut FakeSdk)) -> Device {
        let mut device = fake_device(configure);
        device.open_device(None).unwrap();
        device
    }

    #[test]
    fn test_starts_unopened() {
        let device = fake_device(|_| {});
        assert_eq!(device.state(), DeviceState::Unopened);
        assert!(!device.is_open());
    }

    #[test]
    fn test_open_close_transitions() {
        let mut device = fake_device(|_| {});

        device.open_device(None).unwrap();
        assert_eq!(device.state(), DeviceState::Opened);

        device.close_device(None).unwrap();
        assert_eq!(device.state(), DeviceState::Closed);

        // Closed may be reopened
        device.open_device(None).unwrap();
        assert_eq!(device.state(), DeviceState::Opened);
        device.close_device(None).unwrap();
    }

    #[test]
    fn test_open_while_open_fails_fast() {
        let mut device = open_fake(|_| {});
        let result = device.open_device(None);
        assert!(matches!(result, Err(Error::AlreadyOpen)));
        device.close_device(None).unwrap();
    }

    #[test]
    fn test_close_while_not_open_fails_fast() {
        let mut device = fake_device(|_| {});
        assert!(matches!(device.close_device(None), Err(Error::NotOpen)));
    }

    #[test]
    fn test_open_none_issues_auto_sentinel() {
        let mut mock = MockVendorSdk::new();
        mock.expect_open_device()
            .with(eq(DeviceId::AUTO_RAW))
            .times(1)
            .return_const(ERROR_NONE);

        let mut device = Device::with_backend(Box::new(mock));
        device.open_device(None).unwrap();
    }

    #[test]
    fn test_open_literal_id_issues_literal() {
        let mut mock = MockVendorSdk::new();
        mock.expect_open_device()
            .with(eq(5u16))
            .times(1)
            .return_const(ERROR_NONE);

        let mut device = Device::with_backend(Box::new(mock));
        device.open_device(5).unwrap();
    }

    #[test]
    fn test_verify_uses_single_template_entry_point() {
        let mut mock = MockVendorSdk::new();
        mock.expect_open_device().return_const(ERROR_NONE);
        mock.expect_verify()
            .with(eq(FirHandle::from_raw(7)))
            .times(1)
            .return_const((ERROR_NONE, true));
        mock.expect_verify_match().times(0);

        let mut device = Device::with_backend(Box::new(mock));
        device.open_device(None).unwrap();
        assert!(device.verify(FirHandle::from_raw(7)).unwrap());
    }

    #[test]
    fn test_match_uses_pairwise_entry_point() {
        let mut mock = MockVendorSdk::new();
        mock.expect_open_device().return_const(ERROR_NONE);
        mock.expect_verify().times(0);
        mock.expect_verify_match()
            .with(eq(FirHandle::from_raw(7)), eq(FirHandle::from_raw(8)))
            .times(1)
            .return_const((ERROR_NONE, false));

        let mut device = Device::with_backend(Box::new(mock));
        device.open_device(None).unwrap();
        assert!(
            !device
                .match_templates(FirHandle::from_raw(7), FirHandle::from_raw(8))
                .unwrap()
        );
    }

    #[test]
    fn test_check_finger_reports_presence() {
        let mut device = open_fake(|sdk| sdk.set_finger_present(true));
        assert!(device.check_finger().unwrap());

        let mut device = open_fake(|_| {});
        assert!(!device.check_finger().unwrap());
    }

    #[test]
    fn test_capture_returns_template_handle() {
        let mut device = open_fake(|sdk| sdk.set_finger_present(true));
        let fir = device.capture().unwrap();
        assert_ne!(fir.as_raw(), 0);
    }

    #[test]
    fn test_capture_without_finger_is_vendor_timeout() {
        let mut device = open_fake(|_| {});

        let err = device.capture().unwrap_err();
        assert_eq!(err.vendor_status(), Some(codes::CAPTURE_TIMEOUT));
    }

    #[test]
    fn test_verify_and_match_agree_on_configured_outcome() {
        for same in [true, false] {
            let mut device = open_fake(|sdk| {
                sdk.set_finger_present(true);
                sdk.set_match_result(same);
            });

            let a = device.capture().unwrap();
            let b = device.capture().unwrap();

            assert_eq!(device.verify(a).unwrap(), same);
            assert_eq!(device.match_templates(a, b).unwrap(), same);
        }
    }

    #[test]
    fn test_text_roundtrip_preserves_payload() {
        let mut device = open_fake(|sdk| sdk.set_finger_present(true));

        let fir = device.capture().unwrap();
        let text = device.template_to_text(fir, false, None).unwrap();
        assert_eq!(text.format, FirFormat::Standard);

        let restored = Device::text_to_template(text.text_fir.clone());
        assert_eq!(restored.text_fir, text.text_fir);
    }

    #[test]
    fn test_template_to_text_honors_format_and_wide() {
        let mut device = open_fake(|sdk| sdk.set_finger_present(true));

        let fir = device.capture().unwrap();
        let text = device
            .template_to_text(fir, true, Some(FirFormat::Iso))
            .unwrap();

        assert!(text.is_wide);
        assert_eq!(text.format, FirFormat::Iso);
    }

    #[test]
    fn test_every_operation_fails_fast_before_open() {
        let fir = FirHandle::from_raw(1);

        let mut device = fake_device(|_| {});
        assert!(matches!(device.check_finger(), Err(Error::NotOpen)));
        assert!(matches!(device.capture(), Err(Error::NotOpen)));
        assert!(matches!(device.verify(fir), Err(Error::NotOpen)));
        assert!(matches!(
            device.match_templates(fir, fir),
            Err(Error::NotOpen)
        ));
        assert!(matches!(
            device.template_to_text(fir, false, None),
            Err(Error::NotOpen)
        ));
    }

    #[test]
    fn test_nonzero_status_surfaces_vendor_description() {
        let forced = codes::DEVICE_BUSY;
        let expected = status::describe(forced);
        let fir = FirHandle::from_raw(1);

        // Open succeeds, then every vendor call reports the forced status
        let mut mock = MockVendorSdk::new();
        mock.expect_open_device().return_const(ERROR_NONE);
        mock.expect_check_finger().return_const((forced, false));
        mock.expect_capture()
            .return_const((forced, FirHandle::from_raw(0)));
        mock.expect_verify().return_const((forced, false));
        mock.expect_verify_match().return_const((forced, false));
        mock.expect_text_from_handle()
            .return_const((forced, TextEncodedFir::from_payload("")));
        mock.expect_close_device().return_const(forced);
        mock.expect_error_description()
            .with(eq(forced))
            .returning(|status| status::describe(status).to_owned());

        let mut device = Device::with_backend(Box::new(mock));
        device.open_device(None).unwrap();

        let err = device.check_finger().unwrap_err();
        match err {
            Error::Vendor {
                status,
                description,
            } => {
                assert_eq!(status, forced);
                assert_eq!(description, expected);
            }
            other => panic!("Expected Vendor error, got {:?}", other),
        }

        assert_eq!(device.capture().unwrap_err().vendor_status(), Some(forced));
        assert_eq!(device.verify(fir).unwrap_err().vendor_status(), Some(forced));
        assert_eq!(
            device
                .match_templates(fir, fir)
                .unwrap_err()
                .vendor_status(),
            Some(forced)
        );
        assert_eq!(
            device
                .template_to_text(fir, false, None)
                .unwrap_err()
                .vendor_status(),
            Some(forced)
        );
        assert_eq!(
            device.close_device(None).unwrap_err().vendor_status(),
            Some(forced)
        );
    }

    #[test]
    fn test_open_failure_surfaces_vendor_description() {
        let mut device = fake_device(|sdk| sdk.fail_with(codes::DEVICE_OPEN_FAIL));

        let err = device.open_device(None).unwrap_err();
        assert!(err.is_vendor());
        assert_eq!(err.vendor_status(), Some(codes::DEVICE_OPEN_FAIL));
        assert_eq!(device.state(), DeviceState::Unopened);
    }

    #[test]
    fn test_failed_operation_leaves_device_open() {
        let mut device = open_fake(|_| {});

        // Capture fails (no finger) but the hardware lock is still held
        assert!(device.capture().is_err());
        assert!(device.is_open());

        device.close_device(None).unwrap();
        assert!(!device.is_open());
    }

    #[test]
    fn test_text_to_template_does_not_touch_vendor() {
        // Static constructor; works with no backend interaction at all
        let payload = "AQAAABQAAAAy*AAA/EAAAAENSUQB";
        let fir = Device::text_to_template(payload);
        assert_eq!(fir.text_fir, payload);
    }

    // Hardware tests require the vendor SDK installed; run with
    // NBIO_SDK_DIR pointing at it.

    #[test]
    #[ignore] // Only run with a real scanner attached
    fn test_real_capture_and_verify() {
        let dir = std::env::var("NBIO_SDK_DIR").expect("set NBIO_SDK_DIR");
        let mut device = Device::load(dir).unwrap();

        device.open_device(None).unwrap();
        let fir = device.capture().unwrap();
        let same = device.verify(fir).unwrap();
        println!("Same finger: {}", same);
        device.close_device(None).unwrap();
    }
}
