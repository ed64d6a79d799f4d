//! libnfc backend
//!
//! Talks to the reader through libnfc's C API. Device selection follows
//! libnfc's own order: `LIBNFC_DEFAULT_DEVICE`, then `libnfc.conf`, then
//! `devices.d`, then auto-detection.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use nfc1_sys as ffi;
use tracing::{debug, trace, warn};

use nfcid_core::constants::{MAX_ATS_LEN, MAX_UID_LEN};
use nfcid_core::{Modulation, ModulationType, Target, Uid};

use crate::{error::*, Backend};

/// libnfc reader access
///
/// Owns one library context and at most one device handle.
pub struct LibNfc {
    context: *mut ffi::nfc_context,
    device: *mut ffi::nfc_device,
}

// SAFETY: the raw handles are only used through `&mut self`, and libnfc has no
// thread affinity for a context or device.
unsafe impl Send for LibNfc {}

impl LibNfc {
    /// Create an uninitialized backend
    pub fn new() -> Self {
        Self {
            context: ptr::null_mut(),
            device: ptr::null_mut(),
        }
    }

    /// libnfc version string
    pub fn version() -> String {
        unsafe { cstr_lossy(ffi::nfc_version()) }
    }

    /// Name of the open device
    pub fn device_name(&self) -> Option<String> {
        if self.device.is_null() {
            return None;
        }

        Some(unsafe { cstr_lossy(ffi::nfc_device_get_name(self.device)) })
    }

    /// Last error reported for the open device
    fn last_error(&self) -> String {
        if self.device.is_null() {
            return "no device".to_string();
        }

        unsafe { cstr_lossy(ffi::nfc_strerror(self.device)) }
    }
}

impl Default for LibNfc {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for LibNfc {
    fn init(&mut self) -> Result<()> {
        if !self.context.is_null() {
            return Err(Error::AlreadyOpen);
        }

        let mut context = ptr::null_mut();
        unsafe { ffi::nfc_init(&mut context) };

        if context.is_null() {
            return Err(Error::ContextInit);
        }

        self.context = context;
        debug!("libnfc {} context initialized", Self::version());
        Ok(())
    }

    fn exit(&mut self) {
        if !self.context.is_null() {
            unsafe { ffi::nfc_exit(self.context) };
            self.context = ptr::null_mut();
            debug!("libnfc context released");
        }
    }

    fn open(&mut self, connstring: Option<&str>) -> Result<Option<String>> {
        if self.context.is_null() {
            return Err(Error::NoContext);
        }
        if !self.device.is_null() {
            return Err(Error::AlreadyOpen);
        }

        let c_connstring = connstring
            .map(CString::new)
            .transpose()
            .map_err(|e| Error::InvalidConnstring(e.to_string()))?;
        let connstring_ptr = c_connstring
            .as_ref()
            .map_or(ptr::null(), |c| c.as_ptr());

        let device = unsafe { ffi::nfc_open(self.context, connstring_ptr) };
        if device.is_null() {
            return Err(Error::DeviceNotFound(
                connstring.unwrap_or("no device available").to_string(),
            ));
        }

        self.device = device;
        Ok(self.device_name())
    }

    fn initiator_init(&mut self) -> Result<()> {
        if self.device.is_null() {
            return Err(Error::NoDevice);
        }

        let res = unsafe { ffi::nfc_initiator_init(self.device) };
        if res < 0 {
            return Err(Error::InitiatorMode(self.last_error()));
        }

        Ok(())
    }

    fn select_passive_target(&mut self, modulation: Modulation) -> Result<Option<Target>> {
        if self.device.is_null() {
            return Err(Error::NoDevice);
        }

        let nm = ffi::nfc_modulation {
            nmt: modulation.kind.code() as _,
            nbr: modulation.baud_rate.code() as _,
        };
        let mut nt: ffi::nfc_target = unsafe { std::mem::zeroed() };

        let res = unsafe {
            ffi::nfc_initiator_select_passive_target(self.device, nm, ptr::null(), 0, &mut nt)
        };

        if res < 0 {
            debug!(code = res, "No target selected: {}", self.last_error());
            return Ok(None);
        }
        if res == 0 {
            return Ok(None);
        }

        let target = decode_target(modulation, &nt)?;
        trace!("Selected target: {}", target);
        Ok(Some(target))
    }

    fn close(&mut self) {
        if !self.device.is_null() {
            unsafe { ffi::nfc_close(self.device) };
            self.device = ptr::null_mut();
        }
    }
}

impl Drop for LibNfc {
    fn drop(&mut self) {
        if !self.device.is_null() || !self.context.is_null() {
            warn!("libnfc backend dropped while still holding handles");
        }

        self.close();
        self.exit();
    }
}

/// Pull identifier and selection data out of the target info union
fn decode_target(modulation: Modulation, nt: &ffi::nfc_target) -> Result<Target> {
    match modulation.kind {
        ModulationType::Iso14443a => {
            let nai = unsafe { &nt.nti.nai };
            let uid_len = (nai.szUidLen as usize).min(MAX_UID_LEN);
            let ats_len = (nai.szAtsLen as usize).min(MAX_ATS_LEN);

            Ok(Target::new(modulation, Uid::from(&nai.abtUid[..uid_len]))
                .with_selection(nai.abtAtqa, nai.btSak)
                .with_ats(&nai.abtAts[..ats_len]))
        }
        ModulationType::Felica => {
            let nfi = unsafe { &nt.nti.nfi };
            Ok(Target::new(modulation, Uid::from(&nfi.abtId[..])))
        }
        ModulationType::Iso14443b => {
            let nbi = unsafe { &nt.nti.nbi };
            Ok(Target::new(modulation, Uid::from(&nbi.abtPupi[..])))
        }
        other => Err(Error::UnsupportedModulation(other.to_string())),
    }
}

/// Copy a C string owned by libnfc
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn cstr_lossy(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }

    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}
