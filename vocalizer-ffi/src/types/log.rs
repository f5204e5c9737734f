use crate::types::VeHandle;
use crate::util::strings::c_str_to_string;
use log::{debug, error};
use std::ffi::c_char;
use vocalizer_proc_macro::NativeLayout;

/// Error report: handle, error id, key count, then parallel key and value
/// string arrays.
pub type VeLogErrorFn =
    unsafe extern "C" fn(VeHandle, u32, u32, *const *const c_char, *const *const c_char);
/// Diagnostic line: handle, level, message.
pub type VeLogDiagnosticFn = unsafe extern "C" fn(VeHandle, u32, *const c_char);

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, NativeLayout)]
pub struct VeLogInterface {
    pub error: Option<VeLogErrorFn>,
    pub diagnostic: Option<VeLogDiagnosticFn>,
}

impl VeLogInterface {
    /// Interface that routes native reports into the `log` facade.
    pub fn forwarding() -> Self {
        VeLogInterface {
            error: Some(forward_error),
            diagnostic: Some(forward_diagnostic),
        }
    }
}

unsafe extern "C" fn forward_error(
    handle: VeHandle,
    error_id: u32,
    key_count: u32,
    keys: *const *const c_char,
    values: *const *const c_char,
) {
    let pairs = (0..key_count as usize)
        .map(|index| {
            let key = if keys.is_null() { None } else { c_str_to_string(*keys.add(index)) };
            let value = if values.is_null() { None } else { c_str_to_string(*values.add(index)) };
            format!("{}={}", key.unwrap_or_default(), value.unwrap_or_default())
        })
        .collect::<Vec<_>>();

    error!(
        "native error {:#x} on handle {:?}: {}",
        error_id, handle.handle_data, pairs.join(", ")
    );
}

unsafe extern "C" fn forward_diagnostic(handle: VeHandle, level: u32, message: *const c_char) {
    debug!(
        "native diagnostic (level {}) on handle {:?}: {}",
        level,
        handle.handle_data,
        c_str_to_string(message).unwrap_or_default()
    );
}

#[test]
fn test_forwarders_accept_null_arrays() {
    let interface = VeLogInterface::forwarding();
    let message = c"voice loaded";
    unsafe {
        (interface.error.unwrap())(VeHandle::NULL, 0x14, 2, std::ptr::null(), std::ptr::null());
        (interface.diagnostic.unwrap())(VeHandle::NULL, 1, message.as_ptr());
        (interface.diagnostic.unwrap())(VeHandle::NULL, 1, std::ptr::null());
    }
}
