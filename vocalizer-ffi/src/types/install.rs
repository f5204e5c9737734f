use crate::util::strings::WChar;
use std::ffi::{c_char, c_void};
use vocalizer_proc_macro::NativeLayout;

/// Host services linked into the engine. The host stamps `fmt_version`, the
/// platform library fills the interface/handle pairs in
/// `vplatform_GetInterfaces`, and the engine reads them from then on.
#[repr(C)]
#[derive(Debug, Clone, Copy, NativeLayout)]
pub struct VeInstall {
    pub fmt_version: u16,
    pub bin_broker_info: *const c_char,
    pub heap_interface: *mut c_void,
    pub heap: *mut c_void,
    pub crit_sec_interface: *mut c_void,
    pub crit_sec_class: *mut c_void,
    pub data_stream_interface: *mut c_void,
    pub data_mapping_interface: *mut c_void,
    pub data_class: *mut c_void,
    pub log_interface: *mut c_void,
    pub log: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, NativeLayout)]
pub struct VplatformMemBlock {
    pub start: *mut c_void,
    pub byte_count: u32,
    pub flags: u32,
}

/// Licensing and resource bootstrap parameters, consumed once by
/// `vplatform_GetInterfaces`.
#[repr(C)]
#[derive(Debug, Clone, Copy, NativeLayout)]
pub struct VplatformResources {
    pub fmt_version: u16,
    pub data_install_count: u16,
    pub custom_data: *mut *mut WChar,
    pub data_install: *mut *mut WChar,
    pub heap: VplatformMemBlock,
    pub dat_ptr_table: *mut c_void,
    pub license_token: *const c_char,
    pub license_token_len: i32,
    pub licensor: i32,
    pub session_key: *const c_char,
    pub session_key_len: i32,
    pub binary_broker: *const WChar,
    pub file_list_file: *const WChar,
    pub rfu1: u32,
    pub rfu2: u32,
}

zeroed_default!(VeInstall, VplatformMemBlock, VplatformResources);

impl VeInstall {
    /// Empty descriptor stamped with [`VE_CURRENT_VERSION`](crate::consts::VE_CURRENT_VERSION).
    pub fn current() -> Self {
        VeInstall {
            fmt_version: crate::consts::VE_CURRENT_VERSION,
            ..Default::default()
        }
    }
}

impl VplatformResources {
    /// Empty descriptor stamped with
    /// [`VPLATFORM_CURRENT_VERSION`](crate::consts::VPLATFORM_CURRENT_VERSION).
    pub fn current() -> Self {
        VplatformResources {
            fmt_version: crate::consts::VPLATFORM_CURRENT_VERSION,
            ..Default::default()
        }
    }
}
