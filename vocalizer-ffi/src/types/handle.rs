use std::ffi::c_void;
use std::hash::{Hash, Hasher};
use std::ptr::null_mut;
use vocalizer_proc_macro::NativeLayout;

/// Opaque handle to a native object: engine class, session instance or
/// loaded resource.
///
/// Two handles are equal when they are the same record or carry the same
/// `handle_data`; `check` never takes part in the comparison.
#[repr(C)]
#[derive(Debug, Clone, Copy, NativeLayout)]
pub struct VeHandle {
    pub handle_data: *mut c_void,
    pub check: u32,
}

unsafe impl Send for VeHandle {}
unsafe impl Sync for VeHandle {}

impl VeHandle {
    pub const NULL: VeHandle = VeHandle {
        handle_data: null_mut(),
        check: 0,
    };

    pub fn is_null(&self) -> bool {
        self.handle_data.is_null()
    }
}

impl Default for VeHandle {
    fn default() -> Self {
        VeHandle::NULL
    }
}

impl PartialEq for VeHandle {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.handle_data == other.handle_data
    }
}

impl Eq for VeHandle {}

impl Hash for VeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.handle_data as usize).hash(state);
    }
}
