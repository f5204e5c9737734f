use crate::enums::{MarkType, MessageType};
use crate::types::VeHandle;
use crate::util::strings::c_str_to_string;
use std::ffi::{c_char, c_void};
use std::fmt::{Debug, Formatter};
use vocalizer_proc_macro::NativeLayout;

/// Output notification installed with `ve_ttsSetOutDevice`.
///
/// Arguments: session instance, the `instance` pointer of the
/// [`VeOutDevInfo`], the message, and a reserved pointer. It may run on a
/// thread owned by the engine; every pointer it receives is only valid until
/// it returns.
pub type VeOutNotify =
    unsafe extern "C" fn(VeHandle, *mut c_void, *mut VeCallbackMsg, *mut c_void) -> u32;

#[repr(C)]
#[derive(Clone, Copy)]
pub union VeLParam {
    pub value: u32,
    pub error: u32,
}

#[repr(C)]
#[derive(Clone, Copy, NativeLayout)]
pub struct VeCallbackMsg {
    pub message: u32,
    pub param: VeLParam,
    pub data: *mut c_void,
}

impl VeCallbackMsg {
    pub fn new(message: MessageType, value: u32, data: *mut c_void) -> Self {
        VeCallbackMsg {
            message: message.0,
            param: VeLParam { value },
            data,
        }
    }

    pub fn message_type(&self) -> MessageType {
        MessageType(self.message)
    }

    pub fn value(&self) -> u32 {
        unsafe { self.param.value }
    }

    /// Engine code of a [`MessageType::ERROR`] message.
    pub fn error_code(&self) -> u32 {
        unsafe { self.param.error }
    }

    /// `data` as the output record of `OUTBUFREQ` / `OUTBUFDONE` messages.
    pub fn out_data(&self) -> *mut VeOutData {
        self.data as *mut VeOutData
    }
}

impl Debug for VeCallbackMsg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VeCallbackMsg")
            .field("message", &self.message_type())
            .field("param", &self.value())
            .field("data", &self.data)
            .finish()
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, NativeLayout)]
pub struct VeOutDevInfo {
    pub instance: *mut c_void,
    pub notify: Option<VeOutNotify>,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, NativeLayout)]
pub struct VeMarkInfo {
    pub mark_info: u32,
    pub mark_type: u32,
    pub source_pos: u32,
    pub source_len: u32,
    pub dest_pos: u32,
    pub dest_len: u32,
    pub phoneme: u16,
    pub mark_id: u32,
    pub param: u32,
    pub prompt_id: *const c_char,
}

impl VeMarkInfo {
    pub fn kind(&self) -> Option<MarkType> {
        MarkType::try_from(self.mark_type).ok()
    }

    /// # Safety
    /// `prompt_id` must be null or a live NUL terminated string.
    pub unsafe fn prompt_id(&self) -> Option<String> {
        c_str_to_string(self.prompt_id)
    }
}

/// One batch of PCM plus its marks.
///
/// `pcm_buf_len` and `mark_list_len` are byte counts. Both buffers belong to
/// whoever set them in `OUTBUFREQ` and are only valid during the callback.
#[repr(C)]
#[derive(Debug, Clone, Copy, NativeLayout)]
pub struct VeOutData {
    pub audio_format: u32,
    pub pcm_buf_len: u32,
    pub pcm_buf: *mut c_void,
    pub mark_list_len: u32,
    pub mark_list: *mut VeMarkInfo,
}

zeroed_default!(VeOutDevInfo, VeMarkInfo, VeOutData);

impl VeOutData {
    /// # Safety
    /// `pcm_buf` must be null or valid for `pcm_buf_len` bytes.
    pub unsafe fn pcm(&self) -> &[u8] {
        if self.pcm_buf.is_null() || self.pcm_buf_len == 0 {
            return &[];
        }
        std::slice::from_raw_parts(self.pcm_buf as *const u8, self.pcm_buf_len as usize)
    }

    pub fn mark_count(&self) -> usize {
        self.mark_list_len as usize / std::mem::size_of::<VeMarkInfo>()
    }

    /// # Safety
    /// `mark_list` must be null or valid for `mark_list_len` bytes.
    pub unsafe fn marks(&self) -> &[VeMarkInfo] {
        if self.mark_list.is_null() || self.mark_count() == 0 {
            return &[];
        }
        std::slice::from_raw_parts(self.mark_list, self.mark_count())
    }
}
