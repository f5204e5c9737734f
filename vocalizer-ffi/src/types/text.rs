use crate::consts::VE_MAX_STRING_LENGTH;
use crate::enums::{ParamId, TextFormat};
use crate::util::strings::{fixed_to_string, string_to_fixed};
use anyhow::{anyhow, Result};
use std::ffi::{c_char, c_void};
use std::fmt::{Debug, Formatter};
use vocalizer_proc_macro::NativeLayout;

/// One synthesis request. `text` is borrowed: the buffer must outlive the
/// `ve_ttsProcessText2Speech` call it is passed to.
#[repr(C)]
#[derive(Debug, Clone, Copy, NativeLayout)]
pub struct VeInText {
    pub text_format: i32,
    pub text_length: u32,
    pub text: *const c_void,
}

impl VeInText {
    pub fn new(format: TextFormat, text: &[u8]) -> Result<Self> {
        let text_length = u32::try_from(text.len())
            .map_err(|_| anyhow!("Text of {} bytes is too long for one request.", text.len()))?;

        Ok(VeInText {
            text_format: format as i32,
            text_length,
            text: text.as_ptr() as *const c_void,
        })
    }

    pub fn format(&self) -> Option<TextFormat> {
        TextFormat::try_from(self.text_format).ok()
    }
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union VeParamValue {
    pub numeric: u16,
    pub string: [c_char; VE_MAX_STRING_LENGTH],
}

/// One engine parameter.
///
/// The value union is always fully initialized by the constructors here, so
/// both members can be read back regardless of which one was written.
#[repr(C)]
#[derive(Clone, Copy, NativeLayout)]
pub struct VeParam {
    pub id: u32,
    value: VeParamValue,
}

impl VeParam {
    /// Parameter with an empty value, for `ve_ttsGetParamList`.
    pub fn query(id: ParamId) -> Self {
        VeParam {
            id: id as u32,
            value: VeParamValue {
                string: [0; VE_MAX_STRING_LENGTH],
            },
        }
    }

    pub fn numeric(id: ParamId, value: u16) -> Self {
        let mut param = VeParam::query(id);
        param.set_numeric(value);
        param
    }

    pub fn string(id: ParamId, value: &str) -> Result<Self> {
        let mut param = VeParam::query(id);
        param.set_string(value)?;
        Ok(param)
    }

    pub fn param_id(&self) -> Option<ParamId> {
        ParamId::try_from(self.id).ok()
    }

    pub fn numeric_value(&self) -> u16 {
        unsafe { self.value.numeric }
    }

    pub fn string_value(&self) -> String {
        unsafe { fixed_to_string(&self.value.string) }
    }

    pub fn set_numeric(&mut self, value: u16) {
        self.value = VeParamValue {
            string: [0; VE_MAX_STRING_LENGTH],
        };
        self.value.numeric = value;
    }

    pub fn set_string(&mut self, value: &str) -> Result<()> {
        let mut string = [0; VE_MAX_STRING_LENGTH];
        string_to_fixed(value, &mut string)?;
        self.value = VeParamValue { string };
        Ok(())
    }
}

impl Debug for VeParam {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("VeParam");
        debug.field("id", &self.id);
        match self.param_id() {
            Some(id) if id.is_string() => debug.field("value", &self.string_value()),
            _ => debug.field("value", &self.numeric_value()),
        };
        debug.finish()
    }
}
