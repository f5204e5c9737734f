use crate::consts::VE_MAX_STRING_LENGTH;
use crate::util::strings::fixed_to_string;
use std::ffi::c_char;
use vocalizer_proc_macro::NativeLayout;

#[repr(C)]
#[derive(Debug, Clone, Copy, NativeLayout)]
pub struct VeLanguage {
    pub language: [c_char; VE_MAX_STRING_LENGTH],
    /// Three letter language code.
    pub language_tlw: [c_char; 4],
    pub version: [c_char; VE_MAX_STRING_LENGTH],
    pub language_id: u16,
}

/// Voice catalog entry.
///
/// Entries have no value identity in the native contract: a record is only
/// equal to itself, two records with the same content are still different
/// entries.
#[repr(C)]
#[derive(Debug, Clone, Copy, NativeLayout)]
pub struct VeVoiceInfo {
    pub version: [c_char; VE_MAX_STRING_LENGTH],
    pub language: [c_char; VE_MAX_STRING_LENGTH],
    pub voice_name: [c_char; VE_MAX_STRING_LENGTH],
    pub voice_age: [c_char; VE_MAX_STRING_LENGTH],
    pub voice_type: [c_char; VE_MAX_STRING_LENGTH],
    pub language_id: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, NativeLayout)]
pub struct VeSpeechDbInfo {
    pub version: [c_char; VE_MAX_STRING_LENGTH],
    pub language: [c_char; VE_MAX_STRING_LENGTH],
    pub voice_name: [c_char; VE_MAX_STRING_LENGTH],
    pub voice_model: [c_char; VE_MAX_STRING_LENGTH],
    pub frequency: u16,
    pub language_id: u16,
}

zeroed_default!(VeLanguage, VeVoiceInfo, VeSpeechDbInfo);

impl PartialEq for VeVoiceInfo {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl VeLanguage {
    pub fn name(&self) -> String {
        fixed_to_string(&self.language)
    }

    pub fn code(&self) -> String {
        fixed_to_string(&self.language_tlw)
    }

    pub fn version(&self) -> String {
        fixed_to_string(&self.version)
    }
}

impl VeVoiceInfo {
    pub fn name(&self) -> String {
        fixed_to_string(&self.voice_name)
    }

    pub fn language(&self) -> String {
        fixed_to_string(&self.language)
    }

    pub fn version(&self) -> String {
        fixed_to_string(&self.version)
    }

    pub fn age(&self) -> String {
        fixed_to_string(&self.voice_age)
    }

    pub fn kind(&self) -> String {
        fixed_to_string(&self.voice_type)
    }
}

impl VeSpeechDbInfo {
    pub fn voice_name(&self) -> String {
        fixed_to_string(&self.voice_name)
    }

    pub fn language(&self) -> String {
        fixed_to_string(&self.language)
    }

    pub fn version(&self) -> String {
        fixed_to_string(&self.version)
    }

    pub fn voice_model(&self) -> String {
        fixed_to_string(&self.voice_model)
    }
}
