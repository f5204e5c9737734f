use std::fmt::{Debug, Formatter};
use std::ops::{BitOr, BitOrAssign};

#[repr(i32)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum TextFormat {
    Plain = 0,
    Html = 1,
    Xml = 2,
    Ssml = 3,
}

#[repr(u32)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum ParamId {
    /// Output sample rate as a coarse [`SampleRate`] code, read only.
    Frequency = 1,
    Volume = 2,
    SpeechRate = 3,
    Pitch = 4,
    WaitFactor = 5,
    ReadMode = 6,
    Language = 7,
    Voice = 8,
    /// Punctuation mode.
    PpMode = 9,
    MsgMode = 10,
    TypeOfChar = 11,
    MarkerMode = 12,
    InitMode = 13,
    TextMode = 14,
    LanguageNr = 15,
    DplexMaxSize = 16,
    DplexMaxMsgs = 17,
    MaxInputLength = 18,
    VoiceModel = 19,
    LidScope = 20,
    LidVoiceSwitch = 21,
    ExtraEscLang = 22,
    ExtraEscTn = 23,
    LidMode = 24,
    LidLanguages = 25,
}

impl ParamId {
    /// Parameters whose value lives in the string member of the value union.
    pub fn is_string(self) -> bool {
        matches!(
            self,
            ParamId::Language
                | ParamId::Voice
                | ParamId::VoiceModel
                | ParamId::ExtraEscLang
                | ParamId::LidLanguages
        )
    }
}

#[repr(u16)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum InitMode {
    LoadOnceOpenAll = 0xC,
    LoadOpenAllEachTime = 0x3,
}

#[repr(u16)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum TextMode {
    Standard = 1,
    Sms = 2,
}

#[repr(u16)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum ReadMode {
    Sentence = 1,
    Char = 2,
    Word = 3,
    Line = 4,
}

#[repr(u16)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum MarkerMode {
    Off = 0,
    On = 1,
}

#[repr(u16)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum LidVoiceSwitch {
    Off = 0,
    On = 1,
}

#[repr(u16)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum LidMode {
    MemoryBiased = 0,
    ForcedChoice = 1,
}

#[repr(u16)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum CharEncoding {
    Utf16 = 1,
    Utf8 = 2,
}

#[repr(u16)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum PcmState {
    NewTextUnit = 1,
    MidTextUnit = 2,
    Done = 0xFFFF,
}

#[repr(u32)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum MarkType {
    TextUnit = 0x0001,
    Word = 0x0002,
    Phoneme = 0x0004,
    Bookmark = 0x0008,
    Prompt = 0x0010,
}

#[repr(u32)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum LicenseErrorCode {
    Invalid = 0xF1,
    Crypto = 0xF2,
    Io = 0xF3,
    NoLicense = 0xF4,
    Expired = 0xF5,
    InvalidToken = 0xF6,
    DemoExpired = 0xFF,
}

/// Tag of [`ValidationInfo`](crate::types::ValidationInfo).
#[repr(i64)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum ValidationKind {
    Licensed = 0,
    Demo = 1,
    Invalid = 3,
}

/// Coarse sample rate reported by [`ParamId::Frequency`].
///
/// The mapping to hertz is closed: codes other than these four are rejected
/// by `try_from`.
#[repr(u16)]
#[derive(num_enum::TryFromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum SampleRate {
    Khz8 = 8,
    Khz11 = 11,
    Khz16 = 16,
    Khz22 = 22,
}

impl SampleRate {
    pub fn hertz(self) -> u32 {
        match self {
            SampleRate::Khz8 => 8000,
            SampleRate::Khz11 => 11025,
            SampleRate::Khz16 => 16000,
            SampleRate::Khz22 => 22050,
        }
    }
}

/// Bitmask carried in [`VeCallbackMsg::message`](crate::types::VeCallbackMsg).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct MessageType(pub u32);

impl MessageType {
    pub const BEGIN_PROCESS: MessageType = MessageType(0x00000001);
    pub const END_PROCESS: MessageType = MessageType(0x00000002);
    pub const IN_TEXT_REQ: MessageType = MessageType(0x00000004);
    pub const OUT_BUF_REQ: MessageType = MessageType(0x00000008);
    pub const OUT_BUF_DONE: MessageType = MessageType(0x00000010);
    pub const STOP: MessageType = MessageType(0x00000020);
    pub const PAUSE: MessageType = MessageType(0x00000040);
    pub const RESUME: MessageType = MessageType(0x00000080);
    pub const BACKWARD: MessageType = MessageType(0x00000100);
    pub const FORWARD: MessageType = MessageType(0x00000200);
    pub const TEXT_UNIT: MessageType = MessageType(0x00000400);
    pub const WORD: MessageType = MessageType(0x00000800);
    pub const PHONEME: MessageType = MessageType(0x00001000);
    pub const BOOKMARK: MessageType = MessageType(0x00002000);
    pub const ERROR: MessageType = MessageType(0x00004000);
    pub const PROCESS: MessageType = MessageType(0x00008000);
    pub const TAI_BEGIN: MessageType = MessageType(0x00010000);
    pub const TAI_END: MessageType = MessageType(0x00020000);
    pub const TAI_BUF_REQ: MessageType = MessageType(0x00040000);
    pub const TAI_BUF_DONE: MessageType = MessageType(0x00080000);

    const NAMES: [(MessageType, &'static str); 20] = [
        (Self::BEGIN_PROCESS, "BEGINPROCESS"),
        (Self::END_PROCESS, "ENDPROCESS"),
        (Self::IN_TEXT_REQ, "INTEXTREQ"),
        (Self::OUT_BUF_REQ, "OUTBUFREQ"),
        (Self::OUT_BUF_DONE, "OUTBUFDONE"),
        (Self::STOP, "STOP"),
        (Self::PAUSE, "PAUSE"),
        (Self::RESUME, "RESUME"),
        (Self::BACKWARD, "BACKWARD"),
        (Self::FORWARD, "FORWARD"),
        (Self::TEXT_UNIT, "TEXTUNIT"),
        (Self::WORD, "WORD"),
        (Self::PHONEME, "PHONEME"),
        (Self::BOOKMARK, "BOOKMARK"),
        (Self::ERROR, "ERROR"),
        (Self::PROCESS, "PROCESS"),
        (Self::TAI_BEGIN, "TAIBEGIN"),
        (Self::TAI_END, "TAIEND"),
        (Self::TAI_BUF_REQ, "TAIBUFREQ"),
        (Self::TAI_BUF_DONE, "TAIBUFDONE"),
    ];

    pub fn contains(self, other: MessageType) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MessageType {
    type Output = MessageType;

    fn bitor(self, rhs: Self) -> Self::Output {
        MessageType(self.0 | rhs.0)
    }
}

impl BitOrAssign for MessageType {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Debug for MessageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut names = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .peekable();

        if names.peek().is_none() {
            return write!(f, "MessageType({:#x})", self.0);
        }

        f.write_str("MessageType(")?;
        let mut first = true;
        for name in names {
            if !first {
                f.write_str(" | ")?;
            }
            f.write_str(name)?;
            first = false;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_rate_table() {
        let table = [(8u16, 8000u32), (11, 11025), (16, 16000), (22, 22050)];
        for (code, hertz) in table {
            assert_eq!(SampleRate::try_from(code).unwrap().hertz(), hertz);
        }
    }

    #[test]
    fn test_sample_rate_rejects_other_codes() {
        for code in [0u16, 1, 7, 9, 12, 15, 20, 23, 32, 44, 48, 8000, u16::MAX] {
            assert!(SampleRate::try_from(code).is_err(), "code {} should be rejected", code);
        }
    }

    #[test]
    fn test_param_id_range() {
        assert_eq!(ParamId::try_from(1u32).unwrap(), ParamId::Frequency);
        assert_eq!(ParamId::try_from(25u32).unwrap(), ParamId::LidLanguages);
        assert!(ParamId::try_from(0u32).is_err());
        assert!(ParamId::try_from(26u32).is_err());
    }

    #[test]
    fn test_message_type_flags() {
        let message = MessageType::OUT_BUF_DONE | MessageType::BOOKMARK;
        assert!(message.contains(MessageType::OUT_BUF_DONE));
        assert!(message.contains(MessageType::BOOKMARK));
        assert!(!message.contains(MessageType::END_PROCESS));
        assert!(!message.contains(MessageType(0)));
        assert_eq!(format!("{:?}", message), "MessageType(OUTBUFDONE | BOOKMARK)");
        assert_eq!(format!("{:?}", MessageType(0x0010_0000)), "MessageType(0x100000)");
    }

    #[test]
    fn test_license_codes() {
        assert_eq!(LicenseErrorCode::try_from(0xF6u32).unwrap(), LicenseErrorCode::InvalidToken);
        assert_eq!(LicenseErrorCode::try_from(0xFFu32).unwrap(), LicenseErrorCode::DemoExpired);
        assert!(LicenseErrorCode::try_from(0xF7u32).is_err());
        assert_eq!(LicenseErrorCode::Invalid as u32, crate::consts::VAUTONVDA_ERROR_INVALID);
        assert_eq!(LicenseErrorCode::DemoExpired as u32, crate::consts::VAUTONVDA_ERROR_DEMO_EXPIRED);
    }
}
