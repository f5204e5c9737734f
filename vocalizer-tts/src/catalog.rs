use vocalizer_ffi::types::{VeLanguage, VeSpeechDbInfo, VeVoiceInfo};

/// Installed language, copied out of the engine's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    pub name: String,
    /// Three letter code, e.g. `ENU`.
    pub code: String,
    pub version: String,
    pub id: u16,
}

/// Installed voice.
///
/// Not comparable: an entry has no identity besides its position in one
/// listing.
#[derive(Debug, Clone)]
pub struct Voice {
    pub name: String,
    pub language: String,
    pub version: String,
    pub age: String,
    pub kind: String,
    pub language_id: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpeechDatabase {
    pub voice_name: String,
    pub language: String,
    pub version: String,
    /// Voice model, e.g. `full_22kHz`.
    pub model: String,
    /// Sample rate code in kHz.
    pub frequency: u16,
    pub language_id: u16,
}

impl From<&VeLanguage> for Language {
    fn from(raw: &VeLanguage) -> Self {
        Language {
            name: raw.name(),
            code: raw.code(),
            version: raw.version(),
            id: raw.language_id,
        }
    }
}

impl From<&VeVoiceInfo> for Voice {
    fn from(raw: &VeVoiceInfo) -> Self {
        Voice {
            name: raw.name(),
            language: raw.language(),
            version: raw.version(),
            age: raw.age(),
            kind: raw.kind(),
            language_id: raw.language_id,
        }
    }
}

impl From<&VeSpeechDbInfo> for SpeechDatabase {
    fn from(raw: &VeSpeechDbInfo) -> Self {
        SpeechDatabase {
            voice_name: raw.voice_name(),
            language: raw.language(),
            version: raw.version(),
            model: raw.voice_model(),
            frequency: raw.frequency,
            language_id: raw.language_id,
        }
    }
}
