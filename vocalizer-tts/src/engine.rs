use crate::catalog::{Language, SpeechDatabase, Voice};
use crate::config::VocalizerConfig;
use crate::listener::SpeechListener;
use crate::platform::Platform;
use crate::session::Session;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::ffi::CString;
use std::ptr::null_mut;
use std::sync::Arc;
use vocalizer_ffi::types::{VeHandle, VeLanguage, VeSpeechDbInfo, VeVoiceInfo};
use vocalizer_ffi::VeLibrary;

/// State shared by an engine and every session opened from it. The class
/// handle is released once the last of them is gone.
pub(crate) struct EngineShared {
    pub(crate) library: VeLibrary,
    pub(crate) class: VeHandle,
    pub(crate) platform: Arc<Platform>,
    pub(crate) pcm_bytes: usize,
    pub(crate) mark_slots: usize,
}

impl Drop for EngineShared {
    fn drop(&mut self) {
        match unsafe { self.library.uninitialize(self.class) } {
            Ok(_) => debug!("Engine uninitialized"),
            Err(error) => warn!("Failed to uninitialize engine: {}", error),
        }
    }
}

/// An initialized engine class.
#[derive(Clone)]
pub struct Engine {
    shared: Arc<EngineShared>,
}

impl Engine {
    pub fn initialize(
        library: VeLibrary,
        platform: Arc<Platform>,
        config: &VocalizerConfig,
    ) -> Result<Self> {
        config.validate()?;

        let mut class = VeHandle::NULL;
        unsafe { library.initialize(platform.install(), &mut class) }
            .context("Failed to initialize the engine")?;
        debug!("Engine initialized");

        Ok(Engine {
            shared: Arc::new(EngineShared {
                library,
                class,
                platform,
                pcm_bytes: config.output_buffer_size,
                mark_slots: config.marks_per_buffer,
            }),
        })
    }

    pub fn class(&self) -> VeHandle {
        self.shared.class
    }

    pub fn platform(&self) -> &Arc<Platform> {
        &self.shared.platform
    }

    pub fn languages(&self) -> Result<Vec<Language>> {
        let library = &self.shared.library;
        let class = self.shared.class;

        let mut count = 0u16;
        unsafe { library.get_language_list(class, null_mut(), &mut count) }
            .context("Failed to count languages")?;

        let mut raw = vec![VeLanguage::default(); count as usize];
        unsafe { library.get_language_list(class, raw.as_mut_ptr(), &mut count) }
            .context("Failed to list languages")?;
        raw.truncate(count as usize);

        Ok(raw.iter().map(Language::from).collect())
    }

    pub fn voices(&self, language: &str) -> Result<Vec<Voice>> {
        let library = &self.shared.library;
        let class = self.shared.class;
        let language = CString::new(language)?;

        let mut count = 0u16;
        unsafe { library.get_voice_list(class, language.as_ptr(), null_mut(), &mut count) }
            .with_context(|| format!("Failed to count voices of {:?}", language))?;

        let mut raw = vec![VeVoiceInfo::default(); count as usize];
        unsafe { library.get_voice_list(class, language.as_ptr(), raw.as_mut_ptr(), &mut count) }
            .with_context(|| format!("Failed to list voices of {:?}", language))?;
        raw.truncate(count as usize);

        Ok(raw.iter().map(Voice::from).collect())
    }

    pub fn speech_databases(&self, language: &str, voice: &str) -> Result<Vec<SpeechDatabase>> {
        let library = &self.shared.library;
        let class = self.shared.class;
        let language = CString::new(language)?;
        let voice = CString::new(voice)?;

        let mut count = 0u16;
        unsafe {
            library.get_speech_db_list(class, language.as_ptr(), voice.as_ptr(), null_mut(), &mut count)
        }
        .with_context(|| format!("Failed to count speech databases of {:?}", voice))?;

        let mut raw = vec![VeSpeechDbInfo::default(); count as usize];
        unsafe {
            library.get_speech_db_list(
                class,
                language.as_ptr(),
                voice.as_ptr(),
                raw.as_mut_ptr(),
                &mut count,
            )
        }
        .with_context(|| format!("Failed to list speech databases of {:?}", voice))?;
        raw.truncate(count as usize);

        Ok(raw.iter().map(SpeechDatabase::from).collect())
    }

    /// Opens a session whose output goes to `listener`.
    pub fn open_session(&self, listener: impl SpeechListener) -> Result<Session> {
        Session::open(self.shared.clone(), Box::new(listener))
    }
}
