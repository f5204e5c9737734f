use crate::config::{SessionOptions, VocalizerConfig};
use crate::engine::Engine;
use crate::listener::SpeechListener;
use crate::platform::Platform;
use crate::session::Session;
use crate::synthesis::{Collector, Synthesis};
use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;
use vocalizer_ffi::types::Validation;
use vocalizer_ffi::{PlatformLibrary, TextFormat, VeLibrary};

/// Platform plus engine, ready to open sessions.
pub struct Vocalizer {
    engine: Engine,
    options: SessionOptions,
}

impl Vocalizer {
    /// Loads both libraries from the configured paths.
    pub fn from_config(config: &VocalizerConfig) -> Result<Self> {
        config.validate()?;

        let platform = PlatformLibrary::load(&config.platform_library)
            .context("Failed to load the platform library")?;
        let engine = VeLibrary::load(&config.engine_library)
            .context("Failed to load the engine library")?;

        Self::from_libraries(platform, engine, config)
    }

    pub fn from_libraries(
        platform: PlatformLibrary,
        engine: VeLibrary,
        config: &VocalizerConfig,
    ) -> Result<Self> {
        let platform = Platform::bootstrap(platform, config)?;
        let engine = Engine::initialize(engine, platform, config)?;
        info!("Vocalizer ready");

        Ok(Vocalizer {
            engine,
            options: config.session.clone(),
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn platform(&self) -> &Arc<Platform> {
        self.engine.platform()
    }

    pub fn license(&self) -> Result<Validation> {
        self.platform().license()
    }

    /// Opens a session with the configured options applied.
    pub fn open_session(&self, listener: impl SpeechListener) -> Result<Session> {
        let session = self.engine.open_session(listener)?;
        session.apply(&self.options)?;
        Ok(session)
    }

    /// Speaks `text` in a fresh session and collects the audio.
    pub fn synthesize(&self, text: &str, format: TextFormat) -> Result<Synthesis> {
        self.synthesize_with(text, format, &SessionOptions::default())
    }

    /// Like [`Vocalizer::synthesize`], with `overrides` applied on top of the
    /// configured options.
    pub fn synthesize_with(
        &self,
        text: &str,
        format: TextFormat,
        overrides: &SessionOptions,
    ) -> Result<Synthesis> {
        let collector = Collector::new();
        let session = self.open_session(collector.clone())?;
        session.apply(overrides)?;

        let sample_rate = session.sample_rate()?;
        let outcome = session.speak(text, format)?;
        drop(session);

        let (pcm, marks) = collector.drain();
        Ok(Synthesis {
            sample_rate,
            outcome,
            pcm,
            marks,
        })
    }
}
