use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[cfg(windows)]
const ENGINE_LIBRARY: &str = "./data/vocalizer/ve.dll";
#[cfg(not(windows))]
const ENGINE_LIBRARY: &str = "./data/vocalizer/libve.so";
#[cfg(windows)]
const PLATFORM_LIBRARY: &str = "./data/vocalizer/vplatform.dll";
#[cfg(not(windows))]
const PLATFORM_LIBRARY: &str = "./data/vocalizer/libvplatform.so";

/// Where the native libraries and their data live, and how the platform is
/// licensed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VocalizerConfig {
    pub engine_library: PathBuf,
    pub platform_library: PathBuf,
    /// Directories holding language and voice data.
    pub data_install: Vec<PathBuf>,
    pub license_token: Option<String>,
    pub licensor: i32,
    pub session_key: Option<String>,
    pub binary_broker: Option<PathBuf>,
    pub file_list: Option<PathBuf>,
    /// Bytes of PCM handed to the engine per output request.
    pub output_buffer_size: usize,
    /// Mark slots handed to the engine per output request.
    pub marks_per_buffer: usize,
    /// Route the engine's own error and diagnostic reports into `log`.
    pub forward_native_log: bool,
    /// Applied to every session right after it opens.
    pub session: SessionOptions,
}

/// Initial voice settings of a session. Unset fields keep the engine's
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionOptions {
    pub voice: Option<String>,
    pub language: Option<String>,
    pub rate: Option<u16>,
    pub pitch: Option<u16>,
    pub volume: Option<u16>,
}

impl Default for VocalizerConfig {
    fn default() -> Self {
        VocalizerConfig {
            engine_library: PathBuf::from(ENGINE_LIBRARY),
            platform_library: PathBuf::from(PLATFORM_LIBRARY),
            data_install: vec![PathBuf::from("./data/vocalizer/languages")],
            license_token: None,
            licensor: 0,
            session_key: None,
            binary_broker: None,
            file_list: None,
            output_buffer_size: 8192,
            marks_per_buffer: 64,
            forward_native_log: false,
            session: SessionOptions::default(),
        }
    }
}

impl VocalizerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        content
            .parse()
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_buffer_size == 0 || self.output_buffer_size % 2 != 0 {
            bail!(
                "Output buffer size must be a positive, even number of bytes, got {}.",
                self.output_buffer_size
            );
        }
        if u32::try_from(self.output_buffer_size).is_err() {
            bail!("Output buffer size {} does not fit in 32 bits.", self.output_buffer_size);
        }
        let mark_bytes = self
            .marks_per_buffer
            .checked_mul(size_of_mark())
            .and_then(|x| u32::try_from(x).ok());
        if mark_bytes.is_none() {
            bail!("{} marks per buffer is too many.", self.marks_per_buffer);
        }
        if u16::try_from(self.data_install.len()).is_err() {
            bail!("Too many data install directories: {}.", self.data_install.len());
        }
        Ok(())
    }
}

fn size_of_mark() -> usize {
    std::mem::size_of::<vocalizer_ffi::types::VeMarkInfo>()
}

impl FromStr for VocalizerConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: VocalizerConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let config: VocalizerConfig = r#"{
            "engine_library": "/opt/vocalizer/libve.so",
            "data_install": ["/opt/vocalizer/enu", "/opt/vocalizer/ptp"],
            "license_token": "token",
            "licensor": 3
        }"#
        .parse()?;

        assert_eq!(config.engine_library, PathBuf::from("/opt/vocalizer/libve.so"));
        assert_eq!(config.platform_library, PathBuf::from(PLATFORM_LIBRARY));
        assert_eq!(config.data_install.len(), 2);
        assert_eq!(config.license_token.as_deref(), Some("token"));
        assert_eq!(config.licensor, 3);
        assert_eq!(config.output_buffer_size, 8192);
        assert_eq!(config.session, SessionOptions::default());
        Ok(())
    }

    #[test]
    fn test_session_options() -> Result<()> {
        let config: VocalizerConfig = r#"{
            "session": { "voice": "Samantha", "rate": 120 }
        }"#
        .parse()?;

        assert_eq!(config.session.voice.as_deref(), Some("Samantha"));
        assert_eq!(config.session.rate, Some(120));
        assert_eq!(config.session.volume, None);
        assert!(r#"{ "session": { "speed": 1 } }"#.parse::<VocalizerConfig>().is_err());
        Ok(())
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(r#"{ "output_buffer_size": 0 }"#.parse::<VocalizerConfig>().is_err());
        assert!(r#"{ "output_buffer_size": 1023 }"#.parse::<VocalizerConfig>().is_err());
        assert!(r#"{ "unknown_key": true }"#.parse::<VocalizerConfig>().is_err());
        assert!(VocalizerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let error = VocalizerConfig::from_file("/nonexistent/vocalizer.json").unwrap_err();
        assert!(error.to_string().contains("/nonexistent/vocalizer.json"));
    }
}
