use crate::config::SessionOptions;
use crate::dispatch::{self, Dispatcher};
use crate::engine::EngineShared;
use crate::listener::{Outcome, SpeechListener};
use anyhow::{anyhow, bail, Context, Result};
use log::{debug, warn};
use std::ffi::{c_void, CString};
use std::ptr::null_mut;
use std::sync::Arc;
use vocalizer_ffi::types::{VeHandle, VeInText, VeOutDevInfo, VeParam};
use vocalizer_ffi::{CharEncoding, ParamId, SampleRate, Status, TextFormat};

/// A parameter value to write, or one read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Numeric(ParamId, u16),
    Text(ParamId, String),
}

impl Param {
    pub fn id(&self) -> ParamId {
        match self {
            Param::Numeric(id, _) | Param::Text(id, _) => *id,
        }
    }

    fn to_native(&self) -> Result<VeParam> {
        match self {
            Param::Numeric(id, value) if !id.is_string() => Ok(VeParam::numeric(*id, *value)),
            Param::Text(id, value) if id.is_string() => VeParam::string(*id, value),
            other => bail!("{:?} has the wrong value type for its parameter", other),
        }
    }

    fn from_native(raw: &VeParam) -> Result<Self> {
        let id = raw
            .param_id()
            .ok_or(anyhow!("Unknown parameter id {}", raw.id))?;
        Ok(if id.is_string() {
            Param::Text(id, raw.string_value())
        } else {
            Param::Numeric(id, raw.numeric_value())
        })
    }
}

/// An open synthesis instance.
///
/// `speak` blocks while the engine renders; `stop`, `pause` and `resume` may
/// be called from other threads meanwhile.
pub struct Session {
    engine: Arc<EngineShared>,
    instance: VeHandle,
    dispatcher: Arc<Dispatcher>,
    device: Box<VeOutDevInfo>,
}

unsafe impl Send for Session {}
unsafe impl Sync for Session {}

impl Session {
    pub(crate) fn open(engine: Arc<EngineShared>, listener: Box<dyn SpeechListener>) -> Result<Self> {
        let install = engine.platform.install();
        let mut instance = VeHandle::NULL;
        unsafe {
            engine
                .library
                .open(engine.class, install.heap, install.log, &mut instance, null_mut())
        }
        .context("Failed to open a session")?;

        let dispatcher = Arc::new(Dispatcher::new(listener, engine.pcm_bytes, engine.mark_slots));
        dispatch::register(instance, dispatcher.clone());

        let mut session = Session {
            engine,
            instance,
            dispatcher,
            device: Box::new(VeOutDevInfo {
                instance: null_mut(),
                notify: Some(dispatch::notify),
            }),
        };

        unsafe { session.engine.library.set_out_device(instance, &mut *session.device) }
            .context("Failed to install the output device")?;

        session.set_params(&[Param::Numeric(ParamId::TypeOfChar, CharEncoding::Utf8 as u16)])?;
        debug!("Opened session {:?}", instance.handle_data);

        Ok(session)
    }

    pub fn instance(&self) -> VeHandle {
        self.instance
    }

    /// Speaks UTF-8 `text`, returning once it is done or stopped.
    ///
    /// A stop requested while idle ends the next call right away.
    pub fn speak(&self, text: &str, format: TextFormat) -> Result<Outcome> {
        let input = VeInText::new(format, text.as_bytes())?;

        let result = unsafe {
            self.engine
                .library
                .process_text_to_speech(self.instance, &input)
        };
        let stop_requested = self.dispatcher.take_stop();
        let status = result.context("Failed to process text")?;

        if status.is_stopped() || stop_requested {
            Ok(Outcome::Stopped)
        } else {
            Ok(Outcome::Completed)
        }
    }

    pub fn stop(&self) -> Result<()> {
        self.dispatcher.request_stop();
        unsafe { self.engine.library.stop(self.instance) }.context("Failed to stop")?;
        Ok(())
    }

    pub fn pause(&self) -> Result<()> {
        unsafe { self.engine.library.pause(self.instance) }.context("Failed to pause")?;
        Ok(())
    }

    pub fn resume(&self) -> Result<()> {
        unsafe { self.engine.library.resume(self.instance) }.context("Failed to resume")?;
        Ok(())
    }

    pub fn set_params(&self, params: &[Param]) -> Result<()> {
        let mut raw = params
            .iter()
            .map(Param::to_native)
            .collect::<Result<Vec<_>>>()?;
        let count = u16::try_from(raw.len())?;

        unsafe {
            self.engine
                .library
                .set_param_list(self.instance, raw.as_mut_ptr(), count)
        }
        .with_context(|| format!("Failed to set {:?}", params))?;
        Ok(())
    }

    pub fn get_params(&self, ids: &[ParamId]) -> Result<Vec<Param>> {
        let mut raw = ids.iter().map(|x| VeParam::query(*x)).collect::<Vec<_>>();
        let count = u16::try_from(raw.len())?;

        unsafe {
            self.engine
                .library
                .get_param_list(self.instance, raw.as_mut_ptr(), count)
        }
        .with_context(|| format!("Failed to get {:?}", ids))?;

        raw.iter().map(Param::from_native).collect()
    }

    pub fn numeric_param(&self, id: ParamId) -> Result<u16> {
        match self.get_params(&[id])?.pop() {
            Some(Param::Numeric(_, value)) => Ok(value),
            _ => bail!("{:?} is not a numeric parameter", id),
        }
    }

    pub fn string_param(&self, id: ParamId) -> Result<String> {
        match self.get_params(&[id])?.pop() {
            Some(Param::Text(_, value)) => Ok(value),
            _ => bail!("{:?} is not a string parameter", id),
        }
    }

    pub fn set_voice(&self, voice: &str) -> Result<()> {
        self.set_params(&[Param::Text(ParamId::Voice, voice.to_string())])
    }

    pub fn set_language(&self, language: &str) -> Result<()> {
        self.set_params(&[Param::Text(ParamId::Language, language.to_string())])
    }

    pub fn set_rate(&self, rate: u16) -> Result<()> {
        self.set_params(&[Param::Numeric(ParamId::SpeechRate, rate)])
    }

    pub fn set_pitch(&self, pitch: u16) -> Result<()> {
        self.set_params(&[Param::Numeric(ParamId::Pitch, pitch)])
    }

    pub fn set_volume(&self, volume: u16) -> Result<()> {
        self.set_params(&[Param::Numeric(ParamId::Volume, volume)])
    }

    /// Applies every option that is set, language before voice.
    pub fn apply(&self, options: &SessionOptions) -> Result<()> {
        if let Some(language) = &options.language {
            self.set_language(language)?;
        }
        if let Some(voice) = &options.voice {
            self.set_voice(voice)?;
        }

        let numeric = [
            (ParamId::SpeechRate, options.rate),
            (ParamId::Pitch, options.pitch),
            (ParamId::Volume, options.volume),
        ]
        .into_iter()
        .filter_map(|(id, value)| value.map(|x| Param::Numeric(id, x)))
        .collect::<Vec<_>>();

        if !numeric.is_empty() {
            self.set_params(&numeric)?;
        }
        Ok(())
    }

    pub fn sample_rate(&self) -> Result<SampleRate> {
        let code = self.numeric_param(ParamId::Frequency)?;
        SampleRate::try_from(code).map_err(|_| anyhow!("Unsupported sample rate code {}", code))
    }

    /// Loads a user resource, e.g. a dictionary or a ruleset, into the session.
    pub fn load_resource(&self, mime: &str, data: &[u8]) -> Result<VeHandle> {
        let mime = CString::new(mime)?;
        let length = u32::try_from(data.len())?;
        let mut resource = VeHandle::NULL;

        unsafe {
            self.engine.library.resource_load(
                self.instance,
                mime.as_ptr(),
                length,
                data.as_ptr() as *const c_void,
                &mut resource,
            )
        }
        .with_context(|| format!("Failed to load {:?} resource", mime))?;
        Ok(resource)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        dispatch::unregister(self.instance);
        match unsafe { self.engine.library.close(self.instance) } {
            Ok(Status::Ok | Status::UserStop) => debug!("Closed session {:?}", self.instance.handle_data),
            Err(error) => warn!("Failed to close session: {}", error),
        }
    }
}
