use log::error;
use vocalizer_ffi::types::VeMarkInfo;
use vocalizer_ffi::MarkType;

/// Whether the engine should keep going after a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// How a `speak` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Stopped,
}

/// Positional annotation copied out of the engine's mark list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mark {
    pub mark_type: u32,
    pub source_pos: u32,
    pub source_len: u32,
    pub dest_pos: u32,
    pub dest_len: u32,
    pub phoneme: u16,
    pub mark_id: u32,
    pub param: u32,
    pub prompt_id: Option<String>,
}

impl Mark {
    pub fn kind(&self) -> Option<MarkType> {
        MarkType::try_from(self.mark_type).ok()
    }

    /// # Safety
    /// `raw.prompt_id` must be null or a live NUL terminated string.
    pub(crate) unsafe fn copy_from(raw: &VeMarkInfo) -> Self {
        Mark {
            mark_type: raw.mark_type,
            source_pos: raw.source_pos,
            source_len: raw.source_len,
            dest_pos: raw.dest_pos,
            dest_len: raw.dest_len,
            phoneme: raw.phoneme,
            mark_id: raw.mark_id,
            param: raw.param,
            prompt_id: raw.prompt_id(),
        }
    }
}

/// One batch of synthesized audio: 16-bit little endian PCM plus marks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioChunk {
    pub audio_format: u32,
    pub pcm: Vec<u8>,
    pub marks: Vec<Mark>,
}

impl AudioChunk {
    pub fn samples(&self) -> impl Iterator<Item = i16> + '_ {
        self.pcm
            .chunks_exact(2)
            .map(|x| i16::from_le_bytes([x[0], x[1]]))
    }
}

/// Receives a session's notifications.
///
/// Calls come from whichever thread the engine runs its output on and should
/// return quickly: the engine may hold internal locks while waiting.
pub trait SpeechListener: Send + 'static {
    fn on_begin(&mut self) {}

    fn on_audio(&mut self, chunk: AudioChunk) -> Flow;

    fn on_end(&mut self) {}

    fn on_error(&mut self, code: u32) {
        error!("Engine reported error {:#x} during synthesis", code);
    }
}

impl<F> SpeechListener for F
where
    F: FnMut(AudioChunk) -> Flow + Send + 'static,
{
    fn on_audio(&mut self, chunk: AudioChunk) -> Flow {
        self(chunk)
    }
}

#[test]
fn test_samples_little_endian() {
    let chunk = AudioChunk {
        pcm: vec![0x01, 0x00, 0xFF, 0xFF, 0x00, 0x80, 0x7F],
        ..Default::default()
    };
    assert_eq!(chunk.samples().collect::<Vec<_>>(), vec![1, -1, i16::MIN]);
}
