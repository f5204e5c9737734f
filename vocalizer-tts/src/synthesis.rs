use crate::listener::{AudioChunk, Flow, Mark, Outcome, SpeechListener};
use anyhow::Result;
use parking_lot::Mutex;
use std::io::{BufWriter, Cursor};
use std::sync::Arc;
use vocalizer_ffi::SampleRate;

/// Everything one `speak` call produced.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub sample_rate: SampleRate,
    pub outcome: Outcome,
    /// 16-bit little endian mono PCM.
    pub pcm: Vec<u8>,
    pub marks: Vec<Mark>,
}

impl Synthesis {
    pub fn samples(&self) -> impl Iterator<Item = i16> + '_ {
        self.pcm
            .chunks_exact(2)
            .map(|x| i16::from_le_bytes([x[0], x[1]]))
    }

    pub fn duration_secs(&self) -> f64 {
        (self.pcm.len() / 2) as f64 / self.sample_rate.hertz() as f64
    }

    /// Encodes the audio as a WAV file.
    pub fn to_wav(&self) -> Result<Vec<u8>> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate.hertz(),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut buf = Vec::new();
        {
            let writer = BufWriter::new(Cursor::new(&mut buf));
            let mut writer = hound::WavWriter::new(writer, spec)?;
            for sample in self.samples() {
                writer.write_sample(sample)?;
            }
            writer.finalize()?;
        }

        Ok(buf)
    }
}

/// Listener gathering every chunk of a session.
#[derive(Clone, Default)]
pub struct Collector {
    chunks: Arc<Mutex<Vec<AudioChunk>>>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes what was collected so far, leaving the collector empty.
    pub fn drain(&self) -> (Vec<u8>, Vec<Mark>) {
        let chunks = std::mem::take(&mut *self.chunks.lock());
        let mut pcm = Vec::new();
        let mut marks = Vec::new();
        for chunk in chunks {
            pcm.extend_from_slice(&chunk.pcm);
            marks.extend(chunk.marks);
        }
        (pcm, marks)
    }
}

impl SpeechListener for Collector {
    fn on_audio(&mut self, chunk: AudioChunk) -> Flow {
        self.chunks.lock().push(chunk);
        Flow::Continue
    }
}
