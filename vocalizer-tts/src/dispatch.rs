use crate::listener::{AudioChunk, Flow, Mark, SpeechListener};
use hashbrown::HashMap;
use log::{error, trace};
use parking_lot::{Mutex, RwLock};
use std::ffi::c_void;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};
use vocalizer_ffi::consts::{NUAN_E_TTS_USERSTOP, NUAN_OK};
use vocalizer_ffi::types::{VeCallbackMsg, VeHandle, VeMarkInfo, VeOutData};
use vocalizer_ffi::MessageType;

/// Open sessions by instance handle. The notification looks its session up
/// here, so a late callback for a closed session finds nothing.
static SESSIONS: LazyLock<RwLock<HashMap<VeHandle, Arc<Dispatcher>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

pub(crate) fn register(instance: VeHandle, dispatcher: Arc<Dispatcher>) {
    SESSIONS.write().insert(instance, dispatcher);
}

pub(crate) fn unregister(instance: VeHandle) {
    SESSIONS.write().remove(&instance);
}

fn lookup(instance: &VeHandle) -> Option<Arc<Dispatcher>> {
    SESSIONS.read().get(instance).cloned()
}

/// Scratch space lent to the engine in `OUTBUFREQ`.
struct OutputBuffers {
    pcm: Vec<u8>,
    marks: Vec<VeMarkInfo>,
}

unsafe impl Send for OutputBuffers {}

pub(crate) struct Dispatcher {
    listener: Mutex<Box<dyn SpeechListener>>,
    buffers: Mutex<OutputBuffers>,
    stop_requested: AtomicBool,
}

impl Dispatcher {
    pub(crate) fn new(listener: Box<dyn SpeechListener>, pcm_bytes: usize, mark_slots: usize) -> Self {
        Dispatcher {
            listener: Mutex::new(listener),
            buffers: Mutex::new(OutputBuffers {
                pcm: vec![0; pcm_bytes],
                marks: vec![VeMarkInfo::default(); mark_slots],
            }),
            stop_requested: AtomicBool::new(false),
        }
    }

    pub(crate) fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::SeqCst);
    }

    pub(crate) fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::SeqCst)
    }

    /// Clears the stop request, returning whether one was pending.
    pub(crate) fn take_stop(&self) -> bool {
        self.stop_requested.swap(false, Ordering::SeqCst)
    }

    fn with_listener(&self, f: impl FnOnce(&mut dyn SpeechListener) -> Flow) -> Flow {
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut listener = self.listener.lock();
            f(listener.as_mut())
        }));

        result.unwrap_or_else(|_| {
            error!("Speech listener panicked, stopping synthesis");
            self.request_stop();
            Flow::Stop
        })
    }

    /// Points the engine's output record at our scratch buffers.
    unsafe fn lend_buffers(&self, out: *mut VeOutData) {
        let Some(out) = out.as_mut() else {
            return;
        };
        let mut buffers = self.buffers.lock();
        out.pcm_buf = buffers.pcm.as_mut_ptr() as *mut c_void;
        out.pcm_buf_len = buffers.pcm.len() as u32;
        out.mark_list = buffers.marks.as_mut_ptr();
        out.mark_list_len = (buffers.marks.len() * std::mem::size_of::<VeMarkInfo>()) as u32;
    }

    /// Copies a filled output record, nothing of it survives the callback.
    unsafe fn take_output(out: *const VeOutData) -> Option<AudioChunk> {
        let out = out.as_ref()?;
        let chunk = AudioChunk {
            audio_format: out.audio_format,
            pcm: out.pcm().to_vec(),
            marks: out.marks().iter().map(|x| Mark::copy_from(x)).collect(),
        };

        if chunk.pcm.is_empty() && chunk.marks.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }

    pub(crate) unsafe fn handle(&self, message: &VeCallbackMsg) -> u32 {
        let kind = message.message_type();

        let flow = if kind.contains(MessageType::OUT_BUF_REQ) {
            self.lend_buffers(message.out_data());
            Flow::Continue
        } else if kind.contains(MessageType::OUT_BUF_DONE) {
            match Self::take_output(message.out_data()) {
                Some(chunk) => self.with_listener(|x| x.on_audio(chunk)),
                None => Flow::Continue,
            }
        } else if kind.contains(MessageType::BEGIN_PROCESS) {
            self.with_listener(|x| {
                x.on_begin();
                Flow::Continue
            })
        } else if kind.contains(MessageType::END_PROCESS) {
            self.with_listener(|x| {
                x.on_end();
                Flow::Continue
            })
        } else if kind.contains(MessageType::ERROR) {
            let code = message.error_code();
            self.with_listener(|x| {
                x.on_error(code);
                Flow::Continue
            })
        } else {
            Flow::Continue
        };

        if flow == Flow::Stop || self.stop_requested() {
            NUAN_E_TTS_USERSTOP
        } else {
            NUAN_OK
        }
    }
}

/// Output notification installed on every session.
pub(crate) unsafe extern "C" fn notify(
    instance: VeHandle,
    _user_data: *mut c_void,
    message: *mut VeCallbackMsg,
    _reserved: *mut c_void,
) -> u32 {
    let Some(message) = message.as_ref() else {
        return NUAN_OK;
    };
    trace!("{:?} for instance {:?}", message.message_type(), instance.handle_data);

    match lookup(&instance) {
        Some(dispatcher) => dispatcher.handle(message),
        None => {
            trace!("No open session for instance {:?}", instance.handle_data);
            NUAN_OK
        }
    }
}
