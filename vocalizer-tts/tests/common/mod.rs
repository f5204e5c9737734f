#![allow(dead_code)]

use parking_lot::Mutex;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::{c_char, c_void, CStr};
use std::ptr::null_mut;
use std::sync::atomic::{AtomicBool, Ordering};
use vocalizer_tts::ffi::consts::{
    NUAN_E_NOTFOUND, NUAN_E_TTS_USERSTOP, NUAN_E_WRONG_STATE, NUAN_OK, VE_CURRENT_VERSION,
    VPLATFORM_CURRENT_VERSION,
};
use vocalizer_tts::ffi::strings::{c_str_to_string, string_to_fixed, to_wide, WChar};
use vocalizer_tts::ffi::types::{
    LicenseInfo, LicenseRenewInfo, ValidationInfo, ValidationInfoUnion, VeCallbackMsg, VeHandle,
    VeInText, VeInstall, VeLanguage, VeMarkInfo, VeOutData, VeOutDevInfo, VeParam,
    VeSpeechDbInfo, VeVoiceInfo, VplatformResources,
};
use vocalizer_tts::ffi::{
    MarkType, MessageType, ParamId, PlatformFunctions, PlatformLibrary, VeFunctions, VeLibrary,
};
use vocalizer_tts::VocalizerConfig;

pub const INVALID_ARGUMENT: u32 = 0x80000003;
pub const READ_ONLY: u32 = 0x80000009;
pub const SYNTHESIS_FAILED: u32 = 0x80000100;
/// A word that makes the mock engine fail mid-text.
pub const FAILING_WORD: &str = "<fail>";

const LANGUAGES: &[(&str, &str, u16)] = &[
    ("American English", "ENU", 1),
    ("Brazilian Portuguese", "PTB", 2),
];
const VOICES: &[(&str, &str)] = &[
    ("American English", "Samantha"),
    ("American English", "Tom"),
    ("Brazilian Portuguese", "Luciana"),
];

thread_local! {
    static LICENSE: RefCell<Option<String>> = const { RefCell::new(None) };
    static CLOSED: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
    static UNINITIALIZED: Cell<usize> = const { Cell::new(0) };
    static RELEASED_LOG: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
    static FREQUENCY: Cell<u16> = const { Cell::new(22) };
}

/// `log_interface` of every install released on this thread.
pub fn released_log_interfaces() -> Vec<usize> {
    RELEASED_LOG.with(|x| x.borrow().clone())
}

/// Sample rate code reported by sessions opened on this thread from now on.
pub fn set_frequency(code: u16) {
    FREQUENCY.with(|x| x.set(code));
}

/// Log interface the mock platform installs.
pub fn platform_log_interface() -> usize {
    &PLATFORM_LOG as *const u8 as usize
}

/// Sessions closed on this thread, by raw instance handle.
pub fn closed_sessions() -> Vec<usize> {
    CLOSED.with(|x| x.borrow().clone())
}

/// Engine classes uninitialized on this thread.
pub fn uninitialized_count() -> usize {
    UNINITIALIZED.with(|x| x.get())
}

struct MockInstance {
    device: Mutex<Option<VeOutDevInfo>>,
    params: Mutex<HashMap<u32, VeParam>>,
    stop: AtomicBool,
    paused: AtomicBool,
}

unsafe impl Send for MockInstance {}
unsafe impl Sync for MockInstance {}

impl MockInstance {
    fn new() -> Self {
        let mut params = HashMap::new();
        for param in [
            VeParam::numeric(ParamId::Frequency, FREQUENCY.with(|x| x.get())),
            VeParam::numeric(ParamId::Volume, 80),
            VeParam::numeric(ParamId::SpeechRate, 100),
            VeParam::numeric(ParamId::Pitch, 100),
            VeParam::numeric(ParamId::TypeOfChar, 1),
        ] {
            params.insert(param.id, param);
        }

        MockInstance {
            device: Mutex::new(None),
            params: Mutex::new(params),
            stop: AtomicBool::new(false),
            paused: AtomicBool::new(false),
        }
    }
}

unsafe fn instance<'a>(handle: VeHandle) -> Option<&'a MockInstance> {
    (handle.handle_data as *const MockInstance).as_ref()
}

fn notify(device: &VeOutDevInfo, handle: VeHandle, kind: MessageType, value: u32, data: *mut c_void) -> u32 {
    let Some(notify) = device.notify else {
        return NUAN_OK;
    };
    let mut message = VeCallbackMsg::new(kind, value, data);
    unsafe { notify(handle, device.instance, &mut message, null_mut()) }
}

unsafe extern "C" fn initialize(install: *const VeInstall, class: *mut VeHandle) -> u32 {
    let Some(install) = install.as_ref() else {
        return INVALID_ARGUMENT;
    };
    if install.fmt_version != VE_CURRENT_VERSION || install.heap.is_null() {
        return NUAN_E_WRONG_STATE;
    }
    *class = VeHandle {
        handle_data: Box::into_raw(Box::new(0u64)) as *mut c_void,
        check: 1,
    };
    NUAN_OK
}

unsafe extern "C" fn uninitialize(class: VeHandle) -> u32 {
    drop(Box::from_raw(class.handle_data as *mut u64));
    UNINITIALIZED.with(|x| x.set(x.get() + 1));
    NUAN_OK
}

unsafe extern "C" fn open(
    class: VeHandle,
    heap: *mut c_void,
    _log: *mut c_void,
    out: *mut VeHandle,
    _reserved: *mut c_void,
) -> u32 {
    if class.is_null() || heap.is_null() {
        return NUAN_E_WRONG_STATE;
    }
    *out = VeHandle {
        handle_data: Box::into_raw(Box::new(MockInstance::new())) as *mut c_void,
        check: 2,
    };
    NUAN_OK
}

unsafe extern "C" fn close(handle: VeHandle) -> u32 {
    CLOSED.with(|x| x.borrow_mut().push(handle.handle_data as usize));
    drop(Box::from_raw(handle.handle_data as *mut MockInstance));
    NUAN_OK
}

/// Speaks one output buffer per word: `BEGINPROCESS`, then `OUTBUFREQ` and
/// `OUTBUFDONE` per word with a word mark, then `ENDPROCESS`.
unsafe extern "C" fn process_text(handle: VeHandle, text: *const VeInText) -> u32 {
    let (Some(state), Some(text)) = (instance(handle), text.as_ref()) else {
        return INVALID_ARGUMENT;
    };
    let Some(device) = *state.device.lock() else {
        return NUAN_E_WRONG_STATE;
    };
    let bytes = std::slice::from_raw_parts(text.text as *const u8, text.text_length as usize);
    let Ok(text) = std::str::from_utf8(bytes) else {
        return INVALID_ARGUMENT;
    };
    state.stop.store(false, Ordering::SeqCst);

    let mut result = NUAN_OK;
    if notify(&device, handle, MessageType::BEGIN_PROCESS, 0, null_mut()) == NUAN_E_TTS_USERSTOP {
        result = NUAN_E_TTS_USERSTOP;
    }

    let mut position = 0;
    for (index, word) in text.split(' ').enumerate() {
        if result != NUAN_OK {
            break;
        }
        let source_pos = position;
        position += word.len() + 1;
        if word.is_empty() {
            continue;
        }
        if word == FAILING_WORD {
            notify(&device, handle, MessageType::ERROR, SYNTHESIS_FAILED, null_mut());
            result = SYNTHESIS_FAILED;
            break;
        }
        if state.stop.load(Ordering::SeqCst) {
            result = NUAN_E_TTS_USERSTOP;
            break;
        }

        let mut out = VeOutData::default();
        let data = &mut out as *mut VeOutData as *mut c_void;
        if notify(&device, handle, MessageType::OUT_BUF_REQ, 0, data) == NUAN_E_TTS_USERSTOP {
            result = NUAN_E_TTS_USERSTOP;
            break;
        }

        let samples = (word.chars().count() * 8).min(out.pcm_buf_len as usize / 2);
        let pcm = out.pcm_buf as *mut u8;
        for i in 0..samples {
            let sample = ((index as i16 + 1) * 100).to_le_bytes();
            *pcm.add(i * 2) = sample[0];
            *pcm.add(i * 2 + 1) = sample[1];
        }
        out.pcm_buf_len = (samples * 2) as u32;

        if out.mark_count() > 0 {
            *out.mark_list = VeMarkInfo {
                mark_type: MarkType::Word as u32,
                source_pos: source_pos as u32,
                source_len: word.len() as u32,
                ..Default::default()
            };
            out.mark_list_len = std::mem::size_of::<VeMarkInfo>() as u32;
        } else {
            out.mark_list_len = 0;
        }

        if notify(&device, handle, MessageType::OUT_BUF_DONE, 0, data) == NUAN_E_TTS_USERSTOP {
            result = NUAN_E_TTS_USERSTOP;
        }
    }

    if result != SYNTHESIS_FAILED {
        notify(&device, handle, MessageType::END_PROCESS, 0, null_mut());
    }
    result
}

unsafe extern "C" fn stop(handle: VeHandle) -> u32 {
    match instance(handle) {
        Some(state) => {
            state.stop.store(true, Ordering::SeqCst);
            NUAN_OK
        }
        None => INVALID_ARGUMENT,
    }
}

unsafe extern "C" fn pause(handle: VeHandle) -> u32 {
    match instance(handle) {
        Some(state) if !state.paused.swap(true, Ordering::SeqCst) => NUAN_OK,
        _ => NUAN_E_WRONG_STATE,
    }
}

unsafe extern "C" fn resume(handle: VeHandle) -> u32 {
    match instance(handle) {
        Some(state) if state.paused.swap(false, Ordering::SeqCst) => NUAN_OK,
        _ => NUAN_E_WRONG_STATE,
    }
}

unsafe extern "C" fn set_params(handle: VeHandle, params: *mut VeParam, count: u16) -> u32 {
    let Some(state) = instance(handle) else {
        return INVALID_ARGUMENT;
    };
    let params = std::slice::from_raw_parts(params, count as usize);
    let mut stored = state.params.lock();
    for param in params {
        match param.param_id() {
            None => return INVALID_ARGUMENT,
            Some(ParamId::Frequency) => return READ_ONLY,
            Some(_) => {
                stored.insert(param.id, *param);
            }
        }
    }
    NUAN_OK
}

unsafe extern "C" fn get_params(handle: VeHandle, params: *mut VeParam, count: u16) -> u32 {
    let Some(state) = instance(handle) else {
        return INVALID_ARGUMENT;
    };
    let params = std::slice::from_raw_parts_mut(params, count as usize);
    let stored = state.params.lock();
    for param in params {
        match stored.get(&param.id) {
            Some(value) => *param = *value,
            None => return NUAN_E_NOTFOUND,
        }
    }
    NUAN_OK
}

/// Writes up to `*count` entries into `list`, or only the total when `list`
/// is null.
unsafe fn fill<T: Copy>(entries: &[T], list: *mut T, count: *mut u16) -> u32 {
    if count.is_null() {
        return INVALID_ARGUMENT;
    }
    if list.is_null() {
        *count = entries.len() as u16;
        return NUAN_OK;
    }
    let written = entries.len().min(*count as usize);
    std::ptr::copy_nonoverlapping(entries.as_ptr(), list, written);
    *count = written as u16;
    NUAN_OK
}

fn fixed(value: &str, field: &mut [c_char]) {
    string_to_fixed(value, field).unwrap();
}

unsafe extern "C" fn language_list(_class: VeHandle, list: *mut VeLanguage, count: *mut u16) -> u32 {
    let languages = LANGUAGES
        .iter()
        .map(|(name, code, id)| {
            let mut language = VeLanguage::default();
            fixed(name, &mut language.language);
            fixed(code, &mut language.language_tlw);
            fixed("5.2.3", &mut language.version);
            language.language_id = *id;
            language
        })
        .collect::<Vec<_>>();
    fill(&languages, list, count)
}

fn language_id(name: &str) -> Option<u16> {
    LANGUAGES.iter().find(|x| x.0 == name).map(|x| x.2)
}

unsafe extern "C" fn voice_list(
    _class: VeHandle,
    language: *const c_char,
    list: *mut VeVoiceInfo,
    count: *mut u16,
) -> u32 {
    let Some(language) = c_str_to_string(language) else {
        return INVALID_ARGUMENT;
    };
    let Some(id) = language_id(&language) else {
        return NUAN_E_NOTFOUND;
    };
    let voices = VOICES
        .iter()
        .filter(|x| x.0 == language)
        .map(|(language, name)| {
            let mut voice = VeVoiceInfo::default();
            fixed(language, &mut voice.language);
            fixed(name, &mut voice.voice_name);
            fixed("2.0.0", &mut voice.version);
            fixed("Adult", &mut voice.voice_age);
            fixed("Female", &mut voice.voice_type);
            voice.language_id = id;
            voice
        })
        .collect::<Vec<_>>();
    fill(&voices, list, count)
}

unsafe extern "C" fn speech_db_list(
    _class: VeHandle,
    language: *const c_char,
    voice: *const c_char,
    list: *mut VeSpeechDbInfo,
    count: *mut u16,
) -> u32 {
    let (Some(language), Some(voice)) = (c_str_to_string(language), c_str_to_string(voice)) else {
        return INVALID_ARGUMENT;
    };
    let Some(id) = language_id(&language) else {
        return NUAN_E_NOTFOUND;
    };
    if !VOICES.iter().any(|x| x.0 == language && x.1 == voice) {
        return NUAN_E_NOTFOUND;
    }

    let mut database = VeSpeechDbInfo::default();
    fixed(&language, &mut database.language);
    fixed(&voice, &mut database.voice_name);
    fixed("2.0.0", &mut database.version);
    fixed("full_22kHz", &mut database.voice_model);
    database.frequency = 22;
    database.language_id = id;
    fill(&[database], list, count)
}

unsafe extern "C" fn set_out_device(handle: VeHandle, device: *mut VeOutDevInfo) -> u32 {
    match (instance(handle), device.as_ref()) {
        (Some(state), Some(device)) => {
            *state.device.lock() = Some(*device);
            NUAN_OK
        }
        _ => INVALID_ARGUMENT,
    }
}

unsafe extern "C" fn resource_load(
    handle: VeHandle,
    mime: *const c_char,
    length: u32,
    data: *const c_void,
    resource: *mut VeHandle,
) -> u32 {
    if instance(handle).is_none() || mime.is_null() || data.is_null() || length == 0 {
        return INVALID_ARGUMENT;
    }
    if !CStr::from_ptr(mime).to_bytes().starts_with(b"application/") {
        return NUAN_E_NOTFOUND;
    }
    *resource = VeHandle {
        handle_data: Box::into_raw(Box::new(length)) as *mut c_void,
        check: 3,
    };
    NUAN_OK
}

pub fn engine() -> VeLibrary {
    VeLibrary::from_functions(VeFunctions {
        initialize,
        uninitialize,
        open,
        close,
        process_text_to_speech: process_text,
        stop,
        pause,
        resume,
        set_param_list: set_params,
        get_param_list: get_params,
        get_language_list: language_list,
        get_voice_list: voice_list,
        get_speech_db_list: speech_db_list,
        set_out_device,
        resource_load,
    })
}

/// Heap sentinel handed out by the mock platform.
static HEAP: u8 = 0;
static PLATFORM_LOG: u8 = 0;

unsafe extern "C" fn get_interfaces(install: *mut VeInstall, resources: *mut VplatformResources) -> u32 {
    let (Some(install), Some(resources)) = (install.as_mut(), resources.as_ref()) else {
        return INVALID_ARGUMENT;
    };
    if resources.fmt_version != VPLATFORM_CURRENT_VERSION || resources.data_install_count == 0 {
        return INVALID_ARGUMENT;
    }

    let token = c_str_to_string(resources.license_token);
    LICENSE.with(|x| *x.borrow_mut() = token);
    install.heap = &HEAP as *const u8 as *mut c_void;
    install.log_interface = &PLATFORM_LOG as *const u8 as *mut c_void;
    NUAN_OK
}

unsafe extern "C" fn release_interfaces(install: *mut VeInstall) -> u32 {
    if let Some(install) = install.as_mut() {
        RELEASED_LOG.with(|x| x.borrow_mut().push(install.log_interface as usize));
        install.heap = null_mut();
    }
    NUAN_OK
}

fn leak_wide(value: &str) -> *const WChar {
    Box::leak(to_wide(value).into_boxed_slice()).as_ptr()
}

unsafe extern "C" fn license_info(info: *mut ValidationInfo) -> u32 {
    let Some(info) = info.as_mut() else {
        return INVALID_ARGUMENT;
    };
    let token = LICENSE.with(|x| x.borrow().clone());
    match token.as_deref() {
        Some("licensed") => {
            let renew = Box::leak(Box::new(LicenseRenewInfo {
                expires: 2_000_000_000,
                renew: 1_900_000_000,
                token: leak_wide("renew-token"),
            }));
            *info = ValidationInfo {
                kind: 0,
                info: ValidationInfoUnion {
                    license: LicenseInfo {
                        user_name: leak_wide("Test User"),
                        user_id: leak_wide("user-1"),
                        email: leak_wide("user@example.com"),
                        distributor: std::ptr::null(),
                        number: 7,
                        renew_info: renew,
                    },
                },
            };
            NUAN_OK
        }
        Some("demo") => {
            *info = ValidationInfo {
                kind: 1,
                info: ValidationInfoUnion {
                    demo_expiration: 1_800_000_000,
                },
            };
            NUAN_OK
        }
        Some("expired") => 0xF5,
        Some(_) => 0xF6,
        None => 0xF4,
    }
}

pub fn platform() -> PlatformLibrary {
    PlatformLibrary::from_functions(PlatformFunctions {
        get_interfaces,
        release_interfaces,
        get_license_info: license_info,
    })
}

pub fn config(license_token: Option<&str>) -> VocalizerConfig {
    VocalizerConfig {
        data_install: vec!["/opt/vocalizer/languages".into()],
        license_token: license_token.map(str::to_string),
        output_buffer_size: 256,
        marks_per_buffer: 4,
        ..Default::default()
    }
}
