use crate::types::{
    ValidationInfo, VeHandle, VeInText, VeInstall, VeLanguage, VeOutDevInfo,
    VeParam, VeSpeechDbInfo, VeVoiceInfo, VplatformResources,
};
use std::ffi::{c_char, c_void};

native_library! {
    /// The Vocalizer Expressive engine (`ve.dll` / `libve.so`).
    pub struct VeLibrary(VeFunctions): Engine {
        initialize => ve_ttsInitialize(install: *const VeInstall, class: *mut VeHandle);
        uninitialize => ve_ttsUnInitialize(class: VeHandle);
        open => ve_ttsOpen(
            class: VeHandle,
            heap: *mut c_void,
            log: *mut c_void,
            instance: *mut VeHandle,
            reserved: *mut c_void,
        );
        close => ve_ttsClose(instance: VeHandle);
        /// Blocks until the text is spoken or stopped; output arrives through
        /// the notification installed with [`VeLibrary::set_out_device`].
        process_text_to_speech => ve_ttsProcessText2Speech(instance: VeHandle, text: *const VeInText);
        stop => ve_ttsStop(instance: VeHandle);
        pause => ve_ttsPause(instance: VeHandle);
        resume => ve_ttsResume(instance: VeHandle);
        set_param_list => ve_ttsSetParamList(instance: VeHandle, params: *mut VeParam, count: u16);
        get_param_list => ve_ttsGetParamList(instance: VeHandle, params: *mut VeParam, count: u16);
        /// With a null `languages` only the count is written.
        get_language_list => ve_ttsGetLanguageList(
            class: VeHandle,
            languages: *mut VeLanguage,
            count: *mut u16,
        );
        get_voice_list => ve_ttsGetVoiceList(
            class: VeHandle,
            language: *const c_char,
            voices: *mut VeVoiceInfo,
            count: *mut u16,
        );
        get_speech_db_list => ve_ttsGetSpeechDBList(
            class: VeHandle,
            language: *const c_char,
            voice: *const c_char,
            databases: *mut VeSpeechDbInfo,
            count: *mut u16,
        );
        set_out_device => ve_ttsSetOutDevice(instance: VeHandle, device: *mut VeOutDevInfo);
        resource_load => ve_ttsResourceLoad(
            instance: VeHandle,
            mime: *const c_char,
            length: u32,
            data: *const c_void,
            resource: *mut VeHandle,
        );
    }
}

native_library! {
    /// The platform library providing heap, data and licensing services.
    pub struct PlatformLibrary(PlatformFunctions): Platform {
        get_interfaces => vplatform_GetInterfaces(
            install: *mut VeInstall,
            resources: *mut VplatformResources,
        );
        release_interfaces => vplatform_ReleaseInterfaces(install: *mut VeInstall);
        get_license_info => VAUTONVDA_getLicenseInfo(info: *mut ValidationInfo);
    }
}
