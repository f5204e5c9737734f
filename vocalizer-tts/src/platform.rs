use crate::config::VocalizerConfig;
use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use std::ffi::{c_char, c_void};
use std::path::Path;
use std::ptr::null_mut;
use std::sync::Arc;
use vocalizer_ffi::strings::{to_wide, WChar};
use vocalizer_ffi::types::{Validation, ValidationInfo, VeInstall, VeLogInterface, VplatformResources};
use vocalizer_ffi::PlatformLibrary;

/// Buffers referenced by [`VplatformResources`]. Their heap allocations stay
/// put for as long as the platform is alive.
#[derive(Default)]
struct ResourceStorage {
    data_install: Vec<Vec<WChar>>,
    data_install_ptrs: Vec<*mut WChar>,
    license_token: Option<Vec<u8>>,
    session_key: Option<Vec<u8>>,
    binary_broker: Option<Vec<WChar>>,
    file_list: Option<Vec<WChar>>,
}

/// The bootstrapped platform library.
///
/// Owns the install descriptor the engine is initialized with; interfaces are
/// released when the last reference goes away.
pub struct Platform {
    library: PlatformLibrary,
    install: Box<VeInstall>,
    resources: Box<VplatformResources>,
    log_interface: Option<Box<VeLogInterface>>,
    /// Interface the platform installed itself, handed back on release.
    native_log_interface: *mut c_void,
    _storage: ResourceStorage,
}

unsafe impl Send for Platform {}
unsafe impl Sync for Platform {}

fn path_to_wide(path: &Path) -> Result<Vec<WChar>> {
    let path = path
        .to_str()
        .ok_or(anyhow!("Path {} is not valid unicode.", path.display()))?;
    Ok(to_wide(path))
}

fn nul_terminated(value: &str) -> Result<(Vec<u8>, i32)> {
    let len = i32::try_from(value.len()).context("Value is too long")?;
    let mut bytes = value.as_bytes().to_vec();
    bytes.push(0);
    Ok((bytes, len))
}

impl Platform {
    pub fn bootstrap(library: PlatformLibrary, config: &VocalizerConfig) -> Result<Arc<Self>> {
        config.validate()?;

        let mut storage = ResourceStorage::default();
        let mut resources = Box::new(VplatformResources::current());

        storage.data_install = config
            .data_install
            .iter()
            .map(|x| path_to_wide(x))
            .collect::<Result<Vec<_>>>()?;
        storage.data_install_ptrs = storage
            .data_install
            .iter_mut()
            .map(|x| x.as_mut_ptr())
            .collect();
        resources.data_install_count = u16::try_from(storage.data_install_ptrs.len())?;
        resources.data_install = if storage.data_install_ptrs.is_empty() {
            null_mut()
        } else {
            storage.data_install_ptrs.as_mut_ptr()
        };

        if let Some(token) = &config.license_token {
            let (bytes, len) = nul_terminated(token).context("Invalid license token")?;
            resources.license_token = bytes.as_ptr() as *const c_char;
            resources.license_token_len = len;
            storage.license_token = Some(bytes);
        }
        resources.licensor = config.licensor;

        if let Some(key) = &config.session_key {
            let (bytes, len) = nul_terminated(key).context("Invalid session key")?;
            resources.session_key = bytes.as_ptr() as *const c_char;
            resources.session_key_len = len;
            storage.session_key = Some(bytes);
        }

        if let Some(path) = &config.binary_broker {
            let wide = path_to_wide(path)?;
            resources.binary_broker = wide.as_ptr();
            storage.binary_broker = Some(wide);
        }

        if let Some(path) = &config.file_list {
            let wide = path_to_wide(path)?;
            resources.file_list_file = wide.as_ptr();
            storage.file_list = Some(wide);
        }

        let mut install = Box::new(VeInstall::current());

        unsafe { library.get_interfaces(&mut *install, &mut *resources) }
            .context("Failed to get platform interfaces")?;

        let native_log_interface = install.log_interface;
        let log_interface = if config.forward_native_log {
            let interface = Box::new(VeLogInterface::forwarding());
            install.log_interface = &*interface as *const VeLogInterface as *mut c_void;
            Some(interface)
        } else {
            None
        };

        debug!(
            "Platform interfaces ready ({} data install directories)",
            resources.data_install_count
        );

        Ok(Arc::new(Platform {
            library,
            install,
            resources,
            log_interface,
            native_log_interface,
            _storage: storage,
        }))
    }

    /// Install descriptor for `ve_ttsInitialize`.
    pub fn install(&self) -> &VeInstall {
        &self.install
    }

    pub fn resources(&self) -> &VplatformResources {
        &self.resources
    }

    pub fn forwards_native_log(&self) -> bool {
        self.log_interface.is_some()
    }

    /// Queries the license state.
    ///
    /// A failing query carries a platform [`VeError`](vocalizer_ffi::VeError);
    /// use [`VeError::license_code`](vocalizer_ffi::VeError::license_code) to
    /// tell the license failures apart.
    pub fn license(&self) -> Result<Validation> {
        let mut info = ValidationInfo::default();
        unsafe { self.library.get_license_info(&mut info) }
            .context("Failed to query license information")?;
        Ok(unsafe { info.decode() })
    }
}

impl Drop for Platform {
    fn drop(&mut self) {
        self.install.log_interface = self.native_log_interface;
        if let Err(error) = unsafe { self.library.release_interfaces(&mut *self.install) } {
            warn!("Failed to release platform interfaces: {}", error);
        }
    }
}
