//! Numeric constants of the Vocalizer Expressive SDK.

/// Engine format version written into [`VeInstall`](crate::types::VeInstall).
pub const VE_CURRENT_VERSION: u16 = 0x0520;
/// Platform format version written into
/// [`VplatformResources`](crate::types::VplatformResources).
pub const VPLATFORM_CURRENT_VERSION: u16 = 0x0200;
/// Width of every fixed-length string field, terminator included.
pub const VE_MAX_STRING_LENGTH: usize = 128;

pub const NUAN_OK: u32 = 0;
pub const NUAN_E_TTS_USERSTOP: u32 = 0x80000807;
pub const NUAN_E_WRONG_STATE: u32 = 0x80000011;
pub const NUAN_E_NOTFOUND: u32 = 0x80000014;

// license codes, platform library only
pub const VAUTONVDA_ERROR_INVALID: u32 = 0xF1;
pub const VAUTONVDA_ERROR_CRYPTO: u32 = 0xF2;
pub const VAUTONVDA_ERROR_IO: u32 = 0xF3;
pub const VAUTONVDA_ERROR_NOLICENSE: u32 = 0xF4;
pub const VAUTONVDA_ERROR_EXPIRED: u32 = 0xF5;
pub const VAUTONVDA_ERROR_INVALID_TOKEN: u32 = 0xF6;
pub const VAUTONVDA_ERROR_DEMO_EXPIRED: u32 = 0xFF;
