//! `#[repr(C)]` mirrors of the SDK records. Field order and widths follow the
//! native headers for [`VE_CURRENT_VERSION`](crate::consts::VE_CURRENT_VERSION)
//! and must not be reordered.

mod callback;
mod catalog;
mod handle;
mod install;
mod license;
mod log;
mod text;

pub use callback::*;
pub use catalog::*;
pub use handle::*;
pub use install::*;
pub use license::*;
pub use log::*;
pub use text::*;
