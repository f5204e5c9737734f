//! Binary interface to the Vocalizer Expressive engine and its platform
//! library: record layouts, constants, and the two bound libraries.

#[macro_use]
mod util;

pub mod consts;
pub mod enums;
pub mod error;
pub mod layout;
pub mod library;
pub mod types;

pub use enums::*;
pub use error::{check_result, NativeLibrary, Status, VeError};
pub use layout::{FieldLayout, NativeLayout};
pub use library::{PlatformFunctions, PlatformLibrary, VeFunctions, VeLibrary};
pub use util::strings;
