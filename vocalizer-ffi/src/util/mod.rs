#[macro_use]
pub(crate) mod library_macros;
#[macro_use]
pub(crate) mod record_macros;
pub mod strings;
