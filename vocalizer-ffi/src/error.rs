use crate::consts::{NUAN_E_TTS_USERSTOP, NUAN_OK};
use crate::enums::LicenseErrorCode;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use thiserror::Error;

/// Which native library produced a result code.
///
/// The engine and the platform library share one `u32` result type but their
/// code spaces overlap, so a code only means something together with its
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeLibrary {
    Engine,
    Platform,
}

impl Display for NativeLibrary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NativeLibrary::Engine => f.write_str("engine"),
            NativeLibrary::Platform => f.write_str("platform"),
        }
    }
}

/// Successful outcome of a native call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// The call ended because the host asked for a stop.
    UserStop,
}

impl Status {
    pub fn is_stopped(self) -> bool {
        self == Status::UserStop
    }
}

#[derive(Debug, Error)]
pub enum VeError {
    #[error("Failed to load {library} library from {}: {source}", .path.display())]
    Load {
        library: NativeLibrary,
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("Entry point `{symbol}` not found in {library} library {}: {source}", .path.display())]
    MissingSymbol {
        library: NativeLibrary,
        symbol: &'static str,
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("Vocalizer Error: {function}: {code:x}")]
    Native {
        library: NativeLibrary,
        function: &'static str,
        code: u32,
    },
}

impl VeError {
    /// Raw result code of a failed native call.
    pub fn code(&self) -> Option<u32> {
        match self {
            VeError::Native { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Name of the entry point that failed, or was missing.
    pub fn function(&self) -> Option<&'static str> {
        match self {
            VeError::Native { function, .. } => Some(function),
            VeError::MissingSymbol { symbol, .. } => Some(symbol),
            VeError::Load { .. } => None,
        }
    }

    /// Decodes the code as a license error.
    ///
    /// Only codes returned by the platform library are considered; the same
    /// number coming from the engine is a general engine failure.
    pub fn license_code(&self) -> Option<LicenseErrorCode> {
        match self {
            VeError::Native {
                library: NativeLibrary::Platform,
                code,
                ..
            } => LicenseErrorCode::try_from(*code).ok(),
            _ => None,
        }
    }
}

/// Classifies the raw result of a native call.
///
/// `NUAN_OK` and `NUAN_E_TTS_USERSTOP` pass, every other value is returned as
/// [`VeError::Native`] with the code left undecoded.
pub fn check_result(library: NativeLibrary, function: &'static str, code: u32) -> Result<Status, VeError> {
    match code {
        NUAN_OK => Ok(Status::Ok),
        NUAN_E_TTS_USERSTOP => Ok(Status::UserStop),
        code => Err(VeError::Native {
            library,
            function,
            code,
        }),
    }
}
