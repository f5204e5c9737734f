/// Declares a bound native library.
///
/// For `pub struct Name(Functions): Kind { method => symbol(args); ... }` this
/// generates `Functions`, a table of typed entry points, and `Name`, which
/// owns the loaded library plus its table. Every entry point becomes an
/// `unsafe fn method(&self, args) -> Result<Status, VeError>` whose raw result
/// goes through [`check_result`](crate::error::check_result).
macro_rules! native_library {
    (
        $(#[$meta:meta])*
        pub struct $name:ident ( $functions:ident ) : $kind:ident {
            $(
                $(#[$fn_meta:meta])*
                $method:ident => $symbol:ident ( $( $arg:ident : $ty:ty ),* $(,)? );
            )+
        }
    ) => {
        /// Entry points of the library, one typed pointer per symbol.
        #[derive(Clone, Copy)]
        pub struct $functions {
            $(
                pub $method: unsafe extern "C" fn( $( $ty ),* ) -> u32,
            )+
        }

        $(#[$meta])*
        pub struct $name {
            functions: $functions,
            path: Option<std::path::PathBuf>,
            library: Option<libloading::Library>,
        }

        impl $name {
            pub const KIND: crate::error::NativeLibrary = crate::error::NativeLibrary::$kind;
            pub const SYMBOLS: &'static [&'static str] = &[ $( stringify!($symbol), )+ ];

            /// Opens the shared library at `path` and resolves every entry
            /// point. Nothing is kept if any step fails.
            pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, crate::error::VeError> {
                use crate::error::VeError;

                let path = path.as_ref();
                let library = unsafe { libloading::Library::new(path) }.map_err(|source| VeError::Load {
                    library: Self::KIND,
                    path: path.to_path_buf(),
                    source,
                })?;

                let functions = $functions {
                    $(
                        $method: unsafe {
                            *library
                                .get::<unsafe extern "C" fn( $( $ty ),* ) -> u32>(
                                    concat!(stringify!($symbol), "\0").as_bytes(),
                                )
                                .map_err(|source| VeError::MissingSymbol {
                                    library: Self::KIND,
                                    symbol: stringify!($symbol),
                                    path: path.to_path_buf(),
                                    source,
                                })?
                        },
                    )+
                };

                log::debug!(
                    "Loaded {} library {} ({} entry points)",
                    Self::KIND, path.display(), Self::SYMBOLS.len()
                );

                Ok(Self {
                    functions,
                    path: Some(path.to_path_buf()),
                    library: Some(library),
                })
            }

            /// Binds entry points that are already in this process.
            pub fn from_functions(functions: $functions) -> Self {
                Self {
                    functions,
                    path: None,
                    library: None,
                }
            }

            pub fn functions(&self) -> &$functions {
                &self.functions
            }

            /// Path the library was loaded from, `None` for in-process tables.
            pub fn path(&self) -> Option<&std::path::Path> {
                self.path.as_deref()
            }

            pub fn is_loaded(&self) -> bool {
                self.library.is_some()
            }

            $(
                $(#[$fn_meta])*
                pub unsafe fn $method(&self, $( $arg: $ty ),* ) -> Result<crate::error::Status, crate::error::VeError> {
                    let code = unsafe { (self.functions.$method)( $( $arg ),* ) };
                    let result = crate::error::check_result(Self::KIND, stringify!($symbol), code);
                    if let Err(error) = &result {
                        log::debug!("{}", error);
                    }
                    result
                }
            )+
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("path", &self.path)
                    .field("loaded", &self.library.is_some())
                    .finish()
            }
        }
    };
}
