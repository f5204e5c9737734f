use proc_macro::TokenStream;

mod native_layout;

/// Emits `impl crate::layout::NativeLayout` with the byte offset and size of
/// every named field, in declaration order.
///
/// Only usable inside `vocalizer-ffi`, which owns the trait.
#[proc_macro_derive(NativeLayout)]
pub fn native_layout(token_stream: TokenStream) -> TokenStream {
    native_layout::native_layout(token_stream)
}
