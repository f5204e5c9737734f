use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error, Fields};

pub fn native_layout(token_stream: TokenStream) -> TokenStream {
    let input = parse_macro_input!(token_stream as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Error::new_spanned(name, "NativeLayout needs named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return Error::new_spanned(name, "NativeLayout can only be derived for structs")
                .to_compile_error()
                .into()
        }
    };

    let entries = fields.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        let ty = &field.ty;
        let field_name = ident.to_string();
        Some(quote! {
            crate::layout::FieldLayout {
                name: #field_name,
                offset: ::core::mem::offset_of!(#name, #ident),
                size: ::core::mem::size_of::<#ty>(),
            }
        })
    });

    let name_str = name.to_string();

    TokenStream::from(quote! {
        impl crate::layout::NativeLayout for #name {
            const NAME: &'static str = #name_str;
            const FIELDS: &'static [crate::layout::FieldLayout] = &[
                #( #entries, )*
            ];
        }
    })
}
