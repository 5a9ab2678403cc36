// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod enum_kind;
mod struct_kind;
mod trait_get_type_meta;
mod trait_type_path;

// -----------------------------------------------------------------------------
// Internal API

use auto_register::get_auto_register_impl;
use enum_kind::impl_enum;
use struct_kind::impl_struct;
use trait_get_type_meta::impl_trait_get_type_meta;
use trait_type_path::impl_trait_type_path;

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::PersistDerive;

/// Entry of `#[derive(Persist)]`.
pub(crate) fn match_persist_impls(ast: &DeriveInput) -> TokenStream {
    let persist_derive = match PersistDerive::from_input(ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let persist_impls = match persist_derive {
        PersistDerive::Struct(info) => impl_struct(&info),
        PersistDerive::Enum(info) => impl_enum(&info),
    };

    TokenStream::from(quote! {
        const _: () = {
            #persist_impls
        };
    })
}
