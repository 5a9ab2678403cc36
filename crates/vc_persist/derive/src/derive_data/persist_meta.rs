use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Path};

use super::TypeAttributes;

/// What every generator needs to know about the derived type.
pub(crate) struct PersistMeta<'a> {
    vc_persist_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
}

impl<'a> PersistMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, ident: &'a Ident) -> Self {
        Self {
            vc_persist_path: crate::path::vc_persist(),
            attrs,
            ident,
        }
    }

    #[inline]
    pub fn vc_persist_path(&self) -> &Path {
        &self.vc_persist_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    /// The last path segment, as a string literal.
    pub fn type_name(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(custom) => {
                let value = custom.value();
                let name = value.rsplit("::").next().unwrap_or(&value);
                quote!(#name)
            }
            None => {
                let name = self.ident.to_string();
                quote!(#name)
            }
        }
    }

    /// A `&'static str` expression of the full type path.
    pub fn type_path(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(custom) => quote!(#custom),
            None => {
                let name = self.ident.to_string();
                quote!(::core::concat!(::core::module_path!(), "::", #name))
            }
        }
    }

    /// An `Option<&'static str>` expression of the module part of the path.
    pub fn module_path(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(custom) => match custom.value().rsplit_once("::") {
                Some((module, _)) => quote!(::core::option::Option::Some(#module)),
                None => quote!(::core::option::Option::None),
            },
            None => quote!(::core::option::Option::Some(::core::module_path!())),
        }
    }
}
