use proc_macro2::Span;
use syn::{Attribute, LitStr, spanned::Spanned};

use crate::PERSIST_ATTRIBUTE_NAME;

/// Type-level `#[persist(...)]` settings.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `type_path = "..."`
    pub type_path: Option<LitStr>,
    /// `callbacks`
    pub callbacks: Option<Span>,
    /// `manual`
    pub manual: Option<Span>,
    /// `auto_register`
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    /// Collects every `#[persist(...)]` attribute of the type.
    ///
    /// Examples:
    /// - `#[persist(type_path = "game::Unit")]`
    /// - `#[persist(callbacks, auto_register)]`
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(PERSIST_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    let value: LitStr = meta.value()?.parse()?;
                    if this.type_path.is_some() {
                        return Err(meta.error("duplicate `type_path`"));
                    }
                    if value.value().is_empty() {
                        return Err(syn::Error::new(value.span(), "`type_path` cannot be empty"));
                    }
                    this.type_path = Some(value);
                } else if meta.path.is_ident("callbacks") {
                    this.callbacks = Some(meta.path.span());
                } else if meta.path.is_ident("manual") {
                    this.manual = Some(meta.path.span());
                } else if meta.path.is_ident("auto_register") {
                    this.auto_register = Some(meta.path.span());
                } else {
                    return Err(meta.error(
                        "unknown type attribute, expected one of \
                         `type_path`, `callbacks`, `manual`, `auto_register`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(this)
    }
}
