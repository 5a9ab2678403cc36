use proc_macro2::Span;
use syn::{Attribute, LitStr, spanned::Spanned};

use crate::PERSIST_ATTRIBUTE_NAME;

/// Field-level `#[persist(...)]` settings.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub skip: Option<Span>,
    pub include: Option<Span>,
    pub omit_null: Option<Span>,
    pub base: Option<Span>,
    /// `rename = "..."`
    pub rename: Option<LitStr>,
    /// `former = "..."`, in declaration order.
    pub former: Vec<LitStr>,
}

impl FieldAttributes {
    /// Examples:
    /// - `#[persist(skip)]`
    /// - `#[persist(rename = "hp", former = "health")]`
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(PERSIST_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    this.skip = Some(meta.path.span());
                } else if meta.path.is_ident("include") {
                    this.include = Some(meta.path.span());
                } else if meta.path.is_ident("omit_null") {
                    this.omit_null = Some(meta.path.span());
                } else if meta.path.is_ident("base") {
                    this.base = Some(meta.path.span());
                } else if meta.path.is_ident("rename") {
                    if this.rename.is_some() {
                        return Err(meta.error("duplicate `rename`"));
                    }
                    this.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("former") {
                    this.former.push(meta.value()?.parse()?);
                } else {
                    return Err(meta.error(
                        "unknown field attribute, expected one of \
                         `skip`, `include`, `omit_null`, `base`, `rename`, `former`",
                    ));
                }
                Ok(())
            })?;
        }

        this.check()?;
        Ok(this)
    }

    fn check(&self) -> syn::Result<()> {
        if let (Some(skip), Some(_)) = (self.skip, self.include) {
            return Err(syn::Error::new(skip, "`skip` conflicts with `include`"));
        }
        if let (Some(base), Some(_)) = (self.base, self.skip) {
            return Err(syn::Error::new(base, "a `base` field cannot be skipped"));
        }
        if let Some(base) = self.base
            && (self.rename.is_some() || !self.former.is_empty() || self.omit_null.is_some())
        {
            return Err(syn::Error::new(
                base,
                "a `base` field is flattened, it takes no key attributes",
            ));
        }
        Ok(())
    }
}
