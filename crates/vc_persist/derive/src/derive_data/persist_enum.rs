use syn::Ident;

use super::PersistMeta;

/// One unit variant.
pub(crate) struct EnumVariant<'a> {
    pub ident: &'a Ident,
}

/// A C-like enum, persisted as its `repr` integer.
pub(crate) struct PersistEnum<'a> {
    meta: PersistMeta<'a>,
    variants: Vec<EnumVariant<'a>>,
    repr: Ident,
}

impl<'a> PersistEnum<'a> {
    #[inline]
    pub fn new(meta: PersistMeta<'a>, variants: Vec<EnumVariant<'a>>, repr: Ident) -> Self {
        Self {
            meta,
            variants,
            repr,
        }
    }

    #[inline]
    pub fn meta(&self) -> &PersistMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn variants(&self) -> &[EnumVariant<'a>] {
        &self.variants
    }

    /// The integer type, `i32` unless `#[repr(...)]` says otherwise.
    #[inline]
    pub fn repr(&self) -> &Ident {
        &self.repr
    }
}
