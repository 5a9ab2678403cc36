use syn::ext::IdentExt as _;
use syn::{Field, Ident, Type, Visibility};

use super::{FieldAttributes, PersistMeta};

// -----------------------------------------------------------------------------
// StructField

/// One named field of the derived struct.
pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub attrs: FieldAttributes,
}

impl<'a> StructField<'a> {
    pub fn new(data: &'a Field, attrs: FieldAttributes) -> Self {
        Self { data, attrs }
    }

    /// Named fields always have an ident.
    #[inline]
    pub fn ident(&self) -> Option<&'a Ident> {
        self.data.ident.as_ref()
    }

    #[inline]
    pub fn ty(&self) -> &'a Type {
        &self.data.ty
    }

    #[inline]
    pub fn is_base(&self) -> bool {
        self.attrs.base.is_some()
    }

    /// `pub` or `include`, and not `skip`. A base is always included.
    pub fn is_active(&self) -> bool {
        if self.attrs.skip.is_some() {
            return false;
        }
        self.is_base()
            || self.attrs.include.is_some()
            || matches!(self.data.vis, Visibility::Public(_))
    }

    /// The persisted key.
    pub fn key(&self) -> String {
        match &self.attrs.rename {
            Some(rename) => rename.value(),
            None => self
                .ident()
                .map(|ident| ident.unraw().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn former_names(&self) -> Vec<String> {
        self.attrs.former.iter().map(syn::LitStr::value).collect()
    }
}

// -----------------------------------------------------------------------------
// PersistStruct

pub(crate) struct PersistStruct<'a> {
    meta: PersistMeta<'a>,
    fields: Vec<StructField<'a>>,
}

impl<'a> PersistStruct<'a> {
    #[inline]
    pub fn new(meta: PersistMeta<'a>, fields: Vec<StructField<'a>>) -> Self {
        Self { meta, fields }
    }

    #[inline]
    pub fn meta(&self) -> &PersistMeta<'a> {
        &self.meta
    }

    /// The embedded base field, if any.
    pub fn base(&self) -> Option<&StructField<'a>> {
        self.fields.iter().find(|field| field.is_base())
    }

    /// Participating fields declared by this type, in declaration order.
    pub fn own_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields
            .iter()
            .filter(|field| field.is_active() && !field.is_base())
    }

    /// Every participating field including the base.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.is_active())
    }
}
