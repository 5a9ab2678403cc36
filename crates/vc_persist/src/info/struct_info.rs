use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::info::FieldInfo;

/// The participating fields of an object type.
///
/// Built once per type (see [`Struct::struct_info`](crate::kinds::Struct::struct_info)).
/// When the type embeds a base type, the base's fields come first, so
/// field indices of the base stay valid in the derived type.
///
/// A name declared by both the base and the derived type stays two
/// distinct entries. They share one persisted key: the later (most
/// derived) entry wins on write, and both are filled on read.
#[derive(Debug)]
pub struct StructInfo {
    type_path: &'static str,
    type_name: &'static str,
    base: Option<&'static StructInfo>,
    fields: Box<[FieldInfo]>,
}

impl StructInfo {
    pub fn new(
        type_path: &'static str,
        type_name: &'static str,
        base: Option<&'static StructInfo>,
        own_fields: Vec<FieldInfo>,
    ) -> Self {
        let fields = match base {
            Some(base) => base.fields.iter().cloned().chain(own_fields).collect(),
            None => own_fields.into_boxed_slice(),
        };
        Self {
            type_path,
            type_name,
            base,
            fields,
        }
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The embedded base type, if any.
    #[inline]
    pub const fn base(&self) -> Option<&'static StructInfo> {
        self.base
    }

    /// All participating fields, base fields first.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The number of leading fields that belong to the base.
    pub fn base_len(&self) -> usize {
        self.base.map_or(0, StructInfo::len)
    }

    /// Index of the last field persisted under `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().rposition(|field| field.name() == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.index_of(name).map(|index| &self.fields[index])
    }
}
