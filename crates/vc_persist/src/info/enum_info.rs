use alloc::boxed::Box;
use alloc::vec::Vec;

/// One variant of a C-like enum.
#[derive(Debug, Clone, Copy)]
pub struct VariantInfo {
    pub name: &'static str,
    pub discriminant: i128,
}

/// A C-like enum, persisted as its underlying integer.
#[derive(Debug)]
pub struct EnumInfo {
    type_path: &'static str,
    type_name: &'static str,
    repr: &'static str,
    variants: Box<[VariantInfo]>,
}

impl EnumInfo {
    pub fn new(
        type_path: &'static str,
        type_name: &'static str,
        repr: &'static str,
        variants: Vec<VariantInfo>,
    ) -> Self {
        Self {
            type_path,
            type_name,
            repr,
            variants: variants.into_boxed_slice(),
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

    /// The integer type the enum is persisted as, e.g. `"u8"`.
    #[inline]
    pub const fn repr(&self) -> &'static str {
        self.repr
    }

    #[inline]
    pub fn variants(&self) -> &[VariantInfo] {
        &self.variants
    }

    pub fn variant_of(&self, discriminant: i128) -> Option<&VariantInfo> {
        self.variants
            .iter()
            .find(|variant| variant.discriminant == discriminant)
    }
}
