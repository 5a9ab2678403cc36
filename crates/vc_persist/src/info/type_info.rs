use crate::info::{EnumInfo, StructInfo, TypePath};

// -----------------------------------------------------------------------------
// TypeInfo

/// Static information about a registered type.
#[derive(Debug)]
pub enum TypeInfo {
    Scalar(ScalarInfo),
    Struct(&'static StructInfo),
    Enum(&'static EnumInfo),
}

impl TypeInfo {
    pub const fn type_path(&self) -> &'static str {
        match self {
            Self::Scalar(info) => info.type_path(),
            Self::Struct(info) => info.type_path(),
            Self::Enum(info) => info.type_path(),
        }
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(info) => info.type_name(),
            Self::Struct(info) => info.type_name(),
            Self::Enum(info) => info.type_name(),
        }
    }

    pub const fn as_struct(&self) -> Option<&'static StructInfo> {
        match self {
            Self::Struct(info) => Some(*info),
            _ => None,
        }
    }

    pub const fn as_enum(&self) -> Option<&'static EnumInfo> {
        match self {
            Self::Enum(info) => Some(*info),
            _ => None,
        }
    }
}

/// Information about a primitive-like type.
#[derive(Debug, Clone, Copy)]
pub struct ScalarInfo {
    type_path: &'static str,
    type_name: &'static str,
}

impl ScalarInfo {
    pub const fn new(type_path: &'static str, type_name: &'static str) -> Self {
        Self {
            type_path,
            type_name,
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
}

// -----------------------------------------------------------------------------
// Typed

/// Types with static [`TypeInfo`], which is what the registry stores.
pub trait Typed: TypePath {
    fn type_info() -> &'static TypeInfo;
}
