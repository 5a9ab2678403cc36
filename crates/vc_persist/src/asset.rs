use alloc::string::String;
use core::fmt;

use crate::info::{ScalarInfo, TypeInfo, TypePath, Typed};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};
use crate::{Reflect, ReflectMut, ReflectRef};

/// A reference to an external asset, such as a texture or a sound file.
///
/// Persisted as its identifier string. Every non-empty reference the
/// serializer writes is recorded in
/// [`IdentityContext::dependencies`](crate::IdentityContext::dependencies),
/// so a caller can collect the assets a tree needs. An empty reference is
/// written as null.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetRef(String);

impl AssetRef {
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for AssetRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TypePath for AssetRef {
    fn type_path() -> &'static str {
        "vc_persist::AssetRef"
    }

    fn type_name() -> &'static str {
        "AssetRef"
    }

    fn module_path() -> Option<&'static str> {
        Some("vc_persist")
    }
}

impl Typed for AssetRef {
    fn type_info() -> &'static TypeInfo {
        static INFO: TypeInfo =
            TypeInfo::Scalar(ScalarInfo::new("vc_persist::AssetRef", "AssetRef"));
        &INFO
    }
}

impl GetTypeMeta for AssetRef {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::with_capacity::<Self>(1);
        meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        meta
    }
}

impl Reflect for AssetRef {
    fn reflect_type_path(&self) -> &'static str {
        Self::type_path()
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Asset(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Asset(self)
    }
}
