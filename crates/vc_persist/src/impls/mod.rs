//! Reflection for built-in and third-party types.
//!
//! ## Implemented Menu
//!
//! - scalars (one primitive node):
//!     - `bool`, `i8`-`i64`, `u8`-`u64`, `f32`, `f64`
//!     - `isize`, `usize` (as 64-bit integers)
//!     - `String`, `vc_tree::Decimal`, `bytes::Bytes`
//!     - `core::time::Duration` (100 ns ticks)
//!     - "chrono" feature: `DateTime<Utc>`, `NaiveDateTime` (100 ns ticks
//!       since 0001-01-01T00:00:00Z)
//!     - "uuid" feature: `Uuid` (hyphenated lowercase string)
//! - arrays: `[T; N]`, `Box<[T]>`
//! - lists: `Vec<T>`, `VecDeque<T>`
//! - maps: `BTreeMap<String, V>`, `HashMap<String, V, S>` (written in key
//!   order)
//! - `Option<T>`
//! - `vc_tree::Node`, copied as is
//! - opaque, rejected when persisted: `()`, `i128`, `u128`

// -----------------------------------------------------------------------------
// Scalar helper

/// Implements the scalar surface for a type that has a
/// [`FromPrimitive`](crate::policy::FromPrimitive) impl.
macro_rules! impl_scalar {
    ($ty:ty, $path:literal, $name:literal, |$this:ident| $write:expr) => {
        impl_scalar!($ty, $path, $name, fallible |$this| ::core::result::Result::Ok($write));
    };
    ($ty:ty, $path:literal, $name:literal, fallible |$this:ident| $write:expr) => {
        impl $crate::info::TypePath for $ty {
            fn type_path() -> &'static str {
                $path
            }

            fn type_name() -> &'static str {
                $name
            }
        }

        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static INFO: $crate::info::TypeInfo =
                    $crate::info::TypeInfo::Scalar($crate::info::ScalarInfo::new($path, $name));
                &INFO
            }
        }

        impl $crate::registry::GetTypeMeta for $ty {
            fn get_type_meta() -> $crate::registry::TypeMeta {
                let mut meta = $crate::registry::TypeMeta::with_capacity::<Self>(1);
                meta.insert_trait::<$crate::registry::TypeTraitDefault>(
                    $crate::registry::FromType::<Self>::from_type(),
                );
                meta
            }
        }

        impl $crate::Reflect for $ty {
            fn reflect_type_path(&self) -> &'static str {
                $path
            }

            fn reflect_ref(&self) -> $crate::ReflectRef<'_> {
                $crate::ReflectRef::Scalar(self)
            }

            fn reflect_mut(&mut self) -> $crate::ReflectMut<'_> {
                $crate::ReflectMut::Scalar(self)
            }

            fn register_type_dependencies(registry: &mut $crate::registry::TypeRegistry) {
                registry.register::<Self>();
            }
        }

        impl $crate::kinds::Scalar for $ty {
            fn to_primitive(
                &self,
            ) -> ::core::result::Result<::vc_tree::Primitive, $crate::policy::ConvertError> {
                let $this = self;
                $write
            }

            fn set_primitive(
                &mut self,
                value: &::vc_tree::Primitive,
            ) -> Result<(), $crate::policy::ConvertError> {
                *self = <$ty as $crate::policy::FromPrimitive>::from_primitive(value)?;
                Ok(())
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Modules

mod collections;
mod maps;
mod option;
mod primitives;
mod time;
mod tree;

#[cfg(feature = "chrono")]
mod chrono;

#[cfg(feature = "uuid")]
mod uuid;
