//! Paths into `vc_persist` used by the generated code.
//!
//! Keeping them here means a reorganization of `vc_persist` only touches
//! this file.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// The access path of the `vc_persist` crate from the invoking crate.
///
/// `::vc_persist` for direct dependents, `::vc_graph::persist` for crates
/// that only depend on the facade. Reading the manifest is not free, so
/// the path is computed once per derive and passed around.
pub(crate) fn vc_persist() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_persist"))
}

// -----------------------------------------------------------------------------
// Items

macro_rules! item_paths {
    ($($func:ident => $($segment:ident)::+;)*) => {
        $(
            #[inline]
            pub(crate) fn $func(vc_persist_path: &syn::Path) -> TokenStream {
                quote! { #vc_persist_path $(::$segment)+ }
            }
        )*
    };
}

item_paths! {
    reflect_ => Reflect;
    reflect_ref_ => ReflectRef;
    reflect_mut_ => ReflectMut;
    object_ => Object;
    macro_exports_ => __macro_exports;

    type_path_ => info::TypePath;
    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    struct_info_ => info::StructInfo;
    field_info_ => info::FieldInfo;
    enum_info_ => info::EnumInfo;
    variant_info_ => info::VariantInfo;

    struct_ => kinds::Struct;
    scalar_ => kinds::Scalar;

    callbacks_ => hooks::Callbacks;
    manual_persist_ => hooks::ManualPersist;

    convert_error_ => policy::ConvertError;
    from_primitive_ => policy::FromPrimitive;
    primitive_ => tree::Primitive;

    type_meta_ => registry::TypeMeta;
    get_type_meta_ => registry::GetTypeMeta;
    from_type_ => registry::FromType;
    type_registry_ => registry::TypeRegistry;
    type_trait_default_ => registry::TypeTraitDefault;
    type_trait_shared_ => registry::TypeTraitShared;
}
