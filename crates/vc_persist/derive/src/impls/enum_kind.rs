use proc_macro2::TokenStream;
use quote::quote;

use super::{get_auto_register_impl, impl_trait_get_type_meta, impl_trait_type_path};

use crate::derive_data::PersistEnum;

/// Implement persistence for a C-like enum, as a scalar over its `repr`.
pub(crate) fn impl_enum(info: &PersistEnum) -> TokenStream {
    let meta = info.meta();
    let vc_persist_path = meta.vc_persist_path();

    let reflect_ = crate::path::reflect_(vc_persist_path);
    let reflect_ref_ = crate::path::reflect_ref_(vc_persist_path);
    let reflect_mut_ = crate::path::reflect_mut_(vc_persist_path);
    let typed_ = crate::path::typed_(vc_persist_path);
    let type_info_ = crate::path::type_info_(vc_persist_path);
    let type_path_ = crate::path::type_path_(vc_persist_path);
    let enum_info_ = crate::path::enum_info_(vc_persist_path);
    let variant_info_ = crate::path::variant_info_(vc_persist_path);
    let scalar_ = crate::path::scalar_(vc_persist_path);
    let primitive_ = crate::path::primitive_(vc_persist_path);
    let convert_error_ = crate::path::convert_error_(vc_persist_path);
    let from_primitive_ = crate::path::from_primitive_(vc_persist_path);
    let type_registry_ = crate::path::type_registry_(vc_persist_path);
    let macro_exports_ = crate::path::macro_exports_(vc_persist_path);

    let ident = meta.ident();
    let repr = info.repr();
    let repr_name = repr.to_string();

    let variant_idents: Vec<_> = info.variants().iter().map(|variant| variant.ident).collect();
    let variant_names = variant_idents.iter().map(ToString::to_string);

    let type_path_trait_tokens = impl_trait_type_path(meta);
    let get_type_meta_tokens = impl_trait_get_type_meta(meta, false, crate::utils::empty());
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #type_path_trait_tokens

        impl #typed_ for #ident {
            fn type_info() -> &'static #type_info_ {
                static ENUM: #macro_exports_::OnceLock<#enum_info_> = #macro_exports_::OnceLock::new();
                static CELL: #macro_exports_::OnceLock<#type_info_> = #macro_exports_::OnceLock::new();
                CELL.get_or_init(|| {
                    #type_info_::Enum(ENUM.get_or_init(|| {
                        #enum_info_::new(
                            <Self as #type_path_>::type_path(),
                            <Self as #type_path_>::type_name(),
                            #repr_name,
                            #macro_exports_::vec![
                                #(#variant_info_ {
                                    name: #variant_names,
                                    discriminant: Self::#variant_idents as i128,
                                },)*
                            ],
                        )
                    }))
                })
            }
        }

        impl #reflect_ for #ident {
            #[inline]
            fn reflect_type_path(&self) -> &'static str {
                <Self as #type_path_>::type_path()
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::Scalar(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::Scalar(self)
            }

            fn register_type_dependencies(registry: &mut #type_registry_) {
                registry.register::<Self>();
            }
        }

        impl #scalar_ for #ident {
            fn to_primitive(&self) -> ::core::result::Result<#primitive_, #convert_error_> {
                let value: #repr = match self {
                    #(Self::#variant_idents => Self::#variant_idents as #repr,)*
                };
                <#repr as #scalar_>::to_primitive(&value)
            }

            fn set_primitive(
                &mut self,
                value: &#primitive_,
            ) -> ::core::result::Result<(), #convert_error_> {
                let raw = <#repr as #from_primitive_>::from_primitive(value)?;
                *self = match raw {
                    #(__value if __value == Self::#variant_idents as #repr => Self::#variant_idents,)*
                    __other => {
                        return ::core::result::Result::Err(#convert_error_::UnknownDiscriminant {
                            type_path: <Self as #type_path_>::type_path(),
                            value: __other as i128,
                        });
                    }
                };
                ::core::result::Result::Ok(())
            }
        }

        #get_type_meta_tokens

        #auto_register_tokens
    }
}
