use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use super::{get_auto_register_impl, impl_trait_get_type_meta, impl_trait_type_path};

use crate::derive_data::PersistStruct;

/// Implement persistence for a struct with named fields.
pub(crate) fn impl_struct(info: &PersistStruct) -> TokenStream {
    let meta = info.meta();
    let vc_persist_path = meta.vc_persist_path();

    let type_path_trait_tokens = impl_trait_type_path(meta);
    let typed_trait_tokens = impl_trait_typed(info);
    let struct_trait_tokens = impl_trait_struct(info);
    let reflect_trait_tokens = impl_trait_reflect(info);

    let reflect_ = crate::path::reflect_(vc_persist_path);
    let register_deps = info.active_fields().map(|field| {
        let ty = field.ty();
        quote! {
            <#ty as #reflect_>::register_type_dependencies(__registry);
        }
    });
    let get_type_meta_tokens = impl_trait_get_type_meta(meta, true, quote!(#(#register_deps)*));

    let object_ = crate::path::object_(vc_persist_path);
    let ident = meta.ident();

    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #struct_trait_tokens

        #reflect_trait_tokens

        #get_type_meta_tokens

        impl #object_ for #ident {}

        #auto_register_tokens
    }
}

fn impl_trait_typed(info: &PersistStruct) -> TokenStream {
    let meta = info.meta();
    let vc_persist_path = meta.vc_persist_path();
    let typed_ = crate::path::typed_(vc_persist_path);
    let type_info_ = crate::path::type_info_(vc_persist_path);
    let struct_ = crate::path::struct_(vc_persist_path);
    let macro_exports_ = crate::path::macro_exports_(vc_persist_path);
    let ident = meta.ident();

    quote! {
        impl #typed_ for #ident {
            fn type_info() -> &'static #type_info_ {
                static CELL: #macro_exports_::OnceLock<#type_info_> = #macro_exports_::OnceLock::new();
                CELL.get_or_init(|| #type_info_::Struct(<Self as #struct_>::struct_info()))
            }
        }
    }
}

/// The `StructInfo` construction, base fields are prepended at runtime.
fn struct_info_tokens(info: &PersistStruct) -> TokenStream {
    let vc_persist_path = info.meta().vc_persist_path();
    let struct_info_ = crate::path::struct_info_(vc_persist_path);
    let field_info_ = crate::path::field_info_(vc_persist_path);
    let type_path_ = crate::path::type_path_(vc_persist_path);
    let struct_ = crate::path::struct_(vc_persist_path);
    let macro_exports_ = crate::path::macro_exports_(vc_persist_path);

    let base = match info.base() {
        Some(base) => {
            let ty = base.ty();
            quote!(::core::option::Option::Some(<#ty as #struct_>::struct_info()))
        }
        None => quote!(::core::option::Option::None),
    };

    let fields = info.own_fields().map(|field| {
        let key = field.key();
        let ty = field.ty();

        let former = field.former_names();
        let with_former = if former.is_empty() {
            crate::utils::empty()
        } else {
            quote!(.with_former_names(&[#(#former),*]))
        };

        let with_omit = match field.attrs.omit_null {
            Some(span) => quote_spanned!(span => .with_omit_when_null(true)),
            None => crate::utils::empty(),
        };

        quote! {
            #field_info_::new(
                #key,
                <Self as #type_path_>::type_path(),
                #macro_exports_::type_name::<#ty>(),
            )
            #with_former
            #with_omit
        }
    });

    quote! {
        #struct_info_::new(
            <Self as #type_path_>::type_path(),
            <Self as #type_path_>::type_name(),
            #base,
            #macro_exports_::vec![ #(#fields),* ],
        )
    }
}

fn impl_trait_struct(info: &PersistStruct) -> TokenStream {
    let meta = info.meta();
    let vc_persist_path = meta.vc_persist_path();
    let struct_ = crate::path::struct_(vc_persist_path);
    let struct_info_ = crate::path::struct_info_(vc_persist_path);
    let reflect_ = crate::path::reflect_(vc_persist_path);
    let macro_exports_ = crate::path::macro_exports_(vc_persist_path);
    let ident = meta.ident();

    let info_tokens = struct_info_tokens(info);

    let own_members: Vec<_> = info.own_fields().filter_map(|field| field.ident()).collect();
    let own_indices: Vec<_> = (0..own_members.len()).collect();

    // Indices below the base length address the base's own `field_at`.
    let (base_ref, base_mut) = match info.base() {
        Some(base) => {
            let ty = base.ty();
            let member = base.ident();
            (
                quote! {
                    let __base_len = <#ty as #struct_>::struct_info().len();
                    if index < __base_len {
                        return <#ty as #struct_>::field_at(&self.#member, index);
                    }
                    let index = index - __base_len;
                },
                quote! {
                    let __base_len = <#ty as #struct_>::struct_info().len();
                    if index < __base_len {
                        return <#ty as #struct_>::field_at_mut(&mut self.#member, index);
                    }
                    let index = index - __base_len;
                },
            )
        }
        None => (crate::utils::empty(), crate::utils::empty()),
    };

    let callbacks_tokens = match meta.attrs().callbacks {
        Some(span) => {
            let callbacks_ = crate::path::callbacks_(vc_persist_path);
            quote_spanned! { span =>
                #[inline]
                fn callbacks(&self) -> ::core::option::Option<&dyn #callbacks_> {
                    ::core::option::Option::Some(self)
                }

                #[inline]
                fn callbacks_mut(&mut self) -> ::core::option::Option<&mut dyn #callbacks_> {
                    ::core::option::Option::Some(self)
                }
            }
        }
        None => crate::utils::empty(),
    };

    let manual_tokens = match meta.attrs().manual {
        Some(span) => {
            let manual_persist_ = crate::path::manual_persist_(vc_persist_path);
            quote_spanned! { span =>
                #[inline]
                fn manual(&self) -> ::core::option::Option<&dyn #manual_persist_> {
                    ::core::option::Option::Some(self)
                }

                #[inline]
                fn manual_mut(&mut self) -> ::core::option::Option<&mut dyn #manual_persist_> {
                    ::core::option::Option::Some(self)
                }
            }
        }
        None => crate::utils::empty(),
    };

    let index_ident = if own_members.is_empty() && info.base().is_none() {
        quote!(_index)
    } else {
        quote!(index)
    };

    quote! {
        impl #struct_ for #ident {
            fn struct_info() -> &'static #struct_info_ {
                static CELL: #macro_exports_::OnceLock<#struct_info_> = #macro_exports_::OnceLock::new();
                CELL.get_or_init(|| #info_tokens)
            }

            #[inline]
            fn info(&self) -> &'static #struct_info_ {
                <Self as #struct_>::struct_info()
            }

            fn field_at(&self, #index_ident: usize) -> ::core::option::Option<&dyn #reflect_> {
                #base_ref
                match #index_ident {
                    #(#own_indices => ::core::option::Option::Some(&self.#own_members as &dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, #index_ident: usize) -> ::core::option::Option<&mut dyn #reflect_> {
                #base_mut
                match #index_ident {
                    #(#own_indices => ::core::option::Option::Some(&mut self.#own_members as &mut dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            #callbacks_tokens

            #manual_tokens
        }
    }
}

fn impl_trait_reflect(info: &PersistStruct) -> TokenStream {
    let meta = info.meta();
    let vc_persist_path = meta.vc_persist_path();
    let reflect_ = crate::path::reflect_(vc_persist_path);
    let reflect_ref_ = crate::path::reflect_ref_(vc_persist_path);
    let reflect_mut_ = crate::path::reflect_mut_(vc_persist_path);
    let type_path_ = crate::path::type_path_(vc_persist_path);
    let type_registry_ = crate::path::type_registry_(vc_persist_path);
    let ident = meta.ident();

    quote! {
        impl #reflect_ for #ident {
            #[inline]
            fn reflect_type_path(&self) -> &'static str {
                <Self as #type_path_>::type_path()
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::Struct(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::Struct(self)
            }

            fn register_type_dependencies(registry: &mut #type_registry_) {
                registry.register::<Self>();
            }
        }
    }
}
