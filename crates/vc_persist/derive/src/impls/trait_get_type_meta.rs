use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use crate::derive_data::PersistMeta;

/// Generate implementation code for `GetTypeMeta`.
///
/// `TypeTraitDefault` is always inserted, `TypeTraitShared` only for
/// object types. `register_deps_tokens` is the body of
/// `register_dependencies`, usually one call per field type.
pub(crate) fn impl_trait_get_type_meta(
    meta: &PersistMeta,
    shared: bool,
    register_deps_tokens: TokenStream,
) -> TokenStream {
    let vc_persist_path = meta.vc_persist_path();
    let get_type_meta_ = crate::path::get_type_meta_(vc_persist_path);
    let type_meta_ = crate::path::type_meta_(vc_persist_path);
    let from_type_ = crate::path::from_type_(vc_persist_path);
    let type_registry_ = crate::path::type_registry_(vc_persist_path);
    let type_trait_default_ = crate::path::type_trait_default_(vc_persist_path);

    let outer_ = Ident::new("__outer", Span::call_site());

    let mut trait_counter = 1usize;

    let insert_shared = if shared {
        trait_counter += 1;
        let type_trait_shared_ = crate::path::type_trait_shared_(vc_persist_path);
        quote! {
            #type_meta_::insert_trait::<#type_trait_shared_>(&mut #outer_, #from_type_::<Self>::from_type());
        }
    } else {
        crate::utils::empty()
    };

    let register_deps = if register_deps_tokens.is_empty() {
        crate::utils::empty()
    } else {
        quote! {
            fn register_dependencies(__registry: &mut #type_registry_) {
                #register_deps_tokens
            }
        }
    };

    let ident = meta.ident();

    quote! {
        impl #get_type_meta_ for #ident {
            fn get_type_meta() -> #type_meta_ {
                let mut #outer_ = #type_meta_::with_capacity::<Self>(#trait_counter);
                #type_meta_::insert_trait::<#type_trait_default_>(&mut #outer_, #from_type_::<Self>::from_type());
                #insert_shared
                #outer_
            }

            #register_deps
        }
    }
}
