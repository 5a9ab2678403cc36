use proc_macro2::TokenStream;

use crate::derive_data::PersistMeta;

/// Generate the `inventory` submission of `#[persist(auto_register)]`.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &PersistMeta) -> TokenStream {
    use quote::quote_spanned;

    let Some(span) = meta.attrs().auto_register else {
        return crate::utils::empty();
    };

    let macro_exports_ = crate::path::macro_exports_(meta.vc_persist_path());
    let ident = meta.ident();

    quote_spanned! { span =>
        #macro_exports_::inventory::submit! {
            #macro_exports_::AutoRegistration::of::<#ident>()
        }
    }
}

/// Generate the `inventory` submission of `#[persist(auto_register)]`.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &PersistMeta) -> TokenStream {
    crate::utils::empty()
}
