use proc_macro2::Span;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, Meta, Token};

use super::{
    EnumVariant, FieldAttributes, PersistEnum, PersistMeta, PersistStruct, StructField,
    TypeAttributes,
};

const INTEGER_REPRS: &[&str] = &[
    "u8", "u16", "u32", "u64", "usize", "i8", "i16", "i32", "i64", "isize",
];

/// The derive input, classified.
pub(crate) enum PersistDerive<'a> {
    Struct(PersistStruct<'a>),
    Enum(PersistEnum<'a>),
}

impl<'a> PersistDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "`Persist` cannot be derived for generic types",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let meta = PersistMeta::new(attrs, &input.ident);

        match &input.data {
            Data::Struct(data) => {
                let fields = match &data.fields {
                    Fields::Named(named) => named
                        .named
                        .iter()
                        .map(|field| {
                            FieldAttributes::parse_attrs(&field.attrs)
                                .map(|attrs| StructField::new(field, attrs))
                        })
                        .collect::<syn::Result<Vec<_>>>()?,
                    Fields::Unit => Vec::new(),
                    Fields::Unnamed(unnamed) => {
                        return Err(syn::Error::new(
                            unnamed.span(),
                            "`Persist` needs named fields, tuple structs are not supported",
                        ));
                    }
                };

                let mut bases = fields.iter().filter(|field| field.is_base());
                if bases.next().is_some()
                    && let Some(second) = bases.next()
                {
                    return Err(syn::Error::new(
                        second.data.span(),
                        "a type can embed at most one `base`",
                    ));
                }

                Ok(Self::Struct(PersistStruct::new(meta, fields)))
            }
            Data::Enum(data) => {
                if let Some(span) = meta.attrs().manual.or(meta.attrs().callbacks) {
                    return Err(syn::Error::new(
                        span,
                        "enums are persisted as integers, `manual` and `callbacks` do not apply",
                    ));
                }

                let variants = data
                    .variants
                    .iter()
                    .map(|variant| match variant.fields {
                        Fields::Unit => Ok(EnumVariant {
                            ident: &variant.ident,
                        }),
                        _ => Err(syn::Error::new(
                            variant.span(),
                            "`Persist` only supports enums with unit variants",
                        )),
                    })
                    .collect::<syn::Result<Vec<_>>>()?;

                if variants.is_empty() {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`Persist` cannot be derived for an enum without variants",
                    ));
                }

                let repr = parse_repr(&input.attrs)?;
                Ok(Self::Enum(PersistEnum::new(meta, variants, repr)))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span,
                "`Persist` cannot be derived for unions",
            )),
        }
    }
}

/// The integer named by `#[repr(...)]`, or `i32`.
fn parse_repr(attrs: &[Attribute]) -> syn::Result<Ident> {
    for attr in attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        let nested = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        for meta in nested {
            if let Meta::Path(path) = meta
                && let Some(ident) = path.get_ident()
                && INTEGER_REPRS.iter().any(|repr| ident == repr)
            {
                return Ok(ident.clone());
            }
        }
    }
    Ok(Ident::new("i32", Span::call_site()))
}
