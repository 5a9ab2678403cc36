//! See [`Persist`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static PERSIST_ATTRIBUTE_NAME: &str = "persist";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Persistence Derivation
///
/// `#[derive(Persist)]` implements the following traits:
///
/// - `TypePath`, `Typed`, `Reflect`, `GetTypeMeta`
/// - for structs with named fields (or unit structs): `Struct` and `Object`,
///   so the type can be written by value and live behind a `Shared`
/// - for enums with only unit variants: `Scalar`, persisted as the
///   underlying integer
///
/// The type must implement `Default`; the deserializer starts from a
/// default instance and fills it. Generic types, tuple structs and enums
/// with data are not supported.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(Persist, Default)]
/// #[persist(type_path = "game::units::Unit")]
/// #[persist(callbacks, manual, auto_register)]
/// pub struct Unit { /* ... */ }
/// ```
///
/// - `type_path = "..."`: the persisted declared type. Defaults to
///   `module_path!()` followed by the type name. Changing it breaks data
///   written earlier, so pin it for types that may move between modules.
/// - `callbacks`: the type implements `hooks::Callbacks`; the hooks run
///   around each (de)serialization of an instance.
/// - `manual`: the type implements `hooks::ManualPersist`, which replaces
///   field discovery in both directions (structs only).
/// - `auto_register`: submit the type to `TypeRegistry::auto_register`.
///   A no-op without the `auto_register` feature.
///
/// ## Field Attributes
///
/// A field participates if it is `pub` or marked `include`, and is not
/// marked `skip`.
///
/// ```rust, ignore
/// #[derive(Persist, Default)]
/// pub struct Unit {
///     #[persist(base)]
///     pub entity: Entity,
///     #[persist(rename = "hp", former = "health", former = "life")]
///     pub hit_points: u32,
///     #[persist(omit_null)]
///     pub target: Shared<Unit>,
///     #[persist(include)]
///     cooldown: f32,
///     #[persist(skip)]
///     pub cache: Vec<u8>,
/// }
/// ```
///
/// - `skip` / `include`: see above.
/// - `rename = "..."`: the persisted key, instead of the field name.
/// - `former = "..."`: a key the field was persisted under before;
///   repeatable, tried in order when the current key is missing.
/// - `omit_null`: leave the key out while the value is null.
/// - `base`: the field is an embedded base object whose fields are
///   flattened in front of this type's own fields. At most one per type.
///
/// ## Enums
///
/// The underlying integer is taken from `#[repr(...)]` and defaults to
/// `i32`. Reading a value that matches no variant fails.
///
/// ```rust, ignore
/// #[derive(Persist, Default, Clone, Copy)]
/// #[repr(u8)]
/// pub enum Team {
///     #[default]
///     Red = 1,
///     Blue = 2,
/// }
/// ```
#[proc_macro_derive(Persist, attributes(persist))]
pub fn derive_persist(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_persist_impls(&ast)
}
