//! Tree to graph.
//!
//! - [`deserialize`] / [`deserialize_with`]: build a fresh `T`.
//! - [`deserialize_dynamic`]: build a root whose type is only known from
//!   the tree.
//! - [`deserialize_into`] / [`deserialize_into_with`]: refill an existing
//!   value.
//! - [`DeserializeDriver`]: the walker, handed to manual readers.
//!
//! Unresolvable parts of the tree (unknown declared types, references to
//! undefined identities) become null and are reported as
//! [`Diagnostic`](crate::Diagnostic)s in the context; everything else in
//! the tree is still read. Shape errors are fatal.

// -----------------------------------------------------------------------------
// Modules

mod driver;

// -----------------------------------------------------------------------------
// Exports

pub use driver::{DeserializeDriver, Outcome};

// -----------------------------------------------------------------------------
// Entry points

use alloc::boxed::Box;

use vc_tree::Node;

use crate::registry::TypeRegistry;
use crate::{DeserializeError, IdentityContext, Reflect};

fn run<R>(
    registry: &TypeRegistry,
    ctx: &mut IdentityContext,
    func: impl FnOnce(&mut DeserializeDriver<'_>) -> Result<R, DeserializeError>,
) -> Result<R, DeserializeError> {
    if ctx.is_poisoned() {
        return Err(DeserializeError::PoisonedContext);
    }
    let result = func(&mut DeserializeDriver::new(registry, ctx));
    if let Err(err) = &result {
        log::debug!("deserialization failed, poisoning the context: {err}");
        ctx.poison();
    }
    result
}

/// Builds a `T` from `node`.
///
/// Returns `None` when the root is null or could not be resolved.
///
/// # Examples
///
/// ```
/// use vc_persist::{deserialize, derive::Persist, registry::TypeRegistry};
/// use vc_persist::tree::{Compound, Identity, Node};
///
/// #[derive(Persist, Default, Debug, PartialEq)]
/// pub struct Point {
///     #[persist(former = "px")]
///     pub x: i32,
///     pub y: i32,
/// }
///
/// // Written by an older version that named `x` differently.
/// let mut compound = Compound::new();
/// compound.insert("px", 3_i32);
///
/// let registry = TypeRegistry::new();
/// let point: Point = deserialize(&Node::from(compound), &registry).unwrap().unwrap();
/// assert_eq!(point, Point { x: 3, y: 0 });
/// ```
pub fn deserialize<T: Reflect + Default>(
    node: &Node,
    registry: &TypeRegistry,
) -> Result<Option<T>, DeserializeError> {
    let mut ctx = IdentityContext::new();
    deserialize_with(node, registry, &mut ctx)
}

/// Builds a `T` from `node` with an existing context.
///
/// Identities registered by earlier calls resolve to the objects built
/// then. A failure poisons `ctx`.
pub fn deserialize_with<T: Reflect + Default>(
    node: &Node,
    registry: &TypeRegistry,
    ctx: &mut IdentityContext,
) -> Result<Option<T>, DeserializeError> {
    let mut value = T::default();
    let outcome = run(registry, ctx, |driver| driver.read_into(node, &mut value))?;
    Ok(match outcome {
        Outcome::Populated => Some(value),
        Outcome::Null | Outcome::Unresolved => None,
    })
}

/// Builds a root whose type is named by the compound's declared type.
///
/// The type must be registered with a
/// [`TypeTraitDefault`](crate::registry::TypeTraitDefault). The root is
/// built by value, so references back to the root's own identity do not
/// resolve; read such graphs into a `Shared<dyn Reflect>` instead.
pub fn deserialize_dynamic(
    node: &Node,
    registry: &TypeRegistry,
) -> Result<Option<Box<dyn Reflect>>, DeserializeError> {
    let mut ctx = IdentityContext::new();
    run(registry, &mut ctx, |driver| driver.read_dynamic(node))
}

/// Refills `target` from `node`.
///
/// A non-null shared root is refilled in place, so other holders of the
/// object see the new state. Everything else is overwritten as by
/// [`deserialize`].
pub fn deserialize_into(
    node: &Node,
    target: &mut dyn Reflect,
    registry: &TypeRegistry,
) -> Result<Outcome, DeserializeError> {
    let mut ctx = IdentityContext::new();
    deserialize_into_with(node, target, registry, &mut ctx)
}

/// [`deserialize_into`] with an existing context.
pub fn deserialize_into_with(
    node: &Node,
    target: &mut dyn Reflect,
    registry: &TypeRegistry,
    ctx: &mut IdentityContext,
) -> Result<Outcome, DeserializeError> {
    run(registry, ctx, |driver| driver.refill(node, target))
}
