//! Graph to tree.
//!
//! - [`serialize`]: converts a value with a fresh [`IdentityContext`].
//! - [`serialize_with`]: converts a value with a caller-owned context, so
//!   several trees can share one identity space.
//! - [`SerializeDriver`]: the walker, handed to manual writers.

// -----------------------------------------------------------------------------
// Modules

mod driver;

// -----------------------------------------------------------------------------
// Exports

pub use driver::SerializeDriver;

// -----------------------------------------------------------------------------
// Entry points

use vc_tree::Node;

use crate::{IdentityContext, Reflect, SerializeError};

/// Converts `value` into a property tree.
///
/// # Examples
///
/// ```
/// use vc_persist::{Shared, derive::Persist, serialize};
/// use vc_persist::tree::{Compound, Identity, Node};
///
/// #[derive(Persist, Default)]
/// pub struct Link {
///     pub next: Shared<Link>,
/// }
///
/// // A node pointing at itself.
/// let link = Shared::new(Link::default());
/// link.borrow_mut().unwrap().next = link.clone();
///
/// let tree = serialize(&link).unwrap();
/// let root = tree.as_compound().unwrap();
/// assert_eq!(root.identity(), Identity::FIRST);
/// assert_eq!(root.get("next"), Some(&Node::from(Compound::reference(Identity::FIRST))));
///
/// link.borrow_mut().unwrap().next.clear();
/// ```
pub fn serialize(value: &dyn Reflect) -> Result<Node, SerializeError> {
    let mut ctx = IdentityContext::new();
    serialize_with(value, &mut ctx)
}

/// Converts `value` with an existing context.
///
/// Objects already identified by an earlier call are written as
/// references. A failure poisons `ctx`.
pub fn serialize_with(value: &dyn Reflect, ctx: &mut IdentityContext) -> Result<Node, SerializeError> {
    if ctx.is_poisoned() {
        return Err(SerializeError::PoisonedContext);
    }
    let result = SerializeDriver::new(ctx).serialize(value);
    if let Err(err) = &result {
        log::debug!("serialization failed, poisoning the context: {err}");
        ctx.poison();
    }
    result
}
