use alloc::vec::Vec;

use vc_tree::Identity;

use crate::hash::{HashMap, HashSet};
use crate::{AssetRef, Diagnostic, ObjectHandle};

// -----------------------------------------------------------------------------
// IdentityContext

/// The identity tables of one conversion.
///
/// While serializing, it assigns identities to objects in first-visit
/// order, starting at [`Identity::FIRST`]. While deserializing, it maps the
/// identities found in the tree back to the objects built for them.
///
/// A context can be passed to several calls (see
/// [`serialize_with`](crate::serialize_with) and
/// [`deserialize_with`](crate::deserialize_with)) so that objects shared
/// between separately converted trees keep one identity. Objects are kept
/// alive for as long as the context lives.
///
/// Besides identities the context collects the asset dependencies met by
/// the serializer and the non-fatal [`Diagnostic`]s of the deserializer.
/// A fatal error poisons the context; later calls with it fail.
#[derive(Debug)]
pub struct IdentityContext {
    by_address: HashMap<usize, Identity>,
    objects: HashMap<Identity, ObjectHandle>,
    next: Option<Identity>,
    dependencies: Vec<AssetRef>,
    seen_dependencies: HashSet<AssetRef>,
    diagnostics: Vec<Diagnostic>,
    poisoned: bool,
}

impl Default for IdentityContext {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityContext {
    pub fn new() -> Self {
        Self {
            by_address: HashMap::default(),
            objects: HashMap::default(),
            next: Some(Identity::FIRST),
            dependencies: Vec::new(),
            seen_dependencies: HashSet::default(),
            diagnostics: Vec::new(),
            poisoned: false,
        }
    }

    /// The number of objects with an identity.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns the identity of `handle`, assigning the next free one on
    /// first sight.
    ///
    /// `None` once every identity is used up.
    pub fn assign(&mut self, handle: &ObjectHandle) -> Option<Identity> {
        if let Some(identity) = self.by_address.get(&handle.address()) {
            return Some(*identity);
        }
        let identity = self.next?;
        self.next = identity.next();
        self.by_address.insert(handle.address(), identity);
        self.objects.insert(identity, handle.clone());
        Some(identity)
    }

    /// Whether `handle` already has an identity.
    #[inline]
    pub fn has(&self, handle: &ObjectHandle) -> bool {
        self.by_address.contains_key(&handle.address())
    }

    #[inline]
    pub fn identity_of(&self, handle: &ObjectHandle) -> Option<Identity> {
        self.by_address.get(&handle.address()).copied()
    }

    /// The object registered under `identity`. The null identity never
    /// resolves.
    pub fn resolve(&self, identity: Identity) -> Option<&ObjectHandle> {
        if identity.is_null() {
            return None;
        }
        self.objects.get(&identity)
    }

    /// Records `handle` as the object persisted under `identity`.
    ///
    /// Used by the deserializer before the object is populated, so that
    /// back-references inside it resolve. Identities assigned later start
    /// above the largest one registered.
    pub fn register(&mut self, identity: Identity, handle: ObjectHandle) {
        if identity.is_null() {
            return;
        }
        if self.next.is_some_and(|next| next <= identity) {
            self.next = identity.next();
        }
        let address = handle.address();
        if let Some(previous) = self.objects.insert(identity, handle)
            && previous.address() != address
        {
            self.by_address.remove(&previous.address());
        }
        self.by_address.insert(address, identity);
    }

    /// Records an asset the tree depends on. Duplicates are ignored.
    pub fn add_dependency(&mut self, asset: &AssetRef) {
        if self.seen_dependencies.insert(asset.clone()) {
            self.dependencies.push(asset.clone());
        }
    }

    /// The assets met by the serializer, in first-seen order.
    #[inline]
    pub fn dependencies(&self) -> &[AssetRef] {
        &self.dependencies
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        core::mem::take(&mut self.diagnostics)
    }

    pub(crate) fn poison(&mut self) {
        self.poisoned = true;
    }

    /// Whether a fatal error happened during a call with this context.
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::RefCell;

    use vc_tree::Identity;

    use super::IdentityContext;
    use crate::{AssetRef, ObjectHandle};

    fn handle(value: i32) -> ObjectHandle {
        ObjectHandle::new(Rc::new(RefCell::new(value)))
    }

    #[test]
    fn identities_start_at_one_and_are_stable() {
        let mut ctx = IdentityContext::new();
        let a = handle(1);
        let b = handle(2);

        assert_eq!(ctx.assign(&a), Some(Identity::new(1)));
        assert_eq!(ctx.assign(&b), Some(Identity::new(2)));
        assert_eq!(ctx.assign(&a), Some(Identity::new(1)));
        assert!(ctx.has(&b));
        assert_eq!(ctx.len(), 2);

        assert!(ctx.resolve(Identity::NULL).is_none());
        assert!(ctx.resolve(Identity::new(2)).unwrap().ptr_eq(&b));
    }

    #[test]
    fn register_moves_next_identity() {
        let mut ctx = IdentityContext::new();
        ctx.register(Identity::new(7), handle(0));
        assert_eq!(ctx.assign(&handle(1)), Some(Identity::new(8)));
    }

    #[test]
    fn dependencies_are_deduplicated() {
        let mut ctx = IdentityContext::new();
        ctx.add_dependency(&AssetRef::new("a.png"));
        ctx.add_dependency(&AssetRef::new("b.ogg"));
        ctx.add_dependency(&AssetRef::new("a.png"));
        assert_eq!(
            ctx.dependencies(),
            [AssetRef::new("a.png"), AssetRef::new("b.ogg")]
        );
    }
}
