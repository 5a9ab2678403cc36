use alloc::string::String;
use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};
use indexmap::IndexMap;

use crate::{Identity, Node, TreeError};

// -----------------------------------------------------------------------------
// Entry map

const ENTRY_HASH_STATE: FixedState = FixedState::with_seed(0x4D2B_6A31_9C07_E5F3);

/// Builds [`FoldHasher`]s from a fixed seed.
#[derive(Copy, Clone, Default, Debug)]
struct EntryHashState;

impl BuildHasher for EntryHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        ENTRY_HASH_STATE.build_hasher()
    }
}

type EntryMap = IndexMap<String, Node, EntryHashState>;

// -----------------------------------------------------------------------------
// Compound

/// A string-keyed node with ordered entries, an [`Identity`] and an
/// optional declared type.
///
/// Keys are unique. Inserting an existing key replaces its value in place,
/// so the entry keeps its original position.
///
/// Three shapes occur in practice:
///
/// - A plain mapping: identity `0`, no declared type.
/// - An object: a declared type path, and an identity when the object
///   is shared.
/// - A back-reference: a non-null identity and nothing else.
///
/// # Examples
///
/// ```
/// use vc_tree::{Compound, Identity, Node};
///
/// let mut c = Compound::object(Identity::new(1), "demo::Item");
/// c.insert("a", 1_i32);
/// c.insert("b", 2_i32);
/// c.insert("a", 3_i32);
///
/// let keys: Vec<_> = c.keys().collect();
/// assert_eq!(keys, ["a", "b"]);
/// assert_eq!(c.get("a"), Some(&Node::from(3_i32)));
/// assert!(c.lookup("missing").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Compound {
    identity: Identity,
    declared_type: Option<String>,
    entries: EntryMap,
}

impl Compound {
    /// Creates an empty plain compound.
    #[inline]
    pub const fn new() -> Self {
        Self {
            identity: Identity::NULL,
            declared_type: None,
            entries: EntryMap::with_hasher(EntryHashState),
        }
    }

    /// Creates an empty compound for an object of `declared_type`.
    pub fn object(identity: Identity, declared_type: impl Into<String>) -> Self {
        Self {
            identity,
            declared_type: Some(declared_type.into()),
            entries: EntryMap::with_hasher(EntryHashState),
        }
    }

    /// Creates a back-reference to an object already present in the tree.
    #[inline]
    pub const fn reference(identity: Identity) -> Self {
        Self {
            identity,
            declared_type: None,
            entries: EntryMap::with_hasher(EntryHashState),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            identity: Identity::NULL,
            declared_type: None,
            entries: EntryMap::with_capacity_and_hasher(capacity, EntryHashState),
        }
    }

    #[inline]
    pub const fn identity(&self) -> Identity {
        self.identity
    }

    #[inline]
    pub fn set_identity(&mut self, identity: Identity) {
        self.identity = identity;
    }

    #[inline]
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    #[inline]
    pub fn set_declared_type(&mut self, declared_type: Option<String>) {
        self.declared_type = declared_type;
    }

    /// Whether this compound only points back at an identity.
    pub fn is_reference(&self) -> bool {
        !self.identity.is_null() && self.declared_type.is_none() && self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an entry, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the value under `key`, if present.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    /// Returns the value under `key`, failing with [`TreeError::MissingKey`].
    pub fn lookup(&self, key: &str) -> Result<&Node, TreeError> {
        self.get(key).ok_or_else(|| TreeError::MissingKey {
            key: String::from(key),
        })
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes an entry, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for Compound {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Entry order is part of equality.
impl PartialEq for Compound {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
            && self.declared_type == other.declared_type
            && self.entries.len() == other.entries.len()
            && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut compound = Self::new();
        for (key, value) in iter {
            compound.insert(key, value);
        }
        compound
    }
}

impl<K: Into<String>, V: Into<Node>> Extend<(K, V)> for Compound {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
