use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;

/// A string-keyed mapping, persisted as a plain compound.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    /// Entries in persisted order. Unordered maps sort by key.
    fn entries(&self) -> Vec<(&str, &dyn Reflect)>;

    fn clear(&mut self);

    /// Inserts a default value under `key` (or keeps the existing one)
    /// and returns it for population.
    fn insert_default(&mut self, key: String) -> &mut dyn Reflect;
}
