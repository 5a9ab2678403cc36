use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::BuildHasher;
use std::collections::HashMap;

use crate::kinds::Map;
use crate::registry::TypeRegistry;
use crate::{Reflect, ReflectMut, ReflectRef};

impl<V: Reflect + Default> Reflect for BTreeMap<String, V> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Map(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Map(self)
    }

    fn register_type_dependencies(registry: &mut TypeRegistry) {
        V::register_type_dependencies(registry);
    }
}

impl<V: Reflect + Default> Map for BTreeMap<String, V> {
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> Vec<(&str, &dyn Reflect)> {
        self.iter()
            .map(|(key, value)| (key.as_str(), value as &dyn Reflect))
            .collect()
    }

    #[inline]
    fn clear(&mut self) {
        BTreeMap::clear(self);
    }

    fn insert_default(&mut self, key: String) -> &mut dyn Reflect {
        self.entry(key).or_default()
    }
}

impl<V, S> Reflect for HashMap<String, V, S>
where
    V: Reflect + Default,
    S: BuildHasher + Default + 'static,
{
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Map(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Map(self)
    }

    fn register_type_dependencies(registry: &mut TypeRegistry) {
        V::register_type_dependencies(registry);
    }
}

impl<V, S> Map for HashMap<String, V, S>
where
    V: Reflect + Default,
    S: BuildHasher + Default + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    /// Sorted by key, so the output does not depend on the hasher.
    fn entries(&self) -> Vec<(&str, &dyn Reflect)> {
        let mut entries: Vec<_> = self
            .iter()
            .map(|(key, value)| (key.as_str(), value as &dyn Reflect))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    #[inline]
    fn clear(&mut self) {
        HashMap::clear(self);
    }

    fn insert_default(&mut self, key: String) -> &mut dyn Reflect {
        self.entry(key).or_default()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use std::collections::HashMap;

    use vc_tree::{Identity, Node};

    use crate::registry::TypeRegistry;
    use crate::{DeserializeError, deserialize, serialize};

    #[test]
    fn maps_become_plain_compounds() {
        let mut scores = HashMap::new();
        scores.insert(String::from("b"), 2_u32);
        scores.insert(String::from("a"), 1_u32);
        scores.insert(String::from("c"), 3_u32);

        let tree = serialize(&scores).unwrap();
        let compound = tree.as_compound().unwrap();
        assert_eq!(compound.identity(), Identity::NULL);
        assert_eq!(compound.declared_type(), None);
        assert_eq!(compound.keys().collect::<Vec<_>>(), ["a", "b", "c"]);

        let back: BTreeMap<String, u32> = deserialize(&tree, &TypeRegistry::new()).unwrap().unwrap();
        assert_eq!(back.get("c"), Some(&3));
        assert_eq!(back.len(), 3);
    }

    #[test]
    fn list_into_map_is_a_shape_mismatch() {
        let tree = Node::list([Node::from(1_u8)]);
        let err = deserialize::<BTreeMap<String, u8>>(&tree, &TypeRegistry::new()).unwrap_err();
        assert!(matches!(
            err,
            DeserializeError::ShapeMismatch { expected: "compound", found: "list", .. }
        ));
    }
}
