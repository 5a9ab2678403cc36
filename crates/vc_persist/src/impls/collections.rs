use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::kinds::{Array, List};
use crate::registry::TypeRegistry;
use crate::{Reflect, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Arrays

impl<T: Reflect + Default, const N: usize> Reflect for [T; N] {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Array(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Array(self)
    }

    fn register_type_dependencies(registry: &mut TypeRegistry) {
        T::register_type_dependencies(registry);
    }
}

impl<T: Reflect + Default, const N: usize> Array for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|item| item as &mut dyn Reflect)
    }

    fn reset(&mut self, len: usize) -> Result<(), usize> {
        if len == N { Ok(()) } else { Err(N) }
    }
}

impl<T: Reflect + Default> Reflect for Box<[T]> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Array(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Array(self)
    }

    fn register_type_dependencies(registry: &mut TypeRegistry) {
        T::register_type_dependencies(registry);
    }
}

impl<T: Reflect + Default> Array for Box<[T]> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    /// Reallocates with exactly `len` default elements.
    fn reset(&mut self, len: usize) -> Result<(), usize> {
        *self = (0..len).map(|_| T::default()).collect();
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Lists

impl<T: Reflect + Default> Reflect for Vec<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }

    fn register_type_dependencies(registry: &mut TypeRegistry) {
        T::register_type_dependencies(registry);
    }
}

impl<T: Reflect + Default> List for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn push_default(&mut self) -> &mut dyn Reflect {
        let index = Vec::len(self);
        self.push(T::default());
        &mut self[index]
    }
}

impl<T: Reflect + Default> Reflect for VecDeque<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }

    fn register_type_dependencies(registry: &mut TypeRegistry) {
        T::register_type_dependencies(registry);
    }
}

impl<T: Reflect + Default> List for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn clear(&mut self) {
        VecDeque::clear(self);
    }

    fn push_default(&mut self) -> &mut dyn Reflect {
        let index = VecDeque::len(self);
        self.push_back(T::default());
        &mut self[index]
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::VecDeque;

    use vc_tree::Node;

    use crate::registry::TypeRegistry;
    use crate::{DeserializeError, deserialize, serialize};

    #[test]
    fn sequences_become_lists() {
        let tree = serialize(&vec![1_u8, 2, 3]).unwrap();
        assert_eq!(tree, Node::list([1_u8.into(), 2_u8.into(), 3_u8.into()]));

        let registry = TypeRegistry::new();
        let deque: VecDeque<u8> = deserialize(&tree, &registry).unwrap().unwrap();
        assert_eq!(deque, [1, 2, 3]);

        let boxed: Box<[u8]> = deserialize(&tree, &registry).unwrap().unwrap();
        assert_eq!(&*boxed, [1, 2, 3]);

        let array: [u8; 3] = deserialize(&tree, &registry).unwrap().unwrap();
        assert_eq!(array, [1, 2, 3]);
    }

    #[test]
    fn fixed_arrays_check_length() {
        let tree = serialize(&[1_i32, 2]).unwrap();
        let err = deserialize::<[i32; 3]>(&tree, &TypeRegistry::new()).unwrap_err();
        assert_eq!(
            err,
            DeserializeError::LengthMismatch {
                expected: 3,
                found: 2,
                path: "root".into(),
            }
        );
    }

    #[test]
    fn nested_errors_carry_their_path() {
        let tree = Node::list([Node::list([Node::from("x")])]);
        let err = deserialize::<Vec<Vec<u8>>>(&tree, &TypeRegistry::new()).unwrap_err();
        let DeserializeError::Convert { path, .. } = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(path, "root[0][0]");
    }
}
