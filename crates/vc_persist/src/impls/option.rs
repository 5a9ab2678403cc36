use crate::kinds::OptionValue;
use crate::registry::TypeRegistry;
use crate::{Reflect, ReflectMut, ReflectRef};

impl<T: Reflect + Default> Reflect for Option<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Option(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Option(self)
    }

    fn register_type_dependencies(registry: &mut TypeRegistry) {
        T::register_type_dependencies(registry);
    }
}

impl<T: Reflect + Default> OptionValue for Option<T> {
    fn get(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn set_none(&mut self) {
        *self = None;
    }

    fn get_or_insert_default(&mut self) -> &mut dyn Reflect {
        self.get_or_insert_with(T::default)
    }
}

#[cfg(test)]
mod tests {
    use vc_tree::Node;

    use crate::registry::TypeRegistry;
    use crate::{deserialize, serialize};

    #[test]
    fn none_is_null() {
        assert_eq!(serialize(&None::<u32>).unwrap(), Node::Null);
        assert_eq!(serialize(&Some(4_u32)).unwrap(), Node::from(4_u32));
    }

    #[test]
    fn null_reads_back_as_none() {
        let registry = TypeRegistry::new();
        let value: Vec<Option<u8>> = deserialize(
            &Node::list([Node::from(1_u8), Node::Null]),
            &registry,
        )
        .unwrap()
        .unwrap();
        assert_eq!(value, [Some(1), None]);
    }
}
