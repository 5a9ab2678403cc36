use vc_tree::Node;

use crate::{Reflect, ReflectMut, ReflectRef};

impl Reflect for Node {
    fn reflect_type_path(&self) -> &'static str {
        "vc_tree::Node"
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Node(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Node(self)
    }
}

#[cfg(test)]
mod tests {
    use vc_tree::{Compound, Identity, Node};

    use crate::registry::TypeRegistry;
    use crate::{deserialize, serialize};

    #[test]
    fn nodes_are_copied_verbatim() {
        let mut compound = Compound::object(Identity::FIRST, "elsewhere::Thing");
        compound.insert("n", 1_u8);
        let node = Node::list([Node::from(compound), Node::Null]);

        let tree = serialize(&node).unwrap();
        assert_eq!(tree, node);

        let back: Node = deserialize(&tree, &TypeRegistry::new()).unwrap().unwrap();
        assert_eq!(back, node);
    }
}
