use alloc::collections::BTreeMap;

use vc_tree::{Compound, Identity, Node};

use crate::derive::Persist;
use crate::info::TypePath;
use crate::policy::{Representation, representation_of};
use crate::registry::TypeRegistry;
use crate::{
    AssetRef, Outcome, Reflect, Shared, deserialize, deserialize_dynamic, deserialize_into,
    serialize,
};

#[derive(Persist, Default, Debug, PartialEq)]
pub struct Sprite {
    pub name: String,
    pub layer: i32,
}

#[derive(Persist, Default)]
pub struct Scene {
    pub props: Vec<Shared<dyn Reflect>>,
}

fn sprite_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register::<Sprite>();
    registry
}

#[test]
fn dynamic_roots_come_from_the_registry() {
    let sprite = Sprite {
        name: String::from("tree"),
        layer: 3,
    };
    let tree = serialize(&sprite).unwrap();

    let value = deserialize_dynamic(&tree, &sprite_registry()).unwrap().unwrap();
    assert_eq!(value.reflect_type_path(), Sprite::type_path());
    assert_eq!(value.take::<Sprite>(), Some(sprite));
}

#[test]
fn dynamic_roots_resolve_short_names() {
    let mut compound = Compound::object(Identity::NULL, "Sprite");
    compound.insert("layer", 9_i32);

    let value = deserialize_dynamic(&Node::from(compound), &sprite_registry())
        .unwrap()
        .unwrap();
    assert_eq!(value.downcast_ref::<Sprite>().map(|sprite| sprite.layer), Some(9));

    let unknown = Compound::object(Identity::NULL, "nowhere::Ghost");
    let value = deserialize_dynamic(&Node::from(unknown), &sprite_registry()).unwrap();
    assert!(value.is_none());

    assert!(deserialize_dynamic(&Node::Null, &sprite_registry()).unwrap().is_none());
}

#[test]
fn refilling_a_shared_root_keeps_the_instance() {
    let replacement = Shared::new(Sprite {
        name: String::from("rock"),
        layer: 1,
    });
    let tree = serialize(&replacement).unwrap();

    let mut target = Shared::new(Sprite::default());
    let alias = target.clone();
    let outcome = deserialize_into(&tree, &mut target, &sprite_registry()).unwrap();

    assert_eq!(outcome, Outcome::Populated);
    assert!(target.ptr_eq(&alias));
    assert_eq!(
        *alias.borrow().unwrap(),
        Sprite {
            name: String::from("rock"),
            layer: 1,
        }
    );
}

#[test]
fn refilling_a_value_overwrites_it() {
    let tree = serialize(&Sprite {
        name: String::from("bush"),
        layer: 2,
    })
    .unwrap();

    let mut target = Sprite {
        name: String::from("stale"),
        layer: 8,
    };
    let outcome = deserialize_into(&tree, &mut target, &TypeRegistry::new()).unwrap();
    assert_eq!(outcome, Outcome::Populated);
    assert_eq!(target.name, "bush");
    assert_eq!(target.layer, 2);
}

#[test]
fn polymorphic_references_keep_identity() {
    let prop = Shared::new_dyn(Sprite {
        name: String::from("lamp"),
        layer: 4,
    });
    let scene = Scene {
        props: vec![prop.clone(), prop, Shared::null()],
    };
    let tree = serialize(&scene).unwrap();

    let items = tree.field("props").unwrap();
    let first = items.at(0).unwrap().as_compound().unwrap();
    assert_eq!(first.identity(), Identity::FIRST);
    assert_eq!(first.declared_type(), Some(Sprite::type_path()));
    assert_eq!(items.at(2).unwrap(), &Node::Null);

    let back: Scene = deserialize(&tree, &sprite_registry()).unwrap().unwrap();
    assert_eq!(back.props.len(), 3);
    assert!(back.props[0].ptr_eq(&back.props[1]));
    assert!(back.props[2].is_null());

    let prop = back.props[0].borrow().unwrap();
    assert_eq!(prop.downcast_ref::<Sprite>().map(|sprite| sprite.layer), Some(4));
}

#[test]
fn polymorphic_roots() {
    let tree = serialize(&Shared::new_dyn(Sprite::default())).unwrap();
    let root: Shared<dyn Reflect> = deserialize(&tree, &sprite_registry()).unwrap().unwrap();
    assert!(root.borrow().unwrap().is::<Sprite>());
}

#[test]
fn representation_follows_precedence() {
    assert_eq!(representation_of(&Node::from(1_i32)), Representation::Node);
    assert_eq!(representation_of(&1_u8), Representation::Primitive);
    assert_eq!(representation_of(&AssetRef::new("a.png")), Representation::Primitive);
    assert_eq!(representation_of(&[1_u8, 2]), Representation::Array);
    assert_eq!(representation_of(&BTreeMap::<String, u8>::new()), Representation::Map);
    assert_eq!(representation_of(&vec![1_u8]), Representation::List);
    assert_eq!(representation_of(&Sprite::default()), Representation::Object);
    assert_eq!(representation_of(&Shared::<Sprite>::null()), Representation::Object);
    assert_eq!(representation_of(&Some(1_u8)), Representation::Option);
    assert_eq!(representation_of(&1_u128), Representation::Unsupported);
}

#[cfg(feature = "auto_register")]
mod auto_register {
    use core::any::TypeId;

    use crate::derive::Persist;
    use crate::registry::TypeRegistry;

    #[derive(Persist, Default)]
    #[persist(auto_register)]
    pub struct Beacon {
        pub range: f32,
    }

    #[test]
    fn marked_types_are_collected() {
        let mut registry = TypeRegistry::empty();
        assert!(registry.auto_register());
        assert!(registry.contains(TypeId::of::<Beacon>()));
        assert!(registry.get_with_type_name("Beacon").is_some());
    }
}
