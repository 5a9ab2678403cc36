use vc_tree::{Compound, Identity, Node};

use crate::derive::Persist;
use crate::info::TypePath;
use crate::registry::TypeRegistry;
use crate::{
    DeserializeError, Diagnostic, IdentityContext, Reflect, SerializeError, Shared,
    deserialize, deserialize_with, serialize, serialize_with,
};

#[derive(Persist, Default, Debug, PartialEq)]
pub struct Prop {
    pub level: i32,
}

#[derive(Persist, Default)]
pub struct Crate {
    pub weight: f32,
}

#[derive(Persist, Default, Debug)]
pub struct Stage {
    pub props: Vec<Shared<dyn Reflect>>,
    pub main: Shared<Prop>,
    pub count: u32,
}

#[derive(Persist, Default)]
pub struct Wide {
    pub small: u64,
    pub big: u128,
}

fn object(raw: u32, declared_type: &str, level: i32) -> Node {
    let mut compound = Compound::object(Identity::new(raw), declared_type);
    compound.insert("level", level);
    Node::from(compound)
}

fn stage_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register::<Stage>();
    registry.register::<Crate>();
    registry
}

#[test]
fn unresolved_types_become_null() {
    let mut root = Compound::object(Identity::NULL, Stage::type_path());
    root.insert(
        "props",
        Node::list([
            object(5, "mods::Missing", 1),
            object(6, Prop::type_path(), 2),
            Node::from(Compound::reference(Identity::new(5))),
        ]),
    );
    root.insert("count", 2_u32);

    let mut ctx = IdentityContext::new();
    let stage: Stage = deserialize_with(&Node::from(root), &stage_registry(), &mut ctx)
        .unwrap()
        .unwrap();

    assert_eq!(stage.count, 2);
    assert_eq!(stage.props.len(), 3);
    assert!(stage.props[0].is_null());
    assert!(stage.props[2].is_null());
    let sibling = stage.props[1].borrow().unwrap();
    assert_eq!(sibling.downcast_ref::<Prop>(), Some(&Prop { level: 2 }));

    assert!(!ctx.is_poisoned());
    assert_eq!(
        ctx.diagnostics(),
        [
            Diagnostic::UnresolvedType {
                type_path: String::from("mods::Missing"),
                identity: Identity::new(5),
                path: String::from("root.props[0]"),
            },
            Diagnostic::DanglingReference {
                identity: Identity::new(5),
                path: String::from("root.props[2]"),
            },
        ]
    );
}

#[test]
fn polymorphic_slots_need_a_declared_type() {
    let mut untyped = Compound::new();
    untyped.set_identity(Identity::new(3));
    untyped.insert("level", 1_i32);

    let mut root = Compound::new();
    root.insert("props", Node::list([Node::from(untyped)]));

    let mut ctx = IdentityContext::new();
    let stage: Stage = deserialize_with(&Node::from(root), &stage_registry(), &mut ctx)
        .unwrap()
        .unwrap();
    assert!(stage.props[0].is_null());
    assert_eq!(
        ctx.take_diagnostics(),
        [Diagnostic::MissingDeclaredType {
            identity: Identity::new(3),
            path: String::from("root.props[0]"),
        }]
    );
    assert!(ctx.diagnostics().is_empty());
}

#[test]
fn shape_mismatch_poisons_the_context() {
    let mut prop = Compound::object(Identity::NULL, Prop::type_path());
    prop.insert("level", Node::list([Node::from(1_i32)]));
    let tree = Node::from(prop);

    let registry = TypeRegistry::new();
    let mut ctx = IdentityContext::new();
    let err = deserialize_with::<Prop>(&tree, &registry, &mut ctx).unwrap_err();
    assert_eq!(
        err,
        DeserializeError::ShapeMismatch {
            expected: "primitive",
            found: "list",
            path: String::from("root.level"),
        }
    );
    assert!(ctx.is_poisoned());

    let valid = serialize(&Prop { level: 1 }).unwrap();
    assert_eq!(
        deserialize_with::<Prop>(&valid, &registry, &mut ctx),
        Err(DeserializeError::PoisonedContext)
    );
    assert_eq!(
        serialize_with(&Prop { level: 1 }, &mut ctx),
        Err(SerializeError::PoisonedContext)
    );
}

#[test]
fn objects_must_fit_their_reference() {
    let mut root = Compound::new();
    let mut wrong = Compound::object(Identity::FIRST, Crate::type_path());
    wrong.insert("weight", 1.5_f32);
    root.insert("main", wrong);

    let err = deserialize::<Stage>(&Node::from(root), &stage_registry()).unwrap_err();
    assert_eq!(
        err,
        DeserializeError::TypeMismatch {
            declared: String::from(Crate::type_path()),
            expected: Prop::type_path(),
            path: String::from("root.main"),
        }
    );
}

#[test]
fn scalar_types_cannot_be_referenced() {
    let mut root = Compound::new();
    root.insert("main", Compound::object(Identity::FIRST, "i32"));

    let err = deserialize::<Stage>(&Node::from(root), &stage_registry()).unwrap_err();
    assert!(matches!(
        err,
        DeserializeError::TypeMismatch { expected, .. } if expected == Prop::type_path()
    ));
}

#[test]
fn references_only_alias_shared_slots() {
    let mut root = Compound::new();
    root.insert("main", object(1, Prop::type_path(), 4));
    root.insert("count", Compound::reference(Identity::FIRST));

    let err = deserialize::<Stage>(&Node::from(root), &stage_registry()).unwrap_err();
    assert_eq!(
        err,
        DeserializeError::ShapeMismatch {
            expected: "primitive",
            found: "reference",
            path: String::from("root.count"),
        }
    );
}

#[test]
fn unsupported_values_are_fatal() {
    let err = serialize(&Wide { small: 1, big: 2 }).unwrap_err();
    assert_eq!(
        err,
        SerializeError::Unsupported {
            type_path: "u128",
            path: String::from("root.big"),
        }
    );
}

#[test]
fn borrowed_objects_cannot_be_written() {
    let prop = Shared::new(Prop { level: 1 });
    let stage = Stage {
        main: prop.clone(),
        ..Stage::default()
    };

    let guard = prop.borrow_mut();
    let err = serialize(&stage).unwrap_err();
    drop(guard);

    assert_eq!(
        err,
        SerializeError::Borrowed {
            type_path: Prop::type_path(),
            path: String::from("root.main"),
        }
    );
    assert!(serialize(&stage).is_ok());
}

#[test]
fn shared_non_objects_cannot_be_written() {
    let stage = Stage {
        props: vec![Shared::new_dyn(Prop { level: 1 }), Shared::new_dyn(5_i32)],
        ..Stage::default()
    };

    let err = serialize(&stage).unwrap_err();
    assert_eq!(
        err,
        SerializeError::Unsupported {
            type_path: "i32",
            path: String::from("root.props[1]"),
        }
    );
}
