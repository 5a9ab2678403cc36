use vc_tree::{Compound, Identity, Node};

use crate::derive::Persist;
use crate::info::TypePath;
use crate::kinds::Struct;
use crate::registry::TypeRegistry;
use crate::{Shared, deserialize, serialize};

#[derive(Persist, Default, Debug, PartialEq)]
pub struct Settings {
    #[persist(rename = "vol", former = "volume", former = "level")]
    pub master_volume: u8,
    pub muted: bool,
    #[persist(include)]
    secret: u32,
    #[persist(skip)]
    pub scratch: u32,
    hidden: u32,
}

#[derive(Persist, Default)]
pub struct Link {
    #[persist(omit_null)]
    pub target: Shared<Link>,
    #[persist(omit_null)]
    pub note: Option<String>,
    pub weight: f32,
}

#[derive(Persist, Default, Debug, PartialEq)]
pub struct Entity {
    pub id: u32,
    pub name: String,
}

#[derive(Persist, Default, Debug, PartialEq)]
#[persist(type_path = "game::units::Unit")]
pub struct Unit {
    pub hp: u32,
    #[persist(base)]
    pub entity: Entity,
    pub name: String,
}

#[derive(Persist, Default)]
pub struct Marker;

#[test]
fn participation_and_renaming() {
    let settings = Settings {
        master_volume: 80,
        muted: true,
        secret: 7,
        scratch: 1,
        hidden: 2,
    };
    let tree = serialize(&settings).unwrap();
    let root = tree.as_compound().unwrap();
    assert_eq!(root.keys().collect::<Vec<_>>(), ["vol", "muted", "secret"]);

    let back: Settings = deserialize(&tree, &TypeRegistry::new()).unwrap().unwrap();
    assert_eq!(back.hidden, 0);
    assert_eq!(
        back,
        Settings {
            scratch: 0,
            hidden: 0,
            ..settings
        }
    );
}

#[test]
fn former_names_in_order() {
    let mut old = Compound::object(Identity::NULL, Settings::type_path());
    old.insert("level", 10_u8);
    old.insert("volume", 20_u8);

    let registry = TypeRegistry::new();
    let back: Settings = deserialize(&Node::from(old.clone()), &registry).unwrap().unwrap();
    assert_eq!(back.master_volume, 20);

    // The current name wins over any former one.
    old.insert("vol", 30_u8);
    let back: Settings = deserialize(&Node::from(old), &registry).unwrap().unwrap();
    assert_eq!(back.master_volume, 30);
}

#[test]
fn missing_fields_keep_defaults() {
    let mut partial = Compound::new();
    partial.insert("muted", true);
    partial.insert("unknown", "ignored");

    let back: Settings = deserialize(&Node::from(partial), &TypeRegistry::new())
        .unwrap()
        .unwrap();
    assert_eq!(
        back,
        Settings {
            muted: true,
            ..Settings::default()
        }
    );
}

#[test]
fn null_fields_can_be_omitted() {
    let tree = serialize(&Link::default()).unwrap();
    let root = tree.as_compound().unwrap();
    assert_eq!(root.keys().collect::<Vec<_>>(), ["weight"]);

    let link = Link {
        target: Shared::new(Link::default()),
        note: Some(String::from("x")),
        weight: 1.0,
    };
    let tree = serialize(&link).unwrap();
    let root = tree.as_compound().unwrap();
    assert_eq!(root.keys().collect::<Vec<_>>(), ["target", "note", "weight"]);
}

#[test]
fn base_fields_come_first() {
    let info = Unit::struct_info();
    let names: Vec<_> = info.fields().iter().map(|field| field.name()).collect();
    assert_eq!(names, ["id", "name", "hp", "name"]);
    assert_eq!(info.base_len(), 2);
    assert_eq!(info.fields()[1].declared_by(), Entity::type_path());
    assert_eq!(info.fields()[3].declared_by(), "game::units::Unit");
    assert_eq!(Unit::type_name(), "Unit");
    assert_eq!(Unit::module_path(), Some("game::units"));
}

#[test]
fn shadowed_name_takes_the_derived_value() {
    let unit = Unit {
        hp: 5,
        entity: Entity {
            id: 1,
            name: String::from("base"),
        },
        name: String::from("derived"),
    };

    let tree = serialize(&unit).unwrap();
    let root = tree.as_compound().unwrap();
    assert_eq!(root.declared_type(), Some("game::units::Unit"));
    let entries: Vec<_> = root.iter().collect();
    assert_eq!(
        entries,
        [
            ("id", &Node::from(1_u32)),
            ("name", &Node::from("derived")),
            ("hp", &Node::from(5_u32)),
        ]
    );

    let back: Unit = deserialize(&tree, &TypeRegistry::new()).unwrap().unwrap();
    assert_eq!(back.entity.id, 1);
    assert_eq!(back.entity.name, "derived");
    assert_eq!(back.name, "derived");
    assert_eq!(back.hp, 5);
}

#[test]
fn unit_structs_are_empty_objects() {
    let tree = serialize(&Marker).unwrap();
    let root = tree.as_compound().unwrap();
    assert!(root.is_empty());
    assert_eq!(root.declared_type(), Some(Marker::type_path()));
    assert!(deserialize::<Marker>(&tree, &TypeRegistry::new()).unwrap().is_some());
}
