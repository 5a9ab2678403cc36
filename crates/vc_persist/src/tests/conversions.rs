use vc_tree::{Compound, Node, Primitive};

use crate::derive::Persist;
use crate::info::TypePath;
use crate::policy::ConvertError;
use crate::registry::TypeRegistry;
use crate::{AssetRef, DeserializeError, IdentityContext, deserialize, serialize, serialize_with};

#[derive(Persist, Default, Debug, PartialEq)]
pub struct Flags {
    pub enabled: bool,
    pub offset: i8,
    pub count: u16,
}

#[derive(Persist, Default, Debug, Clone, Copy, PartialEq)]
#[repr(u8)]
pub enum Team {
    #[default]
    Red,
    Green,
    Blue = 4,
}

#[derive(Persist, Default, Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    #[default]
    Off,
    On,
}

#[derive(Persist, Default, Debug, PartialEq)]
pub struct Player {
    pub team: Team,
    pub mode: Mode,
}

#[derive(Persist, Default)]
pub struct Material {
    pub albedo: AssetRef,
    pub normal: AssetRef,
    pub detail: AssetRef,
}

#[test]
fn legacy_byte_encodings() {
    let mut compound = Compound::new();
    compound.insert("enabled", 1_u8);
    compound.insert("offset", 255_u8);
    compound.insert("count", 12_i64);

    let flags: Flags = deserialize(&Node::from(compound), &TypeRegistry::new())
        .unwrap()
        .unwrap();
    assert_eq!(
        flags,
        Flags {
            enabled: true,
            offset: -1,
            count: 12,
        }
    );
}

#[test]
fn out_of_range_numbers_are_fatal() {
    let mut compound = Compound::new();
    compound.insert("count", -3_i32);

    let err = deserialize::<Flags>(&Node::from(compound), &TypeRegistry::new()).unwrap_err();
    assert_eq!(
        err,
        DeserializeError::Convert {
            source: ConvertError::OutOfRange {
                from: vc_tree::PrimitiveKind::I32,
                to: "u16",
            },
            path: "root.count".into(),
        }
    );
}

#[test]
fn enums_use_their_repr() {
    let player = Player {
        team: Team::Blue,
        mode: Mode::On,
    };
    let tree = serialize(&player).unwrap();
    let root = tree.as_compound().unwrap();
    assert_eq!(root.get("team"), Some(&Node::Primitive(Primitive::U8(4))));
    assert_eq!(root.get("mode"), Some(&Node::Primitive(Primitive::I32(1))));

    let back: Player = deserialize(&tree, &TypeRegistry::new()).unwrap().unwrap();
    assert_eq!(back, player);
}

#[test]
fn enums_read_from_other_integer_kinds() {
    let mut compound = Compound::new();
    compound.insert("team", 4_i32);
    compound.insert("mode", 1_u8);

    let player: Player = deserialize(&Node::from(compound), &TypeRegistry::new())
        .unwrap()
        .unwrap();
    assert_eq!(player.team, Team::Blue);
    assert_eq!(player.mode, Mode::On);
}

#[test]
fn unknown_enum_values_are_fatal() {
    let mut compound = Compound::new();
    compound.insert("team", 7_i32);

    let err = deserialize::<Player>(&Node::from(compound), &TypeRegistry::new()).unwrap_err();
    assert_eq!(
        err,
        DeserializeError::Convert {
            source: ConvertError::UnknownDiscriminant {
                type_path: Team::type_path(),
                value: 7,
            },
            path: "root.team".into(),
        }
    );
}

#[test]
fn asset_dependencies_are_collected_once() {
    let first = Material {
        albedo: AssetRef::new("textures/wood.png"),
        normal: AssetRef::new("textures/wood_n.png"),
        detail: AssetRef::new("textures/wood.png"),
    };
    let second = Material {
        albedo: AssetRef::new("textures/stone.png"),
        normal: AssetRef::new("textures/wood_n.png"),
        detail: AssetRef::default(),
    };

    let mut ctx = IdentityContext::new();
    serialize_with(&first, &mut ctx).unwrap();
    let tree = serialize_with(&second, &mut ctx).unwrap();

    assert_eq!(
        ctx.dependencies(),
        [
            AssetRef::new("textures/wood.png"),
            AssetRef::new("textures/wood_n.png"),
            AssetRef::new("textures/stone.png"),
        ]
    );

    let root = tree.as_compound().unwrap();
    assert_eq!(root.get("albedo"), Some(&Node::from("textures/stone.png")));
    assert_eq!(root.get("detail"), Some(&Node::Null));
}
