//! Trees carried through text formats keep enough to rebuild the graph.

use vc_tree::Node;

use crate::derive::Persist;
use crate::registry::TypeRegistry;
use crate::{Shared, WeakShared, deserialize, serialize};

#[derive(Persist, Default)]
pub struct Room {
    pub name: String,
    pub exits: Vec<Shared<Room>>,
    pub previous: WeakShared<Room>,
}

fn build_rooms() -> Shared<Room> {
    let hall = Shared::new(Room {
        name: String::from("hall"),
        ..Room::default()
    });
    let cellar = Shared::new(Room {
        name: String::from("cellar"),
        exits: vec![hall.clone()],
        previous: hall.downgrade(),
    });
    hall.borrow_mut().unwrap().exits = vec![cellar, hall.clone()];
    hall
}

fn check_rooms(hall: &Shared<Room>) {
    let hall_ref = hall.borrow().unwrap();
    assert_eq!(hall_ref.name, "hall");
    assert_eq!(hall_ref.exits.len(), 2);
    assert!(hall_ref.exits[1].ptr_eq(hall));

    let cellar = hall_ref.exits[0].borrow().unwrap();
    assert_eq!(cellar.name, "cellar");
    assert!(cellar.exits[0].ptr_eq(hall));
    assert!(cellar.previous.upgrade().ptr_eq(hall));
}

fn break_cycles(hall: &Shared<Room>) {
    if let Some(mut room) = hall.borrow_mut() {
        room.exits.clear();
    }
}

#[test]
fn json_round_trip() {
    let hall = build_rooms();
    let tree = serialize(&hall).unwrap();

    let text = serde_json::to_string(&tree).unwrap();
    let decoded: Node = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, tree);

    let back: Shared<Room> = deserialize(&decoded, &TypeRegistry::new()).unwrap().unwrap();
    check_rooms(&back);

    break_cycles(&hall);
    break_cycles(&back);
}

#[test]
fn ron_round_trip() {
    let hall = build_rooms();
    let tree = serialize(&hall).unwrap();

    let text = ron::to_string(&tree).unwrap();
    let decoded: Node = ron::from_str(&text).unwrap();
    assert_eq!(decoded, tree);

    let back: Shared<Room> = deserialize(&decoded, &TypeRegistry::new()).unwrap().unwrap();
    check_rooms(&back);

    break_cycles(&hall);
    break_cycles(&back);
}
