use core::cell::RefCell;

use vc_tree::{Compound, Node};

use crate::de::DeserializeDriver;
use crate::derive::Persist;
use crate::hooks::{Callbacks, ManualPersist};
use crate::registry::TypeRegistry;
use crate::ser::SerializeDriver;
use crate::{DeserializeError, SerializeError, Shared, deserialize, serialize};

#[derive(Persist, Default)]
#[persist(callbacks)]
pub struct Tracked {
    pub value: i32,
    #[persist(skip)]
    pub events: RefCell<Vec<&'static str>>,
    #[persist(skip)]
    pub value_before_read: Option<i32>,
    #[persist(skip)]
    pub doubled: i32,
}

impl Callbacks for Tracked {
    fn pre_serialize(&self) {
        self.events.borrow_mut().push("pre_serialize");
    }

    fn post_serialize(&self) {
        self.events.borrow_mut().push("post_serialize");
    }

    fn pre_deserialize(&mut self) {
        self.value_before_read = Some(self.value);
        self.events.get_mut().push("pre_deserialize");
    }

    fn post_deserialize(&mut self) {
        self.doubled = self.value * 2;
        self.events.get_mut().push("post_deserialize");
    }
}

#[derive(Persist, Default, Debug, PartialEq)]
#[persist(manual)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl ManualPersist for Span {
    fn write(&self, out: &mut Compound, ser: &mut SerializeDriver<'_>) -> Result<(), SerializeError> {
        ser.write_field(out, "range", &[self.start, self.end])
    }

    fn read(&mut self, input: &Compound, de: &mut DeserializeDriver<'_>) -> Result<(), DeserializeError> {
        let mut range = [0_u32; 2];
        de.read_field(input, "range", &mut range)?;
        [self.start, self.end] = range;
        Ok(())
    }
}

#[derive(Persist, Default)]
#[persist(manual, callbacks)]
pub struct Bundle {
    pub first: Shared<Span>,
    pub second: Shared<Span>,
    #[persist(skip)]
    pub loaded: bool,
}

impl Callbacks for Bundle {
    fn post_deserialize(&mut self) {
        self.loaded = true;
    }
}

impl ManualPersist for Bundle {
    fn write(&self, out: &mut Compound, ser: &mut SerializeDriver<'_>) -> Result<(), SerializeError> {
        ser.write_field(out, "pair", &[self.first.clone(), self.second.clone()])
    }

    fn read(&mut self, input: &Compound, de: &mut DeserializeDriver<'_>) -> Result<(), DeserializeError> {
        let mut pair: [Shared<Span>; 2] = Default::default();
        de.read_field(input, "pair", &mut pair)?;
        let [first, second] = pair;
        self.first = first;
        self.second = second;
        Ok(())
    }
}

#[test]
fn callbacks_run_around_each_direction() {
    let tracked = Tracked {
        value: 21,
        ..Tracked::default()
    };
    let tree = serialize(&tracked).unwrap();
    assert_eq!(*tracked.events.borrow(), ["pre_serialize", "post_serialize"]);

    let back: Tracked = deserialize(&tree, &TypeRegistry::new()).unwrap().unwrap();
    assert_eq!(back.events.into_inner(), ["pre_deserialize", "post_deserialize"]);
    assert_eq!(back.value_before_read, Some(0));
    assert_eq!(back.doubled, 42);
}

#[test]
fn manual_writers_replace_field_discovery() {
    let span = Span { start: 2, end: 5 };
    let tree = serialize(&span).unwrap();
    let root = tree.as_compound().unwrap();
    assert_eq!(root.len(), 1);
    assert_eq!(
        root.get("range"),
        Some(&Node::list([Node::from(2_u32), Node::from(5_u32)]))
    );

    let back: Span = deserialize(&tree, &TypeRegistry::new()).unwrap().unwrap();
    assert_eq!(back, span);
}

#[test]
fn manual_writers_keep_identity_tracking() {
    let span = Shared::new(Span { start: 1, end: 3 });
    let bundle = Bundle {
        first: span.clone(),
        second: span,
        loaded: false,
    };

    let tree = serialize(&bundle).unwrap();
    let back: Bundle = deserialize(&tree, &TypeRegistry::new()).unwrap().unwrap();
    assert!(back.loaded);
    assert!(back.first.ptr_eq(&back.second));
    assert_eq!(*back.first.borrow().unwrap(), Span { start: 1, end: 3 });
}
