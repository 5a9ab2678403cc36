//! Serde adapters for [`Node`](crate::Node).
//!
//! Boundary codecs (JSON, RON, binary formats...) consume the tree through
//! these implementations. The mapping keeps every primitive kind, list
//! order, compound entry order, identities and declared types:
//!
//! - `Null` is a unit value.
//! - Every other node is a single-entry map `{ kind: payload }`, where
//!   `kind` is a primitive kind name (`"i32"`, `"decimal"`...), `"list"`
//!   or `"compound"`.
//! - `decimal` payloads are strings, `bytes` payloads are byte buffers.
//! - A compound payload is a map with an optional `"id"` (omitted when `0`),
//!   an optional `"type"`, and an `"entries"` map.
//!
//! # Example
//!
//! ```
//! use vc_tree::{Compound, Identity, Node};
//!
//! let mut item = Compound::object(Identity::new(1), "demo::Item");
//! item.insert("x", 1_i32);
//!
//! let json = serde_json::to_string(&Node::from(item)).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"compound":{"id":1,"type":"demo::Item","entries":{"x":{"i32":1}}}}"#
//! );
//! ```

// -----------------------------------------------------------------------------
// Modules

mod de;
mod ser;

// -----------------------------------------------------------------------------
// Constants

const LIST: &str = "list";
const COMPOUND: &str = "compound";

const ID: &str = "id";
const TYPE: &str = "type";
const ENTRIES: &str = "entries";

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;

    use crate::{Bytes, Compound, Decimal, Identity, Node};

    fn sample() -> Node {
        let mut inner = Compound::object(Identity::new(2), "demo::Leaf");
        inner.insert("weight", 0.25_f64);
        inner.insert("ratio", 1.5_f32);

        let mut root = Compound::object(Identity::new(1), "demo::Root");
        root.insert("zeta", -3_i8);
        root.insert("alpha", 40_000_u16);
        root.insert("wide", i64::MIN);
        root.insert("count", u64::MAX);
        root.insert("flag", 1_u8);
        root.insert("on", true);
        root.insert("name", "root");
        root.insert("price", Decimal::new(-1250, 2));
        root.insert("nothing", Node::Null);
        root.insert("leaf", inner);
        root.insert("again", Compound::reference(Identity::new(2)));

        let mut plain = Compound::new();
        plain.insert("b", 2_i32);
        plain.insert("a", 1_i16);
        root.insert(
            "items",
            Node::list([Node::from(7_u32), Node::from(plain), Node::Null]),
        );
        Node::from(root)
    }

    #[test]
    fn json_round_trip() {
        let mut tree = sample();
        tree.as_compound_mut()
            .unwrap()
            .insert("blob", Bytes::from(vec![0_u8, 1, 255]));

        let text = serde_json::to_string(&tree).unwrap();
        let back: Node = serde_json::from_str(&text).unwrap();
        assert_eq!(back, tree);

        // Entry order survives even though keys are not sorted.
        let keys: vec::Vec<&str> = back.as_compound().unwrap().keys().collect();
        assert_eq!(keys[0], "zeta");
        assert_eq!(keys[1], "alpha");
    }

    #[test]
    fn ron_round_trip() {
        let tree = sample();
        let text = ron::to_string(&tree).unwrap();
        let back: Node = ron::from_str(&text).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn null_is_unit() {
        assert_eq!(serde_json::to_string(&Node::Null).unwrap(), "null");
        let back: Node = serde_json::from_str("null").unwrap();
        assert_eq!(back, Node::Null);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = serde_json::from_str::<Node>(r#"{"i128":1}"#).unwrap_err();
        assert!(err.to_string().contains("i128"));

        let err = serde_json::from_str::<Node>(r#"{"i8":1,"i16":2}"#);
        assert!(err.is_err());
    }

    #[test]
    fn plain_compound_omits_identity_and_type() {
        let plain: Compound = [("k", String::from("v"))].into_iter().collect();
        let text = serde_json::to_string(&Node::from(plain)).unwrap();
        assert_eq!(text, r#"{"compound":{"entries":{"k":{"string":"v"}}}}"#);
    }
}
