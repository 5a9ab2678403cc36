//! A self-describing, tagged property tree.
//!
//! Every value persisted by `vc_persist` ends up as a [`Node`]:
//!
//! - [`Node::Null`]: absence of a value.
//! - [`Node::Primitive`]: exactly one [`Primitive`] value.
//! - [`Node::List`]: ordered children.
//! - [`Node::Compound`]: string-keyed children kept in insertion order,
//!   plus an [`Identity`] and an optional declared type path.
//!
//! The tree has no knowledge of the object graph it came from. Identity `0`
//! is the null sentinel; any other identity names one object of the
//! originating graph, and a [`Compound`] that carries *only* an identity
//! is a back-reference to an object written earlier in the same tree.
//!
//! # Example
//!
//! ```
//! use vc_tree::{Compound, Identity, Node};
//!
//! let mut object = Compound::object(Identity::new(1), "demo::Item");
//! object.insert("x", 1_i32);
//! object.insert("y", "a");
//! object.insert("this", Compound::reference(Identity::new(1)));
//!
//! let tree = Node::from(object);
//! let this = tree.as_compound().unwrap().get("this").unwrap();
//! assert!(this.as_compound().unwrap().is_reference());
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod compound;
mod error;
mod identity;
mod node;
mod primitive;

#[cfg(feature = "serde")]
pub mod serde;

// -----------------------------------------------------------------------------
// Exports

pub use bytes::Bytes;
pub use rust_decimal::Decimal;

pub use compound::Compound;
pub use error::TreeError;
pub use identity::Identity;
pub use node::{Node, NodeKind};
pub use primitive::{Primitive, PrimitiveKind};
