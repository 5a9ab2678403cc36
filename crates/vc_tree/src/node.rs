use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use bytes::Bytes;

use crate::{Compound, Decimal, Primitive, PrimitiveKind, TreeError};

// -----------------------------------------------------------------------------
// Node

/// One node of a property tree.
///
/// A node has exactly one kind. Cloning a node deep-copies the whole subtree.
///
/// # Examples
///
/// ```
/// use vc_tree::{Node, NodeKind, PrimitiveKind};
///
/// let list = Node::list([Node::from(1_u8), Node::from("two"), Node::Null]);
/// assert_eq!(list.kind(), NodeKind::List);
/// assert_eq!(list.at(1).unwrap().kind(), NodeKind::Primitive(PrimitiveKind::String));
/// assert!(list.at(3).is_err());
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Node {
    #[default]
    Null,
    Primitive(Primitive),
    List(Vec<Node>),
    Compound(Compound),
}

/// The kind of a [`Node`], used in diagnostics and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Primitive(PrimitiveKind),
    List,
    Compound,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Primitive(kind) => write!(f, "primitive `{kind}`"),
            Self::List => f.write_str("list"),
            Self::Compound => f.write_str("compound"),
        }
    }
}

impl Node {
    /// Creates a list node from its children.
    pub fn list(children: impl IntoIterator<Item = Node>) -> Self {
        Self::List(children.into_iter().collect())
    }

    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Null => NodeKind::Null,
            Self::Primitive(p) => NodeKind::Primitive(p.kind()),
            Self::List(_) => NodeKind::List,
            Self::Compound(_) => NodeKind::Compound,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub const fn as_list(&self) -> Option<&Vec<Node>> {
        match self {
            Self::List(children) => Some(children),
            _ => None,
        }
    }

    pub const fn as_list_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::List(children) => Some(children),
            _ => None,
        }
    }

    pub const fn as_compound(&self) -> Option<&Compound> {
        match self {
            Self::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    pub const fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Self::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    /// Returns the child of a list node at `index`.
    ///
    /// Fails with [`TreeError::IndexOutOfRange`] past the end, and with
    /// [`TreeError::NotAList`] when this node is not a list.
    pub fn at(&self, index: usize) -> Result<&Node, TreeError> {
        match self {
            Self::List(children) => children.get(index).ok_or(TreeError::IndexOutOfRange {
                index,
                len: children.len(),
            }),
            other => Err(TreeError::NotAList {
                found: other.kind(),
            }),
        }
    }

    /// Looks up `key` in a compound node.
    ///
    /// Fails with [`TreeError::MissingKey`] when absent, and with
    /// [`TreeError::NotACompound`] when this node is not a compound.
    pub fn field(&self, key: &str) -> Result<&Node, TreeError> {
        match self {
            Self::Compound(compound) => compound.lookup(key),
            other => Err(TreeError::NotACompound {
                found: other.kind(),
            }),
        }
    }
}

macro_rules! impl_from_for_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Primitive(Primitive::from(value))
                }
            }
        )*
    };
}

impl_from_for_node!(
    i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Decimal, bool, String, &str, Bytes, Vec<u8>,
);

impl From<Primitive> for Node {
    #[inline]
    fn from(value: Primitive) -> Self {
        Self::Primitive(value)
    }
}

impl From<Compound> for Node {
    #[inline]
    fn from(value: Compound) -> Self {
        Self::Compound(value)
    }
}

impl From<Vec<Node>> for Node {
    #[inline]
    fn from(value: Vec<Node>) -> Self {
        Self::List(value)
    }
}

impl FromIterator<Node> for Node {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self::list(iter)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Node, NodeKind};
    use crate::{Compound, Identity, Primitive, TreeError};
    use alloc::vec;

    #[test]
    fn clone_is_deep() {
        let mut inner = Compound::new();
        inner.insert("v", 1_i32);
        let original = Node::list([Node::from(inner)]);

        let mut copy = original.clone();
        copy.as_list_mut().unwrap()[0]
            .as_compound_mut()
            .unwrap()
            .insert("v", 2_i32);

        assert_eq!(original.at(0).unwrap().field("v").unwrap(), &Node::from(1_i32));
        assert_eq!(copy.at(0).unwrap().field("v").unwrap(), &Node::from(2_i32));
    }

    #[test]
    fn structural_errors() {
        let node = Node::from(5_u8);
        assert_eq!(
            node.at(0),
            Err(TreeError::NotAList {
                found: NodeKind::Primitive(crate::PrimitiveKind::U8)
            })
        );
        assert!(matches!(node.field("x"), Err(TreeError::NotACompound { .. })));

        let list: Node = vec![Node::Null].into();
        assert_eq!(
            list.at(4),
            Err(TreeError::IndexOutOfRange { index: 4, len: 1 })
        );
    }

    #[test]
    fn primitive_conversions_keep_kind() {
        assert_eq!(Node::from(1_i8), Node::Primitive(Primitive::I8(1)));
        assert_eq!(Node::from(1_u64), Node::Primitive(Primitive::U64(1)));
        assert_ne!(Node::from(1_u8), Node::from(1_i8));
        assert_eq!(
            Node::from(Compound::reference(Identity::new(3))).kind(),
            NodeKind::Compound
        );
    }
}
