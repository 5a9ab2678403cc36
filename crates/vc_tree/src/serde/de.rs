use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde_core::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

use super::{COMPOUND, ENTRIES, ID, LIST, TYPE};
use crate::{Bytes, Compound, Decimal, Identity, Node, Primitive, PrimitiveKind};

const KINDS: &[&str] = &[
    "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "f32", "f64", "decimal", "bool",
    "string", "bytes", LIST, COMPOUND,
];

// -----------------------------------------------------------------------------
// Node

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a unit value or a single-entry map tagged with a node kind")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let Some(kind) = map.next_key::<String>()? else {
            return Err(de::Error::invalid_length(0, &self));
        };

        let node = match kind.as_str() {
            LIST => Node::List(map.next_value::<Vec<Node>>()?),
            COMPOUND => Node::Compound(map.next_value::<CompoundPayload>()?.0),
            other => match PrimitiveKind::from_name(other) {
                Some(kind) => Node::Primitive(read_primitive(kind, &mut map)?),
                None => return Err(de::Error::unknown_variant(other, KINDS)),
            },
        };

        if map.next_key::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(2, &self));
        }
        Ok(node)
    }
}

fn read_primitive<'de, A: MapAccess<'de>>(
    kind: PrimitiveKind,
    map: &mut A,
) -> Result<Primitive, A::Error> {
    Ok(match kind {
        PrimitiveKind::I8 => Primitive::I8(map.next_value()?),
        PrimitiveKind::I16 => Primitive::I16(map.next_value()?),
        PrimitiveKind::I32 => Primitive::I32(map.next_value()?),
        PrimitiveKind::I64 => Primitive::I64(map.next_value()?),
        PrimitiveKind::U8 => Primitive::U8(map.next_value()?),
        PrimitiveKind::U16 => Primitive::U16(map.next_value()?),
        PrimitiveKind::U32 => Primitive::U32(map.next_value()?),
        PrimitiveKind::U64 => Primitive::U64(map.next_value()?),
        PrimitiveKind::F32 => Primitive::F32(map.next_value()?),
        PrimitiveKind::F64 => Primitive::F64(map.next_value()?),
        PrimitiveKind::Bool => Primitive::Bool(map.next_value()?),
        PrimitiveKind::String => Primitive::String(map.next_value()?),
        PrimitiveKind::Decimal => {
            let text: String = map.next_value()?;
            let value = text.parse::<Decimal>().map_err(de::Error::custom)?;
            Primitive::Decimal(value)
        }
        PrimitiveKind::Bytes => Primitive::Bytes(map.next_value::<ByteBuf>()?.0),
    })
}

// -----------------------------------------------------------------------------
// Bytes

struct ByteBuf(Bytes);

impl<'de> Deserialize<'de> for ByteBuf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_byte_buf(ByteBufVisitor)
    }
}

struct ByteBufVisitor;

impl<'de> Visitor<'de> for ByteBufVisitor {
    type Value = ByteBuf;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a byte buffer")
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<ByteBuf, E> {
        Ok(ByteBuf(Bytes::copy_from_slice(v)))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<ByteBuf, E> {
        Ok(ByteBuf(Bytes::from(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ByteBuf, E> {
        Ok(ByteBuf(Bytes::copy_from_slice(v.as_bytes())))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ByteBuf, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        Ok(ByteBuf(Bytes::from(bytes)))
    }
}

// -----------------------------------------------------------------------------
// Compound

struct CompoundPayload(Compound);

impl<'de> Deserialize<'de> for CompoundPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CompoundVisitor)
    }
}

struct CompoundVisitor;

impl<'de> Visitor<'de> for CompoundVisitor {
    type Value = CompoundPayload;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a compound payload")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<CompoundPayload, A::Error> {
        let mut identity = None;
        let mut declared_type = None;
        let mut entries = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                ID if identity.is_none() => identity = Some(map.next_value::<u32>()?),
                TYPE if declared_type.is_none() => declared_type = Some(map.next_value::<String>()?),
                ENTRIES if entries.is_none() => entries = Some(map.next_value::<Entries>()?.0),
                ID | TYPE | ENTRIES => return Err(de::Error::custom(format_args!("duplicate field `{key}`"))),
                other => return Err(de::Error::unknown_field(other, &[ID, TYPE, ENTRIES])),
            }
        }

        let mut compound = entries.unwrap_or_default();
        compound.set_identity(Identity::new(identity.unwrap_or(0)));
        compound.set_declared_type(declared_type);
        Ok(CompoundPayload(compound))
    }
}

struct Entries(Compound);

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }
}

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = Entries;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of compound entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Entries, A::Error> {
        let mut compound = Compound::with_capacity(map.size_hint().unwrap_or(0).min(256));
        while let Some((key, value)) = map.next_entry::<String, Node>()? {
            if compound.insert(key, value).is_some() {
                return Err(de::Error::custom("duplicate compound entry"));
            }
        }
        Ok(Entries(compound))
    }
}
