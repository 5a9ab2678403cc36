use alloc::string::ToString;

use serde_core::ser::{Serialize, SerializeMap, Serializer};

use super::{COMPOUND, ENTRIES, ID, LIST, TYPE};
use crate::{Compound, Node, Primitive};

// -----------------------------------------------------------------------------
// Node

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Primitive(primitive) => primitive.serialize(serializer),
            Node::List(children) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(LIST, children)?;
                map.end()
            }
            Node::Compound(compound) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(COMPOUND, &CompoundPayload(compound))?;
                map.end()
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Primitive

impl Serialize for Primitive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        let kind = self.kind().name();
        match self {
            Primitive::I8(v) => map.serialize_entry(kind, v)?,
            Primitive::I16(v) => map.serialize_entry(kind, v)?,
            Primitive::I32(v) => map.serialize_entry(kind, v)?,
            Primitive::I64(v) => map.serialize_entry(kind, v)?,
            Primitive::U8(v) => map.serialize_entry(kind, v)?,
            Primitive::U16(v) => map.serialize_entry(kind, v)?,
            Primitive::U32(v) => map.serialize_entry(kind, v)?,
            Primitive::U64(v) => map.serialize_entry(kind, v)?,
            Primitive::F32(v) => map.serialize_entry(kind, v)?,
            Primitive::F64(v) => map.serialize_entry(kind, v)?,
            Primitive::Decimal(v) => map.serialize_entry(kind, &v.to_string())?,
            Primitive::Bool(v) => map.serialize_entry(kind, v)?,
            Primitive::String(v) => map.serialize_entry(kind, v)?,
            Primitive::Bytes(v) => map.serialize_entry(kind, &RawBytes(v))?,
        }
        map.end()
    }
}

struct RawBytes<'a>(&'a [u8]);

impl Serialize for RawBytes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.0)
    }
}

// -----------------------------------------------------------------------------
// Compound

struct CompoundPayload<'a>(&'a Compound);

impl Serialize for CompoundPayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let compound = self.0;
        let has_id = !compound.identity().is_null();
        let len = 1 + usize::from(has_id) + usize::from(compound.declared_type().is_some());

        let mut map = serializer.serialize_map(Some(len))?;
        if has_id {
            map.serialize_entry(ID, &compound.identity().get())?;
        }
        if let Some(declared_type) = compound.declared_type() {
            map.serialize_entry(TYPE, declared_type)?;
        }
        map.serialize_entry(ENTRIES, &Entries(compound))?;
        map.end()
    }
}

struct Entries<'a>(&'a Compound);

impl Serialize for Entries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
