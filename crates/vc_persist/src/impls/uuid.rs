use alloc::string::ToString;

use ::uuid::Uuid;
use vc_tree::Primitive;

use crate::policy::{ConvertError, FromPrimitive};

impl FromPrimitive for Uuid {
    fn from_primitive(value: &Primitive) -> Result<Self, ConvertError> {
        match value {
            Primitive::String(text) => Uuid::parse_str(text).map_err(|err| ConvertError::Parse {
                to: "Uuid",
                reason: err.to_string(),
            }),
            Primitive::Bytes(bytes) if bytes.len() == 16 => {
                Uuid::from_slice(bytes).map_err(|err| ConvertError::Parse {
                    to: "Uuid",
                    reason: err.to_string(),
                })
            }
            other => Err(ConvertError::Incompatible {
                from: other.kind(),
                to: "Uuid",
            }),
        }
    }
}

impl_scalar!(Uuid, "uuid::Uuid", "Uuid", |v| Primitive::String(v.to_string()));

#[cfg(test)]
mod tests {
    use ::uuid::Uuid;
    use vc_tree::{Bytes, Node};

    use crate::policy::ConvertError;
    use crate::registry::TypeRegistry;
    use crate::{DeserializeError, deserialize, serialize};

    const TEXT: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    #[test]
    fn uuids_are_hyphenated_strings() {
        let id = Uuid::parse_str(TEXT).unwrap();
        let tree = serialize(&id).unwrap();
        assert_eq!(tree, Node::from(TEXT));

        let registry = TypeRegistry::new();
        assert_eq!(deserialize::<Uuid>(&tree, &registry).unwrap(), Some(id));

        let raw = Node::from(Bytes::copy_from_slice(id.as_bytes()));
        assert_eq!(deserialize::<Uuid>(&raw, &registry).unwrap(), Some(id));
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = deserialize::<Uuid>(&Node::from("not-a-uuid"), &TypeRegistry::new()).unwrap_err();
        assert!(matches!(
            err,
            DeserializeError::Convert {
                source: ConvertError::Parse { to: "Uuid", .. },
                ..
            }
        ));
    }
}
