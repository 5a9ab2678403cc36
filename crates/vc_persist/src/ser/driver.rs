use alloc::string::String;
use alloc::vec::Vec;

use vc_tree::{Compound, Identity, Node};

use crate::kinds::{SharedValue, Struct};
use crate::path::FieldPath;
use crate::{IdentityContext, Reflect, ReflectRef, SerializeError, policy};

// -----------------------------------------------------------------------------
// SerializeDriver

/// Walks a value and produces its property tree.
///
/// Shared objects are written once: the first occurrence becomes a compound
/// carrying a fresh identity and the declared type, later occurrences
/// become reference-only compounds. Values held by value (including plain
/// structs) are never tracked and are written with the null identity.
///
/// Manual writers receive the driver so nested values keep this tracking.
pub struct SerializeDriver<'a> {
    ctx: &'a mut IdentityContext,
    path: FieldPath,
}

impl<'a> SerializeDriver<'a> {
    pub fn new(ctx: &'a mut IdentityContext) -> Self {
        Self {
            ctx,
            path: FieldPath::default(),
        }
    }

    #[inline]
    pub fn context(&self) -> &IdentityContext {
        self.ctx
    }

    /// The location currently being written, as used in error messages.
    pub fn path(&self) -> String {
        self.path.render()
    }

    /// Converts one value.
    pub fn serialize(&mut self, value: &dyn Reflect) -> Result<Node, SerializeError> {
        match value.reflect_ref() {
            ReflectRef::Node(node) => Ok(node.clone()),
            ReflectRef::Scalar(scalar) => scalar
                .to_primitive()
                .map(Node::Primitive)
                .map_err(|source| SerializeError::Convert {
                    source,
                    path: self.path.render(),
                }),
            ReflectRef::Asset(asset) => {
                if asset.is_empty() {
                    return Ok(Node::Null);
                }
                self.ctx.add_dependency(asset);
                Ok(Node::from(asset.id()))
            }
            ReflectRef::Array(array) => {
                let mut items = Vec::with_capacity(array.len());
                for index in 0..array.len() {
                    let Some(item) = array.get(index) else { break };
                    items.push(self.serialize_at_index(index, item)?);
                }
                Ok(Node::List(items))
            }
            ReflectRef::Map(map) => {
                let mut out = Compound::with_capacity(map.len());
                for (key, item) in map.entries() {
                    self.path.push_key(key);
                    let node = self.serialize(item);
                    self.path.pop();
                    out.insert(key, node?);
                }
                Ok(Node::Compound(out))
            }
            ReflectRef::List(list) => {
                let mut items = Vec::with_capacity(list.len());
                for index in 0..list.len() {
                    let Some(item) = list.get(index) else { break };
                    items.push(self.serialize_at_index(index, item)?);
                }
                Ok(Node::List(items))
            }
            ReflectRef::Option(option) => match option.get() {
                Some(inner) => self.serialize(inner),
                None => Ok(Node::Null),
            },
            ReflectRef::Shared(shared) => self.write_shared(shared),
            ReflectRef::Struct(object) => self.write_struct(object, Identity::NULL).map(Node::Compound),
            ReflectRef::Opaque(value) => Err(SerializeError::Unsupported {
                type_path: value.reflect_type_path(),
                path: self.path.render(),
            }),
        }
    }

    /// Converts `value` and stores it in `out` under `name`.
    ///
    /// Meant for manual writers.
    pub fn write_field(
        &mut self,
        out: &mut Compound,
        name: &'static str,
        value: &dyn Reflect,
    ) -> Result<(), SerializeError> {
        self.path.push_field(name);
        let node = self.serialize(value);
        self.path.pop();
        out.insert(name, node?);
        Ok(())
    }

    fn serialize_at_index(&mut self, index: usize, item: &dyn Reflect) -> Result<Node, SerializeError> {
        self.path.push_index(index);
        let node = self.serialize(item);
        self.path.pop();
        node
    }

    fn write_shared(&mut self, shared: &dyn SharedValue) -> Result<Node, SerializeError> {
        let Some(handle) = shared.handle() else {
            return Ok(Node::Null);
        };
        if let Some(identity) = self.ctx.identity_of(&handle) {
            log::trace!("{} at {} refers to object {identity}", shared.target_type_path(), self.path);
            return Ok(Node::Compound(Compound::reference(identity)));
        }

        let object = handle.object().clone();
        let Ok(borrowed) = object.try_borrow() else {
            return Err(SerializeError::Borrowed {
                type_path: shared.target_type_path(),
                path: self.path.render(),
            });
        };
        let ReflectRef::Struct(target) = borrowed.reflect_ref() else {
            return Err(SerializeError::Unsupported {
                type_path: borrowed.reflect_type_path(),
                path: self.path.render(),
            });
        };

        // Assigned before the fields are walked, so cycles end in a reference.
        let identity = self
            .ctx
            .assign(&handle)
            .ok_or(SerializeError::IdentityOverflow)?;
        self.write_struct(target, identity).map(Node::Compound)
    }

    fn write_struct(&mut self, object: &dyn Struct, identity: Identity) -> Result<Compound, SerializeError> {
        let info = object.info();
        log::trace!("writing {} as object {identity} at {}", info.type_path(), self.path);

        let mut out = Compound::object(identity, info.type_path());
        if let Some(callbacks) = object.callbacks() {
            callbacks.pre_serialize();
        }

        if let Some(manual) = object.manual() {
            manual.write(&mut out, self)?;
        } else {
            for (index, field) in info.fields().iter().enumerate() {
                let Some(value) = object.field_at(index) else {
                    continue;
                };
                if field.omit_when_null() && policy::is_null(value) {
                    continue;
                }
                // A name shared with a base field keeps the base's position
                // and takes the most derived value.
                self.write_field(&mut out, field.name(), value)?;
            }
        }

        if let Some(callbacks) = object.callbacks() {
            callbacks.post_serialize();
        }
        Ok(out)
    }
}
