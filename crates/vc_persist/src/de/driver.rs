use alloc::boxed::Box;
use alloc::string::{String, ToString};

use vc_tree::{Compound, Node, Primitive};

use crate::kinds::{SharedValue, Struct};
use crate::path::FieldPath;
use crate::policy::{self, ConvertError};
use crate::registry::{TypeRegistry, TypeTraitDefault, TypeTraitShared};
use crate::{
    AssetRef, DeserializeError, Diagnostic, IdentityContext, ObjectHandle, Reflect, ReflectMut,
};

// -----------------------------------------------------------------------------
// Outcome

/// What happened to a target during a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The target holds the value read from the tree.
    Populated,
    /// The node was null; the target is null or left at its default.
    Null,
    /// The node could not be resolved and the target was set to null.
    /// A [`Diagnostic`] was recorded.
    Unresolved,
}

fn node_kind_name(node: &Node) -> &'static str {
    match node {
        Node::Null => "null",
        Node::Primitive(primitive) => primitive.kind().name(),
        Node::List(_) => "list",
        Node::Compound(compound) if compound.is_reference() => "reference",
        Node::Compound(_) => "compound",
    }
}

// -----------------------------------------------------------------------------
// DeserializeDriver

/// Walks a property tree and fills values from it.
///
/// Objects are created through the [`TypeRegistry`] when a compound
/// declares a type the target reference does not hold statically. Each new
/// object is registered under its identity before its fields are read,
/// which is what makes back-references and cycles resolve.
///
/// Manual readers receive the driver to read nested values.
pub struct DeserializeDriver<'a> {
    registry: &'a TypeRegistry,
    ctx: &'a mut IdentityContext,
    path: FieldPath,
}

impl<'a> DeserializeDriver<'a> {
    pub fn new(registry: &'a TypeRegistry, ctx: &'a mut IdentityContext) -> Self {
        Self {
            registry,
            ctx,
            path: FieldPath::default(),
        }
    }

    #[inline]
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    #[inline]
    pub fn context(&self) -> &IdentityContext {
        self.ctx
    }

    /// The location currently being read, as used in error messages.
    pub fn path(&self) -> String {
        self.path.render()
    }

    fn shape(&self, expected: &'static str, found: &Node) -> DeserializeError {
        DeserializeError::ShapeMismatch {
            expected,
            found: node_kind_name(found),
            path: self.path.render(),
        }
    }

    /// Fills `target` from `node`.
    pub fn read_into(
        &mut self,
        node: &Node,
        target: &mut dyn Reflect,
    ) -> Result<Outcome, DeserializeError> {
        match target.reflect_mut() {
            ReflectMut::Node(slot) => {
                *slot = node.clone();
                Ok(Outcome::Populated)
            }
            ReflectMut::Option(option) => {
                if node.is_null() {
                    option.set_none();
                    return Ok(Outcome::Null);
                }
                let outcome = self.read_into(node, option.get_or_insert_default())?;
                if outcome != Outcome::Populated {
                    option.set_none();
                }
                Ok(outcome)
            }
            ReflectMut::Shared(shared) => self.read_shared(node, shared),
            _ if node.is_null() => Ok(Outcome::Null),
            ReflectMut::Scalar(scalar) => {
                let Node::Primitive(primitive) = node else {
                    return Err(self.shape("primitive", node));
                };
                scalar
                    .set_primitive(primitive)
                    .map_err(|source| DeserializeError::Convert {
                        source,
                        path: self.path.render(),
                    })?;
                Ok(Outcome::Populated)
            }
            ReflectMut::Asset(asset) => match node {
                Node::Primitive(Primitive::String(id)) => {
                    *asset = AssetRef::new(id.clone());
                    Ok(Outcome::Populated)
                }
                Node::Primitive(primitive) => Err(DeserializeError::Convert {
                    source: ConvertError::Incompatible {
                        from: primitive.kind(),
                        to: "AssetRef",
                    },
                    path: self.path.render(),
                }),
                other => Err(self.shape("string", other)),
            },
            ReflectMut::Array(array) => {
                let Node::List(items) = node else {
                    return Err(self.shape("list", node));
                };
                array
                    .reset(items.len())
                    .map_err(|expected| DeserializeError::LengthMismatch {
                        expected,
                        found: items.len(),
                        path: self.path.render(),
                    })?;
                for (index, item) in items.iter().enumerate() {
                    let Some(slot) = array.get_mut(index) else {
                        break;
                    };
                    self.path.push_index(index);
                    let result = self.read_into(item, slot);
                    self.path.pop();
                    result?;
                }
                Ok(Outcome::Populated)
            }
            ReflectMut::List(list) => {
                let Node::List(items) = node else {
                    return Err(self.shape("list", node));
                };
                list.clear();
                for (index, item) in items.iter().enumerate() {
                    self.path.push_index(index);
                    let result = self.read_into(item, list.push_default());
                    self.path.pop();
                    result?;
                }
                Ok(Outcome::Populated)
            }
            ReflectMut::Map(map) => {
                let Node::Compound(compound) = node else {
                    return Err(self.shape("compound", node));
                };
                map.clear();
                for (key, item) in compound.iter() {
                    self.path.push_key(key);
                    let result = self.read_into(item, map.insert_default(key.to_string()));
                    self.path.pop();
                    result?;
                }
                Ok(Outcome::Populated)
            }
            ReflectMut::Struct(object) => {
                let Node::Compound(compound) = node else {
                    return Err(self.shape("compound", node));
                };
                if compound.is_reference() {
                    // Only shared references can alias an object.
                    return Err(self.shape("object", node));
                }
                self.populate_struct(compound, object)?;
                Ok(Outcome::Populated)
            }
            ReflectMut::Opaque(value) => Err(DeserializeError::Unsupported {
                type_path: value.reflect_type_path(),
                path: self.path.render(),
            }),
        }
    }

    /// Fills `target` from the entry `name` of `input`.
    ///
    /// Meant for manual readers. A missing entry leaves the target as it is
    /// and yields [`Outcome::Null`].
    pub fn read_field(
        &mut self,
        input: &Compound,
        name: &'static str,
        target: &mut dyn Reflect,
    ) -> Result<Outcome, DeserializeError> {
        let Some(node) = input.get(name) else {
            return Ok(Outcome::Null);
        };
        self.path.push_field(name);
        let result = self.read_into(node, target);
        self.path.pop();
        result
    }

    fn unresolved(&mut self, shared: &mut dyn SharedValue, diagnostic: Diagnostic) -> Outcome {
        self.ctx.report(diagnostic);
        shared.set_handle(None);
        Outcome::Unresolved
    }

    fn attach(
        &self,
        shared: &mut dyn SharedValue,
        handle: &ObjectHandle,
        declared: Option<&str>,
    ) -> Result<(), DeserializeError> {
        if shared.set_handle(Some(handle)) {
            return Ok(());
        }
        let declared = declared
            .or_else(|| handle.type_path())
            .unwrap_or("<unknown>");
        Err(DeserializeError::TypeMismatch {
            declared: declared.to_string(),
            expected: shared.target_type_path(),
            path: self.path.render(),
        })
    }

    fn read_shared(
        &mut self,
        node: &Node,
        shared: &mut dyn SharedValue,
    ) -> Result<Outcome, DeserializeError> {
        let compound = match node {
            Node::Null => {
                shared.set_handle(None);
                return Ok(Outcome::Null);
            }
            Node::Compound(compound) => compound,
            other => return Err(self.shape("compound", other)),
        };

        let identity = compound.identity();
        if let Some(existing) = self.ctx.resolve(identity).cloned() {
            log::trace!("object {identity} at {} resolved to a known instance", self.path);
            self.attach(shared, &existing, None)?;
            return Ok(Outcome::Populated);
        }
        if compound.is_reference() {
            let diagnostic = Diagnostic::DanglingReference {
                identity,
                path: self.path.render(),
            };
            return Ok(self.unresolved(shared, diagnostic));
        }

        let declared = compound.declared_type();
        let handle = match declared {
            Some(declared) if declared == shared.target_type_path() => shared.construct_target(),
            Some(declared) => match policy::resolve_type(self.registry, declared) {
                Some(meta) => meta
                    .get_trait::<TypeTraitShared>()
                    .map(TypeTraitShared::construct),
                None => {
                    let diagnostic = Diagnostic::UnresolvedType {
                        type_path: declared.to_string(),
                        identity,
                        path: self.path.render(),
                    };
                    return Ok(self.unresolved(shared, diagnostic));
                }
            },
            None => match shared.construct_target() {
                Some(handle) => Some(handle),
                None => {
                    let diagnostic = Diagnostic::MissingDeclaredType {
                        identity,
                        path: self.path.render(),
                    };
                    return Ok(self.unresolved(shared, diagnostic));
                }
            },
        };
        let Some(handle) = handle else {
            // Registered, but not as something a reference can point at.
            return Err(DeserializeError::TypeMismatch {
                declared: declared.unwrap_or_default().to_string(),
                expected: shared.target_type_path(),
                path: self.path.render(),
            });
        };

        self.attach(shared, &handle, declared)?;
        // Registered before population so references back to it resolve.
        self.ctx.register(identity, handle.clone());
        self.fill_object(&handle, compound)?;
        Ok(Outcome::Populated)
    }

    fn fill_object(&mut self, handle: &ObjectHandle, compound: &Compound) -> Result<(), DeserializeError> {
        let object = handle.object().clone();
        let Ok(mut borrowed) = object.try_borrow_mut() else {
            return Err(DeserializeError::Borrowed {
                type_path: handle.type_path().unwrap_or("<borrowed>"),
                path: self.path.render(),
            });
        };
        let type_path = borrowed.reflect_type_path();
        let ReflectMut::Struct(target) = borrowed.reflect_mut() else {
            return Err(DeserializeError::Unsupported {
                type_path,
                path: self.path.render(),
            });
        };
        self.populate_struct(compound, target)
    }

    fn populate_struct(
        &mut self,
        compound: &Compound,
        object: &mut dyn Struct,
    ) -> Result<(), DeserializeError> {
        let info = object.info();
        log::trace!(
            "reading {} as object {} at {}",
            info.type_path(),
            compound.identity(),
            self.path,
        );

        if let Some(callbacks) = object.callbacks_mut() {
            callbacks.pre_deserialize();
        }

        if object.manual().is_some() {
            if let Some(manual) = object.manual_mut() {
                manual.read(compound, self)?;
            }
        } else {
            for (index, field) in info.fields().iter().enumerate() {
                // Missing data keeps the default.
                let Some(node) = policy::lookup_field(compound, field) else {
                    continue;
                };
                let Some(slot) = object.field_at_mut(index) else {
                    continue;
                };
                self.path.push_field(field.name());
                let result = self.read_into(node, slot);
                self.path.pop();
                result?;
            }
        }

        if let Some(callbacks) = object.callbacks_mut() {
            callbacks.post_deserialize();
        }
        Ok(())
    }

    /// Reads a root of unknown static type.
    pub(crate) fn read_dynamic(
        &mut self,
        node: &Node,
    ) -> Result<Option<Box<dyn Reflect>>, DeserializeError> {
        let compound = match node {
            Node::Null => return Ok(None),
            Node::Compound(compound) => compound,
            other => return Err(self.shape("compound", other)),
        };
        let identity = compound.identity();
        if compound.is_reference() {
            self.ctx.report(Diagnostic::DanglingReference {
                identity,
                path: self.path.render(),
            });
            return Ok(None);
        }
        let Some(declared) = compound.declared_type() else {
            self.ctx.report(Diagnostic::MissingDeclaredType {
                identity,
                path: self.path.render(),
            });
            return Ok(None);
        };
        let Some(meta) = policy::resolve_type(self.registry, declared) else {
            self.ctx.report(Diagnostic::UnresolvedType {
                type_path: declared.to_string(),
                identity,
                path: self.path.render(),
            });
            return Ok(None);
        };
        let Some(generator) = meta.get_trait::<TypeTraitDefault>() else {
            return Err(DeserializeError::TypeMismatch {
                declared: declared.to_string(),
                expected: "a type with a default value",
                path: self.path.render(),
            });
        };
        let mut value = generator.default();
        self.read_into(node, &mut *value)?;
        Ok(Some(value))
    }

    /// Refills an existing root in place when it is a non-null shared
    /// reference to an object of the declared type.
    pub(crate) fn refill(
        &mut self,
        node: &Node,
        target: &mut dyn Reflect,
    ) -> Result<Outcome, DeserializeError> {
        if let ReflectMut::Shared(shared) = target.reflect_mut()
            && let Some(handle) = shared.handle()
            && let Node::Compound(compound) = node
            && !compound.is_reference()
            && self.same_type(compound.declared_type(), &handle)
        {
            self.ctx.register(compound.identity(), handle.clone());
            self.fill_object(&handle, compound)?;
            return Ok(Outcome::Populated);
        }
        self.read_into(node, target)
    }

    fn same_type(&self, declared: Option<&str>, handle: &ObjectHandle) -> bool {
        let Some(declared) = declared else {
            return true;
        };
        let Some(actual) = handle.type_path() else {
            return false;
        };
        declared == actual
            || policy::resolve_type(self.registry, declared).is_some_and(|meta| meta.type_path() == actual)
    }
}
