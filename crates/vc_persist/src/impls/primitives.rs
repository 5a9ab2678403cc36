use alloc::string::String;

use vc_tree::{Bytes, Decimal, Primitive};

use crate::{Reflect, ReflectMut, ReflectRef};

impl_scalar!(bool, "bool", "bool", |v| Primitive::Bool(*v));
impl_scalar!(i8, "i8", "i8", |v| Primitive::I8(*v));
impl_scalar!(i16, "i16", "i16", |v| Primitive::I16(*v));
impl_scalar!(i32, "i32", "i32", |v| Primitive::I32(*v));
impl_scalar!(i64, "i64", "i64", |v| Primitive::I64(*v));
impl_scalar!(u8, "u8", "u8", |v| Primitive::U8(*v));
impl_scalar!(u16, "u16", "u16", |v| Primitive::U16(*v));
impl_scalar!(u32, "u32", "u32", |v| Primitive::U32(*v));
impl_scalar!(u64, "u64", "u64", |v| Primitive::U64(*v));
impl_scalar!(f32, "f32", "f32", |v| Primitive::F32(*v));
impl_scalar!(f64, "f64", "f64", |v| Primitive::F64(*v));
impl_scalar!(String, "alloc::string::String", "String", |v| Primitive::String(v.clone()));
impl_scalar!(Decimal, "vc_tree::Decimal", "Decimal", |v| Primitive::Decimal(*v));
impl_scalar!(Bytes, "bytes::Bytes", "Bytes", |v| Primitive::Bytes(v.clone()));

// Pointer-sized integers are written with the 64-bit kinds.
impl_scalar!(isize, "isize", "isize", |v| Primitive::I64(*v as i64));
impl_scalar!(usize, "usize", "usize", |v| Primitive::U64(*v as u64));

// -----------------------------------------------------------------------------
// Opaque

macro_rules! impl_opaque {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Opaque(self)
                }

                fn reflect_mut(&mut self) -> ReflectMut<'_> {
                    ReflectMut::Opaque(self)
                }
            }
        )*
    };
}

// No primitive kind holds these.
impl_opaque!((), i128, u128);

#[cfg(test)]
mod tests {
    use vc_tree::{Decimal, Node, Primitive};

    use crate::registry::TypeRegistry;
    use crate::{SerializeError, deserialize, serialize};

    fn round_trip<T>(value: T) -> T
    where
        T: crate::Reflect + Default,
    {
        let tree = serialize(&value).unwrap();
        deserialize::<T>(&tree, &TypeRegistry::new()).unwrap().unwrap()
    }

    #[test]
    fn primitives_keep_kind_and_value() {
        assert_eq!(serialize(&7_u16).unwrap(), Node::Primitive(Primitive::U16(7)));
        assert_eq!(serialize(&-7_isize).unwrap(), Node::Primitive(Primitive::I64(-7)));
        assert_eq!(serialize(&usize::MAX).unwrap(), Node::Primitive(Primitive::U64(u64::MAX)));

        assert!(round_trip(true));
        assert_eq!(round_trip(i8::MIN), i8::MIN);
        assert_eq!(round_trip(i64::MAX), i64::MAX);
        assert_eq!(round_trip(u64::MAX), u64::MAX);
        assert_eq!(round_trip(1.25_f32), 1.25);
        assert_eq!(round_trip(-0.5_f64), -0.5);
        assert_eq!(round_trip(String::from("hé")), "hé");
        let price = Decimal::new(-1999, 2);
        assert_eq!(round_trip(price), price);
        assert_eq!(round_trip(bytes::Bytes::from_static(b"\0\x01")).as_ref(), b"\0\x01");
    }

    #[test]
    fn wide_integers_are_unsupported() {
        assert!(matches!(
            serialize(&1_u128),
            Err(SerializeError::Unsupported { type_path: "u128", .. })
        ));
    }
}
