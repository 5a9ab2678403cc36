use core::time::Duration;

use vc_tree::{Primitive, PrimitiveKind};

use crate::policy::{ConvertError, FromPrimitive};

/// Ticks per second; one tick is 100 ns.
pub(crate) const TICKS_PER_SECOND: i64 = 10_000_000;
pub(crate) const NANOS_PER_TICK: u32 = 100;

fn duration_ticks(duration: &Duration) -> Result<i64, ConvertError> {
    i64::try_from(duration.as_nanos() / u128::from(NANOS_PER_TICK)).map_err(|_| {
        ConvertError::Unrepresentable {
            type_path: "core::time::Duration",
            to: PrimitiveKind::I64,
        }
    })
}

impl FromPrimitive for Duration {
    fn from_primitive(value: &Primitive) -> Result<Self, ConvertError> {
        let ticks = i64::from_primitive(value)?;
        if ticks < 0 {
            return Err(ConvertError::OutOfRange {
                from: value.kind(),
                to: "Duration",
            });
        }
        let secs = ticks / TICKS_PER_SECOND;
        let nanos = (ticks % TICKS_PER_SECOND) as u32 * NANOS_PER_TICK;
        Ok(Duration::new(secs as u64, nanos))
    }
}

impl_scalar!(Duration, "core::time::Duration", "Duration", fallible |v| {
    duration_ticks(v).map(Primitive::I64)
});

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use vc_tree::{Node, Primitive, PrimitiveKind};

    use crate::policy::ConvertError;
    use crate::registry::TypeRegistry;
    use crate::{DeserializeError, SerializeError, deserialize, serialize};

    #[test]
    fn durations_are_ticks() {
        let span = Duration::new(2, 500);
        let tree = serialize(&span).unwrap();
        assert_eq!(tree, Node::Primitive(Primitive::I64(20_000_005)));

        let back: Duration = deserialize(&tree, &TypeRegistry::new()).unwrap().unwrap();
        assert_eq!(back, span);
    }

    #[test]
    fn sub_tick_precision_is_dropped() {
        let tree = serialize(&Duration::from_nanos(199)).unwrap();
        assert_eq!(tree, Node::Primitive(Primitive::I64(1)));
    }

    #[test]
    fn negative_ticks_are_out_of_range() {
        let err = deserialize::<Duration>(&Node::from(-1_i64), &TypeRegistry::new()).unwrap_err();
        assert!(matches!(
            err,
            DeserializeError::Convert {
                source: ConvertError::OutOfRange { to: "Duration", .. },
                ..
            }
        ));
    }

    #[test]
    fn durations_beyond_the_tick_range_fail_to_write() {
        let largest = Duration::from_nanos(i64::MAX as u64 / 100 * 100);
        assert!(serialize(&largest).is_ok());

        let err = serialize(&Duration::MAX).unwrap_err();
        assert_eq!(
            err,
            SerializeError::Convert {
                source: ConvertError::Unrepresentable {
                    type_path: "core::time::Duration",
                    to: PrimitiveKind::I64,
                },
                path: String::from("root"),
            }
        );
    }
}
