use ::chrono::{DateTime, NaiveDateTime, Utc};
use vc_tree::{Primitive, PrimitiveKind};

use super::time::{NANOS_PER_TICK, TICKS_PER_SECOND};
use crate::policy::{ConvertError, FromPrimitive};

/// Seconds from 0001-01-01T00:00:00Z to the Unix epoch.
const EPOCH_OFFSET_SECS: i64 = 62_135_596_800;

fn to_ticks(time: &DateTime<Utc>, type_path: &'static str) -> Result<i64, ConvertError> {
    let secs = i128::from(time.timestamp()) + i128::from(EPOCH_OFFSET_SECS);
    let ticks = secs * i128::from(TICKS_PER_SECOND)
        + i128::from(time.timestamp_subsec_nanos() / NANOS_PER_TICK);
    i64::try_from(ticks).map_err(|_| ConvertError::Unrepresentable {
        type_path,
        to: PrimitiveKind::I64,
    })
}

fn from_ticks(value: &Primitive, to: &'static str) -> Result<DateTime<Utc>, ConvertError> {
    let ticks = i64::from_primitive(value)?;
    let secs = ticks.div_euclid(TICKS_PER_SECOND) - EPOCH_OFFSET_SECS;
    let nanos = ticks.rem_euclid(TICKS_PER_SECOND) as u32 * NANOS_PER_TICK;
    DateTime::from_timestamp(secs, nanos).ok_or(ConvertError::OutOfRange {
        from: value.kind(),
        to,
    })
}

impl FromPrimitive for DateTime<Utc> {
    fn from_primitive(value: &Primitive) -> Result<Self, ConvertError> {
        from_ticks(value, "DateTime<Utc>")
    }
}

impl FromPrimitive for NaiveDateTime {
    fn from_primitive(value: &Primitive) -> Result<Self, ConvertError> {
        from_ticks(value, "NaiveDateTime").map(|time| time.naive_utc())
    }
}

impl_scalar!(DateTime<Utc>, "chrono::DateTime<chrono::Utc>", "DateTime<Utc>", fallible |v| {
    to_ticks(v, "chrono::DateTime<chrono::Utc>").map(Primitive::I64)
});

impl_scalar!(NaiveDateTime, "chrono::NaiveDateTime", "NaiveDateTime", fallible |v| {
    to_ticks(&v.and_utc(), "chrono::NaiveDateTime").map(Primitive::I64)
});

#[cfg(test)]
mod tests {
    use ::chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use vc_tree::{Node, Primitive, PrimitiveKind};

    use crate::policy::ConvertError;
    use crate::registry::TypeRegistry;
    use crate::{SerializeError, deserialize, serialize};

    #[test]
    fn unix_epoch_tick_count() {
        let epoch = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        assert_eq!(
            serialize(&epoch).unwrap(),
            Node::Primitive(Primitive::I64(621_355_968_000_000_000))
        );
    }

    #[test]
    fn times_round_trip_at_tick_precision() {
        let registry = TypeRegistry::new();

        let time = DateTime::from_timestamp(1_700_000_000, 123_456_700).unwrap();
        let back: DateTime<Utc> = deserialize(&serialize(&time).unwrap(), &registry)
            .unwrap()
            .unwrap();
        assert_eq!(back, time);

        let naive: NaiveDateTime = NaiveDate::from_ymd_opt(1, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 1)
            .unwrap();
        let tree = serialize(&naive).unwrap();
        assert_eq!(tree, Node::Primitive(Primitive::I64(10_000_000)));
        let back: NaiveDateTime = deserialize(&tree, &registry).unwrap().unwrap();
        assert_eq!(back, naive);
    }

    #[test]
    fn times_outside_the_tick_range_fail_to_write() {
        let early = NaiveDate::from_ymd_opt(-5, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(serialize(&early).is_ok());

        let err = serialize(&DateTime::<Utc>::MIN_UTC).unwrap_err();
        assert!(matches!(
            err,
            SerializeError::Convert {
                source: ConvertError::Unrepresentable {
                    to: PrimitiveKind::I64,
                    ..
                },
                ..
            }
        ));
    }
}
