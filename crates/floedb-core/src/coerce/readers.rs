use crate::{
    coerce::{CoerceError, ReaderRegistry},
    types::{Date, Timestamp},
    value::Value,
};
use chrono::{DateTime, FixedOffset};
use num_traits::ToPrimitive;

///
/// Built-in readers
///
/// Registered in a fixed order; the scalar readers come first, then the
/// calendar targets, then the list targets. Each reader owns exactly one
/// target type, so order only matters when a custom reader shadows one of
/// these.
///

pub(super) fn register_defaults(registry: &mut ReaderRegistry) {
    registry
        .register_fn(read_bool)
        .register_fn(read_i64)
        .register_fn(read_u64)
        .register_fn(read_f64)
        .register_fn(read_string)
        .register_fn(read_blob)
        .register_fn(read_date)
        .register_fn(read_timestamp)
        .register_fn(read_zoned)
        .register_fn(read_value_list)
        .register_fn(read_string_list)
        .register_fn(read_i64_list);
}

fn read_bool(value: &Value) -> Result<bool, CoerceError> {
    match value {
        Value::Bool(v) => Ok(*v),
        Value::Int(v) => Ok(*v != 0),
        Value::Uint(v) => Ok(*v != 0),
        Value::Text(s) => s
            .parse()
            .map_err(|_| CoerceError::conversion::<bool>(value, "expected true or false")),
        other => Err(CoerceError::conversion::<bool>(
            other,
            "no boolean interpretation",
        )),
    }
}

fn read_i64(value: &Value) -> Result<i64, CoerceError> {
    match value {
        Value::Int(v) => Ok(*v),
        Value::Uint(v) => i64::try_from(*v)
            .map_err(|_| CoerceError::conversion::<i64>(value, "unsigned value overflows i64")),
        Value::Float64(v) => v
            .get()
            .to_i64()
            .ok_or_else(|| CoerceError::conversion::<i64>(value, "float out of i64 range")),
        Value::Date(v) => Ok(v.get().into()),
        Value::Timestamp(v) => Ok(v.get()),
        Value::Text(s) => s
            .parse()
            .map_err(|_| CoerceError::conversion::<i64>(value, format!("unparsable integer: {s}"))),
        other => Err(CoerceError::conversion::<i64>(
            other,
            "no integer interpretation",
        )),
    }
}

fn read_u64(value: &Value) -> Result<u64, CoerceError> {
    match value {
        Value::Uint(v) => Ok(*v),
        Value::Int(v) => u64::try_from(*v)
            .map_err(|_| CoerceError::conversion::<u64>(value, "negative value for u64")),
        Value::Float64(v) => v
            .get()
            .to_u64()
            .ok_or_else(|| CoerceError::conversion::<u64>(value, "float out of u64 range")),
        Value::Text(s) => s
            .parse()
            .map_err(|_| CoerceError::conversion::<u64>(value, format!("unparsable integer: {s}"))),
        other => Err(CoerceError::conversion::<u64>(
            other,
            "no integer interpretation",
        )),
    }
}

fn read_f64(value: &Value) -> Result<f64, CoerceError> {
    match value {
        Value::Float64(v) => Ok(v.get()),
        Value::Int(v) => Ok(v.to_f64().unwrap_or_default()),
        Value::Uint(v) => Ok(v.to_f64().unwrap_or_default()),
        Value::Text(s) => s
            .parse()
            .map_err(|_| CoerceError::conversion::<f64>(value, format!("unparsable float: {s}"))),
        other => Err(CoerceError::conversion::<f64>(
            other,
            "no float interpretation",
        )),
    }
}

fn read_string(value: &Value) -> Result<String, CoerceError> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Bool(v) => Ok(v.to_string()),
        Value::Int(v) => Ok(v.to_string()),
        Value::Uint(v) => Ok(v.to_string()),
        Value::Float64(v) => Ok(v.to_string()),
        Value::Date(v) => Ok(v.to_string()),
        Value::Timestamp(v) => Ok(v.to_string()),
        other => Err(CoerceError::conversion::<String>(
            other,
            "no canonical text form",
        )),
    }
}

fn read_blob(value: &Value) -> Result<Vec<u8>, CoerceError> {
    match value {
        Value::Blob(v) => Ok(v.clone()),
        Value::Text(s) => Ok(s.clone().into_bytes()),
        other => Err(CoerceError::conversion::<Vec<u8>>(
            other,
            "no byte interpretation",
        )),
    }
}

// Calendar targets follow one ladder: identity, then numeric as epoch
// milliseconds, then a textual parse.

fn read_date(value: &Value) -> Result<Date, CoerceError> {
    match value {
        Value::Date(v) => Ok(*v),
        Value::Timestamp(v) => Ok(Date::from_epoch_millis(v.get())),
        Value::Int(v) => Ok(Date::from_epoch_millis(*v)),
        Value::Uint(v) => i64::try_from(*v)
            .map(Date::from_epoch_millis)
            .map_err(|_| CoerceError::conversion::<Date>(value, "epoch overflows i64")),
        Value::Text(s) => Date::parse(s)
            .ok_or_else(|| CoerceError::conversion::<Date>(value, format!("unparsable date: {s}"))),
        other => Err(CoerceError::conversion::<Date>(
            other,
            "no date interpretation",
        )),
    }
}

fn read_timestamp(value: &Value) -> Result<Timestamp, CoerceError> {
    match value {
        Value::Timestamp(v) => Ok(*v),
        Value::Date(v) => Ok(Timestamp::from_date(*v)),
        Value::Int(v) => Ok(Timestamp::from_millis(*v)),
        Value::Uint(v) => i64::try_from(*v)
            .map(Timestamp::from_millis)
            .map_err(|_| CoerceError::conversion::<Timestamp>(value, "epoch overflows i64")),
        Value::Text(s) => Timestamp::parse_flexible(s)
            .map_err(|e| CoerceError::conversion::<Timestamp>(value, e)),
        other => Err(CoerceError::conversion::<Timestamp>(
            other,
            "no timestamp interpretation",
        )),
    }
}

// Numeric and date inputs convert through a fixed UTC offset rather than the
// process zone, so equal inputs yield equal trees on every host.
fn read_zoned(value: &Value) -> Result<DateTime<FixedOffset>, CoerceError> {
    let from_millis = |ms: i64| {
        Timestamp::from_millis(ms)
            .to_utc()
            .map(|dt| dt.fixed_offset())
            .ok_or_else(|| {
                CoerceError::conversion::<DateTime<FixedOffset>>(value, "epoch out of range")
            })
    };

    match value {
        Value::Timestamp(v) => from_millis(v.get()),
        Value::Date(v) => from_millis(Timestamp::from_date(*v).get()),
        Value::Int(v) => from_millis(*v),
        Value::Uint(v) => i64::try_from(*v).map_or_else(
            |_| {
                Err(CoerceError::conversion::<DateTime<FixedOffset>>(
                    value,
                    "epoch overflows i64",
                ))
            },
            from_millis,
        ),
        Value::Text(s) => DateTime::parse_from_rfc3339(s).map_err(|e| {
            CoerceError::conversion::<DateTime<FixedOffset>>(
                value,
                format!("unparsable timestamp: {e}"),
            )
        }),
        other => Err(CoerceError::conversion::<DateTime<FixedOffset>>(
            other,
            "no zoned interpretation",
        )),
    }
}

// List targets: a stored list converts elementwise; a scalar wraps into a
// singleton, matching how leaf payloads are read back as sequences.

fn read_value_list(value: &Value) -> Result<Vec<Value>, CoerceError> {
    match value {
        Value::List(items) => Ok(items.clone()),
        other => Ok(vec![other.clone()]),
    }
}

fn read_string_list(value: &Value) -> Result<Vec<String>, CoerceError> {
    match value {
        Value::List(items) => items.iter().map(read_string).collect(),
        other => Ok(vec![read_string(other)?]),
    }
}

fn read_i64_list(value: &Value) -> Result<Vec<i64>, CoerceError> {
    match value {
        Value::List(items) => items.iter().map(read_i64).collect(),
        other => Ok(vec![read_i64(other)?]),
    }
}

///
/// TESTS
///
