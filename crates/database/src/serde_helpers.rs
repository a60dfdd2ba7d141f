use serde::{de, Deserializer, Serialize, Serializer};
use std::fmt;

/// 将u64强制序列化为BSON数值类型（而非NumberLong包装）
pub fn serialize_u64_as_number<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if *value <= i32::MAX as u64 {
        (*value as i32).serialize(serializer)
    } else if *value <= i64::MAX as u64 {
        (*value as i64).serialize(serializer)
    } else {
        value.serialize(serializer)
    }
}

/// 将i64强制序列化为BSON数值类型（而非NumberLong包装）
pub fn serialize_i64_as_number<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if *value <= i32::MAX as i64 && *value >= i32::MIN as i64 {
        (*value as i32).serialize(serializer)
    } else {
        value.serialize(serializer)
    }
}

// 报名站点的 JS 驱动会把 Number 存成 Int32 / Int64 / Double 中的任意一种
struct IntegerVisitor;

impl<'de> de::Visitor<'de> for IntegerVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integral number")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
        i64::try_from(value).map_err(|_| E::custom(format!("integer {} out of range", value)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
            Ok(value as i64)
        } else {
            Err(E::custom(format!("expected an integral number, got {}", value)))
        }
    }
}

/// 接受 Int32 / Int64 / 整数值的 Double
pub fn deserialize_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IntegerVisitor)
}

/// 同上，但额外要求非负（计数类字段）
pub fn deserialize_counter<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserializer.deserialize_any(IntegerVisitor)?;
    u64::try_from(value).map_err(|_| de::Error::custom(format!("counter must be non-negative, got {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Counters {
        #[serde(deserialize_with = "deserialize_counter")]
        visits: u64,
        #[serde(deserialize_with = "deserialize_integer")]
        position: i64,
    }

    #[test]
    fn test_counter_accepts_all_bson_number_types() {
        let from_i32: Counters = bson::from_document(doc! { "visits": 7_i32, "position": 1_i32 }).unwrap();
        assert_eq!(from_i32.visits, 7);

        let from_i64: Counters = bson::from_document(doc! { "visits": 8_i64, "position": 2_i64 }).unwrap();
        assert_eq!(from_i64.visits, 8);
        assert_eq!(from_i64.position, 2);

        let from_double: Counters = bson::from_document(doc! { "visits": 9.0_f64, "position": 3.0_f64 }).unwrap();
        assert_eq!(from_double.visits, 9);
        assert_eq!(from_double.position, 3);
    }

    #[test]
    fn test_rejects_fractional_and_negative_counters() {
        let fractional = bson::from_document::<Counters>(doc! { "visits": 1.5_f64, "position": 1_i32 });
        assert!(fractional.is_err());

        let negative = bson::from_document::<Counters>(doc! { "visits": -1_i32, "position": 1_i32 });
        assert!(negative.is_err());
    }

    #[test]
    fn test_negative_position_is_allowed() {
        let parsed: Counters = serde_json::from_str(r#"{"visits": 0, "position": -4}"#).unwrap();
        assert_eq!(parsed.position, -4);
    }

    #[test]
    fn test_serialize_small_u64_as_int32() {
        #[derive(Serialize)]
        struct Wrapper {
            #[serde(serialize_with = "serialize_u64_as_number")]
            n: u64,
        }

        let document = bson::to_document(&Wrapper { n: 12 }).unwrap();
        assert_eq!(document.get("n"), Some(&bson::Bson::Int32(12)));
    }
}
