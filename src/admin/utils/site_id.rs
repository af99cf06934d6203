/// Helper to deserialize a site id given either as an integer or as a
/// string-encoded integer.
///
/// Form clients are sloppy about this: the select field posts whatever
/// the wire format of the moment is, so both shapes of the same
/// logical id must resolve identically.
///
/// Usage: `#[serde(deserialize_with = "utils::site_id::deserialize")]`
use serde::de::{self, Visitor};
use serde::Deserializer;
use std::convert::TryFrom;
use std::fmt;

use crate::directory::SiteId;

pub fn deserialize<'de, D>(deserializer: D) -> Result<SiteId, D::Error>
where
    D: Deserializer<'de>,
{
    struct Vis;

    impl<'de> Visitor<'de> for Vis {
        type Value = SiteId;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a site id, as an integer or a numeric string")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            SiteId::try_from(value)
                .map_err(|_| E::custom(format!("site id out of range: {}", value)))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            SiteId::try_from(value)
                .map_err(|_| E::custom(format!("site id out of range: {}", value)))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            value.trim().parse().map_err(de::Error::custom)
        }
    }

    deserializer.deserialize_any(Vis)
}

#[cfg(test)]
mod tests {
    use serde::de::value::{Error as ValueError, I64Deserializer, StrDeserializer};
    use serde::de::IntoDeserializer;

    use super::*;

    #[test]
    fn accepts_numeric_and_string_forms() {
        let from_int = deserialize(I64Deserializer::<ValueError>::new(7)).unwrap();

        let stringly: StrDeserializer<ValueError> = "7".into_deserializer();
        let from_str = deserialize(stringly).unwrap();

        assert_eq!(from_int, 7);
        assert_eq!(from_str, 7);
    }

    #[test]
    fn rejects_non_numeric_strings() {
        let stringly: StrDeserializer<ValueError> = "first".into_deserializer();

        assert!(deserialize(stringly).is_err());
    }
}
