//! Lenient scalar parsing for hand-edited files.
//!
//! YAML reads `PORT: 8080` as an integer and `DEBUG: true` as a boolean.
//! Every stored value is a string, so integers and booleans are taken in
//! their textual form instead of failing the whole file. Decimals are
//! rejected: `3.10` arrives as the float `3.1` and its text is gone.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};

use crate::env::EnvVarSet;

/// A string, integer or boolean, kept as text.
struct Scalar(String);

struct ScalarVisitor;

impl Visitor<'_> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, integer or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
        Ok(Scalar(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
        Ok(Scalar(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
        Ok(Scalar(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
        Ok(Scalar(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
        Ok(Scalar(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
        Err(E::custom(format!(
            "unquoted decimal {v} loses its exact text; quote the value, e.g. '3.10'"
        )))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Scalar, E> {
        Ok(Scalar(String::new()))
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// `deserialize_with` for optional scalar fields.
pub(crate) fn option<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| s.0))
}

/// `deserialize_with` for env var maps. A missing value reads as empty.
pub(crate) fn env_map<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EnvVarSet, D::Error> {
    let raw = std::collections::BTreeMap::<String, Scalar>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.0)).collect())
}
