// Visit log records as stored per site in the `mainPage` collection

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One logged visit. Written by the sites' own logging path; read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub ip: String,
    /// Milliseconds since the Unix epoch.
    #[serde(deserialize_with = "millis_from_number")]
    pub timestamp: i64,
    #[serde(default)]
    pub device_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl VisitRecord {
    pub fn new(ip: &str, timestamp: i64, device_type: &str, user_agent: Option<&str>) -> Self {
        Self {
            ip: ip.to_string(),
            timestamp,
            device_type: device_type.to_string(),
            user_agent: user_agent.map(str::to_string),
        }
    }
}

/// JavaScript loggers store `Date.now()` as a BSON double; accept any numeric form.
fn millis_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct MillisVisitor;

    impl Visitor<'_> for MillisVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a millisecond timestamp")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::custom(format!("timestamp {v} out of range")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if !v.is_finite() || v < i64::MIN as f64 || v > i64::MAX as f64 {
                return Err(E::custom(format!("timestamp {v} out of range")));
            }
            Ok(v.trunc() as i64)
        }
    }

    deserializer.deserialize_any(MillisVisitor)
}
