//! The message entity and its wire representation

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Serialize, Serializer};
use sqlx::FromRow;

/// A single chat post.
///
/// Field declaration order is the serialized key order:
/// `id, body, username, created_at, updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Message {
    pub id: i64,
    pub body: Option<String>,
    pub username: Option<String>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Current time at the precision the store persists and renders.
pub fn now_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn serialize_timestamp<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(value))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample() -> Message {
        let created_at = Utc
            .with_ymd_and_hms(2026, 2, 27, 8, 30, 0)
            .single()
            .expect("valid timestamp");
        Message {
            id: 7,
            body: Some("hello".to_string()),
            username: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn serializes_keys_in_declaration_order() {
        let rendered = serde_json::to_string(&sample()).expect("serialize message");
        assert_eq!(
            rendered,
            r#"{"id":7,"body":"hello","username":null,"created_at":"2026-02-27T08:30:00.000000Z","updated_at":"2026-02-27T08:30:00.000000Z"}"#
        );
    }

    #[test]
    fn now_timestamp_drops_sub_microsecond_precision() {
        let now = now_timestamp();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000, 0);
    }
}
