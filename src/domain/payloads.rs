//! Request bodies accepted by the message endpoints

use serde::{Deserialize, Deserializer};

/// `POST /messages` body. Absent keys decode to `None`, same as explicit nulls.
#[derive(Debug, Deserialize)]
pub struct CreateMessage {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// `PATCH /messages/<id>` body.
///
/// `body` is `None` when the key is absent and `Some(None)` when it is an
/// explicit null; only a present key changes the stored message.
#[derive(Debug, Deserialize)]
pub struct UpdateMessage {
    #[serde(default, deserialize_with = "present")]
    pub body: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
