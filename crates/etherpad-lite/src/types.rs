//! Wire types for the Etherpad HTTP API

use crate::error::{EtherpadError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Response envelope returned by every API function
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ApiResponse {
    /// Parse a response body
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| EtherpadError::MalformedResponse(format!("invalid envelope: {}", e)))
    }

    /// Code 0 yields `data` (null when absent); any other code is an error.
    pub fn into_data(self) -> Result<Value> {
        match self.code {
            0 => Ok(self.data.unwrap_or(Value::Null)),
            code => Err(EtherpadError::from_wire(code, self.message)),
        }
    }
}

/// Details of a session, as returned by `getSessionInfo` and the session listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(rename = "authorID")]
    pub author_id: String,
    #[serde(rename = "groupID")]
    pub group_id: String,
    /// Unix timestamp in seconds. Fractional values sent by the server are
    /// truncated towards zero.
    #[serde(rename = "validUntil", deserialize_with = "timestamp_secs")]
    pub valid_until: i64,
}

/// Sessions keyed by session ID
///
/// A `None` value is a session the server listed but could no longer
/// resolve; Etherpad sends `null` for those.
pub type SessionMap = BTreeMap<String, Option<SessionInfo>>;

fn timestamp_secs<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<i64, D::Error> {
    use serde::de::Error;

    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(secs) = number.as_i64() {
        return Ok(secs);
    }
    match number.as_f64() {
        Some(secs) if secs.is_finite() && secs.abs() < i64::MAX as f64 => Ok(secs.trunc() as i64),
        _ => Err(D::Error::custom(format!(
            "validUntil {} is not a valid timestamp",
            number
        ))),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PadIds {
    #[serde(rename = "padIDs")]
    pub pad_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PadId {
    #[serde(rename = "padID")]
    pub pad_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupId {
    #[serde(rename = "groupID")]
    pub group_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupIds {
    #[serde(rename = "groupIDs")]
    pub group_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthorId {
    #[serde(rename = "authorID")]
    pub author_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthorIds {
    #[serde(rename = "authorIDs")]
    pub author_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionId {
    #[serde(rename = "sessionID")]
    pub session_id: String,
}

/// Deserialize `data` into `T`, reporting shape mismatches as malformed responses.
pub(crate) fn from_data<T: serde::de::DeserializeOwned>(function: &str, data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|e| {
        EtherpadError::MalformedResponse(format!("unexpected data for {}: {}", function, e))
    })
}

/// Pull a single key out of `data` and deserialize it.
pub(crate) fn data_field<T: serde::de::DeserializeOwned>(
    function: &str,
    mut data: Value,
    key: &str,
) -> Result<T> {
    let field = data
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| {
            EtherpadError::MalformedResponse(format!("{} response is missing '{}'", function, key))
        })?;
    from_data(function, field)
}
