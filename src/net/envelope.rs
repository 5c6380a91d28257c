//! Response envelope decoding.
//!
//! DESIGN
//! ======
//! The backend answers in one of two documented shapes:
//!
//! - wrapped: `{ "success": bool, "data": T?, "message"?: str, "error"?: str }`
//! - bare: the payload itself
//!
//! A body is "wrapped" iff it is an object carrying a `success` key. Once the
//! payload is unwrapped it must decode as the caller's type, otherwise the
//! call fails with `ApiError::Schema`. No caller inspects raw JSON.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;

/// Unwrap the envelope, returning the payload value.
///
/// # Errors
///
/// - `Rejected` when `success` is `false`
/// - `Schema` when `success` is present but not a boolean
pub fn unwrap_payload(body: Value) -> Result<Value, ApiError> {
    let Value::Object(mut map) = body else {
        return Ok(body);
    };
    let Some(success) = map.remove("success") else {
        return Ok(Value::Object(map));
    };
    match success {
        Value::Bool(true) => Ok(map.remove("data").unwrap_or(Value::Null)),
        Value::Bool(false) => Err(ApiError::Rejected(rejection_message(&map))),
        other => Err(ApiError::Schema(format!("`success` must be a boolean, got {other}"))),
    }
}

fn rejection_message(map: &serde_json::Map<String, Value>) -> String {
    ["message", "error"]
        .iter()
        .find_map(|key| match map.get(*key) {
            Some(Value::String(text)) if !text.trim().is_empty() => Some(text.trim().to_owned()),
            _ => None,
        })
        .unwrap_or_else(|| "la operación fue rechazada por el servidor".to_owned())
}

/// Unwrap the envelope and decode the payload as `T`.
///
/// # Errors
///
/// See [`unwrap_payload`]; additionally `Schema` when the payload does not
/// decode as `T`.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    let payload = unwrap_payload(body)?;
    serde_json::from_value(payload).map_err(|e| ApiError::Schema(e.to_string()))
}

/// Parse raw response text (empty text is `null`) and decode it as `T`.
///
/// # Errors
///
/// `Schema` when the text is not JSON; otherwise see [`decode`].
pub fn decode_text<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text).map_err(|e| ApiError::Schema(format!("invalid JSON: {e}")))?
    };
    decode(body)
}

#[cfg(test)]
#[path = "envelope_test.rs"]
mod tests;
