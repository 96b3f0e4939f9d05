use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes a service response body into `T`.
///
/// A body carrying a non-empty `error` field is a failure whatever the HTTP
/// status was, so the field is checked before `T` is even attempted. Bodies
/// that are not JSON, or JSON that does not fit `T`, are transport errors.
pub fn decode_reply<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::Transport(format!("malformed response: {}", e)))?;

    if let Some(message) = server_error(&value) {
        return Err(ApiError::Server(message));
    }

    serde_json::from_value(value)
        .map_err(|e| ApiError::Transport(format!("malformed response: {}", e)))
}

fn server_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
