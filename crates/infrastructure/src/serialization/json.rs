//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Field order follows the serialized type
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Same as `to_json_stable` but returns bytes for direct file writing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    to_json_stable(value).map(String::into_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Entry {
        name: String,
        status: String,
        start: i64,
    }

    fn entry() -> Entry {
        Entry {
            name: "post_creates_object".to_string(),
            status: "passed".to_string(),
            start: 1_750_000_000_000,
        }
    }

    #[test]
    fn test_stable_output_format() {
        let json = to_json_stable(&entry()).expect("serialization should work");
        let expected = r#"{
  "name": "post_creates_object",
  "status": "passed",
  "start": 1750000000000
}
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_bytes_read_back() {
        let bytes = to_json_stable_bytes(&entry()).expect("serialization should work");
        assert!(bytes.ends_with(b"}\n"));
        let restored: Entry = serde_json::from_slice(&bytes).expect("deserialization should work");
        assert_eq!(restored, entry());
    }
}
