//! HTTP Request body types

use serde::{Deserialize, Serialize};

/// Content type sent with every JSON body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP request body.
///
/// The objects API only accepts JSON, so a body is either absent or a raw
/// JSON document. The content is kept as text so malformed or unusual
/// documents (such as a top-level array) can be sent verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// Raw JSON document
    Json(String),
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Creates a JSON body from raw text.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::Json(content.into())
    }

    /// Creates a JSON body from a `serde_json::Value`.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self::Json(value.to_string())
    }

    /// Returns the body text, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Json(content) => Some(content),
        }
    }

    /// Returns the content type if applicable.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
        }
    }
}
