//! Verbs used against the objects resource

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five verbs the contract exercises. Serialized as the wire token,
/// e.g. `"PATCH"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Read one object
    Get,
    /// Create an object
    Post,
    /// Replace an object
    Put,
    /// Partially update an object
    Patch,
    /// Remove an object
    Delete,
}

impl HttpMethod {
    /// Wire token sent on the request line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_matches_wire_token() {
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(format!("{} /objects", HttpMethod::Delete), "DELETE /objects");
    }

    #[test]
    fn test_serializes_uppercase() {
        let json = serde_json::to_string(&HttpMethod::Patch).expect("serialize");
        assert_eq!(json, r#""PATCH""#);
        let method: HttpMethod = serde_json::from_str(r#""POST""#).expect("deserialize");
        assert_eq!(method, HttpMethod::Post);
    }
}
