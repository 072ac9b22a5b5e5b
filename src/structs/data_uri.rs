use std::fmt;
use std::str::FromStr;
use base64::{engine::general_purpose, Engine as _};
use crate::errors::{LungLensError, LungLensResult};

const DATA_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// A `data:<mimetype>;base64,<payload>` string split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    mime_type: String,
    payload: String,
}

impl DataUri {
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            payload: general_purpose::STANDARD.encode(bytes),
        }
    }

    pub fn parse(raw: &str) -> LungLensResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(invalid(raw, "must not be empty"));
        }

        let rest = raw
            .strip_prefix(DATA_SCHEME)
            .ok_or_else(|| invalid(raw, "must start with 'data:'"))?;

        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid(raw, "must contain ',' between header and payload"))?;

        if !meta.ends_with(BASE64_MARKER) {
            return Err(invalid(raw, "must use base64 encoding"));
        }

        let mime_type = meta
            .split(';')
            .next()
            .filter(|m| !m.is_empty() && m.contains('/'))
            .ok_or_else(|| invalid(raw, "must include a MIME type"))?;

        if payload.is_empty() {
            return Err(invalid(raw, "must carry a non-empty payload"));
        }

        if !payload.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')) {
            return Err(invalid(raw, "payload must be base64"));
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            payload: payload.to_string(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload, without the header.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn decode(&self) -> LungLensResult<Vec<u8>> {
        Ok(general_purpose::STANDARD.decode(&self.payload)?)
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{},{}", DATA_SCHEME, self.mime_type, BASE64_MARKER, self.payload)
    }
}

impl FromStr for DataUri {
    type Err = LungLensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn invalid(raw: &str, constraint: &str) -> LungLensError {
    let preview: String = raw.chars().take(32).collect();
    LungLensError::validation_error(
        "photoDataUri",
        &preview,
        constraint,
        Some("Expected format: 'data:<mimetype>;base64,<encoded_data>'"),
    )
}
