//! Uniform outbound envelope for success and error results.
//!
//! # Invariants
//! - `success == true` implies `error` is absent.
//! - `success == false` implies `error` is present and `data` is absent.
//! - All three keys are always serialized; absent values are `null`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Structured error carried by a failed envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
    /// Serialized as `type` to match the wire contract.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: Some(kind.into()),
        }
    }
}

/// `{success, error, data}` wrapper for every response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseEnvelope<T> {
    success: bool,
    error: Option<ErrorPayload>,
    data: Option<T>,
}

impl<T> ResponseEnvelope<T> {
    /// Wraps a successful result.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    /// Wraps a failure; `data` stays absent.
    pub fn failure(error: ErrorPayload) -> Self {
        Self {
            success: false,
            error: Some(error),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&ErrorPayload> {
        self.error.as_ref()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl<T: Serialize> ResponseEnvelope<T> {
    /// Serializes the envelope as a JSON body.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Deserialize)]
struct RawEnvelope<T> {
    success: bool,
    error: Option<ErrorPayload>,
    data: Option<T>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ResponseEnvelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEnvelope::<T>::deserialize(deserializer)?;
        match (raw.success, raw.error) {
            (true, None) => Ok(Self {
                success: true,
                error: None,
                data: raw.data,
            }),
            (false, Some(error)) if raw.data.is_none() => Ok(Self::failure(error)),
            (true, Some(_)) => Err(D::Error::custom(
                "successful envelope must not carry an error",
            )),
            (false, _) => Err(D::Error::custom(
                "failed envelope must carry an error and no data",
            )),
        }
    }
}
