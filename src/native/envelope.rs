//! Success/error envelope exchanged with the native engine.
//!
//! On the wire the envelope is a JSON object:
//! ```text
//! { "success": bool, "data": <T> | null, "error": <string> | null }
//! ```
//! `success = true` requires `data`; `success = false` requires `error`.
//! Every other shape, and any JSON that does not match `T`, becomes an
//! `Error("failed to parse response: ...")`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Tagged success/error container. Never holds both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<T> {
    Success(T),
    Error(String),
}

#[derive(Serialize, Deserialize)]
struct WireEnvelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(value: T) -> Self {
        Envelope::Success(value)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Envelope::Error(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Error(_))
    }

    /// Transform the success value, passing errors through untouched.
    pub fn map<U, F>(self, f: F) -> Envelope<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Envelope::Success(value) => Envelope::Success(f(value)),
            Envelope::Error(message) => Envelope::Error(message),
        }
    }

    /// Chain a fallible step onto the success value.
    pub fn and_then<U, F>(self, f: F) -> Envelope<U>
    where
        F: FnOnce(T) -> Envelope<U>,
    {
        match self {
            Envelope::Success(value) => f(value),
            Envelope::Error(message) => Envelope::Error(message),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Envelope::Success(value) => Some(value),
            Envelope::Error(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        self.into()
    }

    /// Extract the success value.
    ///
    /// # Panics
    /// Panics when called on `Error`. Only call this after success has been
    /// established; reaching the panic is a programming error.
    pub fn unwrap_success(self) -> T {
        match self {
            Envelope::Success(value) => value,
            Envelope::Error(message) => {
                panic!("unwrap_success called on an error envelope: {}", message)
            }
        }
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Parse a native response.
    pub fn from_json(json: &str) -> Self {
        let wire: WireEnvelope<T> = match serde_json::from_str(json) {
            Ok(wire) => wire,
            Err(e) => return Envelope::Error(format!("failed to parse response: {}", e)),
        };

        match wire {
            WireEnvelope { success: true, data: Some(data), .. } => Envelope::Success(data),
            WireEnvelope { success: false, error: Some(error), .. } => Envelope::Error(error),
            WireEnvelope { success: true, data: None, .. } => {
                Envelope::Error("failed to parse response: success without data".to_string())
            }
            WireEnvelope { success: false, error: None, .. } => {
                Envelope::Error("failed to parse response: failure without error".to_string())
            }
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// Serialize into the wire shape. Used by engine adapters.
    pub fn to_json(&self) -> String {
        let wire = match self {
            Envelope::Success(data) => WireEnvelope {
                success: true,
                data: Some(data),
                error: None,
            },
            Envelope::Error(message) => WireEnvelope {
                success: false,
                data: None,
                error: Some(message.clone()),
            },
        };
        serde_json::to_string(&wire).unwrap_or_else(|e| {
            format!(
                r#"{{"success":false,"data":null,"error":{}}}"#,
                serde_json::Value::String(e.to_string())
            )
        })
    }
}

impl<T> From<Envelope<T>> for Result<T, String> {
    fn from(envelope: Envelope<T>) -> Self {
        match envelope {
            Envelope::Success(value) => Ok(value),
            Envelope::Error(message) => Err(message),
        }
    }
}

impl<T, E: ToString> From<Result<T, E>> for Envelope<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Envelope::Success(value),
            Err(e) => Envelope::Error(e.to_string()),
        }
    }
}
