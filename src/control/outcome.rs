//! Result of performing one closure's side effect.

use std::borrow::Cow;

/// Diagnostic output attached to an [`Outcome`].
///
/// External tools produce raw bytes; in-process actions usually produce text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Bytes(Vec<u8>),
    Text(String),
}

impl Payload {
    /// Lossy text rendering of the payload.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Bytes(bytes) => String::from_utf8_lossy(bytes),
            Self::Text(text) => Cow::Borrowed(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bytes(bytes) => bytes.is_empty(),
            Self::Text(text) => text.is_empty(),
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// The real result of having executed a closure's action.
///
/// Outcomes are immutable once built; only actions construct them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    success: bool,
    payload: Option<Payload>,
}

impl Outcome {
    /// A successful outcome without payload.
    pub fn success() -> Self {
        Self {
            success: true,
            payload: None,
        }
    }

    /// A failed outcome without payload.
    pub fn failure() -> Self {
        Self {
            success: false,
            payload: None,
        }
    }

    /// Build an outcome from a success flag.
    pub fn from_status(success: bool) -> Self {
        Self {
            success,
            payload: None,
        }
    }

    /// Attach a payload. Empty payloads are dropped.
    pub fn with_payload(mut self, payload: impl Into<Payload>) -> Self {
        let payload = payload.into();
        self.payload = (!payload.is_empty()).then_some(payload);
        self
    }

    /// Failed outcome carrying the display text of an error.
    pub fn from_error(err: impl std::fmt::Display) -> Self {
        Self::failure().with_payload(err.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<Payload> {
        self.payload
    }
}

impl<E: std::fmt::Display> From<std::result::Result<(), E>> for Outcome {
    fn from(result: std::result::Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(e) => Self::from_error(e),
        }
    }
}
