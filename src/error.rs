//! This module implements `PhoneTzError`.

use alloc::borrow::Cow;
use core::fmt;

use country_tz_provider::ProviderError;

/// `PhoneTzError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// Country or time zone data could not be loaded.
    Provider,
    /// A response could not be encoded.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Provider => "ProviderError",
            Self::Serialization => "SerializationError",
        }
        .fmt(f)
    }
}

/// The error type for `phone_tz`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneTzError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl PhoneTzError {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Creates a generic error.
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Creates a provider error.
    #[must_use]
    pub fn provider() -> Self {
        Self::new(ErrorKind::Provider)
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Add a message to the error.
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for PhoneTzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl std::error::Error for PhoneTzError {}

impl From<ProviderError> for PhoneTzError {
    fn from(value: ProviderError) -> Self {
        Self::provider().with_message(value.to_string())
    }
}

impl From<serde_json::Error> for PhoneTzError {
    fn from(value: serde_json::Error) -> Self {
        Self::serialization().with_message(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, PhoneTzError};

    #[test]
    fn display_includes_message() {
        let err = PhoneTzError::general("tzdata directory is empty");
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.to_string(), "Error: tzdata directory is empty");
        assert_eq!(PhoneTzError::provider().to_string(), "ProviderError");
    }
}
