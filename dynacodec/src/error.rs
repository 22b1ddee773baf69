//
// Copyright 2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Error types shared by every codec, ops implementation, and registry.
//!
//! Two kinds of failure exist in this crate:
//!
//! - [`CodecError`]: a single-kind failure raised while encoding or decoding a
//!   tree. It carries a human readable message and an optional lower level
//!   cause. Composite codecs wrap child failures with [`CodecError::context`]
//!   so the final message names the key or subtype that failed.
//! - [`RegistryError`]: raised by registries configured to reject duplicate
//!   registrations. Registration happens once at startup, so these errors are
//!   expected to abort application setup rather than be recovered from.

use std::fmt;
use thiserror::Error;

/// Error that occurs while encoding or decoding a value.
///
/// There is deliberately no error-code taxonomy: structurally wrong input and
/// out-of-domain values are distinguished only by message.
///
/// # Examples
///
/// ```rust
/// use dynacodec::CodecError;
///
/// let error = CodecError::new("missing required key 'id'");
/// assert_eq!(error.message(), "missing required key 'id'");
/// assert_eq!(error.to_string(), "Codec error: missing required key 'id'");
/// ```
#[derive(Debug)]
pub struct CodecError {
    /// The underlying error message
    message: String,
    /// Optional source error
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CodecError {
    /// Creates a new codec error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new codec error with a message and source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dynacodec::CodecError;
    /// use std::error::Error;
    ///
    /// let inner = CodecError::new("expected string");
    /// let error = CodecError::with_source("invalid value for 'id'", inner);
    /// assert!(error.source().is_some());
    /// ```
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wraps this error as the cause of a new error with the given message.
    #[must_use]
    pub fn context(self, message: impl Into<String>) -> Self {
        Self::with_source(message, self)
    }

    /// Returns the message of this error, without its cause chain.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if this error or any error in its cause chain has a
    /// message containing `needle`.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        if self.message.contains(needle) {
            return true;
        }
        let mut cause = std::error::Error::source(self);
        while let Some(error) = cause {
            if error.to_string().contains(needle) {
                return true;
            }
            cause = error.source();
        }
        false
    }

    pub(crate) fn missing_key(key: &str) -> Self {
        Self::new(format!("missing required key '{key}'"))
    }

    pub(crate) fn expected(shape: &str, found: &impl fmt::Debug) -> Self {
        Self::new(format!("expected {shape}, found {found:?}"))
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Codec error: {}", self.message)?;
        if let Some(source) = &self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(error: serde_json::Error) -> Self {
        Self::with_source("JSON document error", error)
    }
}

impl From<postcard::Error> for CodecError {
    fn from(error: postcard::Error) -> Self {
        Self::with_source("postcard document error", error)
    }
}

/// Errors raised by registries that reject duplicate keys.
///
/// # Examples
///
/// ```rust
/// use dynacodec::RegistryError;
///
/// let error = RegistryError::DuplicateKey {
///     registry: "processor",
///     key: "integrity".to_string(),
/// };
/// assert_eq!(error.to_string(), "duplicate key 'integrity' in processor registry");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A key was registered twice while the registry rejects duplicates.
    #[error("duplicate key '{key}' in {registry} registry")]
    DuplicateKey {
        /// Name of the registry that rejected the key
        registry: &'static str,
        /// The key that was already present
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_without_source() {
        let error = CodecError::new("boom");
        assert_eq!(error.to_string(), "Codec error: boom");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_display_with_source() {
        let error = CodecError::new("expected string").context("invalid value for 'id'");
        assert_eq!(
            error.to_string(),
            "Codec error: invalid value for 'id' (caused by: Codec error: expected string)"
        );
        assert_eq!(error.message(), "invalid value for 'id'");
    }

    #[test]
    fn test_mentions_walks_cause_chain() {
        let error = CodecError::new("unknown type: nope")
            .context("failed to decode processor")
            .context("invalid value for 'processors'");
        assert!(error.mentions("unknown type"));
        assert!(!error.mentions("missing"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: CodecError = json_error.into();
        assert_eq!(error.message(), "JSON document error");
        assert!(error.source().is_some());
    }
}
