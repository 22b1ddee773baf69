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

//! Configuration for codec contexts.

use crate::error::CodecError;
use serde::{Deserialize, Serialize};

/// What a registry does when a key is registered twice.
///
/// Under `Reject` a duplicate fails with a
/// [`RegistryError`](crate::RegistryError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later registration replaces the earlier one, with a warning logged.
    #[default]
    Replace,
    /// The later registration fails.
    Reject,
}

/// Configuration for a [`CodecContext`](crate::CodecContext).
///
/// # Examples
///
/// ```rust
/// use dynacodec::config::{CodecConfig, DuplicatePolicy};
///
/// // Use default configuration
/// let config = CodecConfig::default();
/// assert_eq!(config.processor_key, "type");
///
/// // Customize configuration
/// let config = CodecConfig::new()
///     .with_duplicate_policy(DuplicatePolicy::Reject)
///     .with_pretty_documents(true);
///
/// // Or load it from JSON, with defaults for missing fields
/// let config = CodecConfig::from_json(r#"{"duplicate_policy": "reject"}"#).unwrap();
/// assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
/// assert_eq!(config.block_id_key, "id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Policy applied by every registry of the context.
    ///
    /// Default: `Replace`
    pub duplicate_policy: DuplicatePolicy,

    /// Discriminator key of structure processors.
    ///
    /// Default: `"type"`
    pub processor_key: String,

    /// Key holding a block's identity.
    ///
    /// Default: `"id"`
    pub block_id_key: String,

    /// Whether JSON documents are written pretty-printed.
    ///
    /// Default: false
    pub pretty_documents: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Replace,
            processor_key: "type".to_string(),
            block_id_key: "id".to_string(),
            pretty_documents: false,
        }
    }
}

impl CodecConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON text; missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, CodecError> {
        serde_json::from_str(text)
            .map_err(|e| CodecError::with_source("invalid codec configuration", e))
    }

    /// Sets the duplicate registration policy.
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Sets the structure processor discriminator key.
    #[must_use]
    pub fn with_processor_key(mut self, key: impl Into<String>) -> Self {
        self.processor_key = key.into();
        self
    }

    /// Sets the block identity key.
    #[must_use]
    pub fn with_block_id_key(mut self, key: impl Into<String>) -> Self {
        self.block_id_key = key.into();
        self
    }

    /// Enables or disables pretty-printed JSON documents.
    #[must_use]
    pub fn with_pretty_documents(mut self, pretty: bool) -> Self {
        self.pretty_documents = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Replace);
        assert_eq!(config.processor_key, "type");
        assert_eq!(config.block_id_key, "id");
        assert!(!config.pretty_documents);
    }

    #[test]
    fn test_from_json_partial() {
        let config = CodecConfig::from_json(r#"{"processor_key": "kind"}"#).unwrap();
        assert_eq!(config.processor_key, "kind");
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Replace);
    }

    #[test]
    fn test_from_json_rejects_unknown_policy() {
        let error = CodecConfig::from_json(r#"{"duplicate_policy": "merge"}"#).unwrap_err();
        assert_eq!(error.message(), "invalid codec configuration");
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = CodecConfig::new().with_block_id_key("block");
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(CodecConfig::from_json(&text).unwrap(), config);
    }
}
