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

//! Loading structure templates from documents.

use crate::document::DocumentFormat;
use crate::error::CodecError;
use crate::structure::{StructureTemplate, StructureTemplateCodec};
use std::collections::BTreeMap;

#[cfg(feature = "observability")]
use tracing::{debug, warn};

/// Reads and writes structure templates in one document format.
///
/// Bulk loading is forgiving: a document that fails to decode is logged and
/// skipped, so one broken file does not prevent the others from loading.
#[derive(Debug, Clone)]
pub struct StructureLoader<F> {
    codec: StructureTemplateCodec,
    format: F,
}

impl<F: DocumentFormat> StructureLoader<F> {
    /// Creates a loader.
    pub fn new(codec: StructureTemplateCodec, format: F) -> Self {
        Self { codec, format }
    }

    /// Returns the document format.
    pub fn format(&self) -> &F {
        &self.format
    }

    /// Decodes one document.
    pub fn load(&self, bytes: &[u8]) -> Result<StructureTemplate, CodecError> {
        self.format.decode(&self.codec, bytes)
    }

    /// Encodes one template.
    pub fn save(&self, template: &StructureTemplate) -> Result<Vec<u8>, CodecError> {
        self.format.encode(&self.codec, template)
    }

    /// Decodes many named documents.
    ///
    /// Documents that fail to decode are skipped. When a name appears more than
    /// once, the first document that loads under it wins and later ones are
    /// skipped.
    #[cfg_attr(not(feature = "observability"), allow(unused_variables))]
    pub fn load_all<I, N, B>(&self, documents: I) -> BTreeMap<String, StructureTemplate>
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<String>,
        B: AsRef<[u8]>,
    {
        let mut loaded = BTreeMap::new();
        for (name, bytes) in documents {
            let name = name.into();
            if loaded.contains_key(&name) {
                #[cfg(feature = "observability")]
                warn!(structure = %name, "Skipping duplicate structure");
                continue;
            }
            match self.load(bytes.as_ref()) {
                Ok(template) => {
                    #[cfg(feature = "observability")]
                    debug!(
                        structure = %name,
                        format = self.format.name(),
                        blocks = template.blocks.len(),
                        "Loaded structure"
                    );
                    loaded.insert(name, template);
                }
                Err(error) => {
                    #[cfg(feature = "observability")]
                    warn!(structure = %name, %error, "Skipping malformed structure");
                }
            }
        }
        loaded
    }
}
