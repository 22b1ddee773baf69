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

//! Physical document formats for [`Value`] trees.
//!
//! Codecs work on in-memory trees. A [`DocumentFormat`] turns bytes into a
//! [`Value`] tree and back, so any codec can be read from or written to a file
//! without knowing the format:
//!
//! - [`JsonDocument`]: human-readable JSON, optionally pretty-printed. Opaque
//!   snapshots are written inline as the JSON they captured.
//! - [`PostcardDocument`]: compact binary. The whole [`Value`] model is kept,
//!   including non-string map keys and opaque snapshots.
//!
//! # Examples
//!
//! ```rust
//! use dynacodec::codec::primitives::StringCodec;
//! use dynacodec::document::{DocumentFormat, JsonDocument, PostcardDocument};
//!
//! # fn example() -> Result<(), dynacodec::CodecError> {
//! let name = "spawn_room".to_string();
//!
//! let json = JsonDocument::new().encode(&StringCodec, &name)?;
//! assert_eq!(json, br#""spawn_room""#);
//!
//! let binary = PostcardDocument::new();
//! let bytes = binary.encode(&StringCodec, &name)?;
//! assert_eq!(binary.decode(&StringCodec, &bytes)?, name);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod json;
mod postcard;

pub use self::json::JsonDocument;
pub use self::postcard::PostcardDocument;

use crate::codec::Codec;
use crate::error::CodecError;
use crate::ops::{Value, ValueOps};

/// Converts between bytes and [`Value`] trees.
pub trait DocumentFormat: Send + Sync {
    /// Parses a document.
    fn read(&self, bytes: &[u8]) -> Result<Value, CodecError>;

    /// Renders a document.
    fn write(&self, value: &Value) -> Result<Vec<u8>, CodecError>;

    /// Returns a short name for this format.
    fn name(&self) -> &'static str;

    /// Parses a document and decodes it with `codec`.
    fn decode<T, C: Codec<T>>(&self, codec: &C, bytes: &[u8]) -> Result<T, CodecError>
    where
        Self: Sized,
    {
        codec.decode(&ValueOps, &self.read(bytes)?)
    }

    /// Encodes `value` with `codec` and renders the document.
    fn encode<T, C: Codec<T>>(&self, codec: &C, value: &T) -> Result<Vec<u8>, CodecError>
    where
        Self: Sized,
    {
        self.write(&codec.encode(&ValueOps, value)?)
    }
}
