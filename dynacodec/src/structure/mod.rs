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

//! Structure templates and the processors applied to them.
//!
//! Processors are an open set dispatched on the `"type"` key through a
//! [`ProcessorRegistry`]. The built-ins are registered by
//! [`register_builtin_processors`].

mod loader;
mod processor;
mod template;

pub use loader::StructureLoader;
pub use processor::{
    BLOCK_IGNORE_ID, BlockIgnoreFields, BlockIgnoreProcessor, INTEGRITY_ID, IntegrityFields,
    IntegrityProcessor, ProcessorCodec, ProcessorRegistry, StructureProcessor,
    register_builtin_processors,
};
pub use template::{DATA_VERSION, StructureTemplate, StructureTemplateCodec};
