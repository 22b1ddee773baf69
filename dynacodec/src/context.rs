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

//! The application context owning every registry.
//!
//! Registries are filled once through a [`CodecContextBuilder`] and then frozen
//! behind an [`Arc`]. Codecs handed out by the [`CodecContext`] share those
//! frozen registries, so they can be used from any thread without locking.

use crate::adapter::{AdapterChain, AdapterList};
use crate::block::{
    BlockData, BlockInfoCodec, CustomBlockRegistry, CustomBlockType, VanillaPalette,
    default_state_adapters,
};
use crate::codec::RecordCodec;
use crate::config::CodecConfig;
use crate::dispatch::DispatchCodec;
use crate::document::JsonDocument;
use crate::error::RegistryError;
use crate::structure::{
    ProcessorCodec, ProcessorRegistry, StructureLoader, StructureProcessor,
    StructureTemplateCodec, register_builtin_processors,
};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "observability")]
use tracing::debug;

type ProcessorRegistration = Box<dyn FnOnce(&mut ProcessorRegistry) -> Result<(), RegistryError>>;

/// A registration to be applied when building the context.
enum Registration {
    Processor(ProcessorRegistration),
    CustomBlock(Arc<dyn CustomBlockType>),
    Material(BlockData),
    States(String, AdapterList<BlockData>),
}

/// Frozen registries plus the configuration they were built with.
///
/// # Examples
///
/// ```rust
/// use dynacodec::block::{BlockData, BlockInfo, BlockPos};
/// use dynacodec::codec::Codec;
/// use dynacodec::ops::JsonOps;
/// use dynacodec::CodecContext;
/// use serde_json::json;
///
/// let context = CodecContext::builder()
///     .with_material(BlockData::new("lantern").with_state("hanging", false))
///     .build()
///     .unwrap();
///
/// let codec = context.block_info_codec();
/// let lantern = BlockInfo::new(
///     BlockPos::new(0, 2, 0),
///     BlockData::new("lantern").with_state("hanging", true),
/// );
/// let node = codec.encode(&JsonOps, &lantern).unwrap();
/// assert_eq!(
///     node,
///     json!({"id": "minecraft:lantern", "pos": [0, 2, 0], "states": {"hanging": true}})
/// );
/// assert_eq!(codec.decode(&JsonOps, &node).unwrap(), lantern);
/// ```
pub struct CodecContext {
    config: CodecConfig,
    processors: Arc<ProcessorRegistry>,
    custom_blocks: Arc<CustomBlockRegistry>,
    palette: Arc<VanillaPalette>,
    states: Arc<AdapterChain<BlockData>>,
}

impl CodecContext {
    /// Starts a builder with the default configuration.
    #[must_use]
    pub fn builder() -> CodecContextBuilder {
        CodecContextBuilder::default()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Returns the structure processor registry.
    #[must_use]
    pub fn processors(&self) -> &Arc<ProcessorRegistry> {
        &self.processors
    }

    /// Returns the custom block type registry.
    #[must_use]
    pub fn custom_blocks(&self) -> &Arc<CustomBlockRegistry> {
        &self.custom_blocks
    }

    /// Returns the vanilla palette.
    #[must_use]
    pub fn palette(&self) -> &Arc<VanillaPalette> {
        &self.palette
    }

    /// Returns the block state adapter chain.
    #[must_use]
    pub fn states(&self) -> &Arc<AdapterChain<BlockData>> {
        &self.states
    }

    /// Returns a codec for boxed structure processors.
    #[must_use]
    pub fn processor_codec(&self) -> ProcessorCodec {
        DispatchCodec::new(Arc::clone(&self.processors), self.config.processor_key.as_str())
    }

    /// Returns a codec for blocks.
    #[must_use]
    pub fn block_info_codec(&self) -> BlockInfoCodec {
        BlockInfoCodec::new(
            Arc::clone(&self.palette),
            Arc::clone(&self.custom_blocks),
            Arc::clone(&self.states),
            self.config.block_id_key.as_str(),
        )
    }

    /// Returns a codec for structure templates.
    #[must_use]
    pub fn template_codec(&self) -> StructureTemplateCodec {
        StructureTemplateCodec::new(self.block_info_codec(), self.processor_codec())
    }

    /// Returns the JSON document format configured for this context.
    #[must_use]
    pub fn json_document(&self) -> JsonDocument {
        let format = JsonDocument::new();
        if self.config.pretty_documents {
            format.with_pretty_print()
        } else {
            format
        }
    }

    /// Returns a structure loader reading JSON documents.
    #[must_use]
    pub fn structure_loader(&self) -> StructureLoader<JsonDocument> {
        StructureLoader::new(self.template_codec(), self.json_document())
    }
}

impl fmt::Debug for CodecContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecContext")
            .field("config", &self.config)
            .field("processors", &self.processors)
            .field("custom_blocks", &self.custom_blocks)
            .field("palette", &self.palette.len())
            .field("states", &self.states)
            .finish()
    }
}

/// Builder collecting registrations for a [`CodecContext`].
///
/// Registrations are applied in order by [`build`](Self::build), after the
/// built-in processors and the standard palette. Any palette state left
/// without adapters then gets [`default_state_adapters`].
pub struct CodecContextBuilder {
    config: CodecConfig,
    registrations: Vec<Registration>,
}

impl CodecContextBuilder {
    /// Creates a builder with the given configuration.
    #[must_use]
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            registrations: Vec::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Registers a structure processor type under `id`.
    #[must_use]
    pub fn with_processor<P, C>(mut self, id: impl Into<String>, codec: C) -> Self
    where
        P: StructureProcessor + 'static,
        C: RecordCodec<P> + 'static,
    {
        let id = id.into();
        let register = move |registry: &mut ProcessorRegistry| {
            registry.register(id, codec, |processor: P| {
                Box::new(processor) as Box<dyn StructureProcessor>
            })
        };
        self.registrations
            .push(Registration::Processor(Box::new(register)));
        self
    }

    /// Registers a custom block type.
    #[must_use]
    pub fn with_custom_block<B: CustomBlockType + 'static>(mut self, block_type: B) -> Self {
        self.registrations
            .push(Registration::CustomBlock(Arc::new(block_type)));
        self
    }

    /// Registers a vanilla material with its default states.
    #[must_use]
    pub fn with_material(mut self, defaults: BlockData) -> Self {
        self.registrations.push(Registration::Material(defaults));
        self
    }

    /// Registers the adapter candidates for one block state.
    #[must_use]
    pub fn with_state_adapters(
        mut self,
        state: impl Into<String>,
        candidates: AdapterList<BlockData>,
    ) -> Self {
        self.registrations
            .push(Registration::States(state.into(), candidates));
        self
    }

    /// Applies every registration and freezes the registries.
    ///
    /// Fails on the first duplicate when the configured policy is
    /// [`Reject`](crate::config::DuplicatePolicy::Reject).
    pub fn build(self) -> Result<Arc<CodecContext>, RegistryError> {
        let policy = self.config.duplicate_policy;
        let mut processors = ProcessorRegistry::with_policy("processor", policy);
        register_builtin_processors(&mut processors)?;
        let mut custom_blocks = CustomBlockRegistry::with_policy(policy);
        let mut palette = VanillaPalette::with_policy(policy).with_standard_materials();
        let mut states = AdapterChain::with_policy("state", policy);

        for registration in self.registrations {
            match registration {
                Registration::Processor(register) => register(&mut processors)?,
                Registration::CustomBlock(block_type) => custom_blocks.register_shared(block_type)?,
                Registration::Material(defaults) => palette.register(defaults)?,
                Registration::States(state, candidates) => states.register(state, candidates)?,
            }
        }

        let uncovered: Vec<String> = palette
            .state_names()
            .into_iter()
            .filter(|state| !states.contains(state))
            .map(str::to_string)
            .collect();
        for state in uncovered {
            let candidates = default_state_adapters(&state);
            states.register(state, candidates)?;
        }

        #[cfg(feature = "observability")]
        debug!(
            processors = processors.len(),
            custom_blocks = custom_blocks.len(),
            materials = palette.len(),
            states = states.len(),
            "Built codec context"
        );

        Ok(Arc::new(CodecContext {
            config: self.config,
            processors: Arc::new(processors),
            custom_blocks: Arc::new(custom_blocks),
            palette: Arc::new(palette),
            states: Arc::new(states),
        }))
    }
}

impl Default for CodecContextBuilder {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl fmt::Debug for CodecContextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecContextBuilder")
            .field("config", &self.config)
            .field("registrations", &self.registrations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{
        BlockIdentity, BlockInfo, BlockPos, BoolStateAdapter, SimpleBlockType, StateValue,
    };
    use crate::codec::{Codec, MapBuilder, MapReader};
    use crate::config::DuplicatePolicy;
    use crate::error::CodecError;
    use crate::ops::{DynamicOps, JsonOps};
    use crate::structure::{BlockIgnoreProcessor, INTEGRITY_ID};
    use serde_json::json;

    #[derive(Debug)]
    struct Rotate;

    impl StructureProcessor for Rotate {
        fn process(&self, current: BlockInfo, _: &BlockInfo) -> Option<BlockInfo> {
            Some(current)
        }
    }

    struct RotateFields;

    impl RecordCodec<Rotate> for RotateFields {
        fn encode_fields<O: DynamicOps>(
            &self,
            _: &Rotate,
            _: &mut MapBuilder<'_, O>,
        ) -> Result<(), CodecError> {
            Ok(())
        }

        fn decode_fields<O: DynamicOps>(&self, _: &MapReader<'_, O>) -> Result<Rotate, CodecError> {
            Ok(Rotate)
        }
    }

    #[test]
    fn test_default_context_has_builtins() {
        let context = CodecContext::builder().build().unwrap();
        assert!(context.processors().contains(INTEGRITY_ID));
        assert!(context.palette().contains("furnace"));
        assert!(context.states().contains("facing"));
        assert_eq!(context.processor_codec().key(), "type");
    }

    #[test]
    fn test_registered_processor_dispatches() {
        let context = CodecContext::builder()
            .with_processor("test:rotate", RotateFields)
            .build()
            .unwrap();
        let codec = context.processor_codec();
        let processor = codec.decode(&JsonOps, &json!({"type": "test:rotate"})).unwrap();
        assert!((*processor).as_any().is::<Rotate>());
        assert_eq!(codec.encode(&JsonOps, &processor).unwrap(), json!({"type": "test:rotate"}));
    }

    #[test]
    fn test_config_keys_flow_into_codecs() {
        let config = CodecConfig::new()
            .with_processor_key("kind")
            .with_block_id_key("block");
        let context = CodecContextBuilder::new(config).build().unwrap();
        let processor: Box<dyn StructureProcessor> =
            Box::new(BlockIgnoreProcessor::new(["minecraft:air"]));
        assert_eq!(
            context.processor_codec().encode(&JsonOps, &processor).unwrap(),
            json!({"kind": "minecraft:block_ignore", "blocks": ["minecraft:air"]})
        );
        let info = context
            .block_info_codec()
            .decode(&JsonOps, &json!({"block": "minecraft:stone"}))
            .unwrap();
        assert_eq!(info.pos, BlockPos::ORIGIN);
    }

    #[test]
    fn test_explicit_state_adapters_are_kept() {
        let context = CodecContext::builder()
            .with_state_adapters("lit", AdapterList::new().with(BoolStateAdapter::new("lit")))
            .build()
            .unwrap();
        assert_eq!(context.states().candidates("lit"), 1);
        assert_eq!(context.states().candidates("facing"), 3);
    }

    #[test]
    fn test_material_registration_covers_new_states() {
        let context = CodecContext::builder()
            .with_material(BlockData::new("campfire").with_state("signal_fire", false))
            .build()
            .unwrap();
        let info = context
            .block_info_codec()
            .decode(
                &JsonOps,
                &json!({"id": "minecraft:campfire", "states": {"signal_fire": true}}),
            )
            .unwrap();
        let BlockIdentity::Vanilla(data) = info.block else {
            panic!("expected vanilla block");
        };
        assert_eq!(data.state("signal_fire"), Some(&StateValue::Bool(true)));
    }

    #[test]
    fn test_reject_policy_fails_build_on_duplicate() {
        let config = CodecConfig::new().with_duplicate_policy(DuplicatePolicy::Reject);
        let result = CodecContextBuilder::new(config)
            .with_custom_block(SimpleBlockType::new("test:pipe"))
            .with_custom_block(SimpleBlockType::new("test:pipe"))
            .build();
        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateKey {
                registry: "custom block",
                key: "test:pipe".into()
            }
        );
    }

    #[test]
    fn test_replace_policy_overrides_builtin_processor() {
        let context = CodecContext::builder()
            .with_processor(INTEGRITY_ID, RotateFields)
            .build()
            .unwrap();
        let processor = context
            .processor_codec()
            .decode(&JsonOps, &json!({"type": INTEGRITY_ID}))
            .unwrap();
        assert!((*processor).as_any().is::<Rotate>());
    }

    #[test]
    fn test_json_document_follows_config() {
        let config = CodecConfig::new().with_pretty_documents(true);
        let context = CodecContextBuilder::new(config).build().unwrap();
        assert!(context.json_document().is_pretty());
        assert!(!CodecContext::builder().build().unwrap().json_document().is_pretty());
    }
}
