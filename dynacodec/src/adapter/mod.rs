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

//! Best-effort adapter chains.
//!
//! Some objects carry optional data that several independent, possibly third
//! party adapters may know how to persist, and it is not known in advance
//! which one applies. An [`AdapterChain`] maps each string key to an ordered
//! list of candidate [`Adapter`]s:
//!
//! - **save**: for every key, candidates are tried in registration order.
//!   Candidates whose [`applies_to`](Adapter::applies_to) rejects the value are
//!   skipped; the first candidate that saves successfully provides the key's
//!   payload. A key with no successful candidate is absent from the output.
//! - **load**: for every key present in the input, its candidates are tried in
//!   order against the target; the first successful load wins. Unknown keys and
//!   keys whose candidates all fail are dropped.
//!
//! Failures never escape the chain. They are logged at debug level and only
//! show up as missing optional data. This is the opposite of discriminator
//! dispatch, where an unknown id aborts decoding.
//!
//! # Examples
//!
//! ```rust
//! use dynacodec::adapter::{Adapter, AdapterChain, AdapterList};
//! use dynacodec::ops::{DynamicOps, JsonOps};
//! use dynacodec::CodecError;
//! use serde_json::json;
//!
//! #[derive(Clone, Default)]
//! struct Chest {
//!     lock: Option<String>,
//! }
//!
//! struct LockAdapter;
//!
//! impl Adapter<Chest> for LockAdapter {
//!     fn applies_to(&self, chest: &Chest) -> bool {
//!         chest.lock.is_some()
//!     }
//!
//!     fn save<O: DynamicOps>(&self, ops: &O, chest: &Chest) -> Result<O::Node, CodecError> {
//!         let lock = chest.lock.as_deref().ok_or_else(|| CodecError::new("no lock"))?;
//!         Ok(ops.create_string(lock))
//!     }
//!
//!     fn load<O: DynamicOps>(&self, ops: &O, input: &O::Node, chest: &mut Chest) -> Result<(), CodecError> {
//!         chest.lock = Some(ops.get_string_value(input)?);
//!         Ok(())
//!     }
//! }
//!
//! let mut chain = AdapterChain::new("chest");
//! chain.register("lock", AdapterList::new().with(LockAdapter)).unwrap();
//!
//! let chest = Chest { lock: Some("key".into()) };
//! let saved = chain.save(&JsonOps, &chest);
//! assert_eq!(saved, json!({"lock": "key"}));
//!
//! // An unlocked chest contributes nothing: the key is absent, not null.
//! assert_eq!(chain.save(&JsonOps, &Chest::default()), json!({}));
//! ```

mod chain;
mod traits;

pub use chain::AdapterChain;
pub use traits::{Adapter, AdapterList, DynAdapter};
