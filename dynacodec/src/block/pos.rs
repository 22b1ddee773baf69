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

//! Block positions.

use crate::codec::Codec;
use crate::error::CodecError;
use crate::ops::DynamicOps;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A block position relative to a structure origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct BlockPos {
    /// East-west offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
    /// North-south offset.
    pub z: i32,
}

impl BlockPos {
    /// The structure origin.
    pub const ORIGIN: BlockPos = BlockPos::new(0, 0, 0);

    /// Creates a position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns this position moved by `other`.
    #[must_use]
    pub const fn offset(self, other: BlockPos) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Encodes a [`BlockPos`] as a three element integer list.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockPosCodec;

impl Codec<BlockPos> for BlockPosCodec {
    fn encode<O: DynamicOps>(&self, ops: &O, value: &BlockPos) -> Result<O::Node, CodecError> {
        Ok(ops.create_list(vec![
            ops.create_int(i64::from(value.x)),
            ops.create_int(i64::from(value.y)),
            ops.create_int(i64::from(value.z)),
        ]))
    }

    fn decode<O: DynamicOps>(&self, ops: &O, input: &O::Node) -> Result<BlockPos, CodecError> {
        let elements = ops.get_list(input)?;
        let [x, y, z] = elements.as_slice() else {
            return Err(CodecError::new(format!(
                "position needs 3 coordinates, found {}",
                elements.len()
            )));
        };
        let coordinate = |node: &O::Node| -> Result<i32, CodecError> {
            let value = ops.get_int(node)?;
            i32::try_from(value)
                .map_err(|_| CodecError::new(format!("coordinate {value} does not fit in i32")))
        };
        Ok(BlockPos::new(coordinate(x)?, coordinate(y)?, coordinate(z)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::JsonOps;
    use serde_json::json;

    #[test]
    fn test_pos_codec() {
        let pos = BlockPos::new(1, -2, 3);
        let node = BlockPosCodec.encode(&JsonOps, &pos).unwrap();
        assert_eq!(node, json!([1, -2, 3]));
        assert_eq!(BlockPosCodec.decode(&JsonOps, &node).unwrap(), pos);
    }

    #[test]
    fn test_pos_codec_rejects_wrong_length() {
        let error = BlockPosCodec.decode(&JsonOps, &json!([1, 2])).unwrap_err();
        assert!(error.message().contains("found 2"));
    }

    #[test]
    fn test_pos_codec_rejects_overflow() {
        assert!(BlockPosCodec.decode(&JsonOps, &json!([0, 4294967296i64, 0])).is_err());
    }

    #[test]
    fn test_offset_and_display() {
        let pos = BlockPos::new(1, 2, 3).offset(BlockPos::new(1, 1, 1));
        assert_eq!(pos.to_string(), "(2, 3, 4)");
    }
}
