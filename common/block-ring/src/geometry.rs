// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::error::ArgumentError;

#[cfg(any(test, feature = "generator"))]
use bolero_generator::*;

/// Queue size used by the default byte-oriented geometry
pub const DEFAULT_CAPACITY: usize = 1024;

/// The validated shape of a ring: its total capacity and the size of each block, in bytes
///
/// A `Geometry` always satisfies `capacity >= 2`, `block_size > 0` and
/// `capacity % block_size == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Geometry {
    capacity: usize,
    block_size: usize,
}

impl Default for Geometry {
    /// A byte-oriented ring of [`DEFAULT_CAPACITY`] bytes
    #[inline]
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            block_size: 1,
        }
    }
}

impl Geometry {
    /// The smallest capacity a ring may have
    pub const MIN_CAPACITY: usize = 2;

    #[inline]
    pub const fn new(capacity: usize, block_size: usize) -> Result<Self, ArgumentError> {
        if capacity == 0 {
            return Err(ArgumentError::EmptyStorage);
        }

        if block_size == 0 {
            return Err(ArgumentError::ZeroBlockSize);
        }

        if capacity < Self::MIN_CAPACITY {
            return Err(ArgumentError::CapacityTooSmall { capacity });
        }

        if capacity % block_size != 0 {
            return Err(ArgumentError::Misaligned {
                capacity,
                block_size,
            });
        }

        Ok(Self {
            capacity,
            block_size,
        })
    }

    /// Total number of bytes in the backing storage
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of bytes moved by a single put or get
    #[inline]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of blocks the ring can hold
    #[inline]
    pub const fn blocks(&self) -> usize {
        self.capacity / self.block_size
    }

    /// Ensures `len` is exactly one block
    #[inline]
    pub const fn check_block(&self, len: usize) -> Result<(), ArgumentError> {
        if len != self.block_size {
            return Err(ArgumentError::BlockLength {
                expected: self.block_size,
                actual: len,
            });
        }
        Ok(())
    }

    /// Ensures `len` is a whole number of blocks
    #[inline]
    pub const fn check_transfer(&self, len: usize) -> Result<(), ArgumentError> {
        if len % self.block_size != 0 {
            return Err(ArgumentError::PartialBlock {
                len,
                block_size: self.block_size,
            });
        }
        Ok(())
    }

    /// Generates valid geometries of up to 16 blocks of up to 16 bytes each
    #[cfg(any(test, feature = "generator"))]
    pub fn generator() -> impl ValueGenerator<Output = Self> {
        (1usize..=16, 1usize..=16).map_gen(|(block_size, blocks)| {
            // a single one-byte block is below the minimum capacity
            let blocks = if block_size == 1 { blocks.max(2) } else { blocks };
            Self {
                capacity: block_size * blocks,
                block_size,
            }
        })
    }
}
