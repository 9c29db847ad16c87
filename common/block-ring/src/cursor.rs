// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::geometry::Geometry;

/// A block-aligned offset into the ring's storage
///
/// The origin is always offset 0. A cursor only moves forward, one block at a time, and wraps
/// back to the origin when it reaches the end of the storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    offset: usize,
}

impl Cursor {
    pub const ORIGIN: Self = Self { offset: 0 };

    /// Returns the byte offset of the cursor from the origin
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the index of the block the cursor points to
    #[inline]
    pub fn block_index(&self, geometry: &Geometry) -> usize {
        self.offset / geometry.block_size()
    }

    /// Moves the cursor forward by one block, wrapping at the end of the storage
    #[inline]
    pub fn advance(&mut self, geometry: &Geometry) {
        debug_assert_eq!(self.offset % geometry.block_size(), 0, "{self:?}");
        debug_assert!(self.offset < geometry.capacity(), "{self:?}");

        let next = self.offset + geometry.block_size();
        self.offset = if next >= geometry.capacity() { 0 } else { next };
    }

    /// Moves the cursor back to the origin
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::ORIGIN;
    }
}
