// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    cursor::Cursor,
    error::{Error, Result},
    geometry::Geometry,
    split::{Consumer, Producer},
    sync::{AtomicUsize, Ordering},
};
use core::{marker::PhantomData, ptr::NonNull};


/// A ring of fixed-size blocks over a caller-provided storage region
///
/// The ring starts out uninitialized; [`Self::initialize`] binds it to storage and a block
/// size. Every data operation on an uninitialized ring fails with [`Error::NotInitialized`].
///
/// The storage is borrowed for `'a` and never freed, reallocated or cleared by the ring.
/// [`Self::reset`] only rewinds the cursors, so stale bytes stay in the storage until they are
/// overwritten.
#[derive(Debug, Default)]
pub struct BlockRing<'a> {
    state: Option<State<'a>>,
}

/// Safety: the ring behaves like the `&'a mut [u8]` it was built from
unsafe impl Send for BlockRing<'_> {}

/// Safety: shared references only read the atomic fill counter and the geometry
unsafe impl Sync for BlockRing<'_> {}

impl<'a> BlockRing<'a> {
    /// Creates an uninitialized ring
    #[inline]
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Creates a ring bound to `storage`, moving `block_size` bytes per operation
    #[inline]
    pub fn with_storage(storage: &'a mut [u8], block_size: usize) -> Result<Self> {
        let mut ring = Self::new();
        ring.initialize(storage, block_size)?;
        Ok(ring)
    }

    /// Binds the ring to `storage`, discarding any previous state
    ///
    /// The capacity of the ring is the length of `storage`, which must be at least
    /// [`Geometry::MIN_CAPACITY`] and a multiple of `block_size`. On failure the ring is left
    /// exactly as it was.
    pub fn initialize(&mut self, storage: &'a mut [u8], block_size: usize) -> Result<()> {
        let geometry = Geometry::new(storage.len(), block_size)?;

        self.state = Some(State::new(storage, geometry));

        tracing::debug!(
            capacity = geometry.capacity(),
            block_size,
            blocks = geometry.blocks(),
            "ring initialized"
        );

        Ok(())
    }

    /// Drops all buffered blocks and rewinds both cursors to the origin
    pub fn reset(&mut self) -> Result<()> {
        let state = self.state.as_mut().ok_or(Error::NotInitialized)?;

        let dropped = state.filled();
        state.reset();

        tracing::debug!(dropped, "ring reset");

        Ok(())
    }

    /// Copies one block into the ring
    ///
    /// `block` must be exactly [`Self::block_size`] bytes. Returns [`Error::BufferFull`] without
    /// writing anything if every block holds unread data.
    #[inline]
    pub fn put(&mut self, block: &[u8]) -> Result<()> {
        let (mut producer, _consumer) = self.split()?;
        producer.put(block)
    }

    /// Copies the oldest block out of the ring into `out`
    ///
    /// `out` must be exactly [`Self::block_size`] bytes. Returns [`Error::BufferEmpty`] and
    /// leaves `out` untouched if there is no unread data.
    #[inline]
    pub fn get(&mut self, out: &mut [u8]) -> Result<()> {
        let (_producer, mut consumer) = self.split()?;
        consumer.get(out)
    }

    /// Returns the number of free bytes in the ring
    #[inline]
    pub fn available(&self) -> Result<usize> {
        let state = self.state.as_ref().ok_or(Error::NotInitialized)?;
        Ok(state.geometry().capacity() - state.filled())
    }

    /// Splits the ring into its producer and consumer halves
    ///
    /// The halves may be moved to different threads. The ring can't be reset or
    /// re-initialized while either half is alive.
    #[inline]
    pub fn split(&mut self) -> Result<(Producer<'_>, Consumer<'_>)> {
        let state = self.state.as_mut().ok_or(Error::NotInitialized)?;
        Ok(state.split())
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    #[inline]
    pub fn geometry(&self) -> Option<Geometry> {
        self.state.as_ref().map(|state| *state.geometry())
    }

    /// Returns the capacity of the ring in bytes, or 0 if it is uninitialized
    #[inline]
    pub fn capacity(&self) -> usize {
        self.geometry().map_or(0, |geometry| geometry.capacity())
    }

    /// Returns the block size of the ring, or 0 if it is uninitialized
    #[inline]
    pub fn block_size(&self) -> usize {
        self.geometry().map_or(0, |geometry| geometry.block_size())
    }

    /// Returns the number of bytes holding unread data
    #[inline]
    pub fn len(&self) -> usize {
        self.state.as_ref().map_or(0, State::filled)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the ring is initialized and every block holds unread data
    #[inline]
    pub fn is_full(&self) -> bool {
        self.is_initialized() && self.len() == self.capacity()
    }

    #[inline]
    pub fn blocks_filled(&self) -> usize {
        self.state
            .as_ref()
            .map_or(0, |state| state.filled() / state.geometry().block_size())
    }

    #[inline]
    pub fn blocks_free(&self) -> usize {
        self.state.as_ref().map_or(0, |state| {
            let geometry = state.geometry();
            (geometry.capacity() - state.filled()) / geometry.block_size()
        })
    }
}

#[derive(Debug)]
struct State<'a> {
    region: Region,
    write: Cursor,
    read: Cursor,
    /// Bytes of unread data, shared between the producer and consumer halves
    filled: AtomicUsize,
    storage: PhantomData<&'a mut [u8]>,
}

impl<'a> State<'a> {
    #[inline]
    fn new(storage: &'a mut [u8], geometry: Geometry) -> Self {
        debug_assert_eq!(storage.len(), geometry.capacity());

        Self {
            region: Region {
                data: NonNull::from(storage).cast(),
                geometry,
            },
            write: Cursor::ORIGIN,
            read: Cursor::ORIGIN,
            filled: AtomicUsize::new(0),
            storage: PhantomData,
        }
    }

    #[inline]
    fn geometry(&self) -> &Geometry {
        &self.region.geometry
    }

    #[inline]
    fn filled(&self) -> usize {
        self.filled.load(Ordering::Acquire)
    }

    #[inline]
    fn reset(&mut self) {
        self.write.reset();
        self.read.reset();
        self.filled.store(0, Ordering::Relaxed);
    }

    #[inline]
    fn split(&mut self) -> (Producer<'_>, Consumer<'_>) {
        let Self {
            region,
            write,
            read,
            filled,
            ..
        } = self;
        let filled = &*filled;
        let producer = Producer::new(*region, write, filled);
        let consumer = Consumer::new(*region, read, filled);
        (producer, consumer)
    }
}

/// The raw storage behind a ring, shared by both halves
#[derive(Clone, Copy, Debug)]
pub(crate) struct Region {
    data: NonNull<u8>,
    geometry: Geometry,
}

impl Region {
    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Copies `block` into the storage at `cursor`
    ///
    /// # Safety
    ///
    /// The block at `cursor` MUST NOT hold unread data, and only the producer may call this.
    #[inline]
    pub unsafe fn write_block(&self, cursor: &Cursor, block: &[u8]) {
        let offset = cursor.offset();
        debug_assert_eq!(block.len(), self.geometry.block_size());
        debug_assert!(offset + block.len() <= self.geometry.capacity());

        let dst = self.data.as_ptr().add(offset);
        core::ptr::copy_nonoverlapping(block.as_ptr(), dst, block.len());
    }

    /// Copies the block at `cursor` out of the storage into `out`
    ///
    /// # Safety
    ///
    /// The block at `cursor` MUST hold unread data, and only the consumer may call this.
    #[inline]
    pub unsafe fn read_block(&self, cursor: &Cursor, out: &mut [u8]) {
        let offset = cursor.offset();
        debug_assert_eq!(out.len(), self.geometry.block_size());
        debug_assert!(offset + out.len() <= self.geometry.capacity());

        let src = self.data.as_ptr().add(offset) as *const u8;
        core::ptr::copy_nonoverlapping(src, out.as_mut_ptr(), out.len());
    }
}
