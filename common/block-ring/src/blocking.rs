// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Spinning transfers of many blocks
//!
//! These wrappers busy-wait whenever the ring is full or empty. They never sleep or yield, and
//! there is no timeout: if nothing on the other side of the ring makes progress they never
//! return. A caller that abandons a transfer from the outside keeps whatever blocks were already
//! moved.

use crate::{
    error::{Error, Result},
    ring::BlockRing,
    split::{Consumer, Producer},
};

impl Producer<'_> {
    /// Writes all of `input`, one block at a time, spinning while the ring is full
    ///
    /// `input` must be a whole number of blocks. Returns the number of bytes written, which is
    /// always `input.len()`.
    pub fn write_blocking(&mut self, input: &[u8]) -> Result<usize> {
        let block_size = self.block_size();
        self.geometry().check_transfer(input.len())?;

        for block in input.chunks_exact(block_size) {
            let mut waiting = false;
            loop {
                match self.put(block) {
                    Ok(()) => break,
                    Err(Error::BufferFull) => {
                        if !waiting {
                            tracing::trace!(capacity = self.capacity(), "ring full, spinning");
                            waiting = true;
                        }
                        core::hint::spin_loop();
                    }
                    Err(error) => return Err(error),
                }
            }
        }

        Ok(input.len())
    }
}

impl Consumer<'_> {
    /// Fills all of `out`, one block at a time, spinning while the ring is empty
    ///
    /// `out` must be a whole number of blocks. Returns the number of bytes read, which is always
    /// `out.len()`.
    pub fn read_blocking(&mut self, out: &mut [u8]) -> Result<usize> {
        let block_size = self.block_size();
        self.geometry().check_transfer(out.len())?;

        let len = out.len();
        for block in out.chunks_exact_mut(block_size) {
            let mut waiting = false;
            loop {
                match self.get(block) {
                    Ok(()) => break,
                    Err(Error::BufferEmpty) => {
                        if !waiting {
                            tracing::trace!(capacity = self.capacity(), "ring empty, spinning");
                            waiting = true;
                        }
                        core::hint::spin_loop();
                    }
                    Err(error) => return Err(error),
                }
            }
        }

        Ok(len)
    }
}

impl BlockRing<'_> {
    /// Fills all of `out` from the ring, spinning while it is empty
    ///
    /// With a single caller holding the ring mutably, nothing else can add blocks. This only
    /// returns if the ring already holds `out.len()` bytes, or if an interrupt handler fills it
    /// behind the caller's back. Prefer [`Consumer::read_blocking`] with a live [`Producer`].
    #[inline]
    pub fn read_blocking(&mut self, out: &mut [u8]) -> Result<usize> {
        let (_producer, mut consumer) = self.split()?;
        consumer.read_blocking(out)
    }

    /// Writes all of `input` into the ring, spinning while it is full
    ///
    /// Returns the number of bytes written. See [`Self::read_blocking`] for the livelock caveat.
    #[inline]
    pub fn write_blocking(&mut self, input: &[u8]) -> Result<usize> {
        let (mut producer, _consumer) = self.split()?;
        producer.write_blocking(input)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ArgumentError, BlockRing, Error};

    #[test]
    fn write_then_read() {
        let mut storage = [0u8; 8];
        let mut ring = BlockRing::with_storage(&mut storage, 2).unwrap();

        assert_eq!(ring.write_blocking(b"abcdef"), Ok(6));
        assert_eq!(ring.available(), Ok(2));

        let mut out = [0u8; 4];
        assert_eq!(ring.read_blocking(&mut out), Ok(4));
        assert_eq!(&out, b"abcd");

        assert_eq!(ring.write_blocking(b"gh"), Ok(2));
        let mut out = [0u8; 4];
        assert_eq!(ring.read_blocking(&mut out), Ok(4));
        assert_eq!(&out, b"efgh");
        assert!(ring.is_empty());
    }

    #[test]
    fn empty_transfers() {
        let mut storage = [0u8; 4];
        let mut ring = BlockRing::with_storage(&mut storage, 2).unwrap();

        assert_eq!(ring.write_blocking(&[]), Ok(0));
        assert_eq!(ring.read_blocking(&mut []), Ok(0));
    }

    #[test]
    fn partial_blocks_are_rejected() {
        let mut storage = [0u8; 8];
        let mut ring = BlockRing::with_storage(&mut storage, 4).unwrap();

        let error = Error::from(ArgumentError::PartialBlock {
            len: 6,
            block_size: 4,
        });
        assert_eq!(ring.write_blocking(&[0; 6]), Err(error));
        assert_eq!(ring.read_blocking(&mut [0; 6]), Err(error));
        assert!(ring.is_empty());
    }

    #[test]
    fn uninitialized() {
        let mut ring = BlockRing::new();
        assert_eq!(ring.write_blocking(b"a"), Err(Error::NotInitialized));
        assert_eq!(ring.read_blocking(&mut [0]), Err(Error::NotInitialized));
    }
}
