// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Producer and consumer halves of a [`BlockRing`](crate::BlockRing)
//!
//! The halves synchronize through the ring's fill counter alone:
//!
//! * The producer loads the counter with `Acquire`, fills the block at its private write cursor
//!   and publishes it with a `Release` increment.
//! * The consumer loads the counter with `Acquire`, copies the block at its private read cursor
//!   out and hands the slot back with a `Release` decrement.
//!
//! Each cursor is only ever touched by its own half, so no other synchronization is needed as
//! long as there is exactly one producer and one consumer, which [`BlockRing::split`] guarantees
//! by borrowing the ring mutably.
//!
//! [`BlockRing::split`]: crate::BlockRing::split

use crate::{
    cursor::Cursor,
    error::{Error, Result},
    geometry::Geometry,
    ring::Region,
    sync::{AtomicUsize, Ordering},
};

/// The writing half of a ring
#[derive(Debug)]
pub struct Producer<'r> {
    region: Region,
    cursor: &'r mut Cursor,
    filled: &'r AtomicUsize,
}

/// Safety: the producer only writes to blocks that the consumer has released
unsafe impl Send for Producer<'_> {}

impl<'r> Producer<'r> {
    #[inline]
    pub(crate) fn new(region: Region, cursor: &'r mut Cursor, filled: &'r AtomicUsize) -> Self {
        Self {
            region,
            cursor,
            filled,
        }
    }

    /// Copies one block into the ring
    ///
    /// Returns [`Error::BufferFull`] without writing anything if every block holds unread data.
    #[inline]
    pub fn put(&mut self, block: &[u8]) -> Result<()> {
        let geometry = *self.region.geometry();
        geometry.check_block(block.len())?;

        if self.filled.load(Ordering::Acquire) >= geometry.capacity() {
            return Err(Error::BufferFull);
        }

        unsafe {
            // Safety: the ring is not full, so the block at the write cursor has been released
            self.region.write_block(self.cursor, block);
        }

        self.cursor.advance(&geometry);
        self.filled
            .fetch_add(geometry.block_size(), Ordering::Release);

        Ok(())
    }

    /// Returns the number of free bytes in the ring
    #[inline]
    pub fn available(&self) -> usize {
        self.capacity() - self.filled.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.available() == 0
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        self.region.geometry()
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.region.geometry().block_size()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.region.geometry().capacity()
    }
}

/// The reading half of a ring
#[derive(Debug)]
pub struct Consumer<'r> {
    region: Region,
    cursor: &'r mut Cursor,
    filled: &'r AtomicUsize,
}

/// Safety: the consumer only reads blocks that the producer has published
unsafe impl Send for Consumer<'_> {}

impl<'r> Consumer<'r> {
    #[inline]
    pub(crate) fn new(region: Region, cursor: &'r mut Cursor, filled: &'r AtomicUsize) -> Self {
        Self {
            region,
            cursor,
            filled,
        }
    }

    /// Copies the oldest block out of the ring into `out`
    ///
    /// Returns [`Error::BufferEmpty`] and leaves `out` untouched if there is no unread data.
    #[inline]
    pub fn get(&mut self, out: &mut [u8]) -> Result<()> {
        let geometry = *self.region.geometry();
        geometry.check_block(out.len())?;

        if self.filled.load(Ordering::Acquire) == 0 {
            return Err(Error::BufferEmpty);
        }

        unsafe {
            // Safety: the ring is not empty, so the block at the read cursor has been published
            self.region.read_block(self.cursor, out);
        }

        self.cursor.advance(&geometry);
        self.filled
            .fetch_sub(geometry.block_size(), Ordering::Release);

        Ok(())
    }

    /// Returns the number of bytes holding unread data
    #[inline]
    pub fn len(&self) -> usize {
        self.filled.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        self.region.geometry()
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.region.geometry().block_size()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.region.geometry().capacity()
    }
}

#[cfg(test)]
mod tests {
    use crate::{BlockRing, Error};

    #[test]
    fn halves_share_the_fill_counter() {
        let mut storage = [0u8; 6];
        let mut ring = BlockRing::with_storage(&mut storage, 2).unwrap();
        let (mut producer, mut consumer) = ring.split().unwrap();

        assert_eq!(producer.available(), 6);
        assert!(consumer.is_empty());

        producer.put(&[1, 2]).unwrap();
        producer.put(&[3, 4]).unwrap();
        assert_eq!(producer.available(), 2);
        assert_eq!(consumer.len(), 4);

        let mut block = [0u8; 2];
        consumer.get(&mut block).unwrap();
        assert_eq!(block, [1, 2]);
        assert_eq!(producer.available(), 4);

        producer.put(&[5, 6]).unwrap();
        producer.put(&[7, 8]).unwrap();
        assert!(producer.is_full());
        assert_eq!(producer.put(&[9, 9]), Err(Error::BufferFull));

        for expected in [[3, 4], [5, 6], [7, 8]] {
            consumer.get(&mut block).unwrap();
            assert_eq!(block, expected);
        }
        assert_eq!(consumer.get(&mut block), Err(Error::BufferEmpty));
    }

    #[test]
    fn cursors_persist_across_splits() {
        let mut storage = [0u8; 4];
        let mut ring = BlockRing::with_storage(&mut storage, 1).unwrap();

        {
            let (mut producer, _) = ring.split().unwrap();
            producer.put(b"a").unwrap();
            producer.put(b"b").unwrap();
        }

        assert_eq!(ring.len(), 2);

        let (_, mut consumer) = ring.split().unwrap();
        let mut byte = [0u8];
        consumer.get(&mut byte).unwrap();
        assert_eq!(&byte, b"a");
    }

    #[test]
    fn split_requires_initialization() {
        let mut ring = BlockRing::new();
        assert!(matches!(ring.split(), Err(Error::NotInitialized)));
    }

    #[test]
    fn halves_are_send() {
        fn assert_send<T: Send>(_v: &T) {}

        let mut storage = [0u8; 4];
        let mut ring = BlockRing::with_storage(&mut storage, 2).unwrap();
        let (producer, consumer) = ring.split().unwrap();
        assert_send(&producer);
        assert_send(&consumer);
    }
}

#[cfg(all(loom, test))]
mod loom_tests {
    use crate::{BlockRing, Error};
    use loom::thread;

    #[test]
    fn block_hand_off() {
        loom::model(|| {
            let storage: &'static mut [u8] = Box::leak(vec![0u8; 4].into_boxed_slice());
            let ring = BlockRing::with_storage(storage, 2).unwrap();
            let ring: &'static mut BlockRing<'static> = Box::leak(Box::new(ring));
            let (mut producer, mut consumer) = ring.split().unwrap();

            let producer = thread::spawn(move || {
                for block in [[1u8, 2], [3, 4], [5, 6]] {
                    loop {
                        match producer.put(&block) {
                            Ok(()) => break,
                            Err(Error::BufferFull) => thread::yield_now(),
                            Err(error) => panic!("unexpected error: {error}"),
                        }
                    }
                }
            });

            let mut block = [0u8; 2];
            for expected in [[1u8, 2], [3, 4], [5, 6]] {
                loop {
                    match consumer.get(&mut block) {
                        Ok(()) => break,
                        Err(Error::BufferEmpty) => thread::yield_now(),
                        Err(error) => panic!("unexpected error: {error}"),
                    }
                }
                assert_eq!(block, expected);
            }

            producer.join().unwrap();
        });
    }
}
