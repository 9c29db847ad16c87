// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::{ArgumentError, Error},
    split::{Consumer, Producer},
};
use std::io;

/// Writes as many whole blocks as currently fit
///
/// Trailing bytes that don't make up a whole block are left for the caller to retry. A full ring
/// reports [`io::ErrorKind::WouldBlock`].
impl io::Write for Producer<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let block_size = self.block_size();
        if buf.len() < block_size {
            return Err(short_buffer(block_size, buf.len()));
        }

        let mut written = 0;
        for block in buf.chunks_exact(block_size) {
            match self.put(block) {
                Ok(()) => written += block_size,
                Err(Error::BufferFull) if written > 0 => break,
                Err(error) => return Err(error.into()),
            }
        }

        Ok(written)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reads as many whole blocks as are available and fit in the buffer
///
/// An empty ring reports [`io::ErrorKind::WouldBlock`] rather than end-of-stream.
impl io::Read for Consumer<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let block_size = self.block_size();
        if buf.len() < block_size {
            return Err(short_buffer(block_size, buf.len()));
        }

        let mut read = 0;
        for block in buf.chunks_exact_mut(block_size) {
            match self.get(block) {
                Ok(()) => read += block_size,
                Err(Error::BufferEmpty) if read > 0 => break,
                Err(error) => return Err(error.into()),
            }
        }

        Ok(read)
    }
}

#[inline]
fn short_buffer(expected: usize, actual: usize) -> io::Error {
    Error::from(ArgumentError::BlockLength { expected, actual }).into()
}
