// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! A fixed-capacity ring buffer of fixed-size blocks, laid over storage owned by the caller.
//!
//! The ring never allocates. It is bound to a `&mut [u8]` region and a block size, and then
//! moves exactly one block per [`BlockRing::put`] or [`BlockRing::get`]:
//!
//! ```
//! use block_ring::{BlockRing, Error};
//!
//! let mut storage = [0u8; 8];
//! let mut ring = BlockRing::with_storage(&mut storage, 4).unwrap();
//!
//! ring.put(&[1, 2, 3, 4]).unwrap();
//! ring.put(&[5, 6, 7, 8]).unwrap();
//! assert_eq!(ring.put(&[9, 9, 9, 9]), Err(Error::BufferFull));
//!
//! let mut block = [0u8; 4];
//! ring.get(&mut block).unwrap();
//! assert_eq!(block, [1, 2, 3, 4]);
//! ```
//!
//! For a producer and a consumer running in different contexts, [`BlockRing::split`] hands out
//! a [`Producer`] and a [`Consumer`] which synchronize through a single atomic fill counter.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod blocking;
mod cursor;
mod error;
mod geometry;
mod ring;
mod split;
mod sync;

#[cfg(feature = "std")]
mod io;

#[cfg(test)]
mod testing;

pub use cursor::Cursor;
pub use error::{ArgumentError, Error, Result};
pub use geometry::{Geometry, DEFAULT_CAPACITY};
pub use ring::BlockRing;
pub use split::{Consumer, Producer};
