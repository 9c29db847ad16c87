// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use core::fmt;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors returned by ring operations
///
/// `BufferFull` and `BufferEmpty` are flow-control signals rather than faults; callers are
/// expected to retry or back off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The storage, block size, or a block passed to an operation was invalid
    InvalidArgument(ArgumentError),
    /// The ring has not been bound to any storage yet
    NotInitialized,
    /// Every block in the ring holds unread data
    BufferFull,
    /// There is no unread data in the ring
    BufferEmpty,
}

impl Error {
    /// Returns `true` if the operation may succeed once the other side of the ring makes progress
    #[inline]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::BufferFull | Self::BufferEmpty)
    }
}

impl From<ArgumentError> for Error {
    #[inline]
    fn from(error: ArgumentError) -> Self {
        Self::InvalidArgument(error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidArgument(error) => write!(f, "invalid argument: {error}"),
            Self::NotInitialized => write!(f, "the ring has not been initialized"),
            Self::BufferFull => write!(f, "the ring is full"),
            Self::BufferEmpty => write!(f, "the ring is empty"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidArgument(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    #[inline]
    fn from(error: Error) -> Self {
        let kind = match &error {
            Error::InvalidArgument(_) => std::io::ErrorKind::InvalidInput,
            Error::NotInitialized => std::io::ErrorKind::NotConnected,
            Error::BufferFull | Error::BufferEmpty => std::io::ErrorKind::WouldBlock,
        };
        Self::new(kind, error)
    }
}

/// Details for [`Error::InvalidArgument`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgumentError {
    /// The provided storage has a length of zero
    EmptyStorage,
    /// The block size was zero
    ZeroBlockSize,
    /// The storage is smaller than the minimum ring capacity
    CapacityTooSmall { capacity: usize },
    /// The storage length is not a multiple of the block size
    Misaligned { capacity: usize, block_size: usize },
    /// A block passed to `put` or `get` was not exactly one block long
    BlockLength { expected: usize, actual: usize },
    /// A blocking transfer was not a whole number of blocks
    PartialBlock { len: usize, block_size: usize },
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::EmptyStorage => write!(f, "the storage region is empty"),
            Self::ZeroBlockSize => write!(f, "the block size must be non-zero"),
            Self::CapacityTooSmall { capacity } => {
                write!(f, "a capacity of {capacity} bytes is below the minimum")
            }
            Self::Misaligned {
                capacity,
                block_size,
            } => write!(
                f,
                "a capacity of {capacity} bytes is not a multiple of the {block_size} byte block size"
            ),
            Self::BlockLength { expected, actual } => {
                write!(f, "expected a {expected} byte block but got {actual} bytes")
            }
            Self::PartialBlock { len, block_size } => write!(
                f,
                "a transfer of {len} bytes does not divide into {block_size} byte blocks"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ArgumentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable() {
        assert!(Error::BufferFull.is_retryable());
        assert!(Error::BufferEmpty.is_retryable());
        assert!(!Error::NotInitialized.is_retryable());
        assert!(!Error::from(ArgumentError::ZeroBlockSize).is_retryable());
    }

    #[test]
    fn display() {
        let error = Error::from(ArgumentError::Misaligned {
            capacity: 10,
            block_size: 4,
        });
        let message = error.to_string();
        assert!(message.contains("10 bytes"), "{message}");
        assert!(message.contains("4 byte block"), "{message}");

        let error = Error::from(ArgumentError::BlockLength {
            expected: 4,
            actual: 3,
        });
        assert_eq!(
            error.to_string(),
            "invalid argument: expected a 4 byte block but got 3 bytes"
        );
    }

    #[test]
    #[cfg(feature = "std")]
    fn io_error_kind() {
        use std::io::ErrorKind;

        let cases = [
            (Error::BufferFull, ErrorKind::WouldBlock),
            (Error::BufferEmpty, ErrorKind::WouldBlock),
            (Error::NotInitialized, ErrorKind::NotConnected),
            (
                Error::from(ArgumentError::EmptyStorage),
                ErrorKind::InvalidInput,
            ),
        ];

        for (error, kind) in cases {
            let io_error = std::io::Error::from(error);
            assert_eq!(io_error.kind(), kind);
        }
    }

    #[test]
    #[cfg(feature = "std")]
    fn source() {
        use std::error::Error as _;

        let error = Error::from(ArgumentError::ZeroBlockSize);
        let source = error.source().expect("argument errors carry a source");
        assert_eq!(source.to_string(), "the block size must be non-zero");
        assert!(Error::BufferEmpty.source().is_none());
    }
}
