/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use core::fmt::Formatter;

use crate::storage::ZStorageTrait;

/// Errors raised by storage providers
pub enum ZStorageError {
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    /// An operation needing an open stream was called on a closed provider
    NotOpen,
    /// The named stream does not exist
    NotFound(String),
    // requested, read
    NotEnoughBytes(usize, usize),
    // requested position, stream length
    SeekOutOfBounds(u64, u64),
    Generic(&'static str)
}

impl core::fmt::Debug for ZStorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            ZStorageError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            ZStorageError::NotOpen => {
                writeln!(f, "No stream is open")
            }
            ZStorageError::NotFound(path) => {
                writeln!(f, "Stream {path:?} not found")
            }
            ZStorageError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ZStorageError::SeekOutOfBounds(position, length) => {
                writeln!(
                    f,
                    "Cannot seek to {position}, stream is only {length} bytes long"
                )
            }
            ZStorageError::Generic(err) => {
                writeln!(f, "Generic storage error: {err}")
            }
        }
    }
}

impl core::fmt::Display for ZStorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ZStorageError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for ZStorageError {
    fn from(value: std::io::Error) -> Self {
        ZStorageError::StdIoError(value)
    }
}

/// An endian aware reader borrowing a storage provider
///
/// Integer reads are exact, a short stream is an error rather than
/// a silently zeroed value.
pub struct ZStorageReader<'a, T: ZStorageTrait> {
    inner:    &'a mut T,
    position: u64
}

impl<'a, T: ZStorageTrait> ZStorageReader<'a, T> {
    /// Wrap `source`, positions are counted from the start of the stream
    ///
    /// Call [`set_position`](Self::set_position) first when `source` may not
    /// be at the start.
    pub fn new(source: &'a mut T) -> ZStorageReader<'a, T> {
        ZStorageReader {
            inner:    source,
            position: 0
        }
    }

    /// Seek to `position` bytes from the start of the stream
    #[inline]
    pub fn set_position(&mut self, position: u64) -> Result<(), ZStorageError> {
        self.position = self.inner.seek(position)?;
        Ok(())
    }

    /// Skip `num` bytes
    ///
    /// This seeks, so skipping past the end of the stream is only caught
    /// by providers that bound their seeks.
    #[inline]
    pub fn skip(&mut self, num: u64) -> Result<(), ZStorageError> {
        let target = self
            .position
            .checked_add(num)
            .ok_or(ZStorageError::Generic("Skip overflowed"))?;
        self.set_position(target)
    }

    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ZStorageError> {
        let mut byte_store: [u8; N] = [0; N];
        self.inner.read_const_bytes(&mut byte_store)?;
        self.position += N as u64;
        Ok(byte_store)
    }
}

macro_rules! get_single_type {
    ($name:tt,$int_type:tt) => {
        impl<'a, T: ZStorageTrait> ZStorageReader<'a, T>
        {
            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying stream cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name(&mut self) -> Result<$int_type, ZStorageError>
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let space = self.read_fixed_bytes_or_error::<SIZE_OF_VAL>()?;
                Ok($int_type::from_le_bytes(space))
            }
        }
    };
}

// BMP is little endian throughout
get_single_type!(get_u16_le_err, u16);
get_single_type!(get_u32_le_err, u32);
get_single_type!(get_i32_le_err, i32);
