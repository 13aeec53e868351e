/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The storage capability consumed by the bitmap stream

use crate::storage::ZStorageError;

/// The capability a bitmap stream needs from its block storage.
///
/// This is the minimal file API found on embedded file system drivers,
/// a provider holds at most one open stream, positions are absolute byte
/// offsets from the start of that stream and reads may return fewer bytes
/// than requested near the end of the stream.
///
/// # Considerations
///
/// Implementations should not buffer more than they need to, the bitmap stream
/// always reseeks before reading so read-ahead is usually wasted.
pub trait ZStorageTrait {
    /// Open the stream named by `path` for reading.
    ///
    /// If another stream is open the provider may either close it or
    /// fail, the bitmap stream always closes before opening.
    ///
    /// The position after opening is unspecified, readers seek to where
    /// they want to start.
    fn open(&mut self, path: &str) -> Result<(), ZStorageError>;

    /// Close the currently open stream
    ///
    /// Closing an already closed provider must succeed.
    fn close(&mut self) -> Result<(), ZStorageError>;

    /// Report whether a stream is currently open
    fn is_open(&self) -> bool;

    /// Move to `offset` bytes from the start of the stream
    ///
    /// ## Returns
    ///  - `Ok(u64)` - The new position
    ///  - `Err()` - The stream is closed or the position is not reachable
    fn seek(&mut self, offset: u64) -> Result<u64, ZStorageError>;

    /// Read bytes into `buf` returning how many bytes were actually read
    ///
    /// A short count means the end of the stream was reached, this doesn't
    /// guarantee that `buf` will be filled.
    ///
    /// ## Returns
    ///  - `Ok(usize)` - Actual bytes read into the buffer
    ///  - `Err()` - The error encountered when reading bytes for which we couldn't recover
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZStorageError>;

    /// A short name of the provider, used in log messages
    fn name(&self) -> &'static str;

    /// Read exact bytes required to fill `buf` or return an error if that isn't possible
    ///
    /// ## Errors
    /// [`ZStorageError::NotEnoughBytes`] with the requested and read counts
    /// when the stream ends early.
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ZStorageError> {
        let bytes_read = self.read_bytes(buf)?;
        if bytes_read != buf.len() {
            return Err(ZStorageError::NotEnoughBytes(buf.len(), bytes_read));
        }
        Ok(())
    }

    /// Fill a fixed size array or return an error
    ///
    /// Same as [`read_exact_bytes`](Self::read_exact_bytes), separated so
    /// that providers can specialize small constant reads.
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ZStorageError> {
        self.read_exact_bytes(buf)
    }
}

impl<T: ZStorageTrait> ZStorageTrait for &mut T {
    fn open(&mut self, path: &str) -> Result<(), ZStorageError> {
        (**self).open(path)
    }

    fn close(&mut self) -> Result<(), ZStorageError> {
        (**self).close()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn seek(&mut self, offset: u64) -> Result<u64, ZStorageError> {
        (**self).seek(offset)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZStorageError> {
        (**self).read_bytes(buf)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
