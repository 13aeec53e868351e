/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::log::trace;
use crate::storage::{ZStorageError, ZStorageTrait};

/// A storage provider backed by named in-memory files
///
/// Useful for tests, fuzzing and firmware that has the image
/// mapped into memory already.
///
/// Seeking past the end of a file is an error, reads at the end return `0` bytes.
///
/// # Example
/// ```
/// use bmpstream_core::storage::{MemoryStorage, ZStorageTrait};
///
/// let mut storage = MemoryStorage::new();
/// storage.insert("a.bin", vec![1, 2, 3]);
/// storage.open("a.bin").unwrap();
///
/// let mut buf = [0; 4];
/// assert_eq!(storage.read_bytes(&mut buf).unwrap(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    files:    Vec<(String, Vec<u8>)>,
    current:  Option<usize>,
    position: usize
}

impl MemoryStorage {
    /// Create an empty provider
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }

    /// Create a provider holding a single file
    pub fn with_file(path: &str, contents: Vec<u8>) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        storage.insert(path, contents);
        storage
    }

    /// Add or replace a file
    ///
    /// Replacing the currently open file closes it.
    pub fn insert(&mut self, path: &str, contents: Vec<u8>) {
        match self.files.iter().position(|(name, _)| name == path) {
            Some(index) => {
                if self.current == Some(index) {
                    self.current = None;
                }
                self.files[index].1 = contents;
            }
            None => self.files.push((path.to_string(), contents))
        }
    }

    /// Bytes of the currently open file
    fn current_file(&self) -> Result<&[u8], ZStorageError> {
        match self.current {
            Some(index) => Ok(&self.files[index].1),
            None => Err(ZStorageError::NotOpen)
        }
    }
}

impl ZStorageTrait for MemoryStorage {
    fn open(&mut self, path: &str) -> Result<(), ZStorageError> {
        match self.files.iter().position(|(name, _)| name == path) {
            Some(index) => {
                trace!("Opened in-memory file {path}");
                self.current = Some(index);
                self.position = 0;
                Ok(())
            }
            None => Err(ZStorageError::NotFound(path.to_string()))
        }
    }

    fn close(&mut self) -> Result<(), ZStorageError> {
        self.current = None;
        self.position = 0;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.current.is_some()
    }

    fn seek(&mut self, offset: u64) -> Result<u64, ZStorageError> {
        let length = self.current_file()?.len() as u64;

        if offset > length {
            return Err(ZStorageError::SeekOutOfBounds(offset, length));
        }
        // can't truncate, bounded by a slice length
        self.position = offset as usize;
        Ok(offset)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZStorageError> {
        let position = self.position;
        let file = self.current_file()?;

        let start = core::cmp::min(position, file.len());
        let end = core::cmp::min(position.saturating_add(buf.len()), file.len());

        buf[..end - start].copy_from_slice(&file[start..end]);
        self.position = end;

        Ok(end - start)
    }

    fn name(&self) -> &'static str {
        "MemoryStorage"
    }
}
