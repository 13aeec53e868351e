/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "std")]

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::PathBuf;

use crate::log::trace;
use crate::storage::{ZStorageError, ZStorageTrait};

/// A storage provider reading files from the host file system
///
/// Paths are resolved relative to an optional root directory,
/// absolute paths ignore the root.
#[derive(Debug, Default)]
pub struct FsStorage {
    root: Option<PathBuf>,
    file: Option<File>
}

impl FsStorage {
    /// Resolve paths relative to the working directory
    pub fn new() -> FsStorage {
        FsStorage::default()
    }

    /// Resolve paths relative to `root`
    pub fn with_root<P: Into<PathBuf>>(root: P) -> FsStorage {
        FsStorage {
            root: Some(root.into()),
            file: None
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => PathBuf::from(path)
        }
    }
}

impl ZStorageTrait for FsStorage {
    fn open(&mut self, path: &str) -> Result<(), ZStorageError> {
        self.file = None;

        let full_path = self.resolve(path);
        trace!("Opening {:?}", full_path);

        match File::open(&full_path) {
            Ok(file) => {
                self.file = Some(file);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ZStorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(ZStorageError::from(e))
        }
    }

    fn close(&mut self) -> Result<(), ZStorageError> {
        // dropping the handle closes it
        self.file = None;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn seek(&mut self, offset: u64) -> Result<u64, ZStorageError> {
        let file = self.file.as_mut().ok_or(ZStorageError::NotOpen)?;
        Ok(file.seek(SeekFrom::Start(offset))?)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZStorageError> {
        let file = self.file.as_mut().ok_or(ZStorageError::NotOpen)?;

        // File::read may return early, keep going until the buffer
        // is full or we hit end of file
        let mut total = 0;
        while total < buf.len() {
            match file.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ZStorageError::from(e))
            }
        }
        Ok(total)
    }

    fn name(&self) -> &'static str {
        "FsStorage"
    }
}
