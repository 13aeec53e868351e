/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Storage abstractions for the bitmap stream
//!
//! A storage provider models a block device with a tiny file API, it can
//! open a named byte stream, seek to an absolute offset, read bytes and close
//! the stream again. Only one stream is open per provider at any time.
//!
//! Two providers are implemented
//! - [`MemoryStorage`]: named in-memory files, available everywhere
//! - [`FsStorage`]: files on the host file system, needs the `std` feature
//!
//! Anything else, e.g an SD card driver, only needs to implement [`ZStorageTrait`]

pub use memory::MemoryStorage;
pub use reader::{ZStorageError, ZStorageReader};
pub use traits::ZStorageTrait;

#[cfg(feature = "std")]
pub use fs::FsStorage;

#[cfg(feature = "std")]
mod fs;
mod memory;
mod reader;
mod traits;
