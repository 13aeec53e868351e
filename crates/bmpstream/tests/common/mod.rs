/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![allow(dead_code)]

use bmpstream::storage::{MemoryStorage, ZStorageError, ZStorageTrait};

pub const HEADER_SIZE: usize = 54;

/// Build an uncompressed BMP in memory.
///
/// `pixel(x, disk_row)` gives the bytes of each pixel in file order, only the
/// first `bits / 8` bytes are stored. `disk_row` counts rows as they appear
/// in the file, so row 0 is the bottom row of a positive height image.
pub fn build_bmp<F>(width: i32, height: i32, bits: u16, pixel: F) -> Vec<u8>
where
    F: Fn(u32, u32) -> [u8; 4]
{
    let bpp = usize::from(bits / 8);
    let stride = ((usize::from(bits) * width as usize + 31) >> 3) & !3;
    let rows = height.unsigned_abs();

    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&0_u32.to_le_bytes()); // patched below
    out.extend_from_slice(&0_u32.to_le_bytes());
    out.extend_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
    out.extend_from_slice(&40_u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes());
    out.extend_from_slice(&bits.to_le_bytes());
    out.extend_from_slice(&0_u32.to_le_bytes());
    // image size, x and y pixels per metre, colours used, colours important
    for _ in 0..5 {
        out.extend_from_slice(&0_u32.to_le_bytes());
    }
    assert_eq!(out.len(), HEADER_SIZE);

    for row in 0..rows {
        let start = out.len();
        for x in 0..width as u32 {
            out.extend_from_slice(&pixel(x, row)[..bpp]);
        }
        out.resize(start + stride, 0);
    }
    let len = out.len() as u32;
    set_u32(&mut out, 2, len);
    out
}

/// Pixel bytes that encode their own position
pub fn position_pixel(x: u32, disk_row: u32) -> [u8; 4] {
    [x as u8, disk_row as u8, 0xC0 | (x as u8 & 0x0F), 0xA5]
}

pub fn set_u16(bytes: &mut [u8], pos: usize, value: u16) {
    bytes[pos..pos + 2].copy_from_slice(&value.to_le_bytes());
}

pub fn set_u32(bytes: &mut [u8], pos: usize, value: u32) {
    bytes[pos..pos + 4].copy_from_slice(&value.to_le_bytes());
}

pub fn storage_with(path: &str, bytes: Vec<u8>) -> MemoryStorage {
    MemoryStorage::with_file(path, bytes)
}

/// Storage provider that counts every call it forwards
#[derive(Default)]
pub struct CountingStorage {
    pub inner: MemoryStorage,
    pub seeks: usize,
    pub reads: usize
}

impl CountingStorage {
    pub fn new(inner: MemoryStorage) -> CountingStorage {
        CountingStorage {
            inner,
            seeks: 0,
            reads: 0
        }
    }

    pub fn io_calls(&self) -> usize {
        self.seeks + self.reads
    }
}

impl ZStorageTrait for CountingStorage {
    fn open(&mut self, path: &str) -> Result<(), ZStorageError> {
        self.inner.open(path)
    }

    fn close(&mut self) -> Result<(), ZStorageError> {
        self.inner.close()
    }

    fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    fn seek(&mut self, offset: u64) -> Result<u64, ZStorageError> {
        self.seeks += 1;
        self.inner.seek(offset)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZStorageError> {
        self.reads += 1;
        self.inner.read_bytes(buf)
    }

    fn name(&self) -> &'static str {
        "CountingStorage"
    }
}
