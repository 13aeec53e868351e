/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Random access to BMP pixels on slow storage
//!
//! This crate reads individual pixels, or short runs of them, straight out of
//! an uncompressed BMP file without decoding the image into memory.
//! It is meant for memory constrained devices that push images from an SD card
//! or flash to a display a few pixels at a time.
//!
//! # Features
//! - `no_std` by default with `alloc`
//! - A single allocation at most, the scratch buffer of [`BitmapStream::get_pixel_run`].
//!   [`BitmapStream::get_pixel_run_bytes`] doesn't allocate at all
//! - Works with any storage that implements [`ZStorageTrait`](storage::ZStorageTrait)
//!
//! # Supported formats
//! - Uncompressed (`BI_RGB`) 24 bit and 32 bit images
//! - Bottom-up (positive height) and top-down (negative height) row order
//!
//! # Unsupported formats
//! - Palette images, 16 bit images
//! - RLE, bitfields, embedded PNG and JPEGs
//!
//! Dimensions are limited to 32767 pixels per axis.
//!
//! # Crate features
//! - `std`: Enables the file system storage provider
//! - `log`: Log header fields and failed reads through the `log` crate

#![no_std]
#![macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use bmpstream_core::options;
pub use bmpstream_core::options::StreamOptions;
pub use bmpstream_core::storage;

pub use crate::common::{BmpDepth, BmpHeaderInfo, RowOrder};
pub use crate::errors::{BmpErrorKind, BmpStreamErrors};
pub use crate::stream::{probe_bmp, BitmapStream};
pub use crate::utils::expand_bgr24_in_place;

mod common;
mod errors;
mod stream;
mod utils;
