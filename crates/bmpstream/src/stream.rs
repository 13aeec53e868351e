/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// The header layout read here is the classic 54 byte one
//
//   offset  size  field
//   ------  ----  -----------------------------------------
//        0     2  signature, "BM"
//        2     4  file size
//        6     4  reserved
//       10     4  offset of the pixel array
//       14     4  DIB header size, 40 for BITMAPINFOHEADER
//       18     4  width, signed
//       22     4  height, signed, negative for top-down images
//       26     2  planes, always 1
//       28     2  bits per pixel
//       30     4  compression
//
// Newer DIB headers (V4, V5) keep these fields at the same offsets, so they
// are read the same way, we just never look past the compression field.
//
// Rows in the pixel array are padded to a multiple of four bytes.
// Positive heights store the bottom row first.

use alloc::vec::Vec;
use core::fmt::Write;

use bmpstream_core::log::{debug, trace, warn};
use bmpstream_core::options::StreamOptions;
use bmpstream_core::storage::{ZStorageReader, ZStorageTrait};

use crate::common::{
    BmpCompression, BmpDepth, BmpHeaderInfo, RowOrder, BMP_HEADER_SIZE, BMP_SIGNATURE
};
use crate::errors::{BmpErrorKind, BmpStreamErrors};
use crate::utils::{copy_bgra32_into, expand_bgr24_in_place, expand_bgr24_into};

/// Probe some bytes to see
/// if they are the start of a BMP image a bitmap stream can open
///
/// This checks the same fields as [`BitmapStream::open`], signature,
/// planes, depth and compression, so `bytes` must contain the
/// whole 54 byte header.
pub fn probe_bmp(bytes: &[u8]) -> bool {
    let Some(header) = bytes.get(0..BMP_HEADER_SIZE as usize) else {
        return false;
    };
    let u16_at = |pos: usize| u16::from_le_bytes([header[pos], header[pos + 1]]);
    let u32_at = |pos: usize| {
        u32::from_le_bytes([header[pos], header[pos + 1], header[pos + 2], header[pos + 3]])
    };

    u16_at(0) == BMP_SIGNATURE
        && u16_at(26) == 1
        && BmpDepth::from_bits(u16_at(28)).is_some()
        && u32_at(30) == 0
}

/// Random access to the pixels of an uncompressed BMP file
///
/// The stream never holds the image in memory, every pixel read seeks
/// to the pixel's position in the file and reads just the bytes needed.
/// This makes it suitable for driving displays from an SD card on
/// devices with a few kilobytes of RAM.
///
/// Only uncompressed 24 and 32 bit images are supported.
///
/// # Coordinates
/// `(0, 0)` is the top left pixel for both bottom-up and top-down files.
///
/// # Pixel values
/// Pixels are returned as little endian packed `u32`s, i.e `0xAARRGGBB`
/// for 32 bit files and `0x00RRGGBB` for 24 bit files when read as a run.
///
/// # Usage
///
/// ```no_run
/// use bmpstream::BitmapStream;
/// use bmpstream::storage::MemoryStorage;
///
/// fn main() -> Result<(), bmpstream::BmpStreamErrors> {
///     let storage = MemoryStorage::with_file("logo.bmp", vec![]);
///     let mut stream = BitmapStream::new(storage);
///
///     stream.open("logo.bmp")?;
///     println!("{}x{}", stream.width(), stream.height());
///
///     // one pixel
///     if let Some(pixel) = stream.get_pixel(0, 0) {
///         println!("{pixel:#010x}");
///     }
///     // part of a row
///     let mut row = [0_u32; 16];
///     let count = stream.get_pixel_run(0, 0, &mut row);
///     println!("{:?}", &row[..usize::from(count)]);
///     Ok(())
/// }
/// ```
pub struct BitmapStream<T>
where
    T: ZStorageTrait
{
    storage:    T,
    options:    StreamOptions,
    header:     Option<BmpHeaderInfo>,
    last_error: BmpErrorKind,
    /// Raw bytes of the last run read, reused between calls
    scratch:    Vec<u8>
}

impl<T> BitmapStream<T>
where
    T: ZStorageTrait
{
    /// Create a new bitmap stream that reads files from `storage`
    ///
    /// # Arguments
    /// - `storage`: The storage provider to open files with
    ///
    /// # Returns
    /// - A closed bitmap stream
    pub fn new(storage: T) -> BitmapStream<T> {
        BitmapStream::new_with_options(storage, StreamOptions::default())
    }

    /// Create a new bitmap stream with specified options
    ///
    /// # Arguments
    ///
    /// * `storage`: The storage provider to open files with
    /// * `options`: Limits and header policy for this stream
    pub fn new_with_options(storage: T, options: StreamOptions) -> BitmapStream<T> {
        BitmapStream {
            storage,
            options,
            header: None,
            last_error: BmpErrorKind::NoError,
            scratch: Vec::new()
        }
    }

    /// Open `path` and validate it as a supported BMP
    ///
    /// Any file this stream had open is closed first. On failure the
    /// file is closed again, nothing from a previous file survives either way.
    ///
    /// # Returns
    /// - `Ok(())`: The header is valid, pixels can be read
    /// - `Err`: Why the file was rejected, its [kind](BmpStreamErrors::kind)
    ///   is also available from [`error`](Self::error)
    pub fn open(&mut self, path: &str) -> Result<(), BmpStreamErrors> {
        self.last_error = BmpErrorKind::NoError;
        self.header = None;

        if self.storage.is_open() {
            if let Err(e) = self.storage.close() {
                warn!("Could not close previous file: {:?}", e);
            }
        }

        if let Err(e) = self.storage.open(path) {
            return self.fail(BmpStreamErrors::FileNotFound(e));
        }

        match self.read_header() {
            Ok(header) => {
                trace!("Opened {} via {}", path, self.storage.name());
                self.header = Some(header);
                Ok(())
            }
            Err(e) => self.fail(e)
        }
    }

    /// Record `err`, close the file and hand the error back
    fn fail(&mut self, err: BmpStreamErrors) -> Result<(), BmpStreamErrors> {
        warn!("Could not open bitmap: {:?}", err);
        self.last_error = err.kind();

        if self.storage.is_open() {
            if let Err(e) = self.storage.close() {
                warn!("Could not close rejected file: {:?}", e);
            }
        }
        Err(err)
    }

    fn read_header(&mut self) -> Result<BmpHeaderInfo, BmpStreamErrors> {
        let options = self.options;
        let mut bytes = ZStorageReader::new(&mut self.storage);
        bytes.set_position(0)?;

        // a file too short to hold a signature isn't a bitmap either
        let signature = bytes
            .get_u16_le_err()
            .map_err(|_| BmpStreamErrors::InvalidMagicBytes)?;

        if signature != BMP_SIGNATURE {
            return Err(BmpStreamErrors::InvalidMagicBytes);
        }

        let file_size = bytes.get_u32_le_err()?;
        // reserved
        bytes.skip(4)?;

        let data_offset = bytes.get_u32_le_err()?;
        let dib_size = bytes.get_u32_le_err()?;

        let width = bytes.get_i32_le_err()?;
        let height = bytes.get_i32_le_err()?;

        trace!("File size: {}", file_size);
        trace!("Data offset: {}", data_offset);
        trace!("DIB header size: {}", dib_size);
        trace!("Width: {}", width);
        trace!("Height: {}", height);

        let planes = bytes.get_u16_le_err()?;
        if planes != 1 {
            return Err(BmpStreamErrors::UnsupportedPlanes(planes));
        }

        let bits = bytes.get_u16_le_err()?;
        let depth = BmpDepth::from_bits(bits).ok_or(BmpStreamErrors::UnsupportedDepth(bits))?;

        let compression = bytes.get_u32_le_err()?;
        if BmpCompression::from_u32(compression) != BmpCompression::Rgb {
            return Err(BmpStreamErrors::UnsupportedCompression(compression));
        }

        trace!("Bit depth: {:?}", depth);

        if width < 0 {
            return Err(BmpStreamErrors::InvalidHeader("Negative width"));
        }
        if width as usize > options.get_max_width() {
            return Err(BmpStreamErrors::TooLargeDimensions(
                "width",
                options.get_max_width(),
                width as usize
            ));
        }
        // i32::MIN has no positive counterpart, unsigned_abs avoids the overflow
        if height.unsigned_abs() as usize > options.get_max_height() {
            return Err(BmpStreamErrors::TooLargeDimensions(
                "height",
                options.get_max_height(),
                height.unsigned_abs() as usize
            ));
        }

        if options.get_strict_mode() {
            debug!("Strict mode, checking header sanity");

            if data_offset < BMP_HEADER_SIZE {
                return Err(BmpStreamErrors::InvalidHeader(
                    "Pixel data offset points inside the headers"
                ));
            }
            if dib_size < 40 {
                return Err(BmpStreamErrors::InvalidHeader(
                    "DIB header smaller than BITMAPINFOHEADER"
                ));
            }
            if width == 0 || height == 0 {
                return Err(BmpStreamErrors::InvalidHeader("Width or height is zero"));
            }
        }

        let row_order = if height < 0 {
            RowOrder::TopDown
        } else {
            RowOrder::BottomUp
        };
        trace!("Row order: {:?}", row_order);

        // both were range checked against MAX_DIMENSION above
        let width = width as i16;
        let height = height.unsigned_abs() as i16;

        Ok(BmpHeaderInfo::new(
            file_size,
            data_offset,
            width,
            height,
            depth,
            row_order
        ))
    }

    /// Close the file
    ///
    /// Safe to call on a closed stream. After this all pixel reads fail.
    pub fn close(&mut self) -> Result<(), BmpStreamErrors> {
        self.header = None;

        if !self.storage.is_open() {
            return Ok(());
        }
        self.storage.close().map_err(BmpStreamErrors::from)
    }

    /// Return true if a file was opened successfully and not closed since
    pub fn is_open(&self) -> bool {
        self.header.is_some() && self.storage.is_open()
    }

    /// Image width in pixels, `0` when closed
    pub fn width(&self) -> i16 {
        self.header.map_or(0, |h| h.width)
    }

    /// Image height in pixels, `0` when closed
    ///
    /// This is always positive, top-down images report their magnitude.
    pub fn height(&self) -> i16 {
        self.header.map_or(0, |h| h.height)
    }

    /// Bits per pixel, 24 or 32, `0` when closed
    pub fn depth(&self) -> i16 {
        self.header.map_or(0, |h| h.bit_depth())
    }

    /// Kind of failure of the last [`open`](Self::open)
    pub const fn error(&self) -> BmpErrorKind {
        self.last_error
    }

    /// Header information of the open file
    pub const fn info(&self) -> Option<&BmpHeaderInfo> {
        self.header.as_ref()
    }

    pub const fn options(&self) -> &StreamOptions {
        &self.options
    }

    /// The storage provider this stream reads from
    pub const fn storage(&self) -> &T {
        &self.storage
    }

    /// Destroy this stream returning the storage provider
    ///
    /// The provider is returned as is, an open file stays open.
    pub fn into_inner(self) -> T {
        self.storage
    }

    /// Write a human readable dump of the header to `sink`
    ///
    /// A closed stream writes `Not open`.
    pub fn print_info<W: Write>(&self, sink: &mut W) -> core::fmt::Result {
        match &self.header {
            Some(header) => write!(sink, "{header}"),
            None => writeln!(sink, "Not open")
        }
    }

    /// Read the pixel at `(x, y)`
    ///
    /// Four bytes are always read. For 24 bit images the top byte is
    /// whatever follows the pixel in the file unless
    /// [`mask_rgb24`](StreamOptions::set_mask_rgb24) is set. Near the end
    /// of the file at least the pixel's own bytes must be readable, missing
    /// trailing bytes read as zero.
    ///
    /// # Returns
    /// - `Some(pixel)`: The little endian packed pixel
    /// - `None`: The stream is closed, `(x, y)` is outside the image
    ///   or the storage failed. Out of range coordinates do no I/O.
    pub fn get_pixel(&mut self, x: u16, y: u16) -> Option<u32> {
        let header = self.header?;
        let offset = header.pixel_offset(x, y)?;

        if let Err(e) = self.storage.seek(offset) {
            trace!("Seek to {} failed: {:?}", offset, e);
            return None;
        }

        let mut bytes = [0_u8; 4];
        let bytes_read = match self.storage.read_bytes(&mut bytes) {
            Ok(n) => n.min(bytes.len()),
            Err(e) => {
                trace!("Reading pixel ({}, {}) failed: {:?}", x, y, e);
                return None;
            }
        };
        if bytes_read < usize::from(header.bytes_per_pixel()) {
            trace!("Short read for pixel ({}, {}), got {} bytes", x, y, bytes_read);
            return None;
        }
        bytes[bytes_read..].fill(0);

        let mut pixel = u32::from_le_bytes(bytes);

        if header.depth == BmpDepth::Bgr24 && self.options.get_mask_rgb24() {
            pixel &= 0x00FF_FFFF;
        }
        Some(pixel)
    }

    /// Read up to `out.len()` pixels of row `y` starting at column `x`
    ///
    /// The run stops at the end of the row and at `u16::MAX` pixels.
    /// 24 bit pixels are widened to `0x00RRGGBB`.
    ///
    /// # Returns
    /// The number of pixels written to the start of `out`. A short read
    /// from storage gives a short count, `0` for a closed stream, out of
    /// range coordinates or a failed seek.
    pub fn get_pixel_run(&mut self, x: u16, y: u16, out: &mut [u32]) -> u16 {
        let Some((header, offset, count)) = self.prepare_run(x, y, out.len()) else {
            return 0;
        };
        let bpp = usize::from(header.bytes_per_pixel());

        self.scratch.resize(count * bpp, 0);

        let bytes_read = match self.storage.read_bytes(&mut self.scratch) {
            Ok(n) => n.min(self.scratch.len()),
            Err(e) => {
                trace!("Reading {} pixels at {} failed: {:?}", count, offset, e);
                return 0;
            }
        };
        let pixels = bytes_read / bpp;
        let raw = &self.scratch[..pixels * bpp];

        match header.depth {
            BmpDepth::Bgra32 => copy_bgra32_into(raw, &mut out[..pixels]),
            BmpDepth::Bgr24 => expand_bgr24_into(raw, &mut out[..pixels])
        }
        // count is clamped to u16::MAX in prepare_run
        pixels as u16
    }

    /// Read a run of pixels without allocating
    ///
    /// Same as [`get_pixel_run`](Self::get_pixel_run) but the output is
    /// `out.len() / 4` little endian packed `u32`s in a byte buffer. Raw
    /// pixel bytes are read straight into `out` and 24 bit pixels are
    /// stretched to four bytes in place.
    pub fn get_pixel_run_bytes(&mut self, x: u16, y: u16, out: &mut [u8]) -> u16 {
        let Some((header, offset, count)) = self.prepare_run(x, y, out.len() / 4) else {
            return 0;
        };
        let bpp = usize::from(header.bytes_per_pixel());
        let raw_len = count * bpp;

        let bytes_read = match self.storage.read_bytes(&mut out[..raw_len]) {
            Ok(n) => n.min(raw_len),
            Err(e) => {
                trace!("Reading {} pixels at {} failed: {:?}", count, offset, e);
                return 0;
            }
        };
        let pixels = bytes_read / bpp;

        if header.depth == BmpDepth::Bgr24 {
            expand_bgr24_in_place(out, pixels);
        }
        pixels as u16
    }

    /// Bounds check, clamp and seek for a run read
    ///
    /// Returns the header, the offset seeked to and the clamped pixel count
    fn prepare_run(
        &mut self, x: u16, y: u16, requested: usize
    ) -> Option<(BmpHeaderInfo, u64, usize)> {
        let header = self.header?;
        let offset = header.pixel_offset(x, y)?;

        let count = header.clamp_run(x, requested.min(usize::from(u16::MAX)));

        if let Err(e) = self.storage.seek(offset) {
            trace!("Seek to {} failed: {:?}", offset, e);
            return None;
        }
        Some((header, offset, count))
    }
}
