/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Display, Formatter};

/// Size of the file header plus `BITMAPINFOHEADER`
pub const BMP_HEADER_SIZE: u32 = 54;

/// `BM` read as a little endian u16
pub const BMP_SIGNATURE: u16 = 0x4D42;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BmpCompression {
    Rgb,
    Rle8,
    Rle4,
    Bitfields,
    Jpeg,
    Png,
    AlphaBitfields,
    Unknown(u32)
}

impl BmpCompression {
    pub const fn from_u32(num: u32) -> BmpCompression {
        match num {
            0 => BmpCompression::Rgb,
            1 => BmpCompression::Rle8,
            2 => BmpCompression::Rle4,
            3 => BmpCompression::Bitfields,
            4 => BmpCompression::Jpeg,
            5 => BmpCompression::Png,
            6 => BmpCompression::AlphaBitfields,
            other => BmpCompression::Unknown(other)
        }
    }
}

/// Pixel depths a bitmap stream can read
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BmpDepth {
    /// 24 bits per pixel, `[b, g, r]`
    Bgr24,
    /// 32 bits per pixel, `[b, g, r, a]`
    Bgra32
}

impl BmpDepth {
    pub const fn from_bits(bits: u16) -> Option<BmpDepth> {
        match bits {
            24 => Some(BmpDepth::Bgr24),
            32 => Some(BmpDepth::Bgra32),
            _ => None
        }
    }

    pub const fn bits(self) -> i16 {
        match self {
            BmpDepth::Bgr24 => 24,
            BmpDepth::Bgra32 => 32
        }
    }

    pub const fn bytes_per_pixel(self) -> u8 {
        (self.bits() >> 3) as u8
    }
}

/// Order rows are stored in the pixel array
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RowOrder {
    /// First stored row is the bottom of the image, positive height
    BottomUp,
    /// First stored row is the top of the image, negative height
    TopDown
}

/// Bytes per scanline for `width` pixels, rounded up to a multiple of four
///
/// `width` must fit in `i16`, so this can't overflow.
pub const fn row_stride(depth: BmpDepth, width: u16) -> u32 {
    ((depth.bits() as u32 * width as u32 + 31) >> 3) & !3
}

/// Everything a bitmap stream learned from a valid header
///
/// Only exists for an open stream, there is no way to build one
/// with a stride or row order that disagrees with the other fields.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BmpHeaderInfo {
    pub(crate) file_size:   u32,
    pub(crate) data_offset: u32,
    pub(crate) width:       i16,
    pub(crate) height:      i16,
    pub(crate) depth:       BmpDepth,
    pub(crate) row_stride:  u32,
    pub(crate) row_order:   RowOrder
}

impl BmpHeaderInfo {
    pub(crate) fn new(
        file_size: u32, data_offset: u32, width: i16, height: i16, depth: BmpDepth,
        row_order: RowOrder
    ) -> BmpHeaderInfo {
        BmpHeaderInfo {
            file_size,
            data_offset,
            width,
            height,
            depth,
            row_stride: row_stride(depth, width.unsigned_abs()),
            row_order
        }
    }

    /// Total file size declared in the header, not checked against the stream
    pub const fn file_size(&self) -> u32 {
        self.file_size
    }

    /// Absolute offset of the pixel array
    pub const fn data_offset(&self) -> u32 {
        self.data_offset
    }

    pub const fn width(&self) -> i16 {
        self.width
    }

    /// Height in pixels, always positive regardless of row order
    pub const fn height(&self) -> i16 {
        self.height
    }

    pub const fn depth(&self) -> BmpDepth {
        self.depth
    }

    pub const fn bit_depth(&self) -> i16 {
        self.depth.bits()
    }

    pub const fn bytes_per_pixel(&self) -> u8 {
        self.depth.bytes_per_pixel()
    }

    /// Bytes per row on disk, padding included
    pub const fn row_stride(&self) -> u32 {
        self.row_stride
    }

    pub const fn row_order(&self) -> RowOrder {
        self.row_order
    }

    /// Whether row 0 of the pixel address space is the last row of the pixel array
    pub const fn is_bottom_up(&self) -> bool {
        matches!(self.row_order, RowOrder::BottomUp)
    }

    /// Return true if `(x, y)` addresses a pixel of this image
    pub fn contains(&self, x: u16, y: u16) -> bool {
        i32::from(x) < i32::from(self.width) && i32::from(y) < i32::from(self.height)
    }

    /// Absolute stream offset of pixel `(x, y)`, `(0, 0)` being the top left
    ///
    /// Returns `None` when the pixel is outside the image
    pub fn pixel_offset(&self, x: u16, y: u16) -> Option<u64> {
        if !self.contains(x, y) {
            return None;
        }
        // contains() guarantees y < height, the subtraction can't go negative
        let row = match self.row_order {
            RowOrder::BottomUp => (i32::from(self.height) - i32::from(y) - 1) as u64,
            RowOrder::TopDown => u64::from(y)
        };

        Some(
            row * u64::from(self.row_stride)
                + u64::from(x) * u64::from(self.bytes_per_pixel())
                + u64::from(self.data_offset)
        )
    }

    /// Number of pixels a run starting at column `x` can return
    /// without crossing into the next row
    pub fn clamp_run(&self, x: u16, requested: usize) -> usize {
        let remaining = (i32::from(self.width) - i32::from(x)).max(0) as usize;
        requested.min(remaining)
    }
}

impl Display for BmpHeaderInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "File Size:       {}", self.file_size)?;
        writeln!(f, "Data Offset:     {}", self.data_offset)?;
        writeln!(f, "Width:           {}", self.width)?;
        writeln!(f, "Height:          {}", self.height)?;
        writeln!(f, "Bit Depth:       {}", self.bit_depth())?;
        writeln!(f, "Bytes Per Pixel: {}", self.bytes_per_pixel())?;
        writeln!(f, "Row Size:        {}", self.row_stride)?;
        writeln!(f, "Bottom Up:       {}", self.is_bottom_up())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: i16, height: i16, depth: BmpDepth, row_order: RowOrder) -> BmpHeaderInfo {
        BmpHeaderInfo::new(0, BMP_HEADER_SIZE, width, height, depth, row_order)
    }

    #[test]
    fn stride_is_padded_to_four_bytes() {
        assert_eq!(row_stride(BmpDepth::Bgr24, 1), 4);
        assert_eq!(row_stride(BmpDepth::Bgr24, 3), 12);
        assert_eq!(row_stride(BmpDepth::Bgr24, 5), 16);
        assert_eq!(row_stride(BmpDepth::Bgra32, 5), 20);
        assert_eq!(row_stride(BmpDepth::Bgr24, 0), 0);

        for width in 0..200 {
            for depth in [BmpDepth::Bgr24, BmpDepth::Bgra32] {
                let stride = row_stride(depth, width);
                assert_eq!(stride % 4, 0);
                assert!(stride >= u32::from(depth.bytes_per_pixel()) * u32::from(width));
            }
        }
    }

    #[test]
    fn stride_at_largest_width() {
        let stride = row_stride(BmpDepth::Bgra32, i16::MAX as u16);
        assert_eq!(stride, 32767 * 4);
    }

    #[test]
    fn bottom_up_offsets_count_from_last_row() {
        let info = header(3, 2, BmpDepth::Bgr24, RowOrder::BottomUp);
        // stride 12, row 0 of the picture is the second row on disk
        assert_eq!(info.pixel_offset(0, 0), Some(54 + 12));
        assert_eq!(info.pixel_offset(2, 0), Some(54 + 12 + 6));
        assert_eq!(info.pixel_offset(1, 1), Some(54 + 3));
    }

    #[test]
    fn top_down_offsets_count_from_first_row() {
        let info = header(3, 2, BmpDepth::Bgra32, RowOrder::TopDown);
        assert_eq!(info.pixel_offset(0, 0), Some(54));
        assert_eq!(info.pixel_offset(2, 1), Some(54 + 12 + 8));
    }

    #[test]
    fn out_of_bounds_has_no_offset() {
        let info = header(3, 2, BmpDepth::Bgr24, RowOrder::BottomUp);
        assert_eq!(info.pixel_offset(3, 0), None);
        assert_eq!(info.pixel_offset(0, 2), None);
        assert_eq!(info.pixel_offset(u16::MAX, u16::MAX), None);

        let empty = header(0, 0, BmpDepth::Bgr24, RowOrder::BottomUp);
        assert_eq!(empty.pixel_offset(0, 0), None);
    }

    #[test]
    fn runs_stop_at_row_end() {
        let info = header(10, 1, BmpDepth::Bgr24, RowOrder::BottomUp);
        assert_eq!(info.clamp_run(0, 4), 4);
        assert_eq!(info.clamp_run(8, 4), 2);
        assert_eq!(info.clamp_run(9, 100), 1);
        assert_eq!(info.clamp_run(12, 100), 0);
    }

    #[test]
    fn display_dump() {
        let info = BmpHeaderInfo::new(102, 54, 4, 3, BmpDepth::Bgr24, RowOrder::TopDown);
        let text = alloc::format!("{info}");
        assert_eq!(
            text,
            "File Size:       102\n\
             Data Offset:     54\n\
             Width:           4\n\
             Height:          3\n\
             Bit Depth:       24\n\
             Bytes Per Pixel: 3\n\
             Row Size:        12\n\
             Bottom Up:       false\n"
        );
    }
}
