/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use bmpstream_core::storage::ZStorageError;

use crate::common::BmpCompression;

/// The kind of failure recorded by the last call to
/// [`open`](crate::BitmapStream::open)
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum BmpErrorKind {
    /// The last open succeeded, or nothing was opened yet
    #[default]
    NoError,
    /// The storage provider could not open the path
    FileNotFound,
    /// The file does not start with `BM`
    Signature,
    /// The header is truncated, out of the supported range or
    /// rejected by strict mode
    FileHeader,
    /// The planes field is not `1`
    Planes,
    /// The bit depth is not 24 or 32
    Depth,
    /// The pixel data is compressed
    Compression
}

/// Errors that can occur when opening a bitmap stream
#[non_exhaustive]
pub enum BmpStreamErrors {
    /// The storage provider could not open the file
    FileNotFound(ZStorageError),
    /// The file/bytes do not start with `BM`
    InvalidMagicBytes,
    /// Planes field that isn't `1`
    UnsupportedPlanes(u16),
    /// Bit depth other than 24 and 32
    UnsupportedDepth(u16),
    /// Any compression other than `BI_RGB`
    UnsupportedCompression(u32),
    /// Too large dimensions for a given width or
    /// height, (dimension, limit, found)
    TooLargeDimensions(&'static str, usize, usize),
    /// Header values that can't describe a valid image
    InvalidHeader(&'static str),
    /// The storage provider failed while reading the header
    IoErrors(ZStorageError)
}

impl BmpStreamErrors {
    /// Collapse this error into the kind reported by
    /// [`error`](crate::BitmapStream::error)
    pub const fn kind(&self) -> BmpErrorKind {
        match self {
            Self::FileNotFound(_) => BmpErrorKind::FileNotFound,
            Self::InvalidMagicBytes => BmpErrorKind::Signature,
            Self::UnsupportedPlanes(_) => BmpErrorKind::Planes,
            Self::UnsupportedDepth(_) => BmpErrorKind::Depth,
            Self::UnsupportedCompression(_) => BmpErrorKind::Compression,
            Self::TooLargeDimensions(..) | Self::InvalidHeader(_) | Self::IoErrors(_) => {
                BmpErrorKind::FileHeader
            }
        }
    }
}

impl Debug for BmpStreamErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FileNotFound(err) => {
                writeln!(f, "Could not open file: {:?}", err)
            }
            Self::InvalidMagicBytes => {
                writeln!(f, "Invalid magic bytes, file does not start with BM")
            }
            Self::UnsupportedPlanes(planes) => {
                writeln!(f, "Unsupported number of planes {planes}, expected 1")
            }
            Self::UnsupportedDepth(depth) => {
                writeln!(f, "Depth {depth} unsupported, expected 24 or 32")
            }
            Self::UnsupportedCompression(compression) => {
                writeln!(
                    f,
                    "Unsupported BMP compression scheme {:?}, only uncompressed images are supported",
                    BmpCompression::from_u32(*compression)
                )
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            Self::InvalidHeader(message) => {
                writeln!(f, "Invalid BMP header: {}", message)
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl Display for BmpStreamErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BmpStreamErrors {}

impl From<ZStorageError> for BmpStreamErrors {
    fn from(value: ZStorageError) -> Self {
        BmpStreamErrors::IoErrors(value)
    }
}
