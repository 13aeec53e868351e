/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Stream options
//!
//! All options a bitmap stream respects live in one [`StreamOptions`],
//! the same value can be reused for any number of streams.

/// Largest dimension the stream can address, pixel coordinates are `i16`
pub const MAX_DIMENSION: usize = i16::MAX as usize;

/// Options for opening and reading bitmap streams
///
/// To remove the annoyance of getters and setters
/// all exposed options are declared public.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct StreamOptions {
    /// Maximum width for which the stream will
    /// refuse to open images wider than this.
    ///
    /// Values above [`MAX_DIMENSION`] are clamped when checked.
    ///
    /// - Default value: 32767
    pub max_width:   usize,
    /// Maximum height for which the stream will
    /// refuse to open images taller than this.
    ///
    /// - Default value: 32767
    pub max_height:  usize,
    /// Reject headers that the lenient parser accepts
    ///
    /// In strict mode a data offset pointing inside the headers,
    /// a DIB header smaller than `BITMAPINFOHEADER` and zero
    /// dimensions are all treated as a broken file header.
    ///
    /// - Default value: false
    pub strict_mode: bool,
    /// Clear the top byte of single pixels read from 24 bit images
    ///
    /// A single pixel read always fetches four bytes, for 24 bit images the
    /// top byte is whatever follows the pixel on disk. Set this to get
    /// a defined zero instead.
    ///
    /// - Default value: false
    pub mask_rgb24:  bool
}

impl Default for StreamOptions {
    fn default() -> Self {
        StreamOptions {
            max_width:   MAX_DIMENSION,
            max_height:  MAX_DIMENSION,
            strict_mode: false,
            mask_rgb24:  false
        }
    }
}

impl StreamOptions {
    /// Get maximum width configured for which the stream
    /// should not open images greater than this width
    pub const fn get_max_width(&self) -> usize {
        if self.max_width > MAX_DIMENSION {
            return MAX_DIMENSION;
        }
        self.max_width
    }

    /// Get maximum height configured for which the stream
    /// should not open images greater than this height
    pub const fn get_max_height(&self) -> usize {
        if self.max_height > MAX_DIMENSION {
            return MAX_DIMENSION;
        }
        self.max_height
    }

    /// Return true if the stream should reject questionable headers
    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Return true if single pixel reads from 24 bit images
    /// should have their top byte cleared
    pub const fn get_mask_rgb24(&self) -> bool {
        self.mask_rgb24
    }

    /// Set maximum width for which the stream should not
    /// open images greater than that width
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    ///
    /// returns: StreamOptions
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the stream should not
    /// open images greater than that height
    ///
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    ///
    /// returns: StreamOptions
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether the stream should be in strict mode
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    /// Set whether single pixel reads from 24 bit images
    /// have their top byte cleared
    pub fn set_mask_rgb24(mut self, yes: bool) -> Self {
        self.mask_rgb24 = yes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_never_exceed_addressable_range() {
        let options = StreamOptions::default()
            .set_max_width(usize::MAX)
            .set_max_height(40_000);

        assert_eq!(options.get_max_width(), MAX_DIMENSION);
        assert_eq!(options.get_max_height(), MAX_DIMENSION);

        let options = options.set_max_width(640).set_max_height(480);
        assert_eq!(options.get_max_width(), 640);
        assert_eq!(options.get_max_height(), 480);
    }

    #[test]
    fn defaults_are_lenient() {
        let options = StreamOptions::default();
        assert!(!options.get_strict_mode());
        assert!(!options.get_mask_rgb24());
    }
}
