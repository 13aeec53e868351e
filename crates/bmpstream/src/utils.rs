/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Pack `[b, g, r]` triples from `input` into `out` as `0x00RRGGBB`
///
/// Stops at whichever of the two runs out first.
pub(crate) fn expand_bgr24_into(input: &[u8], out: &mut [u32]) {
    for (pixel, bgr) in out.iter_mut().zip(input.chunks_exact(3)) {
        *pixel = u32::from(bgr[0]) | u32::from(bgr[1]) << 8 | u32::from(bgr[2]) << 16;
    }
}

/// Pack `[b, g, r, a]` quads from `input` into `out` as `0xAARRGGBB`
pub(crate) fn copy_bgra32_into(input: &[u8], out: &mut [u32]) {
    for (pixel, bgra) in out.iter_mut().zip(input.chunks_exact(4)) {
        *pixel = u32::from_le_bytes([bgra[0], bgra[1], bgra[2], bgra[3]]);
    }
}

/// Stretch `pixels` tightly packed `[b, g, r]` triples at the start of `buf`
/// into `[b, g, r, 0]` quads, in place.
///
/// `buf` must hold `pixels * 4` bytes, anything past what fits is ignored.
///
/// The output of pixel `i` occupies bytes that hold the input of pixels
/// after `i`, so iteration goes from the last pixel to the first.
/// Going forward would overwrite triples before they are read.
pub fn expand_bgr24_in_place(buf: &mut [u8], pixels: usize) {
    let pixels = pixels.min(buf.len() / 4);

    for i in (0..pixels).rev() {
        let src = i * 3;
        let dst = i * 4;

        let (b, g, r) = (buf[src], buf[src + 1], buf[src + 2]);

        buf[dst] = b;
        buf[dst + 1] = g;
        buf[dst + 2] = r;
        buf[dst + 3] = 0;
    }
}
