/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![no_main]

use bmpstream::storage::MemoryStorage;
use bmpstream::BitmapStream;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let storage = MemoryStorage::with_file("fuzz.bmp", data.to_vec());
    let mut stream = BitmapStream::new(storage);

    if stream.open("fuzz.bmp").is_err() {
        return;
    }
    let (width, height) = (stream.width() as u16, stream.height() as u16);

    // corners plus one past the edge, none of these may panic
    for (x, y) in [(0, 0), (width.wrapping_sub(1), height.wrapping_sub(1)), (width, height)] {
        let _ = stream.get_pixel(x, y);

        let mut run = [0_u32; 64];
        let _ = stream.get_pixel_run(x, y, &mut run);

        let mut bytes = [0_u8; 255];
        let _ = stream.get_pixel_run_bytes(x, y, &mut bytes);
    }
});
