/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::Write;

use bmpstream::storage::{FsStorage, ZStorageTrait};
use bmpstream::BitmapStream;
use clap::ArgMatches;
use log::{error, info, warn};

use crate::cmd_parsers::global_options::CmdOptions;

/// Reasons the workflow did not finish cleanly
#[derive(Debug)]
pub enum WorkflowErrors {
    /// Some inputs could not be opened, (failed, total)
    FilesFailed(usize, usize),
    Format(std::fmt::Error)
}

impl From<std::fmt::Error> for WorkflowErrors {
    fn from(value: std::fmt::Error) -> Self {
        WorkflowErrors::Format(value)
    }
}

pub fn run_workflow(args: &ArgMatches, options: &CmdOptions) -> Result<(), WorkflowErrors> {
    let inputs: Vec<&String> = args
        .get_many::<String>("in")
        .map(|values| values.collect())
        .unwrap_or_default();

    let mut stream = BitmapStream::new_with_options(FsStorage::new(), options.stream_options);
    let mut failed = 0;

    for input in &inputs {
        let mut out = String::new();
        if !describe_file(&mut stream, input, options, &mut out)? {
            failed += 1;
        }
        print!("{out}");
    }

    if failed > 0 {
        return Err(WorkflowErrors::FilesFailed(failed, inputs.len()));
    }
    Ok(())
}

/// Open `path`, write its header and the requested pixels to `out`
///
/// Returns false if the file could not be opened
fn describe_file<T: ZStorageTrait, W: Write>(
    stream: &mut BitmapStream<T>, path: &str, options: &CmdOptions, out: &mut W
) -> Result<bool, std::fmt::Error> {
    info!("Opening {path}");

    if let Err(e) = stream.open(path) {
        error!("Could not open {path}: {:?} ({:?})", stream.error(), e);
        return Ok(false);
    }

    writeln!(out, "{path}")?;
    stream.print_info(out)?;

    for pixel in &options.pixels {
        match stream.get_pixel(pixel.x, pixel.y) {
            Some(value) => writeln!(out, "Pixel ({}, {}): {value:#010x}", pixel.x, pixel.y)?,
            None => warn!("Could not read pixel ({}, {}) of {path}", pixel.x, pixel.y)
        }
    }

    for run in &options.runs {
        let mut buffer = vec![0_u32; usize::from(run.count)];
        let count = stream.get_pixel_run(run.x, run.y, &mut buffer);

        if count < run.count {
            warn!(
                "Requested {} pixels at ({}, {}) of {path}, got {count}",
                run.count, run.x, run.y
            );
        }
        write!(out, "Run ({}, {}) x{count}:", run.x, run.y)?;
        for value in &buffer[..usize::from(count)] {
            write!(out, " {value:#010x}")?;
        }
        writeln!(out)?;
    }

    if let Err(e) = stream.close() {
        warn!("Could not close {path}: {:?}", e);
    }
    Ok(true)
}
