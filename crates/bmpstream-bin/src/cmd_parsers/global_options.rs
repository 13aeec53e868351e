/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use bmpstream::StreamOptions;
use clap::ArgMatches;
use log::{info, Level};

use crate::cmd_args::{PixelRequest, RunRequest};

#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub stream_options: StreamOptions,
    pub pixels:         Vec<PixelRequest>,
    pub runs:           Vec<RunRequest>
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let max_width = options.get_one::<usize>("max-width").copied().unwrap_or(usize::MAX);
    let max_height = options.get_one::<usize>("max-height").copied().unwrap_or(usize::MAX);
    let strict_mode = options.get_flag("strict");
    let mask_rgb24 = options.get_flag("mask-rgb24");

    let stream_options = StreamOptions::default()
        .set_max_width(max_width)
        .set_max_height(max_height)
        .set_strict_mode(strict_mode)
        .set_mask_rgb24(mask_rgb24);

    info!("Stream options: {:?}", stream_options);

    let pixels = options
        .get_many::<PixelRequest>("pixel")
        .map(|values| values.copied().collect())
        .unwrap_or_default();

    let runs = options
        .get_many::<RunRequest>("run")
        .map(|values| values.copied().collect())
        .unwrap_or_default();

    CmdOptions {
        stream_options,
        pixels,
        runs
    }
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if options.get_flag("debug") {
        log_level = Level::Debug;
    } else if options.get_flag("trace") {
        log_level = Level::Trace;
    } else if options.get_flag("warn") {
        log_level = Level::Warn
    } else if options.get_flag("info") {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    if let Err(e) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {e}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
