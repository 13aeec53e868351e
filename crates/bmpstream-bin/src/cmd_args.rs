/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

/// A pixel to print, `--pixel X,Y`
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PixelRequest {
    pub x: u16,
    pub y: u16
}

/// A run of pixels to print, `--run X,Y,COUNT`
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RunRequest {
    pub x:     u16,
    pub y:     u16,
    pub count: u16
}

fn parse_numbers<const N: usize>(value: &str) -> Result<[u16; N], String> {
    let mut numbers = [0; N];
    let mut parts = value.split(',');

    for number in numbers.iter_mut() {
        let part = parts
            .next()
            .ok_or_else(|| format!("expected {N} comma separated numbers, got {value:?}"))?;
        *number = part
            .trim()
            .parse()
            .map_err(|e| format!("invalid number {part:?}: {e}"))?;
    }
    if parts.next().is_some() {
        return Err(format!("expected {N} comma separated numbers, got {value:?}"));
    }
    Ok(numbers)
}

pub fn parse_pixel(value: &str) -> Result<PixelRequest, String> {
    let [x, y] = parse_numbers::<2>(value)?;
    Ok(PixelRequest { x, y })
}

pub fn parse_run(value: &str) -> Result<RunRequest, String> {
    let [x, y, count] = parse_numbers::<3>(value)?;
    Ok(RunRequest { x, y, count })
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("bmp-info")
        .about("Print BMP headers and read pixels without decoding the whole image")
        .arg(Arg::new("in")
            .short('i')
            .help("Input file to read data from")
            .long("input")
            .action(ArgAction::Append)
            .required(true))
        .arg(Arg::new("pixel")
            .long("pixel")
            .value_name("X,Y")
            .help("Print the pixel at X,Y, (0,0) is the top left corner")
            .action(ArgAction::Append)
            .value_parser(parse_pixel))
        .arg(Arg::new("run")
            .long("run")
            .value_name("X,Y,COUNT")
            .help("Print up to COUNT pixels of row Y starting at column X")
            .action(ArgAction::Append)
            .value_parser(parse_run))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Refuse images wider than this")
            .value_parser(value_parser!(usize))
            .default_value("32767"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Refuse images taller than this")
            .value_parser(value_parser!(usize))
            .default_value("32767"))
        .arg(Arg::new("strict")
            .long("strict")
            .help_heading("ADVANCED")
            .action(ArgAction::SetTrue)
            .help("Reject questionable headers")
            .long_help(
                "Reject headers whose pixel offset points inside the headers,\n\
                 whose DIB header is smaller than BITMAPINFOHEADER or that have zero dimensions"
            ))
        .arg(Arg::new("mask-rgb24")
            .long("mask-rgb24")
            .help_heading("ADVANCED")
            .action(ArgAction::SetTrue)
            .help("Clear the top byte of single pixels read from 24 bit images"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the stream options"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pixels_and_runs() {
        assert_eq!(parse_pixel("3,4"), Ok(PixelRequest { x: 3, y: 4 }));
        assert_eq!(parse_pixel(" 3 , 4 "), Ok(PixelRequest { x: 3, y: 4 }));
        assert_eq!(
            parse_run("0,1,16"),
            Ok(RunRequest {
                x:     0,
                y:     1,
                count: 16
            })
        );
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(parse_pixel("3").is_err());
        assert!(parse_pixel("3,4,5").is_err());
        assert!(parse_pixel("a,b").is_err());
        assert!(parse_pixel("-1,0").is_err());
        assert!(parse_run("1,2").is_err());
    }

    #[test]
    fn command_line_is_well_formed() {
        create_cmd_args().debug_assert();

        let matches = create_cmd_args()
            .try_get_matches_from(["bmp-info", "-i", "a.bmp", "--pixel", "1,2", "--run", "0,0,4"])
            .unwrap();
        let pixels: Vec<PixelRequest> = matches
            .get_many::<PixelRequest>("pixel")
            .unwrap()
            .copied()
            .collect();
        assert_eq!(pixels, [PixelRequest { x: 1, y: 2 }]);
        assert_eq!(*matches.get_one::<usize>("max-width").unwrap(), 32767);
    }
}
