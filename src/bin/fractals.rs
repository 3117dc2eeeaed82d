// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use failure::{format_err, Error};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use fractalpoints::parse::{parse_complex, parse_corners, parse_pair};
use fractalpoints::{ChaosGame, ComplexGrid, EscapeTime, Polygon};

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    T::from_str(s).map(|_| ()).map_err(|_| err.to_string())
}

// The default Mandelbrot view, as clap default values.
const DEFAULT_LEFTLOWER: &str = "-2,-1.5";
const DEFAULT_RIGHTUPPER: &str = "0.5,1.5";
const DEFAULT_DENSITY: &str = "100";
const DEFAULT_ITERATIONS: &str = "30";
const DEFAULT_RADIUS: &str = "30";

const TRIANGLE: &str = "triangle";
const HEXAGON: &str = "hexagon";
const MANDELBROT: &str = "mandelbrot";

const OUTPUT: &str = "output";
const POINTS: &str = "points";
const CORNERS: &str = "corners";
const SEED: &str = "seed";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const DENSITY: &str = "density";
const ITERATIONS: &str = "iterations";
const RADIUS: &str = "radius";
const THREADS: &str = "threads";

fn output_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(OUTPUT)
        .required(false)
        .long(OUTPUT)
        .short("o")
        .takes_value(true)
        .help("Output file; points are written to stdout if omitted")
}

fn points_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(POINTS)
        .required(true)
        .long(POINTS)
        .short("n")
        .takes_value(true)
        .validator(|s| validate_number::<usize>(&s, "Could not parse point count"))
        .help("Number of points to generate after the corners")
}

fn seed_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(SEED)
        .required(false)
        .long(SEED)
        .takes_value(true)
        .validator(|s| validate_number::<u64>(&s, "Could not parse random seed"))
        .help("Seed for the random source; omit for a fresh run every time")
}

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("fractals")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Chaos-game and escape-time fractal point generator")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name(TRIANGLE)
                .about("Points of the Sierpinski triangle")
                .arg(points_arg())
                .arg(
                    Arg::with_name(CORNERS)
                        .required(false)
                        .long(CORNERS)
                        .short("c")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .validator(|s| parse_corners(&s).map(|_| ()).map_err(|e| e.to_string()))
                        .help("Three corners as x,y;x,y;x,y (default: unit equilateral)"),
                )
                .arg(seed_arg())
                .arg(output_arg()),
        )
        .subcommand(
            SubCommand::with_name(HEXAGON)
                .about("Points of the Sierpinski hexagon")
                .arg(points_arg())
                .arg(seed_arg())
                .arg(output_arg()),
        )
        .subcommand(
            SubCommand::with_name(MANDELBROT)
                .about("Samples of the complex plane inside the Mandelbrot set")
                .arg(
                    Arg::with_name(LEFTLOWER)
                        .required(false)
                        .long(LEFTLOWER)
                        .short("l")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .default_value(DEFAULT_LEFTLOWER)
                        .validator(|s| {
                            validate_pair::<f64>(&s, ',', "Could not parse left lower corner")
                        })
                        .help("Left lower corner of the complex region"),
                )
                .arg(
                    Arg::with_name(RIGHTUPPER)
                        .required(false)
                        .long(RIGHTUPPER)
                        .short("r")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .default_value(DEFAULT_RIGHTUPPER)
                        .validator(|s| {
                            validate_pair::<f64>(&s, ',', "Could not parse right upper corner")
                        })
                        .help("Right upper corner of the complex region"),
                )
                .arg(
                    Arg::with_name(DENSITY)
                        .required(false)
                        .long(DENSITY)
                        .short("d")
                        .takes_value(true)
                        .default_value(DEFAULT_DENSITY)
                        .validator(|s| validate_number::<f64>(&s, "Could not parse grid density"))
                        .help("Samples per unit length along each axis"),
                )
                .arg(
                    Arg::with_name(ITERATIONS)
                        .required(false)
                        .long(ITERATIONS)
                        .short("i")
                        .takes_value(true)
                        .default_value(DEFAULT_ITERATIONS)
                        .validator(|s| {
                            validate_range(
                                &s,
                                1,
                                200_000,
                                "Could not parse iteration count",
                                "Iteration count must be between 1 and 200000",
                            )
                        })
                        .help("Number of iterations per sample"),
                )
                .arg(
                    Arg::with_name(RADIUS)
                        .required(false)
                        .long(RADIUS)
                        .takes_value(true)
                        .default_value(DEFAULT_RADIUS)
                        .validator(|s| {
                            validate_range(
                                &s,
                                0.0,
                                std::f64::INFINITY,
                                "Could not parse escape radius",
                                "Escape radius must not be negative",
                            )
                        })
                        .help("Orbits still inside this radius count as members"),
                )
                .arg(
                    Arg::with_name(THREADS)
                        .required(false)
                        .long(THREADS)
                        .short("t")
                        .takes_value(true)
                        .default_value("1")
                        .validator(move |s| {
                            validate_range(
                                &s,
                                1,
                                max_threads,
                                "Could not parse thread count",
                                &format!("Thread count must be between 1 and {}", max_threads),
                            )
                        })
                        .help("Number of threads to use in the filter"),
                )
                .arg(output_arg()),
        )
        .get_matches()
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    let raw = matches
        .value_of(name)
        .ok_or_else(|| format_err!("Missing value for --{}", name))?;
    T::from_str(raw).map_err(|_| format_err!("Could not parse --{} {:?}", name, raw))
}

fn random_source(matches: &ArgMatches) -> Result<StdRng, Error> {
    match matches.value_of(SEED) {
        Some(_) => Ok(StdRng::seed_from_u64(value(matches, SEED)?)),
        None => Ok(StdRng::from_entropy()),
    }
}

fn sink(matches: &ArgMatches) -> Result<Box<dyn Write>, Error> {
    match matches.value_of(OUTPUT) {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn write_pairs<I>(out: &mut dyn Write, pairs: I) -> Result<usize, Error>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut count = 0;
    for (a, b) in pairs {
        writeln!(out, "{},{}", a, b)?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}

fn run() -> Result<(), Error> {
    let matches = args();
    match matches.subcommand() {
        (TRIANGLE, Some(sub)) => {
            let corners = match sub.value_of(CORNERS) {
                Some(corners) => parse_corners(corners)?,
                None => Polygon::triangle().corners().to_vec(),
            };
            if corners.len() != 3 {
                return Err(format_err!("A triangle needs 3 corners, got {}", corners.len()));
            }
            let game = ChaosGame::triangle(value(sub, POINTS)?, corners, random_source(sub)?)?;
            let written = write_pairs(&mut *sink(sub)?, game.map(|p| (p.x, p.y)))?;
            info!("wrote {} triangle points", written);
        }
        (HEXAGON, Some(sub)) => {
            let game = ChaosGame::hexagon(value(sub, POINTS)?, random_source(sub)?);
            let written = write_pairs(&mut *sink(sub)?, game.map(|p| (p.x, p.y)))?;
            info!("wrote {} hexagon points", written);
        }
        (MANDELBROT, Some(sub)) => {
            let leftlower = parse_complex(sub.value_of(LEFTLOWER).unwrap_or_default())
                .ok_or_else(|| format_err!("Could not parse left lower corner"))?;
            let rightupper = parse_complex(sub.value_of(RIGHTUPPER).unwrap_or_default())
                .ok_or_else(|| format_err!("Could not parse right upper corner"))?;
            let grid = ComplexGrid::new(leftlower, rightupper, value(sub, DENSITY)?)?;
            let escape = EscapeTime::new(value(sub, ITERATIONS)?, value(sub, RADIUS)?)?;
            let members = escape.filter_threaded(&grid, value(sub, THREADS)?)?;
            let written = write_pairs(&mut *sink(sub)?, members.iter().map(|c| (c.re, c.im)))?;
            info!("wrote {} of {} samples", written, grid.len());
        }
        _ => return Err(format_err!("Unknown subcommand")),
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("fractals: {}", e);
        std::process::exit(1);
    }
}
