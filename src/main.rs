// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate linebrot;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use num::Complex;
use std::str::FromStr;

use linebrot::errors::invalid;
use linebrot::families::{
    BurningShip, Julia, MandelLambda, Mandelbrot, Mandeldrop, Newton, NewtonStalk, Pickover,
};
use linebrot::functions::{orbit_function, NewtonFunction, ORBIT_FUNCTIONS};
use linebrot::{
    ColourRanger, Colouriser, FractalError, Normaliser, Palette, PngWriter, Scaling, Scene,
    Strategy,
};

/// Given a string and a separator, returns the two values
/// separated by the separator.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A complex number written as "re,im".  A lone real number is also
/// accepted, with an imaginary part of zero.
fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => f64::from_str(s).ok().map(|re| Complex { re, im: 0.0 }),
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_complex(s: &str, err: &str) -> Result<(), String> {
    match parse_complex(s) {
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

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTUPPER: &str = "leftupper";
const RIGHTLOWER: &str = "rightlower";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const ESCAPE: &str = "escape";
const POWER: &str = "power";
const FRACTAL: &str = "fractal";
const CONSTANT: &str = "constant";
const TOLERANCE: &str = "tolerance";
const FUNCTION: &str = "function";
const PALETTE: &str = "palette";
const SCALING: &str = "scaling";
const EXPONENT: &str = "exponent";
const GREY: &str = "grey";

const FRACTALS: [&str; 8] = [
    "mandelbrot",
    "julia",
    "ship",
    "mandeldrop",
    "lambda",
    "pickover",
    "newton",
    "stalk",
];

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("linebrot")
        .version("0.1.0")
        .about("Escape-time and Newton fractal renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1920x1080")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTUPPER)
                .long(LEFTUPPER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,1.125")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left upper corner"))
                .help("Left upper corner of the complex region"),
        )
        .arg(
            Arg::with_name(RIGHTLOWER)
                .long(RIGHTLOWER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("2.0,-1.125")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right lower corner"))
                .help("Right lower corner of the complex region"),
        )
        .arg(
            Arg::with_name(FRACTAL)
                .long(FRACTAL)
                .short("f")
                .takes_value(true)
                .possible_values(&FRACTALS)
                .default_value("julia")
                .help("Fractal family to draw"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("256")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iteration cap per point"),
        )
        .arg(
            Arg::with_name(ESCAPE)
                .long(ESCAPE)
                .short("e")
                .takes_value(true)
                .default_value("4.0")
                .validator(|s| {
                    validate_range(
                        &s,
                        std::f64::MIN_POSITIVE,
                        std::f64::MAX,
                        "Could not parse escape radius",
                        "Escape radius must be positive",
                    )
                })
                .help("Escape radius (half-width of the trap for pickover)"),
        )
        .arg(
            Arg::with_name(POWER)
                .long(POWER)
                .short("p")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("2")
                .validator(|s| validate_complex(&s, "Could not parse power"))
                .help("Exponent, real or re,im; also the smoothing base"),
        )
        .arg(
            Arg::with_name(CONSTANT)
                .long(CONSTANT)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_complex(&s, "Could not parse constant"))
                .help("Julia constant (default -0.1948), or Newton relaxation constant (default 1)"),
        )
        .arg(
            Arg::with_name(TOLERANCE)
                .long(TOLERANCE)
                .takes_value(true)
                .default_value("0.0001")
                .validator(|s| {
                    validate_range(
                        &s,
                        std::f64::MIN_POSITIVE,
                        1.0,
                        "Could not parse tolerance",
                        "Tolerance must be between 0 and 1",
                    )
                })
                .help("Convergence tolerance for the Newton families"),
        )
        .arg(
            Arg::with_name(FUNCTION)
                .long(FUNCTION)
                .takes_value(true)
                .help(
                    "Named function: cube, quartic or quintic for the Newton \
                     families; cubic, sine or exp for lambda and pickover",
                ),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .takes_value(true)
                .possible_values(&Palette::NAMES)
                .default_value("many")
                .help("Colour palette"),
        )
        .arg(
            Arg::with_name(SCALING)
                .long(SCALING)
                .takes_value(true)
                .possible_values(&["linear", "exp"])
                .default_value("linear")
                .help("How values are scaled before colouring"),
        )
        .arg(
            Arg::with_name(EXPONENT)
                .long(EXPONENT)
                .takes_value(true)
                .default_value("1.0")
                .validator(|s| {
                    validate_range(
                        &s,
                        std::f64::MIN_POSITIVE,
                        100.0,
                        "Could not parse exponent",
                        "Exponent must be between 0 and 100",
                    )
                })
                .help("Exponent for exp scaling"),
        )
        .arg(
            Arg::with_name(GREY)
                .long(GREY)
                .short("g")
                .help("Write a greyscale image instead of a coloured one"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver (default: one per CPU)"),
        )
        .get_matches()
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, FractalError> {
    match matches.value_of(name) {
        Some(value) => Ok(value),
        None => invalid(format!("Missing value for --{}", name)),
    }
}

fn number<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, FractalError> {
    match T::from_str(value(matches, name)?) {
        Ok(n) => Ok(n),
        Err(_) => invalid(format!("Could not parse --{}", name)),
    }
}

fn complex(matches: &ArgMatches, name: &str) -> Result<Complex<f64>, FractalError> {
    match parse_complex(value(matches, name)?) {
        Some(c) => Ok(c),
        None => invalid(format!("Could not parse --{}", name)),
    }
}

fn complex_or(
    matches: &ArgMatches,
    name: &str,
    default: Complex<f64>,
) -> Result<Complex<f64>, FractalError> {
    if matches.is_present(name) {
        complex(matches, name)
    } else {
        Ok(default)
    }
}

fn newton_function(matches: &ArgMatches) -> Result<NewtonFunction, FractalError> {
    let name = matches.value_of(FUNCTION).unwrap_or("cube");
    match NewtonFunction::from_name(name) {
        Some(function) => Ok(function),
        None => invalid(format!(
            "Unknown Newton function {}, expected one of {}",
            name,
            NewtonFunction::NAMES.join(", ")
        )),
    }
}

fn strategy(matches: &ArgMatches) -> Result<Box<dyn Strategy + Sync>, FractalError> {
    let escape: f64 = number(matches, ESCAPE)?;
    let power = complex(matches, POWER)?;
    let julia_constant = complex_or(matches, CONSTANT, Complex::new(-0.1948, 0.0))?;
    let relaxation = complex_or(matches, CONSTANT, Complex::new(1.0, 0.0))?;
    let tolerance: f64 = number(matches, TOLERANCE)?;
    let orbit = || {
        let name = matches.value_of(FUNCTION).unwrap_or("cubic");
        match orbit_function(name) {
            Some(function) => Ok(function),
            None => invalid(format!(
                "Unknown orbit function {}, expected one of {}",
                name,
                ORBIT_FUNCTIONS.join(", ")
            )),
        }
    };

    let strategy: Box<dyn Strategy + Sync> = match value(matches, FRACTAL)? {
        "mandelbrot" => Box::new(Mandelbrot::new(power, escape)?),
        "julia" => Box::new(Julia::new(power, escape, julia_constant)?),
        "ship" => Box::new(BurningShip::new(power, escape)?),
        "mandeldrop" => Box::new(Mandeldrop::new(power, escape)?),
        "lambda" => Box::new(MandelLambda::new(orbit()?, power, escape)?),
        "pickover" => Box::new(Pickover::new(orbit()?, escape)?),
        "newton" => Box::new(Newton::new(newton_function(matches)?, relaxation, tolerance)?),
        "stalk" => Box::new(NewtonStalk::new(
            newton_function(matches)?,
            relaxation,
            tolerance,
            power,
        )?),
        other => return invalid(format!("Unknown fractal {}", other)),
    };
    Ok(strategy)
}

fn run(matches: &ArgMatches) -> Result<(), FractalError> {
    let (width, height) = match parse_pair::<u16>(value(matches, SIZE)?, 'x') {
        Some((w, h)) => (usize::from(w), usize::from(h)),
        None => return invalid("Could not parse output image size"),
    };
    let leftupper = complex(matches, LEFTUPPER)?;
    let rightlower = complex(matches, RIGHTLOWER)?;
    let iterations: usize = number(matches, ITERATIONS)?;
    let threads: usize = if matches.is_present(THREADS) {
        number(matches, THREADS)?
    } else {
        num_cpus::get()
    };
    let output = value(matches, OUTPUT)?;

    let scaling = match value(matches, SCALING)? {
        "exp" => Scaling::Exponential(number(matches, EXPONENT)?),
        _ => Scaling::Linear,
    };
    let palette = Palette::from_name(value(matches, PALETTE)?).unwrap_or_default();

    // Everything is checked before any work starts.
    let scene = Scene::new(width, height, leftupper, rightlower, iterations)?;
    let strategy = strategy(matches)?;
    let ranger = ColourRanger::from_palette(palette, scaling)?;
    let writer = PngWriter::create(output, width, height)?;

    info!("Using {} threads for a {}", threads, value(matches, FRACTAL)?);
    let raw = scene.render(strategy.as_ref(), threads);

    if matches.is_present(GREY) {
        info!("Normalising and writing");
        writer.write_grey(&Normaliser::new(255, threads).normalise(&raw))?;
    } else {
        info!("Colourising and writing");
        writer.write_colour(&Colouriser::new(ranger, threads).colourise(&raw))?;
    }
    info!("Wrote {}", output);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
