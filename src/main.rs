// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate mandelzoom;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandelzoom::{Config, Progress, Smoothing, Summary, ZoomSequencer};
use num::Complex;
use std::path::PathBuf;
use std::str::FromStr;

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

fn validate_finite(s: &str, err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(f) if f.is_finite() => Ok(()),
        _ => Err(err.to_string()),
    }
}

const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const FRAMES: &str = "frames";
const MAX_ITER: &str = "max-iter";
const CENTER_REAL: &str = "center-real";
const CENTER_IMAG: &str = "center-imag";
const SCALE: &str = "scale";
const GROWTH_RATE: &str = "growth-rate";
const OUTPUT_DIR: &str = "output-dir";
const THREADS: &str = "threads";
const QUEUE: &str = "queue";
const SMOOTHING: &str = "smoothing";

fn args<'a>(defaults: &'a Defaults) -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelzoom")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Renders an endless Mandelbrot zoom as numbered PNG frames")
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .takes_value(true)
                .default_value(&defaults.width)
                .validator(|s| {
                    validate_range(&s, 1, 16_384, "Could not parse width", "Width must be between 1 and 16384")
                })
                .help("Frame width in pixels"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .long(HEIGHT)
                .takes_value(true)
                .default_value(&defaults.height)
                .validator(|s| {
                    validate_range(&s, 1, 16_384, "Could not parse height", "Height must be between 1 and 16384")
                })
                .help("Frame height in pixels"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .long(FRAMES)
                .short("f")
                .takes_value(true)
                .default_value(&defaults.frames)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse frame count",
                        "Frame count must be between 1 and 1000000",
                    )
                })
                .help("Number of frames to render"),
        )
        .arg(
            Arg::with_name(MAX_ITER)
                .long(MAX_ITER)
                .short("i")
                .takes_value(true)
                .default_value(&defaults.max_iter)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 200000",
                    )
                })
                .help("Iteration cap per point"),
        )
        .arg(
            Arg::with_name(CENTER_REAL)
                .long(CENTER_REAL)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value(&defaults.center_real)
                .validator(|s| validate_finite(&s, "Could not parse real part of the zoom center"))
                .help("Real part of the point the zoom closes in on"),
        )
        .arg(
            Arg::with_name(CENTER_IMAG)
                .long(CENTER_IMAG)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value(&defaults.center_imag)
                .validator(|s| validate_finite(&s, "Could not parse imaginary part of the zoom center"))
                .help("Imaginary part of the point the zoom closes in on"),
        )
        .arg(
            Arg::with_name(SCALE)
                .long(SCALE)
                .takes_value(true)
                .default_value(&defaults.scale)
                .validator(|s| {
                    validate_range(&s, 1e-12, 1e6, "Could not parse scale", "Scale must be positive")
                })
                .help("Half-height of the complex window at frame 0"),
        )
        .arg(
            Arg::with_name(GROWTH_RATE)
                .long(GROWTH_RATE)
                .short("g")
                .takes_value(true)
                .default_value(&defaults.growth_rate)
                .validator(|s| {
                    validate_range(
                        &s,
                        1e-6,
                        1e6,
                        "Could not parse growth rate",
                        "Growth rate must be positive",
                    )
                })
                .help("Zoom multiplier per frame"),
        )
        .arg(
            Arg::with_name(OUTPUT_DIR)
                .long(OUTPUT_DIR)
                .short("o")
                .takes_value(true)
                .default_value(&defaults.output_dir)
                .help("Directory the frames are written to"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(&defaults.threads)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads rendering each frame"),
        )
        .arg(
            Arg::with_name(QUEUE)
                .long(QUEUE)
                .short("q")
                .takes_value(true)
                .default_value(&defaults.queue)
                .validator(|s| {
                    validate_range(&s, 0, 64, "Could not parse queue depth", "Queue depth must be between 0 and 64")
                })
                .help("Frames that may wait for the writer; 0 writes each frame before rendering the next"),
        )
        .arg(
            Arg::with_name(SMOOTHING)
                .long(SMOOTHING)
                .short("s")
                .takes_value(true)
                .possible_values(&["constant", "continuous"])
                .default_value("constant")
                .help("Band smoothing"),
        )
        .get_matches()
}

/// String renditions of the default configuration, which clap needs
/// to outlive the argument parser.
struct Defaults {
    width: String,
    height: String,
    frames: String,
    max_iter: String,
    center_real: String,
    center_imag: String,
    scale: String,
    growth_rate: String,
    output_dir: String,
    threads: String,
    queue: String,
}

impl Defaults {
    fn new(config: &Config) -> Self {
        Defaults {
            width: config.width.to_string(),
            height: config.height.to_string(),
            frames: config.frames.to_string(),
            max_iter: config.max_iter.to_string(),
            center_real: config.center.re.to_string(),
            center_imag: config.center.im.to_string(),
            scale: config.initial_scale.to_string(),
            growth_rate: config.growth_rate.to_string(),
            output_dir: config.output_dir.display().to_string(),
            threads: config.threads.to_string(),
            queue: config.queue_depth.to_string(),
        }
    }
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> T {
    // Every option has a default and a validator, so this cannot fail.
    match matches.value_of(name).map(T::from_str) {
        Some(Ok(v)) => v,
        _ => unreachable!("{} was validated by clap", name),
    }
}

fn config_from(matches: &ArgMatches) -> Config {
    Config {
        width: value(matches, WIDTH),
        height: value(matches, HEIGHT),
        frames: value(matches, FRAMES),
        max_iter: value(matches, MAX_ITER),
        center: Complex::new(value(matches, CENTER_REAL), value(matches, CENTER_IMAG)),
        initial_scale: value(matches, SCALE),
        growth_rate: value(matches, GROWTH_RATE),
        output_dir: PathBuf::from(matches.value_of(OUTPUT_DIR).unwrap_or("frames")),
        threads: value(matches, THREADS),
        queue_depth: value(matches, QUEUE),
        smoothing: value::<Smoothing>(matches, SMOOTHING),
        ..Config::default()
    }
}

/// Prints the run's progress to stdout.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn started(&mut self, config: &Config) {
        println!("Generating Mandelbrot endless zoom animation...");
        println!("  Resolution: {}x{} pixels", config.width, config.height);
        println!("  Frames: {}", config.frames);
        println!("  Zoom center: ({}, {})", config.center.re, config.center.im);
        println!("  Zoom factor per frame: {}", config.growth_rate);
        println!("  Final zoom level: {:.6e}x", config.final_zoom());
        println!("Output directory: {}/", config.output_dir.display());
        println!("Generating frames...");
    }

    fn frame(&mut self, index: usize, total: usize) {
        println!(
            "  Frame {}/{} ({:.1}%)...",
            index,
            total,
            100.0 * index as f64 / total as f64
        );
    }

    fn finished(&mut self, summary: &Summary) {
        println!(
            "Done! Generated {} frames in {:.1}s",
            summary.frames,
            summary.elapsed.as_millis() as f64 / 1000.0
        );
        println!("PNG frames saved to: {}/", summary.output_dir.display());
        println!();
        println!("To create a video from frames, you can use ffmpeg:");
        println!(
            "  ffmpeg -framerate 25 -i {}/{} -c:v libx264 -pix_fmt yuv420p mandelbrot_zoom.mp4",
            summary.output_dir.display(),
            summary.frame_pattern
        );
    }
}

fn main() {
    env_logger::init();

    let defaults = Defaults::new(&Config::default());
    let matches = args(&defaults);
    let config = config_from(&matches);

    let outcome = ZoomSequencer::new(config).and_then(|sequencer| sequencer.run(&mut ConsoleProgress));
    if let Err(e) = outcome {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
