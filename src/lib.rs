#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot endless-zoom generator
//!
//! Produces a numbered sequence of PNG frames that zoom geometrically
//! into a fixed point of the Mandelbrot set, coloured with a 16-entry
//! C64 palette.  Each frame is a pure function of its index: the index
//! sets the zoom, the zoom sets a window on the complex plane, and
//! every pixel of that window is iterated through `z = z * z + c`
//! until it escapes or the iteration cap is hit.  The step at which it
//! escaped picks a band in the palette; points that never escape are
//! black.
//!
//! The frames are meant to be stitched together by an external tool,
//! for example `ffmpeg -framerate 25 -i frames/frame_%04d.png`.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

#[cfg(test)]
extern crate tempfile;

pub mod config;
pub mod encode;
pub mod errors;
pub mod escape;
pub mod palette;
pub mod planes;
pub mod render;
pub mod sequence;

pub use config::Config;
pub use encode::{encode_png, write_frame};
pub use errors::ZoomError;
pub use escape::{escape, escape_time, Escape};
pub use palette::{ColorMapper, Smoothing};
pub use planes::{Pixel, PlaneMapper};
pub use render::{Frame, FrameRenderer};
pub use sequence::{Progress, Silent, Summary, ZoomSequencer};
