// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parameters of a zoom run.  Once a run starts nothing here
//! changes.

use num::Complex;
use std::path::PathBuf;

use errors::ZoomError;
use palette::Smoothing;

/// Everything a zoom run needs to know.
#[derive(Clone, Debug)]
pub struct Config {
    /// Frame width in pixels.
    pub width: usize,
    /// Frame height in pixels.
    pub height: usize,
    /// Number of frames to produce, starting at frame 0.
    pub frames: usize,
    /// Iteration cap for the escape-time evaluator.
    pub max_iter: usize,
    /// The point the zoom closes in on.
    pub center: Complex<f64>,
    /// Half-height of the complex window at frame 0.
    pub initial_scale: f64,
    /// Per-frame zoom multiplier.
    pub growth_rate: f64,
    /// Where the frame files go.
    pub output_dir: PathBuf,
    /// Render threads per frame.
    pub threads: usize,
    /// Rendered frames allowed to wait for the writer.  Zero renders
    /// and writes each frame in turn on the calling thread.
    pub queue_depth: usize,
    /// Band smoothing used by the colour mapper.
    pub smoothing: Smoothing,
    /// Report progress every this many frames.
    pub progress_interval: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 320,
            height: 200,
            frames: 4000,
            max_iter: 256,
            // Seahorse valley
            center: Complex::new(-0.743_643_887_037_151, 0.131_825_904_205_330),
            initial_scale: 3.0,
            growth_rate: 1.02,
            output_dir: PathBuf::from("frames"),
            threads: 1,
            queue_depth: 2,
            smoothing: Smoothing::Constant,
            progress_interval: 100,
        }
    }
}

fn invalid(reason: &str) -> Result<(), ZoomError> {
    Err(ZoomError::Config {
        reason: reason.to_string(),
    })
}

impl Config {
    /// Reject configurations that cannot produce a frame.
    pub fn validate(&self) -> Result<(), ZoomError> {
        if self.width == 0 || self.height == 0 {
            return invalid("frame dimensions must be positive");
        }
        if self.width > u32::max_value() as usize || self.height > u32::max_value() as usize {
            return invalid("frame dimensions do not fit a PNG header");
        }
        if self.frames == 0 {
            return invalid("at least one frame is required");
        }
        if self.max_iter == 0 {
            return invalid("the iteration cap must be positive");
        }
        if !(self.growth_rate.is_finite() && self.growth_rate > 0.0) {
            return invalid("the growth rate must be a positive number");
        }
        if !(self.initial_scale.is_finite() && self.initial_scale > 0.0) {
            return invalid("the initial scale must be a positive number");
        }
        if !(self.center.re.is_finite() && self.center.im.is_finite()) {
            return invalid("the zoom center must be finite");
        }
        if self.threads == 0 {
            return invalid("at least one render thread is required");
        }
        if self.progress_interval == 0 {
            return invalid("the progress interval must be positive");
        }
        Ok(())
    }

    /// The zoom of a given frame: `growth_rate ^ frame`.
    pub fn zoom(&self, frame: usize) -> f64 {
        self.growth_rate.powf(frame as f64)
    }

    /// The zoom one step past the last frame.
    pub fn final_zoom(&self) -> f64 {
        self.zoom(self.frames)
    }

    /// Width of the zero-padded frame number: four digits, or more if
    /// the run is long enough to need them.
    pub fn index_width(&self) -> usize {
        let last = self.frames.saturating_sub(1);
        ::std::cmp::max(4, last.to_string().len())
    }

    /// The file name for a frame.
    pub fn frame_name(&self, frame: usize) -> String {
        format!("frame_{:0width$}.png", frame, width = self.index_width())
    }

    /// The printf-style pattern matching every frame name, for
    /// stitching the frames with ffmpeg.
    pub fn frame_pattern(&self) -> String {
        format!("frame_%0{}d.png", self.index_width())
    }

    /// The full output path for a frame.
    pub fn frame_path(&self, frame: usize) -> PathBuf {
        self.output_dir.join(self.frame_name(frame))
    }
}
