// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The frame renderer.  A frame is a pure function of its index: the
//! index gives the zoom, the zoom gives the complex window, and each
//! pixel of the window is evaluated and coloured independently of
//! every other.  That independence is what lets the threaded renderer
//! hand rows out to workers without any locking on the pixels.

use image::RgbImage;
use itertools::iproduct;
use std::sync::{Arc, Mutex};

use config::Config;
use errors::ZoomError;
use escape::escape;
use palette::{ColorMapper, COLODORE, ZOOM_SEQUENCE};
use planes::{Pixel, PlaneMapper};

/// One rendered frame.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Position of the frame in the zoom sequence.
    pub index: usize,
    /// The pixels, row 0 first, three bytes per pixel.
    pub image: RgbImage,
}

impl Frame {
    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    /// The raw RGB bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.image
    }
}

/// Renders any frame of a zoom.  Everything it holds is fixed at
/// construction.
#[derive(Clone, Debug)]
pub struct FrameRenderer {
    plane: PlaneMapper,
    colors: ColorMapper,
    growth_rate: f64,
    max_iter: usize,
}

impl FrameRenderer {
    /// Build a renderer from the plane, the colours, the per-frame zoom
    /// multiplier and the iteration cap.
    pub fn new(plane: PlaneMapper, colors: ColorMapper, growth_rate: f64, max_iter: usize) -> Self {
        FrameRenderer {
            plane,
            colors,
            growth_rate,
            max_iter,
        }
    }

    /// Build a renderer with the Colodore palette for a run.
    pub fn from_config(config: &Config) -> Result<Self, ZoomError> {
        let colors = ColorMapper::new(COLODORE, ZOOM_SEQUENCE, config.smoothing)?;
        Ok(FrameRenderer::new(
            PlaneMapper::new(
                config.width,
                config.height,
                config.center,
                config.initial_scale,
            ),
            colors,
            config.growth_rate,
            config.max_iter,
        ))
    }

    /// The pixel-to-complex mapping in use.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The zoom of a frame.
    pub fn zoom(&self, frame: usize) -> f64 {
        self.growth_rate.powf(frame as f64)
    }

    /// Half-height of the complex window of a frame.
    pub fn scale(&self, frame: usize) -> f64 {
        self.plane.scale(self.zoom(frame))
    }

    fn blank(&self, frame: usize) -> Frame {
        let (width, height) = (self.plane.integral_plane.0, self.plane.integral_plane.1);
        Frame {
            index: frame,
            image: RgbImage::new(width as u32, height as u32),
        }
    }

    /// Fill one row of pixels.  `row` is exactly one image row wide.
    fn render_row(&self, zoom: f64, top: usize, row: &mut [u8]) {
        for (left, pixel) in row.chunks_mut(3).enumerate() {
            let point = self.plane.pixel_to_point(&Pixel(left, top), zoom);
            let color = self.colors.color(&escape(point, self.max_iter), self.max_iter);
            pixel.copy_from_slice(&color.0);
        }
    }

    /// Render a frame on the calling thread, in row-major order.
    pub fn render(&self, frame: usize) -> Frame {
        let zoom = self.zoom(frame);
        let mut out = self.blank(frame);
        for (top, left) in iproduct!(0..self.plane.integral_plane.1, 0..self.plane.integral_plane.0) {
            let point = self.plane.pixel_to_point(&Pixel(left, top), zoom);
            let color = self.colors.color(&escape(point, self.max_iter), self.max_iter);
            out.image.put_pixel(left as u32, top as u32, color);
        }
        out
    }

    /// Render a frame with `threads` workers.  Workers pull rows from a
    /// shared queue and write only into the row they were handed, so
    /// the result is byte-identical to `render`.
    pub fn render_threaded(&self, frame: usize, threads: usize) -> Result<Frame, ZoomError> {
        if threads <= 1 {
            return Ok(self.render(frame));
        }

        let zoom = self.zoom(frame);
        let stride = 3 * self.plane.integral_plane.0;
        let mut out = self.blank(frame);
        {
            let rows = Arc::new(Mutex::new(out.image.chunks_mut(stride).enumerate()));
            crossbeam::scope(|spawner| {
                for _ in 0..threads {
                    let rows = rows.clone();
                    spawner.spawn(move |_| loop {
                        let row = match rows.lock() {
                            Ok(mut rows) => rows.next(),
                            Err(_) => None,
                        };
                        match row {
                            Some((top, row)) => self.render_row(zoom, top, row),
                            None => {
                                break;
                            }
                        }
                    });
                }
            })
            .map_err(|_| ZoomError::Worker)?;
        }
        Ok(out)
    }
}
