// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a window on the complex plane centered on a fixed point whose
//! size shrinks as the zoom grows.
use num::Complex;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y of a pixel on the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of a fixed-size frame onto the complex plane for a
/// given zoom.  At zoom 1.0 the window is `initial_scale` wide in the
/// imaginary direction on either side of the center; the real
/// direction is stretched by the frame's aspect ratio so non-square
/// frames are not distorted.
#[derive(Debug, Clone)]
pub struct PlaneMapper {
    /// The right-lower corner of the integral cartesian plane.
    pub integral_plane: IntegralPlane,
    /// The point the zoom closes in on.
    pub center: Complex<f64>,
    /// Half-height of the complex window at zoom 1.0.
    pub initial_scale: f64,
    // Half-width and half-height of the integral plane, and width/height.
    half: (f64, f64),
    aspect: f64,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane, the center
    /// of the complex window, and the window's initial half-height.
    pub fn new(width: usize, height: usize, center: Complex<f64>, initial_scale: f64) -> Self {
        PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            center,
            initial_scale,
            half: ((width as f64) / 2.0, (height as f64) / 2.0),
            aspect: (width as f64) / (height as f64),
        }
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// The half-height of the complex window at the given zoom.
    pub fn scale(&self, zoom: f64) -> f64 {
        self.initial_scale / zoom
    }

    /// Given a pixel on the integral cartesian plane and the current
    /// zoom, return the point on the complex plane it samples.
    pub fn pixel_to_point(&self, pixel: &Pixel, zoom: f64) -> Complex<f64> {
        let scale = self.scale(zoom);
        let x_ratio = ((pixel.0 as f64) - self.half.0) / self.half.0;
        let y_ratio = ((pixel.1 as f64) - self.half.1) / self.half.1;
        Complex::new(
            self.center.re + x_ratio * scale * self.aspect,
            self.center.im + y_ratio * scale,
        )
    }
}
