// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colour mapping.  Iteration counts become a smoothed band number,
//! the band picks a slot in a 16-entry colour sequence, and the
//! sequence picks a colour out of a 16-entry palette.  Slot 0 of the
//! palette is reserved for points inside the set.

use image::Rgb;
use std::f64::consts::LN_2;
use std::str::FromStr;

use errors::ZoomError;
use escape::Escape;

/// Number of colours in the palette and in the colour sequence.
pub const PALETTE_SIZE: usize = 16;

/// The Colodore rendition of the C64 palette.
pub const COLODORE: [Rgb<u8>; PALETTE_SIZE] = [
    Rgb([0x00, 0x00, 0x00]), // black
    Rgb([0xFF, 0xFF, 0xFF]), // white
    Rgb([0x81, 0x33, 0x38]), // red
    Rgb([0x75, 0xCE, 0xC8]), // cyan
    Rgb([0x8E, 0x3C, 0x97]), // purple
    Rgb([0x56, 0xAC, 0x4D]), // green
    Rgb([0x2E, 0x2C, 0x9B]), // blue
    Rgb([0xED, 0xF1, 0x71]), // yellow
    Rgb([0x8E, 0x50, 0x29]), // orange
    Rgb([0x55, 0x38, 0x00]), // brown
    Rgb([0xC4, 0x6C, 0x71]), // light red
    Rgb([0x4A, 0x4A, 0x4A]), // dark grey
    Rgb([0x7B, 0x7B, 0x7B]), // medium grey
    Rgb([0xA9, 0xFF, 0x9F]), // light green
    Rgb([0x70, 0x6D, 0xEB]), // light blue
    Rgb([0xB2, 0xB2, 0xB2]), // light grey
];

/// Blues through greens and reds to white and back down the greys.
pub const ZOOM_SEQUENCE: [usize; PALETTE_SIZE] = [0, 6, 14, 3, 5, 13, 7, 8, 2, 10, 4, 12, 15, 1, 15, 12];

/// How an escape is turned into a continuous band number.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Smoothing {
    /// `n + 1 - ln(ln 2) / ln 2`: a fixed offset on the raw count.
    /// Every point escaping at the same step gets the same colour.
    Constant,
    /// `n + 1 - ln(ln |z|) / ln 2`: the usual normalized iteration
    /// count, using the magnitude the orbit escaped with.
    Continuous,
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::Constant
    }
}

impl FromStr for Smoothing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constant" => Ok(Smoothing::Constant),
            "continuous" => Ok(Smoothing::Continuous),
            _ => Err(format!("Unknown smoothing '{}' (expected constant or continuous)", s)),
        }
    }
}

impl Smoothing {
    /// The band value for an escaped point.
    pub fn smooth(self, escape: &Escape) -> f64 {
        let n = escape.iterations as f64 + 1.0;
        match self {
            Smoothing::Constant => n - LN_2.ln() / LN_2,
            // ln |z| == ln(|z|^2) / 2
            Smoothing::Continuous => n - (escape.norm_sqr.ln() / 2.0).ln() / LN_2,
        }
    }
}

/// An immutable palette plus the sequence that walks it.
#[derive(Clone, Debug)]
pub struct ColorMapper {
    palette: [Rgb<u8>; PALETTE_SIZE],
    sequence: [usize; PALETTE_SIZE],
    smoothing: Smoothing,
}

impl Default for ColorMapper {
    fn default() -> Self {
        ColorMapper {
            palette: COLODORE,
            sequence: ZOOM_SEQUENCE,
            smoothing: Smoothing::default(),
        }
    }
}

impl ColorMapper {
    /// Every sequence entry has to name a palette slot.
    pub fn new(
        palette: [Rgb<u8>; PALETTE_SIZE],
        sequence: [usize; PALETTE_SIZE],
        smoothing: Smoothing,
    ) -> Result<Self, ZoomError> {
        if let Some((entry, &index)) = sequence.iter().enumerate().find(|&(_, &i)| i >= PALETTE_SIZE) {
            return Err(ZoomError::Palette { entry, index });
        }
        Ok(ColorMapper {
            palette,
            sequence,
            smoothing,
        })
    }

    /// The colour reserved for points inside the set.
    pub fn inside(&self) -> Rgb<u8> {
        self.palette[0]
    }

    /// Position in the colour sequence for an escaped point.
    pub fn band(&self, escape: &Escape) -> usize {
        let smooth = self.smoothing.smooth(escape);
        ((smooth * 2.0).floor() as i64).rem_euclid(PALETTE_SIZE as i64) as usize
    }

    /// The colour of a point given how it escaped.
    pub fn color(&self, escape: &Escape, max_iter: usize) -> Rgb<u8> {
        if escape.iterations == max_iter {
            return self.inside();
        }
        self.palette[self.sequence[self.band(escape)]]
    }

    /// The colour for a bare iteration count.  Continuous smoothing
    /// needs the escaped magnitude, so without it the count is treated
    /// as having escaped at exactly radius two.
    pub fn color_for_count(&self, iterations: usize, max_iter: usize) -> Rgb<u8> {
        self.color(
            &Escape {
                iterations,
                norm_sqr: 4.0,
            },
            max_iter,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_set_is_black() {
        let cm = ColorMapper::default();
        assert_eq!(cm.color_for_count(256, 256), Rgb([0, 0, 0]));
        assert_eq!(cm.color_for_count(1, 1), cm.inside());
    }

    #[test]
    fn constant_smoothing_matches_reference_bands() {
        // floor(2 * (n + 1.5288..)) == 2n + 3
        let cm = ColorMapper::default();
        let band = |n| {
            cm.band(&Escape {
                iterations: n,
                norm_sqr: 100.0,
            })
        };
        assert_eq!(band(0), 3);
        assert_eq!(band(1), 5);
        assert_eq!(band(6), 15);
        assert_eq!(band(7), 1);
        // Band 3 is a fixed point of the sequence; the others are not.
        assert_eq!(cm.color_for_count(0, 256), COLODORE[3]);
        assert_eq!(cm.color_for_count(1, 256), COLODORE[ZOOM_SEQUENCE[5]]);
        assert_eq!(cm.color_for_count(1, 256), COLODORE[13]);
        assert_eq!(cm.color_for_count(6, 256), COLODORE[12]);
        assert_eq!(cm.color_for_count(7, 256), COLODORE[6]);
    }

    #[test]
    fn every_escaped_count_lands_in_the_palette() {
        for &smoothing in &[Smoothing::Constant, Smoothing::Continuous] {
            let cm = ColorMapper::new(COLODORE, ZOOM_SEQUENCE, smoothing).unwrap();
            for n in 0..256 {
                for &norm_sqr in &[4.000001, 5.0, 200.0, 1e300] {
                    let escape = Escape {
                        iterations: n,
                        norm_sqr,
                    };
                    assert!(cm.band(&escape) < PALETTE_SIZE);
                    assert!(COLODORE.contains(&cm.color(&escape, 256)));
                }
            }
        }
    }

    #[test]
    fn continuous_smoothing_tracks_the_escape_magnitude() {
        let slow = Escape {
            iterations: 10,
            norm_sqr: 4.5,
        };
        let fast = Escape {
            iterations: 10,
            norm_sqr: 1e6,
        };
        assert!(Smoothing::Continuous.smooth(&slow) > Smoothing::Continuous.smooth(&fast));
        assert_eq!(Smoothing::Constant.smooth(&slow), Smoothing::Constant.smooth(&fast));
    }

    #[test]
    fn rejects_sequences_outside_the_palette() {
        let mut sequence = ZOOM_SEQUENCE;
        sequence[5] = 16;
        match ColorMapper::new(COLODORE, sequence, Smoothing::Constant) {
            Err(ZoomError::Palette { entry: 5, index: 16 }) => {}
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn parses_smoothing_names() {
        assert_eq!("constant".parse::<Smoothing>(), Ok(Smoothing::Constant));
        assert_eq!("continuous".parse::<Smoothing>(), Ok(Smoothing::Continuous));
        assert!("fancy".parse::<Smoothing>().is_err());
    }
}
