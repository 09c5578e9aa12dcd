// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can stop a zoom run.  The escape-time arithmetic
//! itself cannot fail; only configuration, the filesystem and the
//! encoder can.

use std::io;

/// A fatal error.  None of these are retried; the sequencer stops at
/// the first one it sees.
#[derive(Debug, Fail)]
pub enum ZoomError {
    /// The startup configuration is unusable.
    #[fail(display = "invalid configuration: {}", reason)]
    Config {
        /// What was wrong with it.
        reason: String,
    },

    /// The output directory was missing and could not be created, or
    /// the path exists and is not a directory.
    #[fail(display = "could not create output directory {}: {}", path, cause)]
    Directory {
        /// The directory we tried to create.
        path: String,
        /// The underlying error.
        #[fail(cause)]
        cause: io::Error,
    },

    /// A frame file could not be opened or written.
    #[fail(display = "failed to write frame {} to {}: {}", frame, path, cause)]
    Io {
        /// Index of the failing frame.
        frame: usize,
        /// Destination path of the failing frame.
        path: String,
        /// The underlying error.
        #[fail(cause)]
        cause: io::Error,
    },

    /// The PNG encoder rejected a frame.
    #[fail(display = "failed to encode frame {}: {}", frame, cause)]
    Encode {
        /// Index of the failing frame.
        frame: usize,
        /// The underlying error.
        #[fail(cause)]
        cause: io::Error,
    },

    /// A colour index sequence names a slot the palette doesn't have.
    #[fail(display = "colour sequence entry {} points at palette slot {}", entry, index)]
    Palette {
        /// Position in the colour index sequence.
        entry: usize,
        /// The out-of-range palette slot.
        index: usize,
    },

    /// A render or writer thread panicked.
    #[fail(display = "a worker thread panicked")]
    Worker,
}

impl ZoomError {
    /// The frame this error is attached to, if any.
    pub fn frame(&self) -> Option<usize> {
        match *self {
            ZoomError::Io { frame, .. } | ZoomError::Encode { frame, .. } => Some(frame),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_name_the_frame() {
        let err = ZoomError::Io {
            frame: 17,
            path: "frames/frame_0017.png".to_string(),
            cause: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.frame(), Some(17));
        let message = format!("{}", err);
        assert!(message.contains("frame 17"));
        assert!(message.contains("frame_0017.png"));
    }

    #[test]
    fn config_errors_have_no_frame() {
        let err = ZoomError::Config {
            reason: "width must be positive".to_string(),
        };
        assert_eq!(err.frame(), None);
    }
}
