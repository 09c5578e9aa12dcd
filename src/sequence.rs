// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The zoom sequencer walks frames `0..frames` exactly once each, in
//! order, and turns every one into a file.  The first failure stops
//! the run; frames already on disk are left there.
//!
//! With a non-zero queue depth, rendering and writing overlap: the
//! calling thread renders frames into a bounded channel and a single
//! writer thread drains it.  The bound keeps memory flat when the
//! writer falls behind.  When the writer fails it hangs up, and the
//! renderer stops at its next send, so nothing past the failing frame
//! reaches the disk.

use crossbeam::channel::bounded;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use config::Config;
use encode::{ensure_directory, write_frame};
use errors::ZoomError;
use render::{Frame, FrameRenderer};

/// What a finished run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    /// Number of frame files written.
    pub frames: usize,
    /// Where they were written.
    pub output_dir: PathBuf,
    /// printf-style pattern of the frame file names.
    pub frame_pattern: String,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

/// Observer for run progress.  Purely diagnostic.
pub trait Progress {
    /// Called once, after the output directory is ready.
    fn started(&mut self, _config: &Config) {}
    /// Called before rendering every `progress_interval`th frame.
    fn frame(&mut self, _index: usize, _total: usize) {}
    /// Called once, after the last frame is written.
    fn finished(&mut self, _summary: &Summary) {}
}

/// A progress observer that ignores everything.
pub struct Silent;

impl Progress for Silent {}

/// Drives a whole zoom run.
pub struct ZoomSequencer {
    config: Config,
    renderer: FrameRenderer,
}

impl ZoomSequencer {
    /// Validates the configuration and builds the renderer for it.
    pub fn new(config: Config) -> Result<Self, ZoomError> {
        config.validate()?;
        let renderer = FrameRenderer::from_config(&config)?;
        Ok(ZoomSequencer { config, renderer })
    }

    /// The renderer every frame goes through.
    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    fn render(&self, index: usize) -> Result<Frame, ZoomError> {
        self.renderer.render_threaded(index, self.config.threads)
    }

    fn report<P: Progress>(&self, index: usize, progress: &mut P) {
        if index % self.config.progress_interval == 0 {
            progress.frame(index, self.config.frames);
        }
    }

    fn write(&self, frame: &Frame) -> Result<(), ZoomError> {
        write_frame(&self.config.frame_path(frame.index), frame)
    }

    /// Produce every frame of the run.
    pub fn run<P: Progress>(&self, progress: &mut P) -> Result<Summary, ZoomError> {
        let start = Instant::now();
        ensure_directory(&self.config.output_dir)?;
        progress.started(&self.config);
        info!(
            "Rendering {} frames of {}x{} into {}",
            self.config.frames,
            self.config.width,
            self.config.height,
            self.config.output_dir.display()
        );

        let written = if self.config.queue_depth == 0 {
            self.run_serial(progress)?
        } else {
            self.run_pipelined(progress)?
        };

        let summary = Summary {
            frames: written,
            output_dir: self.config.output_dir.clone(),
            frame_pattern: self.config.frame_pattern(),
            elapsed: start.elapsed(),
        };
        info!("Wrote {} frames in {:?}", summary.frames, summary.elapsed);
        progress.finished(&summary);
        Ok(summary)
    }

    fn run_serial<P: Progress>(&self, progress: &mut P) -> Result<usize, ZoomError> {
        for index in 0..self.config.frames {
            self.report(index, progress);
            let frame = self.render(index)?;
            self.write(&frame)?;
        }
        Ok(self.config.frames)
    }

    fn run_pipelined<P: Progress>(&self, progress: &mut P) -> Result<usize, ZoomError> {
        let (sender, receiver) = bounded::<Frame>(self.config.queue_depth);

        let outcome = crossbeam::scope(|spawner| -> Result<usize, ZoomError> {
            let writer = spawner.spawn(move |_| -> Result<usize, ZoomError> {
                let mut written = 0;
                for frame in receiver.iter() {
                    if let Err(e) = self.write(&frame) {
                        error!("Writer stopping at frame {}: {}", frame.index, e);
                        return Err(e);
                    }
                    written += 1;
                }
                Ok(written)
            });

            let mut rendered: Result<(), ZoomError> = Ok(());
            for index in 0..self.config.frames {
                self.report(index, progress);
                match self.render(index) {
                    Ok(frame) => {
                        if sender.send(frame).is_err() {
                            debug!("Writer hung up before frame {}", index);
                            break;
                        }
                    }
                    Err(e) => {
                        rendered = Err(e);
                        break;
                    }
                }
            }
            drop(sender);

            let written = writer.join().map_err(|_| ZoomError::Worker)?;
            // A write failure is the earlier one in frame order.
            let written = written?;
            rendered.map(|_| written)
        })
        .map_err(|_| ZoomError::Worker)?;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[derive(Default)]
    struct Recorder {
        started: usize,
        frames: Vec<usize>,
        finished: Option<Summary>,
    }

    impl Progress for Recorder {
        fn started(&mut self, _config: &Config) {
            self.started += 1;
        }
        fn frame(&mut self, index: usize, _total: usize) {
            self.frames.push(index);
        }
        fn finished(&mut self, summary: &Summary) {
            self.finished = Some(summary.clone());
        }
    }

    fn tiny(output_dir: PathBuf, queue_depth: usize) -> Config {
        Config {
            width: 16,
            height: 10,
            frames: 7,
            max_iter: 32,
            output_dir,
            queue_depth,
            progress_interval: 3,
            ..Config::default()
        }
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn both_modes_write_every_frame() {
        for &depth in &[0, 1, 4] {
            let dir = tempdir().unwrap();
            let out = dir.path().join("frames");
            let mut recorder = Recorder::default();
            let summary = ZoomSequencer::new(tiny(out.clone(), depth))
                .unwrap()
                .run(&mut recorder)
                .unwrap();
            assert_eq!(summary.frames, 7);
            assert_eq!(summary.frame_pattern, "frame_%04d.png");
            assert_eq!(recorder.started, 1);
            assert_eq!(recorder.frames, vec![0, 3, 6]);
            assert_eq!(recorder.finished.map(|s| s.frames), Some(7));
            let expected: Vec<String> = (0..7).map(|i| format!("frame_{:04}.png", i)).collect();
            assert_eq!(listing(&out), expected);
        }
    }

    #[test]
    fn long_runs_report_a_wider_frame_pattern() {
        let dir = tempdir().unwrap();
        let config = Config {
            width: 1,
            height: 1,
            frames: 10_001,
            max_iter: 1,
            output_dir: dir.path().to_path_buf(),
            progress_interval: 1000,
            ..Config::default()
        };
        let summary = ZoomSequencer::new(config).unwrap().run(&mut Silent).unwrap();
        assert_eq!(summary.frame_pattern, "frame_%05d.png");
        assert!(dir.path().join("frame_10000.png").is_file());
        assert!(dir.path().join("frame_00000.png").is_file());
    }

    #[test]
    fn stops_at_the_first_failing_frame() {
        for &depth in &[0, 2] {
            let dir = tempdir().unwrap();
            let out = dir.path().to_path_buf();
            fs::create_dir(out.join("frame_0003.png")).unwrap();
            let result = ZoomSequencer::new(tiny(out.clone(), depth))
                .unwrap()
                .run(&mut Silent);
            match result {
                Err(ZoomError::Io { frame: 3, .. }) => {}
                other => panic!("unexpected {:?}", other),
            }
            assert_eq!(
                listing(&out),
                vec!["frame_0000.png", "frame_0001.png", "frame_0002.png", "frame_0003.png"]
            );
            assert!(out.join("frame_0003.png").is_dir());
        }
    }

    #[test]
    fn invalid_configurations_never_start() {
        let dir = tempdir().unwrap();
        let config = Config {
            frames: 0,
            ..tiny(dir.path().join("never"), 0)
        };
        assert!(ZoomSequencer::new(config).is_err());
        assert!(!dir.path().join("never").exists());
    }

    #[test]
    fn a_file_in_place_of_the_directory_is_fatal() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("frames");
        fs::write(&out, b"").unwrap();
        let result = ZoomSequencer::new(tiny(out, 0)).unwrap().run(&mut Silent);
        match result {
            Err(ZoomError::Directory { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
