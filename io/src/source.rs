use std::{
    error::Error,
    io::BufRead,
    path::{Path, PathBuf},
};

use plane_sac::{Plane, RunResult};
use plane_synth::{Evaluation, Generator, SyntheticCloud};
use rand::Rng;

use crate::frame::Frame;

/// Supplies the threshold and points of a run.
pub trait PointSource {
    fn load(&mut self) -> Result<Frame, Box<dyn Error>>;
}

/// Receives what a run consumed and produced.
pub trait ResultSink {
    fn input(&mut self, _frame: &Frame) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    /// Called before [`ResultSink::input`] when the points were generated.
    fn truth(&mut self, _cloud: &SyntheticCloud) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn output(&mut self, result: &RunResult<Plane<f64>>) -> Result<(), Box<dyn Error>>;

    fn evaluation(&mut self, _evaluation: &Evaluation) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

impl PointSource for Frame {
    fn load(&mut self) -> Result<Frame, Box<dyn Error>> {
        Ok(self.clone())
    }
}

pub struct FrameReader<R> {
    reader: R,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        FrameReader { reader }
    }
}

impl<R: BufRead> PointSource for FrameReader<R> {
    fn load(&mut self) -> Result<Frame, Box<dyn Error>> {
        Frame::read(&mut self.reader)
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileSource {
            path: path.as_ref().to_owned(),
        }
    }
}

impl PointSource for FileSource {
    fn load(&mut self) -> Result<Frame, Box<dyn Error>> {
        Frame::open(&self.path)
            .map_err(|err| format!("Failed to load {}: {}", self.path.display(), err).into())
    }
}

impl<R: Rng> PointSource for Generator<R> {
    fn load(&mut self) -> Result<Frame, Box<dyn Error>> {
        Ok(self.generate()?.into())
    }
}
