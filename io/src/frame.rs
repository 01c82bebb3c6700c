mod read;
mod write;

use std::{
    error::Error,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use plane_common::{point::Point3, point_cloud::PointCloud};
use plane_synth::SyntheticCloud;

/// A distance threshold together with the points to fit.
///
/// The text form is the threshold on the first line, the point count on the
/// second, then one `x y z` line per point.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub threshold: f64,
    pub points: PointCloud<Point3>,
}

impl Frame {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let file = File::open(path)?;
        Frame::read(BufReader::new(file))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn Error>> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl From<SyntheticCloud> for Frame {
    fn from(cloud: SyntheticCloud) -> Self {
        Frame {
            threshold: cloud.threshold,
            points: cloud.points,
        }
    }
}
