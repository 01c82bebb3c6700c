use std::{error::Error, io::Write};

use plane_sac::{Plane, RunResult};
use plane_synth::{Evaluation, SyntheticCloud};

use crate::{frame::Frame, source::ResultSink};

/// How many input points a report previews.
const PREVIEW: usize = 10;

/// A plain-text report of a run.
pub struct ReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        ReportWriter { writer }
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for ReportWriter<W> {
    fn input(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>> {
        writeln!(self.writer, "threshold: {:.6}", frame.threshold)?;
        writeln!(self.writer, "points: {}", frame.points.len())?;
        for point in frame.points.iter().take(PREVIEW) {
            writeln!(
                self.writer,
                "  {:.6}\t{:.6}\t{:.6}",
                point.x(),
                point.y(),
                point.z()
            )?;
        }
        if frame.points.len() > PREVIEW {
            writeln!(self.writer, "  ...")?;
        }
        Ok(())
    }

    fn truth(&mut self, cloud: &SyntheticCloud) -> Result<(), Box<dyn Error>> {
        let c = &cloud.plane.coeffs;
        writeln!(
            self.writer,
            "generated plane: {:.6} {:.6} {:.6} {:.6}",
            c.x, c.y, c.z, c.w
        )?;
        writeln!(
            self.writer,
            "inliers: {:.6}%",
            cloud.inlier_ratio() * 100.
        )?;
        Ok(())
    }

    fn output(&mut self, result: &RunResult<Plane<f64>>) -> Result<(), Box<dyn Error>> {
        let c = &result.model.coeffs;
        writeln!(
            self.writer,
            "best plane: {:.6} {:.6} {:.6} {:.6}",
            c.x, c.y, c.z, c.w
        )?;
        writeln!(self.writer, "support: {}", result.support)?;
        writeln!(self.writer, "deviation: {:.6}", result.deviation)?;
        Ok(())
    }

    fn evaluation(&mut self, evaluation: &Evaluation) -> Result<(), Box<dyn Error>> {
        writeln!(self.writer, "lost points: {}", evaluation.lost)?;
        writeln!(self.writer, "accuracy: {:.6}", evaluation.accuracy)?;
        writeln!(
            self.writer,
            "normal error: {:.6} deg",
            evaluation.angle.to_degrees()
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::vector;
    use plane_common::{point::Point3, point_cloud::PointCloud};

    use super::*;

    #[test]
    fn test_report() {
        let frame = Frame {
            threshold: 0.5,
            points: { 0..12 }
                .map(|i| Point3::new(i as f64, 0., 1.))
                .collect::<PointCloud<_>>(),
        };
        let result = RunResult {
            model: Plane::new(vector![0., 0., 1., -1.]),
            support: 12,
            deviation: 0.,
            inliers: (0..12).collect(),
            trials: 53,
            exhausted: 0,
        };

        let mut report = ReportWriter::new(Vec::new());
        report.input(&frame).unwrap();
        report.output(&result).unwrap();
        let text = String::from_utf8(report.into_inner()).unwrap();

        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "threshold: 0.500000");
        assert_eq!(lines[1], "points: 12");
        assert_eq!(lines[2], "  0.000000\t0.000000\t1.000000");
        assert_eq!(lines[12], "  ...");
        assert_eq!(lines[13], "best plane: 0.000000 0.000000 1.000000 -1.000000");
        assert_eq!(lines[14], "support: 12");
        assert_eq!(lines[15], "deviation: 0.000000");
    }

    #[test]
    fn test_report_infinite_deviation() {
        let result = RunResult {
            model: Plane::new(vector![1., 0., 0., 0.]),
            support: 1,
            deviation: f64::INFINITY,
            inliers: vec![0],
            trials: 1,
            exhausted: 0,
        };
        let mut report = ReportWriter::new(Vec::new());
        report.output(&result).unwrap();
        let text = String::from_utf8(report.into_inner()).unwrap();
        assert!(text.ends_with("deviation: inf\n"));
    }
}
