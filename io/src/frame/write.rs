use std::{error::Error, io::Write};

use super::Frame;

impl Frame {
    /// Writes the frame with six decimals per value, tab-separated.
    pub fn write<W>(&self, mut writer: W) -> Result<(), Box<dyn Error>>
    where
        W: Write,
    {
        writeln!(writer, "{:.6}", self.threshold)?;
        writeln!(writer, "{}", self.points.len())?;
        for point in self.points.iter() {
            writeln!(
                writer,
                "{:.6}\t{:.6}\t{:.6}",
                point.x(),
                point.y(),
                point.z()
            )?;
        }
        Ok(())
    }
}
