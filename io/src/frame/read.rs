use std::{error::Error, io::BufRead};

use plane_common::{point::Point3, point_cloud::PointCloud};

use super::Frame;

impl Frame {
    pub fn read<R: BufRead>(reader: R) -> Result<Self, Box<dyn Error>> {
        let mut lines = { reader.lines().enumerate() }
            .map(|(index, line)| line.map(|line| (index + 1, line)));

        let (number, line) = lines.next().ok_or("Unexpected EOF: missing threshold")??;
        let threshold = { line.trim() }
            .parse::<f64>()
            .map_err(|err| format!("Line {}: bad threshold {:?}: {}", number, line, err))?;
        if !(threshold >= 0. && threshold.is_finite()) {
            return Err(format!("Line {}: threshold must be non-negative", number).into());
        }

        let (number, line) = lines.next().ok_or("Unexpected EOF: missing point count")??;
        let count = { line.trim() }
            .parse::<usize>()
            .map_err(|err| format!("Line {}: bad point count {:?}: {}", number, line, err))?;

        let mut storage = Vec::new();
        while storage.len() < count {
            let (number, line) = lines.next().ok_or_else(|| {
                format!(
                    "Unexpected EOF: expected {} points, found {}",
                    count,
                    storage.len()
                )
            })??;
            if line.trim().is_empty() {
                continue;
            }
            storage.push(read_point(number, &line)?);
        }

        let mut extra = 0;
        for line in lines {
            let (_, line) = line?;
            if !line.trim().is_empty() {
                extra += 1;
            }
        }
        if extra > 0 {
            log::warn!(
                "Found {} lines after the {} declared points, ignoring them",
                extra,
                count
            );
        }

        let points = PointCloud::from_vec(storage);
        if !points.is_bounded() {
            log::warn!("Found points with non-finite coordinates");
        }
        Ok(Frame { threshold, points })
    }
}

fn read_point(number: usize, line: &str) -> Result<Point3, Box<dyn Error>> {
    let coords = { line.split_whitespace() }
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("Line {}: {}", number, err))?;
    match coords[..] {
        [x, y, z] => Ok(Point3::new(x, y, z)),
        _ => Err(format!(
            "Line {}: expected 3 coordinates, found {}",
            number,
            coords.len()
        )
        .into()),
    }
}
