use nalgebra::Vector3;
use plane_sac::Plane;
use rand::Rng;

/// The line `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    #[inline]
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Where a plane can be sampled so that its points stay inside the cube
/// `[-extent, extent]³`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// No zero coefficient. `low` and `high` are the traces of the plane on
    /// the two horizontal faces of the cube, and `x` the range of x over
    /// which they cross the cube.
    General { x: (f64, f64), low: Line, high: Line },
    /// Exactly one zero coefficient: the plane is parallel to `axis`, which
    /// spans the whole cube. `min` and `max` bound the other two axes.
    Parallel {
        axis: usize,
        min: Vector3<f64>,
        max: Vector3<f64>,
    },
    /// Two zero coefficients: the plane is `axis = offset`.
    Perpendicular { axis: usize, offset: f64 },
}

impl Bounds {
    /// Returns `None` if the plane misses the cube.
    pub fn of(plane: &Plane<f64>, extent: f64) -> Option<Self> {
        let normal = plane.normal();
        let d = plane.offset();
        let zeros = normal.iter().filter(|&&v| v == 0.).count();

        let bounds = match zeros {
            0 => general(&normal, d, extent)?,
            1 => {
                let axis = normal.iter().position(|&v| v == 0.)?;
                parallel(&normal, d, extent, axis)?
            }
            2 => {
                let axis = normal.iter().position(|&v| v != 0.)?;
                let offset = -d / normal[axis];
                if offset.abs() > extent {
                    return None;
                }
                Bounds::Perpendicular { axis, offset }
            }
            _ => return None,
        };
        Some(bounds)
    }

    /// Draws a point lying exactly on `plane` within these bounds.
    pub fn sample<R: Rng>(&self, plane: &Plane<f64>, extent: f64, rng: &mut R) -> Vector3<f64> {
        let n = plane.normal();
        let d = plane.offset();
        let mut point = Vector3::zeros();

        match *self {
            Bounds::General { x, low, high } => {
                point.x = uniform(rng, x.0, x.1);
                let y_low = low.at(point.x).max(-extent);
                let y_high = high.at(point.x).min(extent);
                point.y = uniform(rng, y_low, y_high);
                point.z = -(n.x * point.x + n.y * point.y + d) / n.z;
            }
            Bounds::Parallel { axis, min, max } => {
                let driven = if axis == 0 { 1 } else { 0 };
                let solved = 3 - axis - driven;
                point[axis] = uniform(rng, -extent, extent);
                point[driven] = uniform(rng, min[driven], max[driven]);
                point[solved] = -(n[driven] * point[driven] + d) / n[solved];
            }
            Bounds::Perpendicular { axis, offset } => {
                for free in (0..3).filter(|&i| i != axis) {
                    point[free] = uniform(rng, -extent, extent);
                }
                point[axis] = offset;
            }
        }
        point
    }
}

#[inline]
fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    low + rng.gen::<f64>() * (high - low)
}

fn general(n: &Vector3<f64>, d: f64, extent: f64) -> Option<Bounds> {
    let mut xs = Vec::with_capacity(4);
    let mut traces = Vec::with_capacity(2);
    for z in [extent, -extent] {
        for y in [extent, -extent] {
            xs.push(-(n.y * y + n.z * z + d) / n.x);
        }
        traces.push(Line {
            slope: -n.x / n.y,
            intercept: -(n.z * z + d) / n.y,
        });
    }

    let (low, high) = if traces[0].intercept < traces[1].intercept {
        (traces[0], traces[1])
    } else {
        (traces[1], traces[0])
    };

    let x_min = xs.iter().copied().fold(f64::INFINITY, f64::min).max(-extent);
    let x_max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max).min(extent);
    (x_min <= x_max).then_some(Bounds::General {
        x: (x_min, x_max),
        low,
        high,
    })
}

fn parallel(n: &Vector3<f64>, d: f64, extent: f64, axis: usize) -> Option<Bounds> {
    let u = (axis + 1) % 3;
    let v = (axis + 2) % 3;

    let mut min = Vector3::repeat(f64::INFINITY);
    let mut max = Vector3::repeat(f64::NEG_INFINITY);
    let mut found = false;
    for (fixed, other) in [(u, v), (v, u)] {
        for value in [extent, -extent] {
            let crossing = -(n[fixed] * value + d) / n[other];
            if crossing.abs() <= extent {
                min[fixed] = min[fixed].min(value);
                max[fixed] = max[fixed].max(value);
                min[other] = min[other].min(crossing);
                max[other] = max[other].max(crossing);
                found = true;
            }
        }
    }
    if !found {
        return None;
    }

    min[axis] = -extent;
    max[axis] = extent;
    Some(Bounds::Parallel { axis, min, max })
}
