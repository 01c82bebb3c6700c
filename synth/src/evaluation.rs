use plane_sac::{Plane, RunResult};

use crate::generator::SyntheticCloud;

/// How well a fitted plane recovers the truth of a synthetic cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub expected: usize,
    pub support: usize,
    /// `expected - support`; negative when outliers were absorbed.
    pub lost: i64,
    /// `support / expected`, or 0 when the cloud has no inliers.
    pub accuracy: f64,
    /// Angle between the fitted and the true normal, in radians. The
    /// orientation of the normals is ignored.
    pub angle: f64,
}

impl Evaluation {
    pub fn new(truth: &SyntheticCloud, result: &RunResult<Plane<f64>>) -> Self {
        let expected = truth.inliers;
        let cos = truth.plane.normal().normalize().dot(&result.model.normal().normalize());
        Evaluation {
            expected,
            support: result.support,
            lost: expected as i64 - result.support as i64,
            accuracy: if expected == 0 {
                0.
            } else {
                result.support as f64 / expected as f64
            },
            angle: cos.abs().min(1.).acos(),
        }
    }
}
