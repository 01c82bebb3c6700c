use log::debug;
use nalgebra::Vector4;
use plane_common::{
    point::{Point, Point3},
    point_cloud::PointCloud,
    vector::displace,
};
use plane_sac::Plane;
use rand::{rngs::ThreadRng, Rng};

use crate::bounds::Bounds;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),

    #[error("plane {0:?} does not cross the sampling cube")]
    OutOfDomain([f64; 4]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Half the edge of the sampling cube `[-extent, extent]³`.
    pub extent: f64,
    pub count: usize,
    /// Inliers lie closer than this to the plane, outliers between one and
    /// three times as far.
    pub threshold: f64,
    pub inlier_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            extent: 100.,
            count: 1000,
            threshold: 0.05,
            inlier_ratio: 0.8,
        }
    }
}

impl GeneratorConfig {
    /// A randomized setup: 25000 points, a threshold in `[0.01, 0.5]` and
    /// an inlier ratio in `[0.5, 1]`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut threshold = rng.gen::<f64>();
        if threshold > 0.5 {
            threshold -= 0.5;
        }
        if threshold < 0.01 {
            threshold += 0.01;
        }

        let mut inlier_ratio = 1. - rng.gen::<f64>();
        if inlier_ratio < 0.5 {
            inlier_ratio += 0.5;
        }

        GeneratorConfig {
            extent: 100.,
            count: 25000,
            threshold,
            inlier_ratio,
        }
    }

    fn validate(&self) -> Result<(), GenerateError> {
        let error = if !(self.extent > 0. && self.extent.is_finite()) {
            format!("extent must be positive, got {}", self.extent)
        } else if !(self.threshold >= 0. && self.threshold.is_finite()) {
            format!("threshold must be non-negative, got {}", self.threshold)
        } else if !(0. ..=1.).contains(&self.inlier_ratio) {
            format!("inlier ratio must lie in [0, 1], got {}", self.inlier_ratio)
        } else {
            return Ok(());
        };
        Err(GenerateError::InvalidConfig(error))
    }

    /// The number of inliers among `count` points.
    #[inline]
    pub fn inliers(&self) -> usize {
        ((self.inlier_ratio * self.count as f64).round() as usize).min(self.count)
    }
}

/// A generated cloud together with the truth it was generated from.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticCloud {
    pub plane: Plane<f64>,
    pub threshold: f64,
    /// The first `inliers` points are the inliers.
    pub points: PointCloud<Point3>,
    pub inliers: usize,
}

impl SyntheticCloud {
    #[inline]
    pub fn inlier_ratio(&self) -> f64 {
        if self.points.is_empty() {
            0.
        } else {
            self.inliers as f64 / self.points.len() as f64
        }
    }
}

pub struct Generator<R: Rng = ThreadRng> {
    pub config: GeneratorConfig,
    pub rng: R,
}

impl<R: Rng> Generator<R> {
    pub fn new(config: GeneratorConfig, rng: R) -> Self {
        Generator { config, rng }
    }

    fn random_point(&mut self) -> Vector4<f64> {
        let extent = self.config.extent;
        let mut coord = || self.rng.gen_range(-extent..extent);
        Vector4::new(coord(), coord(), coord(), 1.)
    }

    /// A plane through three uniform points of the cube.
    pub fn ground_truth(&mut self) -> Plane<f64> {
        loop {
            let [a, b, c] = [(); 3].map(|_| self.random_point());
            if let Some(plane) = Plane::from_points(&a, &b, &c) {
                return plane;
            }
        }
    }

    pub fn generate(&mut self) -> Result<SyntheticCloud, GenerateError> {
        self.config.validate()?;
        let plane = self.ground_truth();
        self.generate_on(plane)
    }

    /// Generates points around a given plane.
    pub fn generate_on(&mut self, plane: Plane<f64>) -> Result<SyntheticCloud, GenerateError> {
        self.config.validate()?;
        let GeneratorConfig {
            extent,
            count,
            threshold,
            ..
        } = self.config;

        let bounds = Bounds::of(&plane, extent).ok_or_else(|| {
            let c = &plane.coeffs;
            GenerateError::OutOfDomain([c.x, c.y, c.z, c.w])
        })?;
        let inliers = self.config.inliers();
        let normal = plane.normal();

        let storage = { 0..count }
            .map(|index| {
                let distance = if index < inliers {
                    self.rng.gen::<f64>() * threshold
                } else {
                    threshold + self.rng.gen::<f64>() * 2. * threshold
                };
                let distance = if self.rng.gen_bool(0.5) {
                    distance
                } else {
                    -distance
                };

                let base = bounds.sample(&plane, extent, &mut self.rng).push(1.);
                Point3::default().with_coords(displace(&base, &normal, distance))
            })
            .collect::<Vec<_>>();

        debug!(
            "Generated {} points ({} inliers) around {:?}",
            count, inliers, plane.coeffs
        );
        Ok(SyntheticCloud {
            plane,
            threshold,
            points: PointCloud::from_vec(storage),
            inliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::vector;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_random_config() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let config = GeneratorConfig::random(&mut rng);
            assert_eq!(config.count, 25000);
            assert!((0.01..=0.5).contains(&config.threshold));
            assert!((0.5..=1.).contains(&config.inlier_ratio));
        }
    }

    #[test]
    fn test_inliers() {
        let config = GeneratorConfig {
            count: 10,
            inlier_ratio: 0.75,
            ..Default::default()
        };
        assert_eq!(config.inliers(), 8);
        let config = GeneratorConfig {
            inlier_ratio: 1.,
            ..config
        };
        assert_eq!(config.inliers(), 10);
    }

    #[test]
    fn test_generate() {
        let config = GeneratorConfig {
            count: 2000,
            threshold: 0.2,
            inlier_ratio: 0.7,
            ..Default::default()
        };
        let mut generator = Generator::new(config, StdRng::seed_from_u64(21));
        let cloud = generator.generate().unwrap();

        assert_eq!(cloud.points.len(), 2000);
        assert_eq!(cloud.inliers, 1400);
        assert!((cloud.inlier_ratio() - 0.7).abs() < 1e-12);
        assert!(cloud.points.is_bounded());
        assert!((cloud.plane.normal().norm() - 1.).abs() < 1e-9);

        for (index, point) in cloud.points.iter().enumerate() {
            let distance = cloud.plane.distance(point.coords());
            if index < cloud.inliers {
                assert!(distance < 0.2 + 1e-9);
            } else {
                assert!(distance > 0.2 - 1e-9 && distance < 0.6 + 1e-9);
            }
            assert!(point.xyz().amax() < 100. + 0.6 + 1e-9);
        }

        let qualified = cloud.plane.qualify(&cloud.points, 0.2 + 1e-9);
        assert!(qualified.support() >= cloud.inliers);
    }

    #[test]
    fn test_generate_on_degenerate_normal() {
        let config = GeneratorConfig {
            count: 100,
            ..Default::default()
        };
        let mut generator = Generator::new(config, StdRng::seed_from_u64(2));

        let plane = Plane::new(vector![0., 0., 1., -10.]);
        let cloud = generator.generate_on(plane).unwrap();
        assert!(cloud
            .points
            .iter()
            .all(|point| (point.z() - 10.).abs() < 3. * config.threshold + 1e-9));

        let plane = Plane::new(vector![1., 0., 0., -500.]);
        assert_eq!(
            generator.generate_on(plane),
            Err(GenerateError::OutOfDomain([1., 0., 0., -500.]))
        );
    }

    #[test]
    fn test_invalid_config() {
        let config = GeneratorConfig {
            inlier_ratio: 1.5,
            ..Default::default()
        };
        let mut generator = Generator::new(config, StdRng::seed_from_u64(0));
        assert!(matches!(
            generator.generate(),
            Err(GenerateError::InvalidConfig(_))
        ));
    }
}
