use nalgebra::{RealField, Scalar, Vector3, Vector4};
use num::ToPrimitive;
use plane_common::{point::Point, vector::edge};
use sample_consensus::{Estimator, Model};

use crate::base::{qualify, Qualified};

/// The plane `a·x + b·y + c·z + d = 0`, with `coeffs = [a, b, c, d]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane<T: Scalar> {
    pub coeffs: Vector4<T>,
}

impl<T: RealField> Plane<T> {
    /// Wraps raw coefficients without normalizing them.
    #[inline]
    pub fn new(coeffs: Vector4<T>) -> Self {
        Plane { coeffs }
    }

    /// Builds the plane through three points.
    ///
    /// The coefficients are scaled so that `(a, b, c)` has unit length and
    /// `d <= 0`. A plane through the origin (`d == 0`) keeps the normal
    /// `-(p2 - p1) × (p3 - p1)`. Returns `None` if the points are collinear
    /// or coincident.
    pub fn from_points(p1: &Vector4<T>, p2: &Vector4<T>, p3: &Vector4<T>) -> Option<Self> {
        let v1 = edge(p1, p2);
        let v2 = edge(p1, p3);
        let normal = v1.cross(&v2);

        let magnitude = normal.norm();
        let tolerance = T::default_epsilon() * v1.norm() * v2.norm();
        if !(magnitude > tolerance) || !magnitude.is_finite() {
            return None;
        }

        let d = -normal.dot(&p1.xyz());
        let sign = if d < T::zero() { T::one() } else { -T::one() };
        Some(Plane {
            coeffs: normal.push(d) * (sign / magnitude),
        })
    }

    #[inline]
    pub fn normal(&self) -> Vector3<T> {
        self.coeffs.xyz()
    }

    #[inline]
    pub fn offset(&self) -> T {
        self.coeffs.w.clone()
    }

    /// The left-hand side `a·x + b·y + c·z + d` at `point`.
    #[inline]
    pub fn evaluate(&self, point: &Vector4<T>) -> T {
        self.normal().dot(&point.xyz()) + self.offset()
    }

    /// Perpendicular distance, valid for non-normalized coefficients too.
    pub fn distance(&self, point: &Vector4<T>) -> T {
        self.evaluate(point).abs() / self.normal().norm()
    }
}

impl<T: RealField + ToPrimitive> Plane<T> {
    /// Points of `points` within `threshold` of the plane, boundary
    /// included.
    pub fn qualify<P: Point<Data = T>>(&self, points: &[P], threshold: f64) -> Qualified {
        qualify(self, points, P::coords, threshold)
    }
}

impl<T: RealField + ToPrimitive> Model<Vector4<T>> for Plane<T> {
    fn residual(&self, data: &Vector4<T>) -> f64 {
        self.distance(data).to_f64().unwrap_or(f64::NAN)
    }
}

pub struct PlaneEstimator;

impl<T: RealField + ToPrimitive> Estimator<Vector4<T>> for PlaneEstimator {
    type Model = Plane<T>;

    type ModelIter = Option<Plane<T>>;

    const MIN_SAMPLES: usize = 3;

    fn estimate<I>(&self, mut data: I) -> Self::ModelIter
    where
        I: Iterator<Item = Vector4<T>> + Clone,
    {
        match (data.next(), data.next(), data.next()) {
            (Some(a), Some(b), Some(c)) => Plane::from_points(&a, &b, &c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::vector;
    use plane_common::point::Point3;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn random_point(rng: &mut StdRng) -> Vector4<f64> {
        vector![
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
            1.
        ]
    }

    #[test]
    fn test_normalized() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let [a, b, c] = [(); 3].map(|_| random_point(&mut rng));
            let plane = Plane::from_points(&a, &b, &c).unwrap();

            assert!((plane.normal().norm() - 1.).abs() < 1e-9);
            assert!(plane.offset() <= 0.);
            for point in [a, b, c] {
                assert!(plane.evaluate(&point).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_orientation() {
        let a = vector![0., 0., 1., 1.];
        let b = vector![1., 0., 1., 1.];
        let c = vector![0., 1., 1., 1.];

        let forward = Plane::from_points(&a, &b, &c).unwrap();
        let backward = Plane::from_points(&a, &c, &b).unwrap();
        assert_eq!(forward.coeffs, vector![0., 0., 1., -1.]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_through_origin() {
        let a = vector![1., 0., 0., 1.];
        let b = vector![0., 1., 0., 1.];
        let o = vector![0., 0., 0., 1.];

        // With `d == 0` the orientation follows the point order.
        let plane = Plane::from_points(&a, &b, &o).unwrap();
        assert_eq!(plane.coeffs, vector![0., 0., -1., 0.]);
        let plane = Plane::from_points(&b, &a, &o).unwrap();
        assert_eq!(plane.coeffs, vector![0., 0., 1., 0.]);
    }

    #[test]
    fn test_degenerate() {
        let a = vector![1., 1., 1., 1.];
        let b = vector![2., 2., 2., 1.];
        let c = vector![-3., -3., -3., 1.];
        assert_eq!(Plane::from_points(&a, &b, &c), None);
        assert_eq!(Plane::from_points(&a, &a, &b), None);
        assert_eq!(Plane::from_points(&a, &a, &a), None);

        let estimate = PlaneEstimator.estimate([a, b].into_iter());
        assert_eq!(estimate, None);
    }

    #[test]
    fn test_distance() {
        let plane = Plane::new(vector![0., 0., 2., -2.]);
        assert_eq!(plane.distance(&vector![5., -3., 1.5, 1.]), 0.5);
        assert_eq!(plane.residual(&vector![0., 0., -1., 1.]), 2.);
    }

    #[test]
    fn test_qualify_boundary() {
        let plane = Plane::new(vector![0., 0., 1., -1.]);
        let points = [Point3::new(3., 4., 1.5), Point3::new(0., 0., 1.)];

        let qualified = plane.qualify(&points, 0.5);
        assert_eq!(qualified.indices, vec![0, 1]);
        assert_eq!(qualified.distances, vec![0.5, 0.]);

        let qualified = plane.qualify(&points, 0.4999);
        assert_eq!(qualified.indices, vec![1]);
        assert_eq!(
            qualified.points(&points).collect::<Vec<_>>(),
            vec![&points[1]]
        );
    }

    #[test]
    fn test_support_monotonic() {
        let mut rng = StdRng::seed_from_u64(42);
        let points = { 0..500 }
            .map(|_| Point3(random_point(&mut rng)))
            .collect::<Vec<_>>();
        let plane = Plane::from_points(&points[0].0, &points[1].0, &points[2].0).unwrap();

        let mut last = 0;
        for step in 0..=40 {
            let support = plane.qualify(&points, step as f64 * 10.).support();
            assert!(support >= last);
            last = support;
        }
        assert_eq!(last, points.len());
    }
}
