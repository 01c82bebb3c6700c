//! Thin vector semantics over homogeneous point coordinates.
//!
//! Addition, scaling, magnitude and the cross product come straight from
//! `nalgebra`; the helpers here cover the conversions between points and
//! directions that the estimators and the generator share.

use nalgebra::{RealField, Vector3, Vector4};

/// The direction vector pointing from `from` to `to`.
#[inline]
pub fn edge<T: RealField>(from: &Vector4<T>, to: &Vector4<T>) -> Vector3<T> {
    (to - from).xyz()
}

/// Unit-length copy of `v`, or `None` for a zero (or non-finite) vector.
#[inline]
pub fn unit<T: RealField>(v: &Vector3<T>) -> Option<Vector3<T>> {
    v.try_normalize(T::zero())
        .filter(|u| u.iter().all(|x| x.is_finite()))
}

/// Moves `point` by `distance` along the unit direction of `direction`.
///
/// A zero direction leaves the point untouched.
pub fn displace<T: RealField>(
    point: &Vector4<T>,
    direction: &Vector3<T>,
    distance: T,
) -> Vector4<T> {
    match unit(direction) {
        Some(direction) => point + (direction * distance).push(T::zero()),
        None => point.clone(),
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::vector;

    use super::*;

    #[test]
    fn test_edge() {
        let a = vector![1., 2., 3., 1.];
        let b = vector![2., 0., 3., 1.];
        assert_eq!(edge(&a, &b), vector![1., -2., 0.]);
    }

    #[test]
    fn test_unit() {
        let u = unit::<f64>(&vector![3., 0., 4.]).unwrap();
        assert!((u.norm() - 1.).abs() < 1e-12);
        assert_eq!(u, vector![0.6, 0., 0.8]);
        assert!(unit(&Vector3::<f64>::zeros()).is_none());
    }

    #[test]
    fn test_displace() {
        let point = vector![1., 1., 1., 1.];
        let moved = displace(&point, &vector![0., 0., 10.], -2.5);
        assert_eq!(moved, vector![1., 1., -1.5, 1.]);
        assert_eq!(displace(&point, &Vector3::zeros(), 5.), point);
    }
}
