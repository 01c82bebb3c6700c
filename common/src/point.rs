use core::fmt::Debug;

use nalgebra::{ComplexField, Scalar, Vector3, Vector4};

/// A point stored in homogeneous coordinates, with `w == 1`.
pub trait Point: Debug + Clone + PartialEq + Default {
    type Data: Scalar;

    fn coords(&self) -> &Vector4<Self::Data>;

    fn coords_mut(&mut self) -> &mut Vector4<Self::Data>;
    #[inline]
    fn with_coords(mut self, coords: Vector4<Self::Data>) -> Self {
        *self.coords_mut() = coords;
        self
    }

    #[inline]
    fn na_point(&self) -> Option<nalgebra::Point3<Self::Data>>
    where
        Self::Data: ComplexField,
    {
        nalgebra::Point3::from_homogeneous(self.coords().clone())
    }

    fn is_finite(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3(pub Vector4<f64>);

impl Point3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3(Vector4::new(x, y, z, 1.))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn xyz(&self) -> Vector3<f64> {
        self.0.xyz()
    }
}

impl Default for Point3 {
    #[inline]
    fn default() -> Self {
        Point3::new(0., 0., 0.)
    }
}

impl From<Vector3<f64>> for Point3 {
    #[inline]
    fn from(v: Vector3<f64>) -> Self {
        Point3::new(v.x, v.y, v.z)
    }
}

impl From<[f64; 3]> for Point3 {
    #[inline]
    fn from([x, y, z]: [f64; 3]) -> Self {
        Point3::new(x, y, z)
    }
}

impl Point for Point3 {
    type Data = f64;

    #[inline]
    fn coords(&self) -> &Vector4<f64> {
        &self.0
    }

    #[inline]
    fn coords_mut(&mut self) -> &mut Vector4<f64> {
        &mut self.0
    }

    #[inline]
    fn is_finite(&self) -> bool {
        self.0.xyz().iter().all(|x| x.is_finite())
    }
}
