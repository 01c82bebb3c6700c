mod ransac;

use nalgebra::{Scalar, Vector4};
use plane_common::{point::Point, point_cloud::PointCloud};
use rand::Rng;
use sample_consensus::{Consensus, Estimator, Model};

pub use self::ransac::{Ransac, RunConfig, RunResult, Score};
use crate::error::Result;

/// The data items that lie within a threshold of a model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Qualified {
    /// Indices into the qualified data, in their original order.
    pub indices: Vec<usize>,
    /// The residual of each qualifying item, parallel to `indices`.
    pub distances: Vec<f64>,
}

impl Qualified {
    /// The support of the model, i.e. its inlier count.
    #[inline]
    pub fn support(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn points<'a, P>(&'a self, data: &'a [P]) -> impl Iterator<Item = &'a P> + 'a {
        self.indices.iter().map(|&index| &data[index])
    }
}

/// Collects every item of `data` whose residual against `model` is at most
/// `threshold`.
pub fn qualify<D, M, X, F>(model: &M, data: &[X], coords: F, threshold: f64) -> Qualified
where
    M: Model<D>,
    F: Fn(&X) -> &D,
{
    let mut qualified = Qualified::default();
    for (index, item) in data.iter().enumerate() {
        let distance = model.residual(coords(item));
        if distance <= threshold {
            qualified.indices.push(index);
            qualified.distances.push(distance);
        }
    }
    qualified
}

pub struct PcSac<'a, P, C> {
    point_cloud: &'a PointCloud<P>,
    inner: C,
}

impl<'a, P, C> PcSac<'a, P, C> {
    pub fn new(point_cloud: &'a PointCloud<P>, inner: C) -> Self {
        PcSac { point_cloud, inner }
    }

    #[inline]
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<'a, T: Scalar, P: Point<Data = T>, C> PcSac<'a, P, C> {
    pub fn compute<E: Estimator<Vector4<T>>>(
        &mut self,
        estimator: &E,
    ) -> Option<(E::Model, C::Inliers)>
    where
        C: Consensus<E, Vector4<T>>,
    {
        self.inner.model_inliers(
            estimator,
            self.point_cloud.iter().map(|point| point.coords().clone()),
        )
    }
}

impl<'a, T: Scalar, P: Point<Data = T>, R: Rng> PcSac<'a, P, Ransac<R>> {
    /// Runs the driver directly over the borrowed cloud, keeping the full
    /// [`RunResult`] and reporting failures as errors.
    pub fn run<E: Estimator<Vector4<T>>>(&mut self, estimator: &E) -> Result<RunResult<E::Model>> {
        self.inner.run(estimator, self.point_cloud)
    }
}
