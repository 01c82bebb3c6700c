use std::ops::{Deref, Index};

use crate::point::Point;

/// An unorganized, ordered set of points.
///
/// The storage is never mutated in place once built; consumers borrow the
/// cloud and address points by index.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud<P> {
    storage: Vec<P>,
    bounded: bool,
}

impl<P> PointCloud<P> {
    #[inline]
    pub fn new() -> Self {
        PointCloud {
            storage: Vec::new(),
            bounded: true,
        }
    }

    /// Whether every point of the cloud has finite coordinates.
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    #[inline]
    pub fn into_vec(self) -> Vec<P> {
        self.storage
    }

    #[inline]
    pub fn select<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a P> + 'a {
        indices.iter().map(|&index| &self.storage[index])
    }
}

impl<P: Point> PointCloud<P> {
    pub fn from_vec(storage: Vec<P>) -> Self {
        let bounded = storage.iter().all(|p| p.is_finite());
        PointCloud { storage, bounded }
    }

    pub fn try_create_sub(&self, indices: &[usize]) -> Option<Self> {
        indices
            .iter()
            .map(|&index| self.storage.get(index).cloned())
            .collect::<Option<Vec<_>>>()
            .map(PointCloud::from_vec)
    }
}

impl<P> Default for PointCloud<P> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Deref for PointCloud<P> {
    type Target = [P];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.storage
    }
}

impl<P> Index<usize> for PointCloud<P> {
    type Output = P;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.storage[index]
    }
}

impl<P: Point> FromIterator<P> for PointCloud<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        PointCloud::from_vec(iter.into_iter().collect())
    }
}
