mod base;
mod error;
mod plane;
mod stats;

pub use self::{
    base::{qualify, PcSac, Qualified, Ransac, RunConfig, RunResult, Score},
    error::{Result, SacError},
    plane::{Plane, PlaneEstimator},
    stats::{mean, standard_deviation},
};
