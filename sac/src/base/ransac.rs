use log::{debug, trace, warn};
use nalgebra::{Scalar, Vector4};
use plane_common::point::Point;
use rand::{rngs::ThreadRng, seq::index, Rng};
use sample_consensus::{Consensus, Estimator};

use super::{qualify, Qualified};
use crate::{
    error::{Result, SacError},
    stats::standard_deviation,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    /// Target probability that at least one trial samples only inliers.
    pub confidence: f64,
    /// Assumed inlier fraction, used only to size the trial budget.
    pub inlier_rate: f64,
    /// How many times a trial redraws a degenerate sample before giving up.
    pub max_resamples: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            confidence: 0.999,
            inlier_rate: 0.5,
            max_resamples: 100,
        }
    }
}

impl RunConfig {
    /// The trial budget `round(ln(1 - confidence) / ln(1 - inlier_rate^n))`
    /// for samples of `min_samples` items, rounding halves away from zero.
    ///
    /// A run performs one trial more than this budget.
    pub fn trials(&self, min_samples: usize) -> Result<usize> {
        if !(self.confidence > 0. && self.confidence < 1.) {
            return Err(SacError::InvalidConfig(format!(
                "confidence must lie in (0, 1), got {}",
                self.confidence
            )));
        }
        if !(self.inlier_rate > 0. && self.inlier_rate <= 1.) {
            return Err(SacError::InvalidConfig(format!(
                "inlier rate must lie in (0, 1], got {}",
                self.inlier_rate
            )));
        }

        let exponent = i32::try_from(min_samples)
            .map_err(|_| SacError::InvalidConfig(format!("sample size {}", min_samples)))?;
        let trials =
            ((1. - self.confidence).ln() / (1. - self.inlier_rate.powi(exponent)).ln()).round();
        if !trials.is_finite() {
            return Err(SacError::InvalidConfig(format!(
                "inlier rate {} gives an unbounded trial budget",
                self.inlier_rate
            )));
        }
        Ok(trials as usize)
    }
}

/// The ranking of a candidate model: more support first, then a tighter
/// dispersion of the inlier distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub support: usize,
    pub deviation: f64,
}

impl Score {
    pub fn of(qualified: &Qualified) -> Self {
        Score {
            support: qualified.support(),
            deviation: standard_deviation(&qualified.distances),
        }
    }

    /// Whether `self` strictly outranks `other`. Ties never win.
    #[inline]
    pub fn beats(&self, other: &Score) -> bool {
        self.support > other.support
            || (self.support == other.support && self.deviation < other.deviation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunResult<M> {
    pub model: M,
    pub support: usize,
    /// Sample standard deviation of the inlier distances; `+inf` when the
    /// support is at most 1.
    pub deviation: f64,
    pub inliers: Vec<usize>,
    /// Number of trials performed.
    pub trials: usize,
    /// Trials that found no valid sample within their redraws and so
    /// produced no candidate.
    pub exhausted: usize,
}

impl<M> RunResult<M> {
    #[inline]
    pub fn score(&self) -> Score {
        Score {
            support: self.support,
            deviation: self.deviation,
        }
    }
}

/// A sequential RANSAC driver with a fixed, precomputed trial budget.
pub struct Ransac<R: Rng = ThreadRng> {
    pub config: RunConfig,
    pub threshold: f64,
    pub rng: R,
}

impl<R: Rng> Ransac<R> {
    pub fn new(threshold: f64, rng: R) -> Ransac<R> {
        Ransac {
            config: RunConfig::default(),
            threshold,
            rng,
        }
    }

    #[inline]
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn run<T, E, P>(&mut self, estimator: &E, points: &[P]) -> Result<RunResult<E::Model>>
    where
        T: Scalar,
        E: Estimator<Vector4<T>>,
        P: Point<Data = T>,
    {
        self.run_by(estimator, points, P::coords)
    }

    fn run_by<T, E, X, F>(
        &mut self,
        estimator: &E,
        data: &[X],
        coords: F,
    ) -> Result<RunResult<E::Model>>
    where
        T: Scalar,
        E: Estimator<Vector4<T>>,
        F: Fn(&X) -> &Vector4<T>,
    {
        if !(self.threshold >= 0. && self.threshold.is_finite()) {
            return Err(SacError::InvalidConfig(format!(
                "threshold must be finite and non-negative, got {}",
                self.threshold
            )));
        }
        let budget = self.config.trials(E::MIN_SAMPLES)?;
        if data.len() < E::MIN_SAMPLES {
            return Err(SacError::DegenerateInput { points: data.len() });
        }
        debug!(
            "RANSAC over {} points: {} trials, threshold {}",
            data.len(),
            budget + 1,
            self.threshold
        );

        let mut best: Option<(E::Model, Qualified, Score)> = None;
        let mut exhausted = 0;
        for trial in 0..=budget {
            let model = match self.draw(estimator, data, &coords) {
                Some(model) => model,
                None => {
                    warn!(
                        "Trial {} found no valid sample in {} draws",
                        trial,
                        self.config.max_resamples + 1
                    );
                    exhausted += 1;
                    continue;
                }
            };

            let qualified = qualify(&model, data, &coords, self.threshold);
            let score = Score::of(&qualified);
            let adopt = match &best {
                Some((_, _, best)) => score.beats(best),
                None => true,
            };
            if adopt {
                trace!(
                    "Trial {}: adopted support {}, deviation {}",
                    trial,
                    score.support,
                    score.deviation
                );
                best = Some((model, qualified, score));
            }
        }

        let (model, qualified, score) = best.ok_or(SacError::DegenerateInput {
            points: data.len(),
        })?;
        debug!(
            "RANSAC finished: support {}, deviation {}",
            score.support, score.deviation
        );
        Ok(RunResult {
            model,
            support: score.support,
            deviation: score.deviation,
            inliers: qualified.indices,
            trials: budget + 1,
            exhausted,
        })
    }

    /// Draws distinct samples until the estimator yields a model.
    fn draw<T, E, X, F>(&mut self, estimator: &E, data: &[X], coords: &F) -> Option<E::Model>
    where
        T: Scalar,
        E: Estimator<Vector4<T>>,
        F: Fn(&X) -> &Vector4<T>,
    {
        for _ in 0..=self.config.max_resamples {
            let sample = index::sample(&mut self.rng, data.len(), E::MIN_SAMPLES).into_vec();
            let model = estimator
                .estimate(sample.iter().map(|&index| coords(&data[index]).clone()))
                .into_iter()
                .next();
            if model.is_some() {
                return model;
            }
        }
        None
    }
}

impl<T, E, R> Consensus<E, Vector4<T>> for Ransac<R>
where
    T: Scalar,
    E: Estimator<Vector4<T>>,
    R: Rng,
{
    type Inliers = Vec<usize>;

    fn model<I>(&mut self, estimator: &E, data: I) -> Option<E::Model>
    where
        I: Iterator<Item = Vector4<T>> + Clone,
    {
        <Self as Consensus<E, Vector4<T>>>::model_inliers(self, estimator, data)
            .map(|(model, _)| model)
    }

    fn model_inliers<I>(&mut self, estimator: &E, data: I) -> Option<(E::Model, Self::Inliers)>
    where
        I: Iterator<Item = Vector4<T>> + Clone,
    {
        let data = data.collect::<Vec<_>>();
        match self.run_by(estimator, &data, |coords| coords) {
            Ok(result) => Some((result.model, result.inliers)),
            Err(err) => {
                debug!("No consensus: {}", err);
                None
            }
        }
    }
}
