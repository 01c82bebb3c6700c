//! Ties a [`PointSource`] and a [`ResultSink`] to one plane fit.

use std::error::Error;

use log::info;
use plane_sac::{Plane, PlaneEstimator, Ransac, RunConfig, RunResult};
use plane_synth::{Evaluation, Generator};
use rand::Rng;

use crate::{
    frame::Frame,
    source::{PointSource, ResultSink},
};

/// Loads a frame from `source`, fits a plane to it and reports both to
/// `sink`.
pub fn fit<S, K, R>(
    source: &mut S,
    sink: &mut K,
    config: RunConfig,
    rng: R,
) -> Result<RunResult<Plane<f64>>, Box<dyn Error>>
where
    S: PointSource + ?Sized,
    K: ResultSink + ?Sized,
    R: Rng,
{
    let frame = source.load()?;
    fit_frame(&frame, sink, config, rng)
}

/// Generates a cloud, fits a plane to it and scores the fit against the
/// generated truth.
pub fn fit_synthetic<G, K, R>(
    generator: &mut Generator<G>,
    sink: &mut K,
    config: RunConfig,
    rng: R,
) -> Result<(RunResult<Plane<f64>>, Evaluation), Box<dyn Error>>
where
    G: Rng,
    K: ResultSink + ?Sized,
    R: Rng,
{
    let cloud = generator.generate()?;
    sink.truth(&cloud)?;

    let frame = Frame {
        threshold: cloud.threshold,
        points: cloud.points.clone(),
    };
    let result = fit_frame(&frame, sink, config, rng)?;

    let evaluation = Evaluation::new(&cloud, &result);
    info!(
        "Recovered {} of {} inliers, normal off by {:.4} degrees",
        evaluation.support,
        evaluation.expected,
        evaluation.angle.to_degrees()
    );
    sink.evaluation(&evaluation)?;
    Ok((result, evaluation))
}

fn fit_frame<K, R>(
    frame: &Frame,
    sink: &mut K,
    config: RunConfig,
    rng: R,
) -> Result<RunResult<Plane<f64>>, Box<dyn Error>>
where
    K: ResultSink + ?Sized,
    R: Rng,
{
    sink.input(frame)?;
    info!(
        "Fitting a plane to {} points with threshold {}",
        frame.points.len(),
        frame.threshold
    );

    let mut ransac = Ransac::new(frame.threshold, rng).with_config(config);
    let result = ransac.run(&PlaneEstimator, &frame.points)?;
    info!(
        "Best plane {:?} with support {} after {} trials",
        result.model.coeffs, result.support, result.trials
    );

    sink.output(&result)?;
    Ok(result)
}
