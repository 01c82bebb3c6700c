/// Arithmetic mean, or `None` for an empty set.
pub fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (Bessel-corrected).
///
/// Fewer than two values have no sample dispersion; they yield `+inf` so that
/// such a set always compares as the loosest possible fit.
pub fn standard_deviation(values: &[f64]) -> f64 {
    match mean(values) {
        Some(mean) if values.len() > 1 => {
            let sum = { values.iter() }.fold(0., |acc, value| acc + (value - mean).powi(2));
            (sum / (values.len() - 1) as f64).sqrt()
        }
        _ => f64::INFINITY,
    }
}
