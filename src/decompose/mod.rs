//! Additive seasonal decomposition of an ordered series.
//!
//! Splits an observed series into `trend + seasonal + residual` with a fixed
//! period, following the classical two-sided convention:
//!
//! - **trend**: centered moving average. For an even period the window is
//!   `period + 1` wide with half weights on both end taps, so the average
//!   stays centered on the observation.
//! - **seasonal**: per-cycle-position mean of the detrended values, de-meaned
//!   across the period, then tiled cyclically over the full series length.
//! - **residual**: observed − trend − seasonal wherever the trend exists.
//!
//! The trend (and therefore the residual) is undefined within half a period
//! of either end of the series; those positions are excluded from the
//! component vectors and `offset` records where the support begins.
//!
//! Preconditions: the series must be chronologically ordered with no missing
//! periods. Gaps are NOT detected here; the caller owns that limitation.

use crate::error::AppError;

/// Decomposition components over a shared monthly index.
///
/// `trend` and `residual` cover `[offset, offset + trend.len())` of the input
/// index; `seasonal` covers the full input length.
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub period: usize,
    /// Index of the first position with a defined trend (= period / 2).
    pub offset: usize,
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
}

impl Decomposition {
    /// Peak-to-trough span of one seasonal cycle.
    pub fn seasonal_amplitude(&self) -> f64 {
        let cycle = &self.seasonal[..self.period.min(self.seasonal.len())];
        let max = cycle.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = cycle.iter().copied().fold(f64::INFINITY, f64::min);
        max - min
    }
}

/// Decompose `values` into trend/seasonal/residual with the given period.
///
/// Fails fast with `InsufficientHistory` when fewer than two full cycles are
/// available; the seasonal means are undefined below that.
pub fn seasonal_decompose(values: &[f64], period: usize) -> Result<Decomposition, AppError> {
    if period < 2 {
        return Err(AppError::insufficient_history(format!(
            "Decomposition period must be >= 2 (got {period})."
        )));
    }
    let n = values.len();
    if n < 2 * period {
        return Err(AppError::insufficient_history(format!(
            "Seasonal decomposition needs at least {} observations (2 x period), got {n}.",
            2 * period
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(AppError::internal(
            "Non-finite value in series handed to decomposition.",
        ));
    }

    let offset = period / 2;
    let trend = centered_moving_average(values, period);

    // Seasonal means are computed from the detrended values over the trend
    // support, then centered so the seasonal component sums to ~zero over one
    // cycle (the additive-model normalization).
    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, t) in trend.iter().enumerate() {
        let idx = offset + i;
        sums[idx % period] += values[idx] - t;
        counts[idx % period] += 1;
    }

    let mut means: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(s, c)| if *c > 0 { s / *c as f64 } else { 0.0 })
        .collect();
    let grand_mean = means.iter().sum::<f64>() / period as f64;
    for m in &mut means {
        *m -= grand_mean;
    }

    let seasonal: Vec<f64> = (0..n).map(|i| means[i % period]).collect();

    let residual: Vec<f64> = trend
        .iter()
        .enumerate()
        .map(|(i, t)| values[offset + i] - t - seasonal[offset + i])
        .collect();

    Ok(Decomposition {
        period,
        offset,
        trend,
        seasonal,
        residual,
    })
}

/// Centered moving average of `values` with the decomposition convention.
///
/// Returns `n - period` values for an even period (half-weighted end taps)
/// and `n - period + 1` for an odd period.
fn centered_moving_average(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let half = period / 2;

    if period % 2 == 0 {
        // Window of period + 1 taps: half weight at both ends keeps the
        // average centered on position t for an even period.
        (half..n - half)
            .map(|t| {
                let mut acc = 0.5 * values[t - half] + 0.5 * values[t + half];
                for v in &values[t - half + 1..t + half] {
                    acc += v;
                }
                acc / period as f64
            })
            .collect()
    } else {
        (half..n - half)
            .map(|t| values[t - half..=t + half].iter().sum::<f64>() / period as f64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const PERIOD: usize = 12;

    /// 36 months of `base + slope*t + A*sin(2*pi*t/12)`, no noise.
    fn synthetic_series(months: usize, base: f64, slope: f64, amplitude: f64) -> Vec<f64> {
        (0..months)
            .map(|t| {
                let phase = 2.0 * std::f64::consts::PI * (t % PERIOD) as f64 / PERIOD as f64;
                base + slope * t as f64 + amplitude * phase.sin()
            })
            .collect()
    }

    #[test]
    fn component_lengths_match_convention() {
        let values = synthetic_series(36, 1000.0, 10.0, 50.0);
        let d = seasonal_decompose(&values, PERIOD).unwrap();

        // Even period: 6 positions dropped at each end of trend/residual.
        assert_eq!(d.offset, 6);
        assert_eq!(d.trend.len(), 36 - PERIOD);
        assert_eq!(d.residual.len(), 36 - PERIOD);
        // Seasonal is cyclic and filled for every position.
        assert_eq!(d.seasonal.len(), 36);
    }

    #[test]
    fn round_trip_reconstructs_series_over_support() {
        let values = synthetic_series(40, 500.0, 3.0, 25.0);
        let d = seasonal_decompose(&values, PERIOD).unwrap();

        for (i, t) in d.trend.iter().enumerate() {
            let idx = d.offset + i;
            let rebuilt = t + d.seasonal[idx] + d.residual[i];
            assert!(
                (rebuilt - values[idx]).abs() < 1e-9,
                "index {idx}: {rebuilt} != {}",
                values[idx]
            );
        }
    }

    #[test]
    fn fails_fast_below_two_cycles() {
        let values = synthetic_series(23, 100.0, 1.0, 5.0);
        let err = seasonal_decompose(&values, PERIOD).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientHistory);

        let ok = synthetic_series(24, 100.0, 1.0, 5.0);
        assert!(seasonal_decompose(&ok, PERIOD).is_ok());
    }

    #[test]
    fn recovers_linear_trend_exactly() {
        // A centered moving average of a pure linear ramp is the ramp itself,
        // and a mean-zero sinusoid averages out over a full cycle.
        let (base, slope) = (1000.0, 10.0);
        let values = synthetic_series(36, base, slope, 50.0);
        let d = seasonal_decompose(&values, PERIOD).unwrap();

        for (i, t) in d.trend.iter().enumerate() {
            let idx = (d.offset + i) as f64;
            assert!((t - (base + slope * idx)).abs() < 1e-6, "trend at {i}: {t}");
        }

        // Recovered slope between consecutive trend points.
        for pair in d.trend.windows(2) {
            assert!((pair[1] - pair[0] - slope).abs() < 1e-6);
        }
    }

    #[test]
    fn recovers_seasonal_amplitude_on_synthetic_series() {
        let amplitude = 80.0;
        let values = synthetic_series(36, 2000.0, 5.0, amplitude);
        let d = seasonal_decompose(&values, PERIOD).unwrap();

        // The injected sinusoid peaks at +A and troughs at -A, but the sampled
        // extremes of sin at 12 points are +/- 1.0 (t=3 and t=9), so the
        // peak-to-trough span is exactly 2A.
        assert!((d.seasonal_amplitude() - 2.0 * amplitude).abs() < 1e-6);

        // Seasonal pattern matches the injected one position by position.
        for t in 0..PERIOD {
            let phase = 2.0 * std::f64::consts::PI * t as f64 / PERIOD as f64;
            assert!((d.seasonal[t] - amplitude * phase.sin()).abs() < 1e-6);
        }

        // Residuals are numerically zero for a noiseless series.
        for r in &d.residual {
            assert!(r.abs() < 1e-6);
        }
    }

    #[test]
    fn seasonal_component_sums_to_zero_over_cycle() {
        let values = synthetic_series(36, 300.0, 2.0, 40.0);
        let d = seasonal_decompose(&values, PERIOD).unwrap();
        let cycle_sum: f64 = d.seasonal[..PERIOD].iter().sum();
        assert!(cycle_sum.abs() < 1e-9);
    }

    #[test]
    fn degenerate_period_is_insufficient_history() {
        let values = synthetic_series(36, 100.0, 1.0, 5.0);
        for period in [0, 1] {
            let err = seasonal_decompose(&values, period).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InsufficientHistory);
            assert_eq!(err.exit_code(), 3);
        }
    }

    #[test]
    fn rejects_non_finite_values() {
        let mut values = synthetic_series(30, 100.0, 1.0, 5.0);
        values[10] = f64::NAN;
        let err = seasonal_decompose(&values, PERIOD).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
