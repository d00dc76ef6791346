// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! 24-hour barometric trend.
//!
//! The change in pressure over the last day is estimated in up to three
//! ways, in order of preference:
//!
//! 1. **Regression**: least-squares slope over the day's samples,
//!    scaled to 24 h. Needs at least [`MIN_REGRESSION_SAMPLES`].
//! 2. **Median**: when the fit is weak (R² below [`MIN_R_SQUARED`]) or
//!    the estimate implausible (beyond ±[`MAX_PLAUSIBLE_DELTA`] hPa), the
//!    median of the last hour minus the median of a ±45 min window
//!    centred 24 h ago.
//! 3. **Reference**: current pressure minus the newest reading at or
//!    before 24 h ago.
//!
//! A change above +1 hPa reads as [`Outlook::Clear`], below -1 hPa as
//! [`Outlook::PossibleRain`], anything in between as [`Outlook::Stable`].

const DAY_SECS: i64 = 24 * 3600;
const HOUR_SECS: i64 = 3600;
const OLD_WINDOW_HALF_SECS: i64 = 45 * 60;

/// Minimum samples for the regression estimate.
pub const MIN_REGRESSION_SAMPLES: usize = 6;
/// Fits with a lower R² fall back to the median estimate.
pub const MIN_R_SQUARED: f64 = 0.15;
/// Regression deltas beyond this (hPa / 24 h) fall back to the median estimate.
pub const MAX_PLAUSIBLE_DELTA: f64 = 15.0;
/// Threshold (hPa / 24 h) separating a stable outlook from a trend.
pub const OUTLOOK_THRESHOLD: f64 = 1.0;

/// A pressure reading at a Unix time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureSample {
    pub unix_secs: i64,
    pub hpa: f64,
}

/// What the pressure change suggests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Outlook {
    Clear,
    Stable,
    PossibleRain,
}

impl Outlook {
    pub fn from_delta(delta_hpa: f64) -> Self {
        if delta_hpa > OUTLOOK_THRESHOLD {
            Outlook::Clear
        } else if delta_hpa < -OUTLOOK_THRESHOLD {
            Outlook::PossibleRain
        } else {
            Outlook::Stable
        }
    }
}

impl std::fmt::Display for Outlook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outlook::Clear => write!(f, "Clear"),
            Outlook::Stable => write!(f, "Stable"),
            Outlook::PossibleRain => write!(f, "Possible Rain"),
        }
    }
}

/// How the 24-hour delta was obtained.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub enum TrendMethod {
    Regression { r_squared: f64 },
    Median,
    Reference,
}

/// Estimated 24-hour pressure change and its outlook.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PressureTrend {
    /// Change in hPa over 24 h (positive = rising).
    pub delta_hpa: f64,
    pub method: TrendMethod,
    pub outlook: Outlook,
}

impl PressureTrend {
    /// Estimates the trend.
    ///
    /// - `samples`: the last 24 h of readings, any order.
    /// - `now`: Unix time the windows are anchored to.
    /// - `current`: the latest pressure, if any. Without it there is no trend.
    /// - `reference`: the newest pressure at or before `now - 24h`, if any.
    pub fn estimate(
        samples: &[PressureSample],
        now: i64,
        current: Option<f64>,
        reference: Option<f64>,
    ) -> Option<Self> {
        let current = current?;
        let from_reference = || {
            reference.map(|old| (current - old, TrendMethod::Reference))
        };

        let estimate = if samples.len() >= MIN_REGRESSION_SAMPLES {
            match regression(samples) {
                Some((delta, r_squared))
                    if r_squared >= MIN_R_SQUARED && delta.abs() <= MAX_PLAUSIBLE_DELTA =>
                {
                    Some((delta, TrendMethod::Regression { r_squared }))
                }
                Some((delta, r_squared)) => {
                    tracing::debug!(
                        "weak pressure fit (delta {delta:.2} hPa, R² {r_squared:.3}), using medians"
                    );
                    median_delta(samples, now)
                        .map(|d| (d, TrendMethod::Median))
                        .or_else(from_reference)
                }
                None => None,
            }
        } else {
            None
        };

        let (delta_hpa, method) = estimate.or_else(from_reference)?;
        Some(Self {
            delta_hpa,
            method,
            outlook: Outlook::from_delta(delta_hpa),
        })
    }
}

/// Least-squares fit of pressure over time. Returns the slope scaled to
/// 24 h and the coefficient of determination clamped to `[0, 1]`, or
/// `None` when all samples share one timestamp.
fn regression(samples: &[PressureSample]) -> Option<(f64, f64)> {
    let n = samples.len() as f64;
    // Centre on the first timestamp to keep the sums well conditioned.
    let origin = samples.first()?.unix_secs;
    let xs: Vec<f64> = samples.iter().map(|s| (s.unix_secs - origin) as f64).collect();
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = samples.iter().map(|s| s.hpa).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, s) in xs.iter().zip(samples) {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (s.hpa - mean_y);
    }
    if sxx == 0.0 {
        return None;
    }

    let beta = sxy / sxx;
    let alpha = mean_y - beta * mean_x;

    let mut ss_tot = 0.0;
    let mut ss_res = 0.0;
    for (x, s) in xs.iter().zip(samples) {
        let fitted = alpha + beta * x;
        ss_tot += (s.hpa - mean_y) * (s.hpa - mean_y);
        ss_res += (s.hpa - fitted) * (s.hpa - fitted);
    }
    let r_squared = if ss_tot > 0.0 {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Some((beta * DAY_SECS as f64, r_squared))
}

/// Median of the last hour minus the median around 24 h ago.
fn median_delta(samples: &[PressureSample], now: i64) -> Option<f64> {
    let recent: Vec<f64> = samples
        .iter()
        .filter(|s| s.unix_secs >= now - HOUR_SECS)
        .map(|s| s.hpa)
        .collect();
    let day_ago = now - DAY_SECS;
    let old: Vec<f64> = samples
        .iter()
        .filter(|s| {
            s.unix_secs >= day_ago - OLD_WINDOW_HALF_SECS
                && s.unix_secs <= day_ago + OLD_WINDOW_HALF_SECS
        })
        .map(|s| s.hpa)
        .collect();

    Some(median(&recent)? - median(&old)?)
}

/// Median of `values`; the mean of the two middle values for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}
