//! MACD indicator math over a daily closing-price series.
//!
//! All moving averages use the "no-adjust" EMA recurrence:
//! `ema[0] = value[0]`, `ema[i] = alpha * value[i] + (1 - alpha) * ema[i-1]`
//! with `alpha = 2 / (span + 1)`. The cumulative-weight "adjust" variant
//! produces different warmup values and must not be substituted.

use crate::constants::{EMA_FAST_SPAN, EMA_SLOW_SPAN, MIN_SERIES_POINTS, SIGNAL_SPAN};
use crate::error::{AppError, Result};
use crate::models::PriceSeries;
use chrono::NaiveDate;

/// One price point with its derived indicator values
#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub ema_12: f64,
    pub ema_26: f64,
    pub macd: f64,
    pub signal: f64,
    pub macd_gap: f64,
    /// MACD gap rescaled into [-100, 100] over the whole series
    pub macd_normalized: f64,
}

/// Indicator values aligned 1:1 with the input price series
pub type IndicatorSeries = Vec<IndicatorPoint>;

/// Calculate an exponential moving average, seeded from the first value
pub fn calculate_ema(values: &[f64], span: usize) -> Vec<f64> {
    let mut ema_values = Vec::with_capacity(values.len());
    if values.is_empty() || span == 0 {
        return ema_values;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = values[0];
    ema_values.push(prev);
    for &value in &values[1..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        ema_values.push(prev);
    }

    ema_values
}

/// Compute the full indicator series for one ticker.
///
/// Requires at least [`MIN_SERIES_POINTS`] points; shorter series are
/// rejected outright. A constant MACD gap across the whole series leaves
/// the min-max normalization with a zero denominator and is surfaced as
/// [`AppError::NormalizationUndefined`] instead of NaN.
pub fn compute_indicators(series: &PriceSeries) -> Result<IndicatorSeries> {
    if series.len() < MIN_SERIES_POINTS {
        let ticker = series
            .first()
            .map(|p| p.ticker.clone())
            .unwrap_or_default();
        return Err(AppError::InsufficientData {
            ticker,
            points: series.len(),
        });
    }

    let closes: Vec<f64> = series.iter().map(|p| p.close).collect();
    let ema_12 = calculate_ema(&closes, EMA_FAST_SPAN);
    let ema_26 = calculate_ema(&closes, EMA_SLOW_SPAN);
    let macd: Vec<f64> = ema_12
        .iter()
        .zip(ema_26.iter())
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal = calculate_ema(&macd, SIGNAL_SPAN);
    let gap: Vec<f64> = macd
        .iter()
        .zip(signal.iter())
        .map(|(m, s)| m - s)
        .collect();

    let gap_min = gap.iter().cloned().fold(f64::INFINITY, f64::min);
    let gap_max = gap.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if gap_max <= gap_min {
        return Err(AppError::NormalizationUndefined {
            ticker: series[0].ticker.clone(),
        });
    }
    let gap_range = gap_max - gap_min;

    let points = series
        .iter()
        .enumerate()
        .map(|(i, point)| IndicatorPoint {
            date: point.date,
            close: point.close,
            ema_12: ema_12[i],
            ema_26: ema_26[i],
            macd: macd[i],
            signal: signal[i],
            macd_gap: gap[i],
            macd_normalized: (gap[i] - gap_min) / gap_range * 200.0 - 100.0,
        })
        .collect();

    Ok(points)
}
