//! Shared numeric helpers for indicator computation

/// Simple moving average over the trailing `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let sum: f64 = values[values.len() - period..].iter().sum();
    Some(sum / period as f64)
}

/// Population standard deviation over the trailing `period` values.
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance = window
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / period as f64;
    Some(variance.sqrt())
}

/// Full EMA series with smoothing constant 2/(period+1), seeded by the
/// simple average of the first `period` values.
///
/// The first element corresponds to input index `period - 1`; the
/// returned series has `values.len() - period + 1` elements.
pub fn ema_series(values: &[f64], period: usize) -> Option<Vec<f64>> {
    if period == 0 || values.len() < period {
        return None;
    }
    let k = 2.0 / (period as f64 + 1.0);
    let seed: f64 = values[..period].iter().sum::<f64>() / period as f64;

    let mut series = Vec::with_capacity(values.len() - period + 1);
    series.push(seed);
    let mut prev = seed;
    for value in &values[period..] {
        prev = prev + k * (value - prev);
        series.push(prev);
    }
    Some(series)
}

/// Latest EMA value over the whole input.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    ema_series(values, period).and_then(|s| s.last().copied())
}

/// True range of a candle given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}
