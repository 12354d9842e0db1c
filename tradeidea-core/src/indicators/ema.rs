//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = k * close[t] + (1 - k) * EMA[t-1], k = 2 / (period + 1).
//! Seed: EMA[0] = close[0] (biased start, no warmup discard).
//! The earliest values lean on the seed and are less reliable than later ones.

/// Compute the EMA of `prices`. Output length always equals input length.
pub fn compute_ema(prices: &[f64], period: usize) -> Vec<f64> {
    debug_assert!(period >= 1, "EMA period must be >= 1");
    let k = 2.0 / (period.max(1) as f64 + 1.0);

    let mut result = Vec::with_capacity(prices.len());
    let Some(&seed) = prices.first() else {
        return result;
    };
    result.push(seed);

    let mut prev = seed;
    for &price in &prices[1..] {
        let ema = price * k + prev * (1.0 - k);
        result.push(ema);
        prev = ema;
    }

    result
}
