//! Relative Strength Index (RSI), simple-average form over the whole window.
//!
//! avg_gain = sum(positive deltas) / (n - 1), avg_loss = sum(|negative deltas|) / (n - 1)
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Edge cases: avg_loss == 0 → 100; both zero (flat) → 50; avg_gain == 0 → 0.

/// RSI of the whole window. `None` when fewer than 2 prices are given.
pub fn compute_rsi(prices: &[f64]) -> Option<f64> {
    if prices.len() < 2 {
        return None;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for pair in prices.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let periods = (prices.len() - 1) as f64;
    Some(rsi_from_averages(gains / periods, losses / periods))
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn rsi_needs_two_prices() {
        assert_eq!(compute_rsi(&[]), None);
        assert_eq!(compute_rsi(&[100.0]), None);
        assert!(compute_rsi(&[100.0, 101.0]).is_some());
    }

    #[test]
    fn rsi_all_gains_is_exactly_100() {
        assert_eq!(compute_rsi(&[100.0, 101.0, 102.0, 103.0]), Some(100.0));
    }

    #[test]
    fn rsi_all_losses_is_exactly_0() {
        assert_eq!(compute_rsi(&[105.0, 104.0, 103.0, 102.0]), Some(0.0));
    }

    #[test]
    fn rsi_flat_is_neutral() {
        assert_eq!(compute_rsi(&[42.0; 30]), Some(50.0));
    }

    #[test]
    fn rsi_mixed() {
        // Changes: +0.34, -0.25, -0.48, +0.72
        // gains = 1.06, losses = 0.73 → RSI = 100 - 100/(1 + 1.06/0.73)
        let result = compute_rsi(&[44.0, 44.34, 44.09, 43.61, 44.33]).unwrap();
        let expected = 100.0 - 100.0 / (1.0 + 1.06 / 0.73);
        assert_approx(result, expected, 1e-9);
    }

    #[test]
    fn rsi_divisor_cancels_out() {
        // avg gain / avg loss share the (n - 1) divisor, so RSI = 100 * gains / (gains + losses)
        let result = compute_rsi(&[10.0, 13.0, 12.0]).unwrap();
        assert_approx(result, 75.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_golden_downtrend() {
        // 28 losses of 1.0 and one gain of 6.0
        let mut prices: Vec<f64> = (0..29).map(|i| 100.0 - i as f64).collect();
        prices.push(78.0);
        assert_approx(compute_rsi(&prices).unwrap(), 17.647058823529406, 1e-9);
    }
}
