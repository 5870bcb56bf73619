// =============================================================================
// Returns Volatility — population standard deviation of one-step returns
// =============================================================================
//
// Volatility is measured over simple one-step relative returns:
//   r_i = (p_i - p_{i-1}) / p_{i-1}
//
// The result is the *population* standard deviation of the return series
// (divide by n, no Bessel correction) expressed as a percentage. This matches
// the reference output exactly; do not switch to the sample estimator.

/// Compute the volatility of a close-price series as a percentage.
///
/// Fewer than two closes carry no return information, so the function
/// returns `0.0` rather than erroring. A zero price at any position
/// `i - 1` produces a non-finite return that propagates into the result
/// unmasked; callers decide how to surface it.
pub fn returns_volatility(closes: &[f64]) -> f64 {
    if closes.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = closes
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;

    variance.sqrt() * 100.0
}
