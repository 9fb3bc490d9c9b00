//! Exact draw probabilities for a single card, used to sanity-check runs.

/// Binomial coefficient C(n, k) as f64 (0 when k > n).
pub fn binomial(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Probability of exactly `k` successes when drawing `draws` cards without
/// replacement from `population` cards of which `successes` are successes.
///
/// ```
/// use handsim_engine::odds::hypergeometric;
///
/// // one specific card, 1 copy in 40, drawn in a 5 card hand
/// let p = hypergeometric(40, 1, 5, 1);
/// assert!((p - 0.125).abs() < 1e-12);
/// ```
pub fn hypergeometric(population: u64, successes: u64, draws: u64, k: u64) -> f64 {
    if successes > population || draws > population || k > draws || k > successes {
        return 0.0;
    }
    if draws - k > population - successes {
        return 0.0;
    }
    binomial(successes, k) * binomial(population - successes, draws - k)
        / binomial(population, draws)
}

/// Probability of at least `k` successes.
pub fn at_least(population: u64, successes: u64, draws: u64, k: u64) -> f64 {
    (k..=draws.min(successes))
        .map(|i| hypergeometric(population, successes, draws, i))
        .sum::<f64>()
        .min(1.0)
}

/// Probability of at most `k` successes.
pub fn at_most(population: u64, successes: u64, draws: u64, k: u64) -> f64 {
    (0..=k.min(draws))
        .map(|i| hypergeometric(population, successes, draws, i))
        .sum::<f64>()
        .min(1.0)
}
