//! Logistic win probability from a predicted margin.
//!
//! `P(home) = 1 / (1 + exp(-slope * margin))`, margin = home - away.

pub fn home_win_probability(margin: f64, slope: f64) -> f64 {
    (1.0 / (1.0 + (-slope * margin).exp())).clamp(0.0, 1.0)
}
