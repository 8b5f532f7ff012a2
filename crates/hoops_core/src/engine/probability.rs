//! Small probability helpers shared by the possession resolver.

use rand::Rng;

#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Rating 0..=100 centered on 50 and scaled to -1..=1.
#[inline]
pub fn centered(rating: f32) -> f32 {
    (rating - 50.0) / 50.0
}

/// Weighted random pick. Indices with a weight <= 0 are never picked unless
/// every weight is, in which case index 0 is returned.
pub fn weighted_choice_index<R: Rng + ?Sized>(weights: &[f32], rng: &mut R) -> usize {
    let total: f32 = weights.iter().map(|w| w.max(0.0)).sum();
    if total <= 0.0 {
        return 0;
    }

    let mut r = rng.gen::<f32>() * total;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        r -= w;
        if r <= 0.0 {
            return i;
        }
    }
    weights.iter().rposition(|w| *w > 0.0).unwrap_or(0)
}

/// Bernoulli draw with `p` clamped to 0..=1.
#[inline]
pub fn chance<R: Rng + ?Sized>(p: f32, rng: &mut R) -> bool {
    rng.gen::<f32>() < p.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_sigmoid_is_monotonic_and_centered() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(1.0) > sigmoid(0.5));
        assert!(sigmoid(-3.0) > 0.0 && sigmoid(3.0) < 1.0);
    }

    #[test]
    fn test_weighted_choice_skips_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let i = weighted_choice_index(&[0.0, 2.0, 0.0, -1.0], &mut rng);
            assert_eq!(i, 1);
        }
        assert_eq!(weighted_choice_index(&[0.0, 0.0], &mut rng), 0);
    }

    #[test]
    fn test_weighted_choice_follows_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut counts = [0u32; 2];
        for _ in 0..10_000 {
            counts[weighted_choice_index(&[1.0, 3.0], &mut rng)] += 1;
        }
        let share = counts[1] as f32 / 10_000.0;
        assert!((share - 0.75).abs() < 0.03, "share {share}");
    }
}
