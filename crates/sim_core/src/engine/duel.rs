//! Duel primitive and categorical draws
//!
//! 모든 확률 판정의 공통 기반.
//! `P = 1 / (1 + exp(-((a - b - offset) / 1.5) * k))`
//!
//! The probability functions are pure; the `resolve_*`/`pick_*` helpers take
//! the RNG as a parameter so the engine keeps a single random source.

use rand::Rng;

use super::tuning::{DuelParams, DUEL_DAMPING};

#[inline]
pub fn logistic(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Win probability of side A
#[inline]
pub fn duel_probability(value_a: f32, value_b: f32, k: f32, offset: f32) -> f32 {
    logistic(((value_a - value_b - offset) / DUEL_DAMPING) * k)
}

/// Draws once against [`duel_probability`]; `true` means A wins.
pub fn resolve_duel(rng: &mut impl Rng, value_a: f32, value_b: f32, k: f32, offset: f32) -> bool {
    let p = duel_probability(value_a, value_b, k, offset);
    rng.gen::<f32>() < p
}

/// [`resolve_duel`] with a tuning-table pair
pub fn resolve_duel_with(rng: &mut impl Rng, value_a: f32, value_b: f32, params: DuelParams) -> bool {
    resolve_duel(rng, value_a, value_b, params.k, params.offset)
}

/// Bernoulli draw
#[inline]
pub fn chance(rng: &mut impl Rng, p: f32) -> bool {
    rng.gen::<f32>() < p
}

/// Categorical draw over `(item, weight)` pairs.
///
/// Weights need not sum to one. Falls back to the last item when rounding
/// leaves the roll past the end; `None` only for an empty or weightless table.
pub fn pick_weighted<T: Copy>(rng: &mut impl Rng, table: &[(T, f32)]) -> Option<T> {
    let total: f32 = table.iter().map(|(_, w)| w.max(0.0)).sum();
    if table.is_empty() || total <= 0.0 {
        return None;
    }

    let mut roll = rng.gen::<f32>() * total;
    for (item, weight) in table {
        let weight = weight.max(0.0);
        if roll < weight {
            return Some(*item);
        }
        roll -= weight;
    }
    table.iter().rev().find(|(_, w)| *w > 0.0).map(|(item, _)| *item)
}

/// Uniform pick from a slice
pub fn pick_uniform<T: Copy>(rng: &mut impl Rng, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.gen_range(0..items.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_even_duel_is_coin_flip() {
        assert!((duel_probability(12.0, 12.0, 0.3, 0.0) - 0.5).abs() < 1e-6);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let trials = 20_000;
        let wins = (0..trials).filter(|_| resolve_duel(&mut rng, 10.0, 10.0, 0.2, 0.0)).count();
        let rate = wins as f32 / trials as f32;
        assert!((rate - 0.5).abs() < 0.02, "empirical win rate {}", rate);
    }

    #[test]
    fn test_damping_divisor() {
        // diff 3, k 1 → logistic(2)
        let p = duel_probability(5.0, 2.0, 1.0, 0.0);
        assert!((p - logistic(2.0)).abs() < 1e-6);
    }

    #[test]
    fn test_pick_weighted_respects_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let table = [("never", 0.0), ("always", 2.0)];
        for _ in 0..200 {
            assert_eq!(pick_weighted(&mut rng, &table), Some("always"));
        }
        let empty: [(u8, f32); 0] = [];
        assert_eq!(pick_weighted(&mut rng, &empty), None);
        assert_eq!(pick_weighted(&mut rng, &[(1u8, 0.0)]), None);
    }

    #[test]
    fn test_pick_weighted_frequencies() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let table = [(0usize, 0.6), (1, 0.3), (2, 0.1)];
        let mut counts = [0u32; 3];
        for _ in 0..30_000 {
            counts[pick_weighted(&mut rng, &table).unwrap()] += 1;
        }
        assert!((counts[0] as f32 / 30_000.0 - 0.6).abs() < 0.02);
        assert!((counts[1] as f32 / 30_000.0 - 0.3).abs() < 0.02);
        assert!((counts[2] as f32 / 30_000.0 - 0.1).abs() < 0.02);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Larger margins always win more often
            #[test]
            fn prop_probability_increases_with_margin(
                b in 0.0f32..40.0,
                d1 in 0.01f32..20.0,
                extra in 0.5f32..20.0,
                k in 0.01f32..0.3,
            ) {
                let small = duel_probability(b + d1, b, k, 0.0);
                let large = duel_probability(b + d1 + extra, b, k, 0.0);
                prop_assert!(large > small);
                prop_assert!(small > 0.5);
            }

            /// A larger offset always hurts side A
            #[test]
            fn prop_offset_decreases_probability(
                a in 0.0f32..20.0,
                b in 0.0f32..20.0,
                off in -5.0f32..5.0,
                delta in 0.05f32..10.0,
                k in 0.05f32..0.3,
            ) {
                let base = duel_probability(a, b, k, off);
                let harder = duel_probability(a, b, k, off + delta);
                prop_assert!(harder < base);
            }

            #[test]
            fn prop_probability_is_bounded(
                a in -100.0f32..100.0,
                b in -100.0f32..100.0,
                k in 0.0f32..2.0,
            ) {
                let p = duel_probability(a, b, k, 0.0);
                prop_assert!((0.0..=1.0).contains(&p));
            }
        }
    }
}
