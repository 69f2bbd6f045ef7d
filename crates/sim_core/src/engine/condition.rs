//! 컨디션 시스템 - in-match fitness and performance multipliers
//!
//! Fitness runs on the same 1.0-6.0 scale as the stamina attribute: a player
//! starts the match at their stamina value and loses a fixed amount per
//! minute. Performance follows the reserve left above the fitness floor, so
//! a bigger stamina attribute means a slower relative decline. The
//! multiplier never drops below [`MULTIPLIER_FLOOR`], so an exhausted player
//! still contributes.

/// 체력 하한/상한
pub const FITNESS_MIN: f32 = 1.0;
pub const FITNESS_MAX: f32 = 6.0;

/// Fitness lost per simulated minute
pub const DECAY_PER_MINUTE: f32 = 0.023;

/// Half-time recovery = base + per_stamina × stamina
const RECOVERY_BASE: f32 = 0.1;
const RECOVERY_PER_STAMINA: f32 = 0.05;

/// Form 5 is neutral; each point away is ±2%
const FORM_NEUTRAL: f32 = 5.0;
const FORM_STEP: f32 = 0.02;

/// Full 100 experience → +5% in play
const EXPERIENCE_BONUS_MAX: f32 = 0.05;
/// Full 100 experience → +5% from the spot
const PENALTY_EXPERIENCE_STEP: f32 = 0.0005;

/// Minimum effectiveness of an exhausted player
pub const MULTIPLIER_FLOOR: f32 = 0.35;

/// Stateless condition formulas
pub struct ConditionSystem;

impl ConditionSystem {
    /// Fitness to subtract for `minutes_delta` minutes of play.
    pub fn fitness_decay(minutes_delta: u32) -> f32 {
        DECAY_PER_MINUTE * minutes_delta as f32
    }

    /// Break recovery; higher stamina recovers faster.
    pub fn recovery(base_stamina: f32) -> f32 {
        RECOVERY_BASE + RECOVERY_PER_STAMINA * base_stamina.clamp(FITNESS_MIN, FITNESS_MAX)
    }

    /// Clamp a fitness value into the legal band.
    #[inline]
    pub fn clamp_fitness(fitness: f32) -> f32 {
        fitness.clamp(FITNESS_MIN, FITNESS_MAX)
    }

    /// Performance factor applied on top of a cached contribution.
    ///
    /// Remaining reserve `(fitness - 1) / (stamina - 1)` → 0.5..1.0, times
    /// form and experience bonuses, floored at [`MULTIPLIER_FLOOR`]. Stamina 1
    /// has no reserve above the floor and plays at the exhausted level.
    pub fn multiplier(current_fitness: f32, base_stamina: f32, form: u8, experience: u8) -> f32 {
        let fitness_factor = 0.5 + 0.5 * Self::reserve_ratio(current_fitness, base_stamina);

        let m = fitness_factor * Self::form_factor(form) * Self::experience_factor(experience);
        m.max(MULTIPLIER_FLOOR)
    }

    /// Shootout multiplier: form and experience, no fitness term.
    pub fn penalty_multiplier(form: u8, experience: u8) -> f32 {
        let exp = experience.min(100) as f32;
        (Self::form_factor(form) * (1.0 + exp * PENALTY_EXPERIENCE_STEP)).max(MULTIPLIER_FLOOR)
    }

    /// Share of the starting reserve above [`FITNESS_MIN`] still left, 0..=1
    fn reserve_ratio(current_fitness: f32, base_stamina: f32) -> f32 {
        let span = base_stamina.clamp(FITNESS_MIN, FITNESS_MAX) - FITNESS_MIN;
        if span <= f32::EPSILON {
            return 0.0;
        }
        ((current_fitness - FITNESS_MIN) / span).clamp(0.0, 1.0)
    }

    fn form_factor(form: u8) -> f32 {
        1.0 + (form.clamp(1, 10) as f32 - FORM_NEUTRAL) * FORM_STEP
    }

    fn experience_factor(experience: u8) -> f32 {
        1.0 + experience.min(100) as f32 / 100.0 * EXPERIENCE_BONUS_MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_is_linear() {
        assert_eq!(ConditionSystem::fitness_decay(0), 0.0);
        let one = ConditionSystem::fitness_decay(1);
        let ten = ConditionSystem::fitness_decay(10);
        assert!((ten - one * 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_recovery_grows_with_stamina() {
        let low = ConditionSystem::recovery(1.0);
        let high = ConditionSystem::recovery(6.0);
        assert!(high > low);
        assert!((high - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_fresh_neutral_player_is_unit() {
        let m = ConditionSystem::multiplier(4.0, 4.0, 5, 0);
        assert!((m - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_form_and_experience_bonus() {
        let neutral = ConditionSystem::multiplier(4.0, 4.0, 5, 0);
        let in_form = ConditionSystem::multiplier(4.0, 4.0, 9, 0);
        let veteran = ConditionSystem::multiplier(4.0, 4.0, 5, 100);
        assert!(in_form > neutral);
        assert!(veteran > neutral);
        assert!((veteran - 1.05).abs() < 1e-6);
    }

    #[test]
    fn test_reserve_drives_fatigue() {
        // Same fitness, smaller starting reserve → more of it spent
        let deep = ConditionSystem::multiplier(3.0, 6.0, 5, 0);
        let shallow = ConditionSystem::multiplier(3.0, 4.0, 5, 0);
        assert!(deep < shallow);
        assert!((ConditionSystem::multiplier(1.0, 4.0, 5, 0) - 0.5).abs() < 1e-6);
        assert!((ConditionSystem::multiplier(1.0, 1.0, 5, 0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_penalty_multiplier_ignores_fitness() {
        assert!((ConditionSystem::penalty_multiplier(5, 0) - 1.0).abs() < 1e-6);
        assert!(ConditionSystem::penalty_multiplier(10, 100) > ConditionSystem::penalty_multiplier(1, 0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_multiplier_has_floor(
                fitness in -10.0f32..10.0,
                stamina in 0.0f32..10.0,
                form in 0u8..=20,
                experience in 0u8..=255,
            ) {
                let m = ConditionSystem::multiplier(fitness, stamina, form, experience);
                prop_assert!(m >= MULTIPLIER_FLOOR);
                prop_assert!(m.is_finite());
            }

            /// Any sequence of decay / recovery steps stays inside the band
            #[test]
            fn prop_fitness_stays_in_band(
                stamina in 1u8..=6,
                steps in proptest::collection::vec((0u32..30, any::<bool>()), 0..40),
            ) {
                let base = stamina as f32;
                let mut fitness = base;
                for (minutes, half_time) in steps {
                    fitness -= ConditionSystem::fitness_decay(minutes);
                    if half_time {
                        fitness += ConditionSystem::recovery(base);
                    }
                    fitness = ConditionSystem::clamp_fitness(fitness);
                    prop_assert!((FITNESS_MIN..=FITNESS_MAX).contains(&fitness));
                }
            }
        }
    }
}
