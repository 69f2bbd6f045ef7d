//! Key moment scheduling
//!
//! The period is cut into `count` equal buckets and one jittered minute is
//! drawn per bucket, so the schedule is non-decreasing and roughly evenly
//! spread. Two moments can land on the same minute; both are resolved.

use rand::Rng;

/// Draw `count` key-moment minutes inside `[first, first + length - 1]`.
pub fn schedule(rng: &mut impl Rng, count: usize, first: u8, length: u8) -> Vec<u8> {
    if count == 0 || length == 0 {
        return Vec::new();
    }
    let last = first.saturating_add(length - 1);
    let bucket = length as f32 / count as f32;

    (0..count)
        .map(|i| {
            let offset = (i as f32 * bucket + rng.gen::<f32>() * bucket).floor() as u32;
            let minute = first as u32 + offset;
            minute.clamp(first as u32, last as u32) as u8
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_regular_schedule_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..500 {
            let minutes = schedule(&mut rng, 20, 1, 90);
            assert_eq!(minutes.len(), 20);
            assert!(minutes.windows(2).all(|w| w[0] <= w[1]));
            assert!(minutes.iter().all(|m| (1..=90).contains(m)));
        }
    }

    #[test]
    fn test_extra_time_schedule_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..500 {
            let minutes = schedule(&mut rng, 7, 91, 30);
            assert_eq!(minutes.len(), 7);
            assert!(minutes.windows(2).all(|w| w[0] <= w[1]));
            assert!(minutes.iter().all(|m| (91..=120).contains(m)));
        }
    }

    #[test]
    fn test_one_moment_per_bucket() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let minutes = schedule(&mut rng, 20, 1, 90);
        for (i, m) in minutes.iter().enumerate() {
            let lo = (i as f32 * 4.5).floor() as u8 + 1;
            let hi = ((i + 1) as f32 * 4.5).floor() as u8 + 1;
            assert!(*m >= lo && *m <= hi.min(90), "moment {} at {}", i, m);
        }
    }

    #[test]
    fn test_empty_schedule() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert!(schedule(&mut rng, 0, 1, 90).is_empty());
    }
}
