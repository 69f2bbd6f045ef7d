//! Extra time: two 15-minute halves on the regular minute loop.

use rand::Rng;
use tracing::info;

use super::{key_moments, MatchEngine};
use crate::models::EventType;

pub const EXTRA_TIME_FIRST_MINUTE: u8 = 91;
pub const EXTRA_TIME_LENGTH: u8 = 30;

impl<R: Rng> MatchEngine<R> {
    /// Minutes 91..=120. Break recovery applies at 91 and 106.
    pub fn simulate_extra_time(&mut self) {
        self.extra_time_played = true;
        let schedule = key_moments::schedule(
            &mut self.rng,
            self.config.extra_time_key_moments,
            EXTRA_TIME_FIRST_MINUTE,
            EXTRA_TIME_LENGTH,
        );
        info!(
            score_home = self.score_home,
            score_away = self.score_away,
            key_moments = schedule.len(),
            "extra time"
        );

        self.push_marker(90, EventType::ExtraTimeStart);
        for minute in EXTRA_TIME_FIRST_MINUTE..=120 {
            if minute == 106 {
                self.push_marker(106, EventType::ExtraTimeSecondHalf);
            }
            self.tick(minute, &schedule);
            if minute == 105 {
                self.emit_snapshot_event(105);
                self.push_marker(105, EventType::ExtraTimeHalfTime);
            }
        }

        self.emit_snapshot_event(120);
        self.push_marker(120, EventType::ExtraTimeEnd);
        info!(score_home = self.score_home, score_away = self.score_away, "end of extra time");
    }
}
