//! Aggregate study statistics: lifetime review counts, per-day review
//! tallies, and the daily study streak.
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    pub streak_count: u32,
    pub last_study_date: Option<NaiveDate>,
    pub total_reviews: u32,
    pub correct_reviews: u32,
    /// Review count per calendar day (UTC).
    pub study_dates: HashMap<NaiveDate, u32>,
}

impl StudyStats {
    /// Records one graded review. The streak grows by one on the first
    /// review of a day that continues from yesterday (or starts the very
    /// first streak); reviews later the same day leave it unchanged.
    pub fn record_review(&mut self, knew_answer: bool, now: DateTime<Utc>) {
        let today = now.date_naive();

        self.total_reviews += 1;
        if knew_answer {
            self.correct_reviews += 1;
        }
        *self.study_dates.entry(today).or_insert(0) += 1;

        if self.last_study_date != Some(today) {
            let continues = match self.last_study_date {
                None => true,
                Some(last) => Some(last) == today.checked_sub_days(Days::new(1)),
            };
            if continues {
                self.streak_count += 1;
            }
        }
        self.last_study_date = Some(today);
    }

    /// Zeroes the streak when the last study day is neither today nor
    /// yesterday. Call before displaying the streak.
    pub fn reset_streak_if_lapsed(&mut self, now: DateTime<Utc>) {
        let today = now.date_naive();
        if let Some(last) = self.last_study_date {
            let yesterday = today.checked_sub_days(Days::new(1));
            if last != today && Some(last) != yesterday {
                self.streak_count = 0;
            }
        }
    }

    /// Rounded percentage of reviews answered correctly; 0 before any review.
    pub fn accuracy_percentage(&self) -> u32 {
        if self.total_reviews == 0 {
            return 0;
        }
        ((self.correct_reviews as f64 / self.total_reviews as f64) * 100.0).round() as u32
    }

    pub fn reviews_on(&self, date: NaiveDate) -> u32 {
        self.study_dates.get(&date).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_first_review_starts_streak() {
        let mut stats = StudyStats::default();
        stats.record_review(true, at(2026, 8, 6));

        assert_eq!(stats.streak_count, 1);
        assert_eq!(stats.total_reviews, 1);
        assert_eq!(stats.correct_reviews, 1);
        assert_eq!(stats.reviews_on(at(2026, 8, 6).date_naive()), 1);
    }

    #[test]
    fn test_same_day_reviews_keep_streak() {
        let mut stats = StudyStats::default();
        stats.record_review(true, at(2026, 8, 6));
        stats.record_review(false, at(2026, 8, 6));
        stats.record_review(true, at(2026, 8, 6));

        assert_eq!(stats.streak_count, 1);
        assert_eq!(stats.total_reviews, 3);
        assert_eq!(stats.correct_reviews, 2);
        assert_eq!(stats.reviews_on(at(2026, 8, 6).date_naive()), 3);
    }

    #[test]
    fn test_consecutive_days_grow_streak() {
        let mut stats = StudyStats::default();
        stats.record_review(true, at(2026, 8, 4));
        stats.record_review(true, at(2026, 8, 5));
        stats.record_review(true, at(2026, 8, 6));

        assert_eq!(stats.streak_count, 3);
    }

    #[test]
    fn test_gap_day_does_not_grow_streak() {
        let mut stats = StudyStats::default();
        stats.record_review(true, at(2026, 8, 1));
        stats.record_review(true, at(2026, 8, 6));

        assert_eq!(stats.streak_count, 1);
    }

    #[test]
    fn test_reset_streak_if_lapsed() {
        let mut stats = StudyStats::default();
        stats.record_review(true, at(2026, 8, 1));
        assert_eq!(stats.streak_count, 1);

        // Yesterday still counts as an unbroken streak
        stats.reset_streak_if_lapsed(at(2026, 8, 2));
        assert_eq!(stats.streak_count, 1);

        stats.reset_streak_if_lapsed(at(2026, 8, 6));
        assert_eq!(stats.streak_count, 0);
    }

    #[test]
    fn test_accuracy_percentage() {
        let mut stats = StudyStats::default();
        assert_eq!(stats.accuracy_percentage(), 0);

        stats.record_review(true, at(2026, 8, 6));
        stats.record_review(true, at(2026, 8, 6));
        stats.record_review(false, at(2026, 8, 6));

        assert_eq!(stats.accuracy_percentage(), 67);
    }
}
