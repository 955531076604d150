//! Fixed-interval spaced repetition scheduling.
//!
//! Review intervals are short and fixed rather than multiplicative:
//! - A correct answer schedules the card 40 seconds out
//! - Three consecutive correct answers mark the card mastered (60 seconds)
//! - A miss resets the streak and schedules 30 seconds out,
//!   or 50 seconds if the card was mastered when it was missed
//! - Mastery is cleared by any miss

use super::Card;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Consecutive correct answers needed before a card counts as mastered.
pub const MASTERY_THRESHOLD: u32 = 3;
/// Interval in seconds once the streak is at or past the threshold.
pub const MASTERED_INTERVAL: i64 = 60;
/// Interval in seconds when a mastered card is missed.
pub const MASTERED_FAIL_INTERVAL: i64 = 50;
/// Interval in seconds for a correct answer below the threshold.
pub const CORRECT_INTERVAL: i64 = 40;
/// Interval in seconds when a non-mastered card is missed.
pub const INCORRECT_INTERVAL: i64 = 30;

/// Applies a single review outcome to a card and returns the updated card.
///
/// Pure: the current time is passed in, never read from the clock, and the
/// input card is left untouched. The caller persists the result.
pub fn apply_review(card: &Card, knew_answer: bool, now: DateTime<Utc>) -> Card {
    let mut updated = card.clone();

    updated.repetitions = card.repetitions + 1;
    updated.last_reviewed_at = Some(now);

    if knew_answer {
        updated.consecutive_correct = card.consecutive_correct + 1;

        if updated.consecutive_correct >= MASTERY_THRESHOLD {
            updated.is_mastered = true;
            updated.interval = MASTERED_INTERVAL;
        } else {
            updated.interval = CORRECT_INTERVAL;
        }
    } else {
        updated.consecutive_correct = 0;
        updated.is_mastered = false;
        // The pre-review mastery flag decides the penalty interval
        updated.interval = if card.is_mastered {
            MASTERED_FAIL_INTERVAL
        } else {
            INCORRECT_INTERVAL
        };
    }

    updated.next_review_date = now + Duration::seconds(updated.interval);

    updated
}

/// Creates a card with initial scheduling state. The card is due
/// immediately: `next_review_date` equals the creation time.
pub fn create_card(deck_id: Uuid, front: &str, back: &str, now: DateTime<Utc>) -> Card {
    Card {
        id: Uuid::new_v4(),
        deck_id,
        front: front.to_string(),
        back: back.to_string(),
        created_at: now,
        last_reviewed_at: None,
        next_review_date: now,
        interval: 0,
        consecutive_correct: 0,
        is_mastered: false,
        repetitions: 0,
    }
}
