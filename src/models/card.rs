//! Card is a front/back prompt pair plus the scheduling state that decides
//! when it next comes up for review.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub front: String,
    pub back: String,
    pub created_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// Always set; a freshly created card is due at its creation time.
    pub next_review_date: DateTime<Utc>,
    /// Seconds added to the review moment to compute `next_review_date`.
    pub interval: i64,
    /// Unbroken run of "knew it" outcomes since the last miss.
    pub consecutive_correct: u32,
    pub is_mastered: bool,
    /// Total review events ever applied; never reset.
    pub repetitions: u32,
}

/// Study status derived from a card's scheduling fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardStatus {
    New,
    Learning,
    Review,
    Mastered,
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CardStatus::New => "New",
            CardStatus::Learning => "Learning",
            CardStatus::Review => "Review",
            CardStatus::Mastered => "Mastered",
        };
        write!(f, "{}", label)
    }
}

impl Card {
    /// Classifies the card. The check order is the contract: new-ness and
    /// mastery take precedence over the learning/review distinction.
    pub fn status(&self) -> CardStatus {
        if self.repetitions == 0 && self.last_reviewed_at.is_none() {
            CardStatus::New
        } else if self.is_mastered {
            CardStatus::Mastered
        } else if self.consecutive_correct > 0 {
            CardStatus::Learning
        } else {
            CardStatus::Review
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date <= now
    }
}
