//! Deck is a named group of cards. Cards hold a back-reference to their
//! deck; the deck itself stores only metadata.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl Deck {
    pub fn new(name: &str, description: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: now,
            last_reviewed_at: None,
        }
    }

    /// Marks the deck as studied; called whenever one of its cards is graded.
    pub fn touch_reviewed(&mut self, now: DateTime<Utc>) {
        self.last_reviewed_at = Some(now);
    }
}
