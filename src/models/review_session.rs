//! Review session: one pass over a snapshot of due cards.
//! Grading applies the scheduling transition and writes the card, its deck's
//! last-reviewed time, and the study stats back through a shared connection.

use super::{Card, StudyStats, scheduler};
use crate::database::db;
use crate::error::StorageError;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Drives a single review pass. Cards missed during the pass are not
/// repeated within it; the shortened interval brings them back through the
/// next due query instead.
pub struct ReviewSession {
    pub deck_name: String,
    cards: Vec<Card>,
    current_index: usize,
    show_back: bool,
    correct_count: usize,
    stats: StudyStats,
    conn: Arc<Mutex<Connection>>,
}

impl ReviewSession {
    /// Creates a session over a due-card snapshot, loading the current stats
    /// so grading can update them incrementally.
    pub fn new_from_due_cards(
        deck_name: String,
        cards: Vec<Card>,
        conn: Arc<Mutex<Connection>>,
    ) -> Result<Self, StorageError> {
        let stats = {
            let guard = conn.lock().expect("connection mutex poisoned");
            db::load_stats(&guard)?
        };

        Ok(Self {
            deck_name,
            cards,
            current_index: 0,
            show_back: false,
            correct_count: 0,
            stats,
            conn,
        })
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.current_index)
    }

    pub fn back_shown(&self) -> bool {
        self.show_back
    }

    pub fn reveal_back(&mut self) {
        self.show_back = true;
    }

    /// Grades the current card and persists the outcome. The session owns
    /// the only live copy of each card between load and write-back.
    pub fn grade_current_card(
        &mut self,
        knew_answer: bool,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let Some(card) = self.cards.get_mut(self.current_index) else {
            return Ok(());
        };

        let updated = scheduler::apply_review(card, knew_answer, now);
        if knew_answer {
            self.correct_count += 1;
        }
        self.stats.record_review(knew_answer, now);

        let guard = self.conn.lock().expect("connection mutex poisoned");
        db::update_card(&updated, &guard)?;
        db::touch_deck_reviewed(updated.deck_id, now, &guard)?;
        db::save_stats(&self.stats, &guard)?;
        drop(guard);

        log::debug!(
            "graded card {} ({}): next review {}",
            updated.id,
            if knew_answer { "knew" } else { "missed" },
            updated.next_review_date
        );

        *card = updated;
        Ok(())
    }

    /// Moves to the next card and hides its back again.
    pub fn advance(&mut self) {
        if self.current_index < self.cards.len() {
            self.current_index += 1;
            self.show_back = false;
        }
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.cards.len()
    }

    pub fn total_count(&self) -> usize {
        self.cards.len()
    }

    pub fn graded_count(&self) -> usize {
        self.current_index.min(self.cards.len())
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn stats(&self) -> &StudyStats {
        &self.stats
    }

    pub fn progress_message(&self) -> String {
        format!(
            "{}: card {} of {}",
            self.deck_name,
            (self.graded_count() + 1).min(self.total_count()),
            self.total_count()
        )
    }
}
