//! Read-only queries over a card collection: due-set selection, deck and
//! mastery filters, and aggregate percentages for the dashboard.
//!
//! All functions borrow the collection and preserve its order; nothing here
//! mutates a card or touches the clock.

use super::Card;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Cards due for review at `now`, i.e. with `next_review_date <= now`,
/// optionally restricted to one deck. Input order is preserved.
pub fn due_cards(cards: &[Card], now: DateTime<Utc>, deck_id: Option<Uuid>) -> Vec<&Card> {
    cards
        .iter()
        .filter(|card| card.is_due(now))
        .filter(|card| deck_id.is_none_or(|id| card.deck_id == id))
        .collect()
}

/// All cards belonging to a deck, regardless of due-ness.
pub fn deck_cards(cards: &[Card], deck_id: Uuid) -> Vec<&Card> {
    cards.iter().filter(|card| card.deck_id == deck_id).collect()
}

/// Mastered cards, optionally restricted to one deck.
pub fn mastered_cards(cards: &[Card], deck_id: Option<Uuid>) -> Vec<&Card> {
    cards
        .iter()
        .filter(|card| card.is_mastered)
        .filter(|card| deck_id.is_none_or(|id| card.deck_id == id))
        .collect()
}

/// Rounded percentage of a deck's cards that are mastered; 0 for an empty deck.
pub fn deck_mastery_percentage(cards: &[Card], deck_id: Uuid) -> u32 {
    let deck = deck_cards(cards, deck_id);
    if deck.is_empty() {
        return 0;
    }
    let mastered = deck.iter().filter(|card| card.is_mastered).count();
    percentage(mastered, deck.len())
}

/// Rounded percentage of all cards that are mastered.
pub fn overall_mastery_percentage(cards: &[Card]) -> u32 {
    if cards.is_empty() {
        return 0;
    }
    percentage(mastered_cards(cards, None).len(), cards.len())
}

fn percentage(part: usize, whole: usize) -> u32 {
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Human-readable distance to a card's next review, bucketed at one minute,
/// one hour, and one day, with ceiling division inside each bucket.
pub fn next_review_label(card: &Card, now: DateTime<Utc>) -> String {
    let diff_seconds = (card.next_review_date - now).num_seconds();

    if diff_seconds < 0 {
        let overdue = -diff_seconds;
        if overdue < 60 {
            format!("Overdue by {} seconds", overdue)
        } else if overdue < 3600 {
            format!("Overdue by {} minutes", (overdue as u64).div_ceil(60))
        } else if overdue < 86400 {
            format!("Overdue by {} hours", (overdue as u64).div_ceil(3600))
        } else {
            format!("Overdue by {} days", (overdue as u64).div_ceil(86400))
        }
    } else if diff_seconds == 0 {
        "Now".to_string()
    } else if diff_seconds < 60 {
        format!("In {} seconds", diff_seconds)
    } else if diff_seconds < 3600 {
        format!("In {} minutes", (diff_seconds as u64).div_ceil(60))
    } else if diff_seconds < 86400 {
        format!("In {} hours", (diff_seconds as u64).div_ceil(3600))
    } else {
        format!("In {} days", (diff_seconds as u64).div_ceil(86400))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scheduler::{self, apply_review, create_card};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
    }

    fn card_due_at(deck_id: Uuid, due: DateTime<Utc>) -> Card {
        let mut card = create_card(deck_id, "Q", "A", t0());
        card.next_review_date = due;
        card
    }

    #[test]
    fn test_due_cards_matches_exact_subset() {
        let deck = Uuid::new_v4();
        let now = t0();
        let cards = vec![
            card_due_at(deck, now - Duration::seconds(10)),
            card_due_at(deck, now),
            card_due_at(deck, now + Duration::seconds(1)),
        ];

        let due = due_cards(&cards, now, None);
        let due_ids: Vec<Uuid> = due.iter().map(|card| card.id).collect();

        // Exactly those with next_review_date <= now, in input order
        assert_eq!(due_ids, vec![cards[0].id, cards[1].id]);
    }

    #[test]
    fn test_due_cards_deck_scoping() {
        let deck_a = Uuid::new_v4();
        let deck_b = Uuid::new_v4();
        let now = t0();
        let past = now - Duration::seconds(30);
        let future = now + Duration::seconds(30);

        let cards = vec![
            card_due_at(deck_a, past),
            card_due_at(deck_b, past),
            card_due_at(deck_a, future),
        ];

        let due = due_cards(&cards, now, Some(deck_a));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, cards[0].id);
    }

    #[test]
    fn test_new_card_is_immediately_due() {
        let now = t0();
        let cards = vec![create_card(Uuid::new_v4(), "Q", "A", now)];

        let due = due_cards(&cards, now, None);
        assert_eq!(due.len(), 1);
    }

    #[test]
    fn test_deck_cards_ignores_due_dates() {
        let deck_a = Uuid::new_v4();
        let deck_b = Uuid::new_v4();
        let cards = vec![
            card_due_at(deck_a, t0() + Duration::days(1)),
            card_due_at(deck_b, t0()),
            card_due_at(deck_a, t0()),
        ];

        assert_eq!(deck_cards(&cards, deck_a).len(), 2);
        assert_eq!(deck_cards(&cards, deck_b).len(), 1);
    }

    #[test]
    fn test_mastered_cards_filter_and_scope() {
        let deck_a = Uuid::new_v4();
        let deck_b = Uuid::new_v4();
        let mut mastered_a = create_card(deck_a, "Q", "A", t0());
        for _ in 0..scheduler::MASTERY_THRESHOLD {
            mastered_a = apply_review(&mastered_a, true, t0());
        }
        let cards = vec![
            mastered_a,
            create_card(deck_a, "Q2", "A2", t0()),
            create_card(deck_b, "Q3", "A3", t0()),
        ];

        assert_eq!(mastered_cards(&cards, None).len(), 1);
        assert_eq!(mastered_cards(&cards, Some(deck_a)).len(), 1);
        assert!(mastered_cards(&cards, Some(deck_b)).is_empty());
    }

    #[test]
    fn test_mastery_percentages() {
        let deck = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut mastered = create_card(deck, "Q", "A", t0());
        for _ in 0..scheduler::MASTERY_THRESHOLD {
            mastered = apply_review(&mastered, true, t0());
        }
        let cards = vec![
            mastered,
            create_card(deck, "Q2", "A2", t0()),
            create_card(deck, "Q3", "A3", t0()),
            create_card(other, "Q4", "A4", t0()),
        ];

        // 1 of 3 in the deck, rounded
        assert_eq!(deck_mastery_percentage(&cards, deck), 33);
        assert_eq!(deck_mastery_percentage(&cards, other), 0);
        assert_eq!(overall_mastery_percentage(&cards), 25);
    }

    #[test]
    fn test_percentages_on_empty_input() {
        assert_eq!(deck_mastery_percentage(&[], Uuid::new_v4()), 0);
        assert_eq!(overall_mastery_percentage(&[]), 0);
    }

    #[test]
    fn test_next_review_label_buckets() {
        let deck = Uuid::new_v4();
        let now = t0();

        let cases = [
            (-86401, "Overdue by 2 days"),
            (-7200, "Overdue by 2 hours"),
            (-61, "Overdue by 2 minutes"),
            (-59, "Overdue by 59 seconds"),
            (0, "Now"),
            (59, "In 59 seconds"),
            (60, "In 1 minutes"),
            (61, "In 2 minutes"),
            (3600, "In 1 hours"),
            (86399, "In 24 hours"),
            (86400, "In 1 days"),
            (200000, "In 3 days"),
        ];

        for (offset, expected) in cases {
            let card = card_due_at(deck, now + Duration::seconds(offset));
            assert_eq!(next_review_label(&card, now), expected, "offset {}", offset);
        }
    }
}
