//! In-memory snapshot of all decks and cards, loaded from and persisted to
//! the database as a whole.
use super::{Card, Deck};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct Library {
    pub decks: Vec<Deck>,
    pub cards: Vec<Card>,
}

impl Library {
    pub fn deck_by_id(&self, deck_id: Uuid) -> Option<&Deck> {
        self.decks.iter().find(|deck| deck.id == deck_id)
    }

    pub fn deck_by_name(&self, name: &str) -> Option<&Deck> {
        self.decks.iter().find(|deck| deck.name == name)
    }
}
