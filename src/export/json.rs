//! JSON import/export for decks.
//! A deck travels as one document with its cards, scheduling state included,
//! so progress survives a move between machines.

use crate::error::ExportError;
use crate::models::{Card, Deck};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk document: a deck plus its cards.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckExport {
    pub deck: Deck,
    pub cards: Vec<Card>,
}

/// Exports a deck and its cards to a pretty-printed JSON file.
pub fn export_deck_to_path(
    deck: &Deck,
    cards: &[Card],
    path: &Path,
) -> Result<(), ExportError> {
    let document = DeckExport {
        deck: deck.clone(),
        cards: cards.to_vec(),
    };
    let json_string = serde_json::to_string_pretty(&document)?;
    fs::write(path, json_string).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("deck '{}' exported to {}", deck.name, path.display());
    Ok(())
}

/// Imports a deck document from a JSON file.
/// Returns an error if the file is missing or not a valid deck document.
pub fn import_deck(path: &Path) -> Result<DeckExport, ExportError> {
    let contents = fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document: DeckExport = serde_json::from_str(&contents)?;
    log::info!(
        "deck '{}' imported from {} ({} cards)",
        document.deck.name,
        path.display(),
        document.cards.len()
    );
    Ok(document)
}
