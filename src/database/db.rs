//! Database operations for the flashcard store
//!
//! Handles SQLite initialization and CRUD for decks, cards with their
//! scheduling state, and the study-stats snapshot. Timestamps are stored as
//! RFC 3339 text; rows that fail to parse back abort the load.

use crate::error::StorageError;
use crate::models::{Card, Deck, Library, StudyStats};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

const DATABASE_FILE: &str = "memodeck.sqlite3";
const STATS_KEY: &str = "study_stats";

/// Opens the database file and creates the schema if needed
pub fn init_database() -> Result<Connection, StorageError> {
    let conn = Connection::open(DATABASE_FILE)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Creates tables for decks, cards, and app state
///
/// Split out from [`init_database`] so tests can run against an in-memory
/// connection.
pub fn init_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS decks (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            last_reviewed_at TEXT
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS cards (
            id TEXT PRIMARY KEY,
            deck_id TEXT NOT NULL,
            front TEXT NOT NULL,
            back TEXT NOT NULL,
            created_at TEXT NOT NULL,
            last_reviewed_at TEXT,
            next_review_date TEXT NOT NULL,
            interval_secs INTEGER NOT NULL DEFAULT 0,
            consecutive_correct INTEGER NOT NULL DEFAULT 0,
            is_mastered INTEGER NOT NULL DEFAULT 0,
            repetitions INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (deck_id) REFERENCES decks(id)
        )",
        (),
    )?;

    // Key/value table for small state blobs (study stats snapshot)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|source| StorageError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
}

fn parse_id(value: &str) -> Result<Uuid, StorageError> {
    Uuid::parse_str(value).map_err(|source| StorageError::InvalidId {
        value: value.to_string(),
        source,
    })
}

/// Creates a new deck
pub fn insert_deck(deck: &Deck, conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO decks (id, name, description, created_at, last_reviewed_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            deck.id.to_string(),
            deck.name,
            deck.description,
            format_timestamp(deck.created_at),
            deck.last_reviewed_at.map(format_timestamp),
        ],
    )?;
    log::info!("deck '{}' created", deck.name);
    Ok(())
}

/// Updates a deck's name, description, and last-reviewed time
pub fn update_deck(deck: &Deck, conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE decks SET name = ?1, description = ?2, last_reviewed_at = ?3 WHERE id = ?4",
        params![
            deck.name,
            deck.description,
            deck.last_reviewed_at.map(format_timestamp),
            deck.id.to_string(),
        ],
    )?;
    Ok(())
}

/// Stamps a deck's last-reviewed time; called after grading one of its cards
pub fn touch_deck_reviewed(
    deck_id: Uuid,
    now: DateTime<Utc>,
    conn: &Connection,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE decks SET last_reviewed_at = ?1 WHERE id = ?2",
        params![format_timestamp(now), deck_id.to_string()],
    )?;
    Ok(())
}

/// Deletes a deck together with all of its cards
pub fn delete_deck(deck_id: Uuid, conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "DELETE FROM cards WHERE deck_id = ?1",
        params![deck_id.to_string()],
    )?;
    conn.execute(
        "DELETE FROM decks WHERE id = ?1",
        params![deck_id.to_string()],
    )?;
    Ok(())
}

/// Retrieves all decks in creation order
pub fn get_all_decks(conn: &Connection) -> Result<Vec<Deck>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, created_at, last_reviewed_at FROM decks ORDER BY rowid",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    let mut decks = Vec::with_capacity(rows.len());
    for (id, name, description, created_at, last_reviewed_at) in rows {
        decks.push(Deck {
            id: parse_id(&id)?,
            name,
            description,
            created_at: parse_timestamp(&created_at)?,
            last_reviewed_at: last_reviewed_at.as_deref().map(parse_timestamp).transpose()?,
        });
    }
    Ok(decks)
}

/// Inserts a card with its full scheduling state
pub fn insert_card(card: &Card, conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO cards (id, deck_id, front, back, created_at, last_reviewed_at,
                            next_review_date, interval_secs, consecutive_correct,
                            is_mastered, repetitions)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            card.id.to_string(),
            card.deck_id.to_string(),
            card.front,
            card.back,
            format_timestamp(card.created_at),
            card.last_reviewed_at.map(format_timestamp),
            format_timestamp(card.next_review_date),
            card.interval,
            card.consecutive_correct,
            card.is_mastered,
            card.repetitions,
        ],
    )?;
    Ok(())
}

/// Writes a card's content and scheduling state back after a review or edit
pub fn update_card(card: &Card, conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE cards
         SET front = ?1, back = ?2, last_reviewed_at = ?3, next_review_date = ?4,
             interval_secs = ?5, consecutive_correct = ?6, is_mastered = ?7, repetitions = ?8
         WHERE id = ?9",
        params![
            card.front,
            card.back,
            card.last_reviewed_at.map(format_timestamp),
            format_timestamp(card.next_review_date),
            card.interval,
            card.consecutive_correct,
            card.is_mastered,
            card.repetitions,
            card.id.to_string(),
        ],
    )?;
    Ok(())
}

pub fn delete_card(card_id: Uuid, conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "DELETE FROM cards WHERE id = ?1",
        params![card_id.to_string()],
    )?;
    Ok(())
}

type CardRow = (
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    String,
    i64,
    u32,
    bool,
    u32,
);

fn card_from_row(row: CardRow) -> Result<Card, StorageError> {
    let (
        id,
        deck_id,
        front,
        back,
        created_at,
        last_reviewed_at,
        next_review_date,
        interval,
        consecutive_correct,
        is_mastered,
        repetitions,
    ) = row;

    Ok(Card {
        id: parse_id(&id)?,
        deck_id: parse_id(&deck_id)?,
        front,
        back,
        created_at: parse_timestamp(&created_at)?,
        last_reviewed_at: last_reviewed_at.as_deref().map(parse_timestamp).transpose()?,
        next_review_date: parse_timestamp(&next_review_date)?,
        interval,
        consecutive_correct,
        is_mastered,
        repetitions,
    })
}

fn query_cards(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Card>, StorageError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
                row.get(10)?,
            ))
        })?
        .collect::<Result<Vec<CardRow>, rusqlite::Error>>()?;

    rows.into_iter().map(card_from_row).collect()
}

const CARD_COLUMNS: &str = "id, deck_id, front, back, created_at, last_reviewed_at, \
                            next_review_date, interval_secs, consecutive_correct, \
                            is_mastered, repetitions";

/// Retrieves every card, in insertion order. Due filtering happens in
/// memory over this snapshot, not in SQL.
pub fn get_all_cards(conn: &Connection) -> Result<Vec<Card>, StorageError> {
    let sql = format!("SELECT {} FROM cards ORDER BY rowid", CARD_COLUMNS);
    query_cards(conn, &sql, &[])
}

/// Retrieves all cards belonging to one deck, in insertion order
pub fn get_cards_for_deck(deck_id: Uuid, conn: &Connection) -> Result<Vec<Card>, StorageError> {
    let sql = format!(
        "SELECT {} FROM cards WHERE deck_id = ?1 ORDER BY rowid",
        CARD_COLUMNS
    );
    query_cards(conn, &sql, &[&deck_id.to_string()])
}

/// Loads the whole collection snapshot the query layer operates on
pub fn load_library(conn: &Connection) -> Result<Library, StorageError> {
    Ok(Library {
        decks: get_all_decks(conn)?,
        cards: get_all_cards(conn)?,
    })
}

/// Loads the study-stats snapshot, or a fresh one if none was saved yet
pub fn load_stats(conn: &Connection) -> Result<StudyStats, StorageError> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM app_state WHERE key = ?1",
            params![STATS_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(StudyStats::default()),
    }
}

/// Saves the study-stats snapshot as one JSON value
pub fn save_stats(stats: &StudyStats, conn: &Connection) -> Result<(), StorageError> {
    let json = serde_json::to_string(stats)?;
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![STATS_KEY, json],
    )?;
    Ok(())
}
