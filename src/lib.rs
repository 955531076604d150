pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use error::{ExportError, StorageError};
pub use models::{Card, CardStatus, Deck, Library, ReviewSession, StudyStats};
