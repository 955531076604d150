use chrono::Utc;
use memodeck::database::db;
use memodeck::models::{Card, CardStatus, Library, ReviewSession, StudyStats, queries, scheduler};
use rusqlite::Connection;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

fn main() {
    env_logger::init();

    let conn = db::init_database().expect("Failed to initialize database");

    if db::get_all_decks(&conn)
        .expect("Failed to read decks")
        .is_empty()
    {
        seed_sample_deck(&conn);
        println!("Sample data created!");
    }

    let library = db::load_library(&conn).expect("Failed to load library");
    let mut stats = db::load_stats(&conn).expect("Failed to load stats");
    stats.reset_streak_if_lapsed(Utc::now());
    db::save_stats(&stats, &conn).expect("Failed to save stats");

    print_dashboard(&library, &stats);

    let conn = Arc::new(Mutex::new(conn));
    run_review_loop(conn);
}

/// First-run seed, so the review loop has something to show.
fn seed_sample_deck(conn: &Connection) {
    let now = Utc::now();
    let deck = memodeck::models::Deck::new("Polish Vocabulary", "Basic phrases", now);
    db::insert_deck(&deck, conn).expect("Failed to seed deck");

    for (front, back) in [
        ("cześć", "hello"),
        ("dziękuję", "thank you"),
        ("proszę", "please"),
    ] {
        let card = scheduler::create_card(deck.id, front, back, now);
        db::insert_card(&card, conn).expect("Failed to seed card");
    }
}

fn print_dashboard(library: &Library, stats: &StudyStats) {
    let now = Utc::now();

    println!("Loaded {} decks", library.decks.len());
    for deck in &library.decks {
        let cards = queries::deck_cards(&library.cards, deck.id);
        let due = queries::due_cards(&library.cards, now, Some(deck.id));
        println!(
            "  - {} ({} cards, {} due, {}% mastered)",
            deck.name,
            cards.len(),
            due.len(),
            queries::deck_mastery_percentage(&library.cards, deck.id),
        );
    }

    let count_status = |status: CardStatus| {
        library
            .cards
            .iter()
            .filter(|card| card.status() == status)
            .count()
    };
    println!(
        "Cards: {} new / {} learning / {} review / {} mastered",
        count_status(CardStatus::New),
        count_status(CardStatus::Learning),
        count_status(CardStatus::Review),
        count_status(CardStatus::Mastered),
    );
    println!(
        "Overall mastery: {}%  Streak: {} days  Accuracy: {}% over {} reviews",
        queries::overall_mastery_percentage(&library.cards),
        stats.streak_count,
        stats.accuracy_percentage(),
        stats.total_reviews,
    );
}

/// Repeatedly drains the due queue, then waits for the user to check again.
/// Intervals are seconds, so missed cards come back within the same sitting.
fn run_review_loop(conn: Arc<Mutex<Connection>>) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let now = Utc::now();
        let library = {
            let guard = conn.lock().expect("connection mutex poisoned");
            db::load_library(&guard).expect("Failed to load library")
        };

        let due: Vec<Card> = queries::due_cards(&library.cards, now, None)
            .into_iter()
            .cloned()
            .collect();

        if due.is_empty() {
            match next_due_hint(&library.cards) {
                Some(hint) => println!("\nNothing due. Next card: {}", hint),
                None => {
                    println!("\nNo cards in the library.");
                    return;
                }
            }
            print!("[Enter] check again, [q] quit: ");
            match prompt(&mut lines) {
                Some(input) if input != "q" => continue,
                _ => return,
            }
        }

        let mut session =
            ReviewSession::new_from_due_cards("All decks".to_string(), due, conn.clone())
                .expect("Failed to start session");

        while let Some(card) = session.current_card().cloned() {
            let deck_name = library
                .deck_by_id(card.deck_id)
                .map(|deck| deck.name.as_str())
                .unwrap_or("?");

            println!("\n{} [{}] [{}]", session.progress_message(), deck_name, card.status());
            println!("Front: {}", card.front);
            print!("[Enter] reveal, [q] quit: ");
            match prompt(&mut lines) {
                Some(input) if input != "q" => {}
                _ => return,
            }

            session.reveal_back();
            println!("Back:  {}", card.back);

            let knew = loop {
                print!("Knew it? [y/n]: ");
                match prompt(&mut lines) {
                    Some(input) if input == "y" => break true,
                    Some(input) if input == "n" => break false,
                    Some(_) => continue,
                    None => return,
                }
            };

            session
                .grade_current_card(knew, Utc::now())
                .expect("Failed to save review");
            session.advance();
        }

        println!(
            "\nSession complete: {}/{} correct. Streak: {} days.",
            session.correct_count(),
            session.total_count(),
            session.stats().streak_count,
        );
    }
}

/// When the card that is due soonest comes up, as a human-readable offset.
fn next_due_hint(cards: &[Card]) -> Option<String> {
    let now = Utc::now();
    cards
        .iter()
        .min_by_key(|card| card.next_review_date)
        .map(|card| queries::next_review_label(card, now))
}

fn prompt(lines: &mut io::Lines<io::StdinLock<'_>>) -> Option<String> {
    io::stdout().flush().ok();
    match lines.next() {
        Some(Ok(line)) => Some(line.trim().to_string()),
        _ => None,
    }
}
