//! CLI cribbage example: you against a very simple computer opponent.
//!
//! Set `RUST_LOG=cribrs=debug` to watch the engine's tracing output.

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use cribrs::{
    Action, Card, Game, GameOptions, GameState, HandScore, Move, MoveOutcome, Phase, ScoreSource,
    Seat, Suit,
};
use tracing_subscriber::EnvFilter;

const GAME_ID: &str = "cli";
const YOU: &str = "you@example.com";
const CPU: &str = "cpu@example.com";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("Cribbage CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let game = match Game::new(GameOptions::default(), GAME_ID, YOU, CPU, seed) {
        Ok(game) => game,
        Err(err) => {
            println!("Deal error: {err}");
            return;
        }
    };

    while game.winner().is_none() {
        let state = game.state();
        let mv = match actor(&state) {
            Some(Seat::Player1) => match prompt_move(&state) {
                Some(mv) => mv,
                None => {
                    println!("Goodbye.");
                    return;
                }
            },
            Some(Seat::Player2) => cpu_move(&state),
            None => break,
        };

        match game.submit(&mv) {
            Ok(outcome) => report(&outcome),
            Err(err) => println!("Move error: {err}"),
        }
    }

    let state = game.state();
    print_scores(&state);
    match state.winner() {
        Some(Seat::Player1) => println!("You win!"),
        Some(Seat::Player2) => println!("The computer wins."),
        None => {}
    }
}

/// Seat that has to act next.
fn actor(state: &GameState) -> Option<Seat> {
    match &state.phase {
        Phase::Discard(phase) => Some(if phase.discarded[0] {
            Seat::Player2
        } else {
            Seat::Player1
        }),
        Phase::Play(phase) => Some(phase.turn),
        Phase::Count(phase) => Some(phase.next),
        Phase::Waiting | Phase::Finished { .. } => None,
    }
}

fn prompt_move(state: &GameState) -> Option<Move> {
    print_scores(state);
    let held = state.held(Seat::Player1);
    println!("Your cards: {}", format_cards(held));

    match &state.phase {
        Phase::Discard(_) => {
            let crib = if state.dealer == Seat::Player1 {
                "your"
            } else {
                "the computer's"
            };
            let input = prompt_line(&format!("Discard two cards to {crib} crib: "));
            if input == "q" {
                return None;
            }
            let ids = input.split_whitespace().map(str::to_string).collect();
            Some(raw_move(Action::Discard, None, Some(ids)))
        }
        Phase::Play(phase) => {
            println!(
                "Count: {} ({})",
                phase.sequence.total(),
                format_cards(
                    &phase
                        .sequence
                        .current_count()
                        .iter()
                        .map(|play| play.card)
                        .collect::<Vec<_>>()
                )
            );
            let input = prompt_line("Play a card, or 'g' for go: ");
            match input.as_str() {
                "q" => None,
                "g" | "go" => Some(Move::go(GAME_ID, YOU)),
                id => Some(raw_move(Action::PlayCard, Some(id.to_string()), None)),
            }
        }
        Phase::Count(_) => {
            if prompt_line("Press enter to count your hand: ") == "q" {
                return None;
            }
            Some(Move::count(GAME_ID, YOU))
        }
        Phase::Waiting | Phase::Finished { .. } => None,
    }
}

/// Builds a move from typed card ids; the engine reports any that are wrong.
fn raw_move(action: Action, card_id: Option<String>, card_ids: Option<Vec<String>>) -> Move {
    Move {
        game_id: GAME_ID.to_string(),
        player_email: YOU.to_string(),
        action,
        card_id,
        card_ids,
    }
}

/// Discards the first two cards, plays the first card that fits.
fn cpu_move(state: &GameState) -> Move {
    let held = state.held(Seat::Player2);
    match &state.phase {
        Phase::Play(phase) => held
            .iter()
            .find(|&&card| phase.sequence.can_play(card))
            .map_or_else(
                || Move::go(GAME_ID, CPU),
                |&card| Move::play_card(GAME_ID, CPU, card),
            ),
        Phase::Count(_) => Move::count(GAME_ID, CPU),
        _ => Move::discard(GAME_ID, CPU, [held[0], held[1]]),
    }
}

fn report(outcome: &MoveOutcome) {
    for event in &outcome.events {
        let who = if event.seat == Seat::Player1 {
            "You"
        } else {
            "Computer"
        };
        let why = match &event.source {
            ScoreSource::Heels => "his heels".to_string(),
            ScoreSource::Pegging(score) => score
                .reasons
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            ScoreSource::Hand(score) => format!("hand: {}", format_breakdown(score)),
            ScoreSource::Crib(score) => format!("crib: {}", format_breakdown(score)),
        };
        println!("{who} score {} ({why})", event.points);
    }
}

fn format_breakdown(score: &HandScore) -> String {
    if score.breakdown.is_empty() {
        return "nineteen".to_string();
    }
    score
        .breakdown
        .iter()
        .map(|(category, points)| format!("{category} {points}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_scores(state: &GameState) {
    println!(
        "\nYou {} | Computer {} | target {}",
        state.scores.get(Seat::Player1),
        state.scores.get(Seat::Player2),
        state.options.target_score
    );
    if let Some(cut) = state.cut() {
        println!("Cut: {}", format_card(cut));
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => return "q".to_string(),
        Ok(_) => {}
    }
    input.trim().to_lowercase()
}

fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(none)".to_string();
    }
    cards
        .iter()
        .map(|&card| format_card(card))
        .collect::<Vec<_>>()
        .join(" ")
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_card(card: Card) -> String {
    let code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    colorize(&card.to_string(), code)
}
