//! Two-player durak, human against robot.
//!
//! The rules live in [`BaseGame`], a state machine that accepts [`Action`]s and rejects any
//! that break the rules. A [`Session`] wraps a game for an interactive front end: it schedules
//! the robot's turns, and restarts games.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use tracing::info;

mod action;
mod card;
mod config;
mod deck;
mod error;
mod game;
mod player;
mod rules;
mod session;
mod side;
mod table;
pub use self::action::{Action, ActionData, ActionType, ExpectAction};
pub use self::card::{sort_cards, Card, CardId, Deck, Rank, Suit};
pub use self::config::{Config, DEFAULT_BOT_DELAY_MS};
pub use self::error::{GameError, Rejection};
pub use self::game::{
    BaseGame, Deal, Game, Log, LoggingGame, Outcome, Phase, PlayerState, Snapshot,
};
pub use self::player::{Console, Player, Robot, SharedPlayer};
pub use self::rules::{can_beat, is_throw_in_legal, max_attacks, HAND_SIZE, MAX_ATTACKS};
pub use self::session::{BotTurn, Session};
pub use self::side::{Side, TurnRole};
pub use self::table::{Move, Table};

/// An event that occurs during the game.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The cards were dealt, and the trump card turned up.
    Deal(Card),
    /// A side played an attack card.
    Attack(Side, Card),
    /// A side beat the open attack.
    Defend(Side, Card),
    /// The defender took the table.
    Take(Side, Vec<Card>),
    /// The beaten cards were discarded.
    Discard(Vec<Card>),
    /// A side drew cards from the deck.
    Draw(Side, usize),
    /// The round is over, and the next one starts with these roles.
    RoundOver(TurnRole),
    /// The game is over.
    GameOver(Outcome),
}

/// Runs games against the robot on the console, until the human has had enough.
///
/// If `save` is specified, the log of the last game is written there as JSON.
pub fn cli_main(config: Config, save: Option<&Path>) -> anyhow::Result<()> {
    let console = Console::new(config.color);
    let mut session = Session::new(config);
    loop {
        play_console_game(&console, &mut session)?;
        if !console.play_again() {
            break;
        }
        session.new_game();
    }

    if let Some(path) = save {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), session.game().log())
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "saved game log");
    }
    Ok(())
}

fn play_console_game(console: &Console, session: &mut Session) -> anyhow::Result<()> {
    loop {
        while let Some(event) = session.pop_event() {
            console.notify(session.player_state(Side::Human), &event);
        }
        if let Some(turn) = session.pending_bot_turn() {
            std::thread::sleep(turn.delay);
            session.play_bot_turn(turn)?;
            continue;
        }
        let Some(expect) = session.next_action() else {
            return Ok(());
        };
        let data = console.take_action(session.player_state(Side::Human), expect.action);
        match session.apply(expect.with_data(data)) {
            Err(GameError::Rejected(err)) if console.handle_error(err.clone()) => continue,
            Err(err) => return Err(err.into()),
            Ok(()) => (),
        }
    }
}
