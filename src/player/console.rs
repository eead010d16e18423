//! Simple console interactive player.

use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use ansi_term::{ANSIString, ANSIStrings};

use super::Player;
use crate::game::PlayerState;
use crate::{ActionData, ActionType, Card, Event, Outcome, Rejection, Table};

pub struct Console {
    color: bool,
}

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Card(Card),
    Done,
    Take,
}

impl FromStr for Input {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "done" | "d" | "pass" => Ok(Input::Done),
            "take" | "t" => Ok(Input::Take),
            s => match s.strip_prefix('#') {
                Some(id) => {
                    let id = id.parse().map_err(|_| ())?;
                    Card::from_id(id).map(Input::Card).ok_or(())
                }
                None => Card::from_str(s).map(Input::Card),
            },
        }
    }
}

struct YesNo(bool);

impl FromStr for YesNo {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(YesNo(true)),
            "n" | "no" => Ok(YesNo(false)),
            _ => Err(()),
        }
    }
}

fn prompt<T: FromStr, S: Display>(prompt: S) -> T {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        let mut buffer = String::new();
        print!("{prompt}");
        stdout.flush().expect("flush");
        if stdin.read_line(&mut buffer).expect("read") == 0 {
            // End of input.
            std::process::exit(0);
        }
        let trimmed = buffer.trim();
        if !trimmed.is_empty() {
            if let Ok(obj) = T::from_str(trimmed) {
                return obj;
            }
            println!("Invalid input, try again");
        }
    }
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Asks whether to deal another game.
    pub fn play_again(&self) -> bool {
        let answer: YesNo = prompt("Play again? [y/n] ");
        answer.0
    }

    fn format(&self, s: &ANSIStrings) -> String {
        if self.color {
            s.to_string()
        } else {
            ansi_term::unstyle(s)
        }
    }

    fn format_card(&self, card: Card) -> String {
        self.format(&ANSIStrings(&[card.to_ansi_string()]))
    }

    fn format_cards(&self, cards: &[Card]) -> String {
        let mut parts: Vec<ANSIString> = vec![];
        for (ii, card) in cards.iter().enumerate() {
            if ii > 0 {
                parts.push(", ".into());
            }
            parts.push(card.to_ansi_string());
        }
        self.format(&ANSIStrings(&parts))
    }

    fn format_table(&self, table: &Table) -> String {
        let mut parts: Vec<ANSIString> = vec!["[".into()];
        for (i, m) in table.iter().enumerate() {
            if i != 0 {
                parts.push(", ".into());
            }
            parts.push(m.attack.to_ansi_string());
            parts.push("/".into());
            match m.defense {
                Some(card) => parts.push(card.to_ansi_string()),
                None => parts.push("_".into()),
            }
        }
        parts.push("]".into());
        self.format(&ANSIStrings(&parts))
    }

    fn show(&self, state: &PlayerState) {
        println!(
            "Trump: {}  Deck: {}  Opponent: {} cards",
            self.format_card(state.trump),
            state.deck_len,
            state.opponent_hand_size
        );
        if !state.table.is_empty() {
            println!("Table: {}", self.format_table(state.table));
        }
        println!("Hand: {}", self.format_cards(state.hand));
    }

    fn read(&self, state: &PlayerState, question: &str) -> ActionData {
        self.show(state);
        match prompt(question) {
            Input::Card(card) if state.side == state.role.defender => ActionData::Defend { card },
            Input::Card(card) => ActionData::Attack { card },
            Input::Done => ActionData::Done,
            Input::Take => ActionData::Take,
        }
    }
}

impl Player for Console {
    fn take_action(&self, state: PlayerState, action: ActionType) -> ActionData {
        match action {
            ActionType::Attack => self.read(&state, "Attack? "),
            ActionType::ThrowIn => self.read(&state, "Throw in (or done)? "),
            ActionType::Defend => self.read(&state, "Beat (or take)? "),
        }
    }

    fn notify(&self, state: PlayerState, event: &Event) {
        match event {
            Event::Deal(trump) => {
                println!("You are {}", state.side);
                println!("Trump card: {}", self.format_card(*trump));
            }
            Event::Attack(side, card) => println!("{side}: attacks {}", self.format_card(*card)),
            Event::Defend(side, card) => println!("{side}: beats with {}", self.format_card(*card)),
            Event::Take(side, cards) => println!("{side}: takes {}", self.format_cards(cards)),
            Event::Discard(cards) => println!("Discarded {}", self.format_cards(cards)),
            Event::Draw(side, count) => println!("{side}: draws {count}"),
            Event::RoundOver(role) => println!("{} attacks next", role.attacker),
            Event::GameOver(outcome) => match outcome {
                Outcome::Winner(side) if *side == state.side => println!("You win!"),
                Outcome::Winner(_) => println!("You lose."),
                Outcome::Draw => println!("Draw."),
            },
        }
    }

    fn handle_error(&self, err: Rejection) -> bool {
        println!("Error: {err}");
        true
    }
}
