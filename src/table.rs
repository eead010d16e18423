//! The cards on the table during a round.

use std::collections::BTreeSet;
use std::fmt::Display;

use delegate::delegate;
use serde::{Deserialize, Serialize};

use crate::{Card, Rank};

/// A single attack card, and the card that beat it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The card played by the attacker.
    pub attack: Card,
    /// The card played by the defender, once the attack has been beaten.
    pub defense: Option<Card>,
}

impl Move {
    /// Creates an open move.
    pub fn new(attack: Card) -> Self {
        Self {
            attack,
            defense: None,
        }
    }

    /// A move is open until the defender beats it.
    pub fn is_open(&self) -> bool {
        self.defense.is_none()
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.defense {
            Some(defense) => write!(f, "{}/{}", self.attack, defense),
            None => write!(f, "{}/_", self.attack),
        }
    }
}

/// The moves played this round, in order. Moves are only ever appended; the table is cleared all
/// at once when the round ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    moves: Vec<Move>,
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, m) in self.moves.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{m}")?;
        }
        write!(f, "]")
    }
}

impl Table {
    delegate! {
        to self.moves {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn iter(&self) -> std::slice::Iter<'_, Move>;
            pub fn last(&self) -> Option<&Move>;
        }
    }

    /// Returns true if every move has been beaten. An empty table is trivially defended.
    pub fn is_fully_defended(&self) -> bool {
        self.moves.iter().all(|m| !m.is_open())
    }

    /// Returns the open move, if there is one.
    pub fn open_move(&self) -> Option<&Move> {
        self.moves.iter().find(|m| m.is_open())
    }

    /// The ranks of all cards on the table, attack and defense alike.
    pub fn ranks_on_table(&self) -> BTreeSet<Rank> {
        self.cards().map(|c| c.rank).collect()
    }

    /// The number of attack cards played this round.
    pub fn attack_count(&self) -> usize {
        self.moves.len()
    }

    /// The number of attack cards that have been beaten.
    pub fn defended_count(&self) -> usize {
        self.moves.iter().filter(|m| !m.is_open()).count()
    }

    /// Iterates over every card on the table.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.moves
            .iter()
            .flat_map(|m| std::iter::once(m.attack).chain(m.defense))
    }

    /// Opens a new move with the specified attack card.
    pub(crate) fn push(&mut self, attack: Card) {
        assert!(
            self.open_move().is_none(),
            "cannot attack while a move is open"
        );
        self.moves.push(Move::new(attack));
    }

    /// Beats the open move with the specified card.
    pub(crate) fn beat(&mut self, defense: Card) {
        let open = self
            .moves
            .iter_mut()
            .find(|m| m.is_open())
            .expect("an open move is required to defend");
        open.defense = Some(defense);
    }

    /// Removes every card from the table.
    pub(crate) fn clear(&mut self) -> Vec<Card> {
        let cards = self.cards().collect();
        self.moves.clear();
        cards
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::card::{card, cards};

    #[test]
    fn test_table() {
        let mut table = Table::default();
        assert!(table.is_fully_defended());
        assert!(table.open_move().is_none());
        assert!(table.ranks_on_table().is_empty());

        table.push(card("7s"));
        assert!(!table.is_fully_defended());
        assert_eq!(table.open_move(), Some(&Move::new(card("7s"))));

        table.beat(card("9s"));
        assert!(table.is_fully_defended());
        assert_eq!(table.defended_count(), 1);
        assert_eq!(
            table.ranks_on_table(),
            [Rank::Seven, Rank::Nine].into_iter().collect()
        );

        table.push(card("9h"));
        assert_eq!(table.attack_count(), 2);
        assert_eq!(table.defended_count(), 1);
        assert_eq!(table.to_string(), "[7♠/9♠, 9♥/_]");

        assert_eq!(table.clear(), cards(&["7s", "9s", "9h"]));
        assert!(table.is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot attack while a move is open")]
    fn test_push_while_open() {
        let mut table = Table::default();
        table.push(card("7s"));
        table.push(card("7h"));
    }
}
