//! The 36-card pack.

use std::fmt::Display;
use std::str::FromStr;

use ansi_term::ANSIString;
use serde::{Deserialize, Serialize};

use crate::deck;

/// Stable identifier for a card, in `1..=36`.
pub type CardId = u8;

/// Card suit. The declaration order is the order used for card ids and for sorting hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
}

impl Suit {
    /// Returns all suits, in id order.
    pub fn all_suits() -> &'static [Suit; 4] {
        static SUITS: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];
        &SUITS
    }

    fn index(self) -> u8 {
        self as u8
    }

    /// Returns true for hearts and diamonds.
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Heart | Suit::Diamond)
    }

    /// Returns the suit symbol, decorated with ANSI color codes.
    pub fn to_ansi_string(self) -> ANSIString<'static> {
        use ansi_term::Colour::Red;
        if self.is_red() {
            Red.paint(self.to_string())
        } else {
            self.to_string().into()
        }
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Suit::Spade => "♠",
            Suit::Heart => "♥",
            Suit::Diamond => "♦",
            Suit::Club => "♣",
        })
    }
}

impl TryFrom<char> for Suit {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            'S' | 's' | '♠' => Suit::Spade,
            'H' | 'h' | '♥' => Suit::Heart,
            'D' | 'd' | '♦' => Suit::Diamond,
            'C' | 'c' | '♣' => Suit::Club,
            _ => return Err(()),
        })
    }
}

impl FromStr for Suit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Suit::try_from(c),
            _ => Err(()),
        }
    }
}

/// Card rank, ordered from low to high. This ordering is the only rank comparison used by the
/// rules, the robot, and hand sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Returns all ranks, from low to high.
    pub fn all_ranks() -> &'static [Rank; 9] {
        static RANKS: [Rank; 9] = [
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
            Rank::Ace,
        ];
        &RANKS
    }

    fn index(self) -> u8 {
        self as u8
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        })
    }
}

impl FromStr for Rank {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(()),
        })
    }
}

/// A playing card. Immutable once dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// Card rank.
    pub rank: Rank,
    /// Card suit.
    pub suit: Suit,
}

impl Card {
    /// Creates a new [`Card`].
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// The card's id. Ids are assigned suit-major, rank-minor, starting from 1.
    pub fn id(self) -> CardId {
        self.suit.index() * 9 + self.rank.index() + 1
    }

    /// Looks up a card by id.
    pub fn from_id(id: CardId) -> Option<Card> {
        let index = usize::from(id.checked_sub(1)?);
        let suit = *Suit::all_suits().get(index / 9)?;
        let rank = Rank::all_ranks()[index % 9];
        Some(Card { rank, suit })
    }

    /// Returns true if the card belongs to the trump suit.
    pub fn is_trump(self, trump: Suit) -> bool {
        self.suit == trump
    }

    /// Returns a string representation of the card, decorated with ANSI color codes.
    pub fn to_ansi_string(self) -> ANSIString<'static> {
        use ansi_term::Colour::Red;
        if self.suit.is_red() {
            Red.paint(self.to_string())
        } else {
            self.to_string().into()
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suit_char = s.chars().last().ok_or(())?;
        let suit = Suit::try_from(suit_char)?;
        let rank = s[..s.len() - suit_char.len_utf8()].parse()?;
        Ok(Card { rank, suit })
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Card::from_str(&s).map_err(|()| serde::de::Error::custom(format!("invalid card {s:?}")))
    }
}

/// Sorts cards by suit, then by rank.
pub fn sort_cards(cards: &mut [Card]) {
    cards.sort_unstable_by_key(|c| (c.suit, c.rank));
}

/// A 36-card deck.
pub type Deck = deck::Deck<Card>;

impl Default for Deck {
    fn default() -> Self {
        itertools::iproduct!(Suit::all_suits(), Rank::all_ranks())
            .map(|(&suit, &rank)| Card { rank, suit })
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn card(s: &str) -> Card {
    Card::from_str(s).unwrap()
}

#[cfg(test)]
pub(crate) fn cards(s: &[&str]) -> Vec<Card> {
    s.iter().map(|s| card(s)).collect()
}
