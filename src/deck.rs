//! A deck of cards.

use std::iter::FromIterator;

use rand::distributions::{Distribution, Standard};
use rand::seq::SliceRandom;
use rand::Rng;

/// A deck of cards. The top of the deck is the end of the underlying vector, so cards are drawn
/// from the tail and the first element is the bottom card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck<C> {
    cards: Vec<C>,
}

impl<C> Distribution<Deck<C>> for Standard
where
    Deck<C>: Default,
{
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Deck<C> {
        let mut deck = Deck::default();
        deck.shuffle(rng);
        deck
    }
}

impl<C> FromIterator<C> for Deck<C> {
    fn from_iter<T: IntoIterator<Item = C>>(iter: T) -> Self {
        let cards = iter.into_iter().collect();
        Self { cards }
    }
}

impl<C> From<Deck<C>> for Vec<C> {
    fn from(deck: Deck<C>) -> Self {
        deck.cards
    }
}

impl<C> Deck<C> {
    /// The number of cards remaining in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if no cards remain.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The cards in the deck, bottom first.
    pub fn as_slice(&self) -> &[C] {
        &self.cards
    }

    /// Shuffles the deck in place. Every permutation is equally likely.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draws the top card, if any.
    pub fn draw(&mut self) -> Option<C> {
        self.cards.pop()
    }

    /// Removes up to `n` cards from the top of the deck.
    pub fn take(&mut self, n: usize) -> Vec<C> {
        let idx = self.cards.len().saturating_sub(n);
        self.cards.split_off(idx)
    }

    /// Slides a card under the deck, so that it is drawn last.
    pub fn put_bottom(&mut self, card: C) {
        self.cards.insert(0, card);
    }
}
