//! Game management

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::rules::HAND_SIZE;
use crate::{
    card, Action, Card, Deck, Event, ExpectAction, GameError, Side, Suit, Table, TurnRole,
};

mod base;
mod log;
mod logging;
pub use base::BaseGame;
pub use log::Log;
pub use logging::LoggingGame;

/// A trait for implementing a game of durak between two sides.
///
/// ## Gameplay
///
/// Each side is dealt six cards, and the next card is turned up to name the trump suit. The
/// trump card goes under the deck, so it is the last card drawn.
///
/// A round begins with the attacker playing any card. The defender must beat it with a higher
/// card of the same suit, or with any trump if the attack is not a trump. Once every attack is
/// beaten, the attacker may throw in another card whose rank is already on the table, or
/// declare the round done. The defender may give up at any point while an attack is open, and
/// takes every card on the table into hand.
///
/// When the attacker declares the round done, the beaten cards are discarded and the roles
/// swap. When the defender takes, the roles stay as they are. Either way, the attacker and then
/// the defender draw back up to six cards.
///
/// Once the deck runs out, the first side to empty its hand wins. If both hands empty at the
/// same time, the game is drawn.
///
/// ## State management
///
/// The side expected to act, and the kind of action it may take, is always known
/// deterministically and may be obtained via [`next_action`](`Game::next_action`). Actions are
/// applied with [`apply_action`](`Game::apply_action`). An action that breaks the rules is
/// rejected and leaves the state untouched.
///
/// ## Events
///
/// Every transition pushes events onto a queue, which may be drained using
/// [`pop_event`](`Game::pop_event`).
pub trait Game {
    /// The upturned trump card.
    fn trump(&self) -> Card;

    /// The current attacker and defender.
    fn role(&self) -> TurnRole;

    /// The current phase of the game.
    fn phase(&self) -> Phase;

    /// Returns the next action that's required to advance the state of the game, or None if the
    /// game is over.
    fn next_action(&self) -> Option<ExpectAction>;

    /// The outcome of the game, if it is over.
    fn outcome(&self) -> Option<Outcome>;

    /// Returns a bundle of state visible to the specified side.
    fn player_state(&self, side: Side) -> PlayerState<'_>;

    /// Returns an owned copy of the state that a human player may see.
    fn snapshot(&self) -> Snapshot;

    /// Applies the specified action.
    fn apply_action(&mut self, action: Action) -> Result<(), GameError>;

    /// Pops the oldest event from the queue of events.
    fn pop_event(&mut self) -> Option<Event>;

    /// The trump suit.
    fn trump_suit(&self) -> Suit {
        self.trump().suit
    }

    /// Returns true once the game is over.
    fn is_over(&self) -> bool {
        self.outcome().is_some()
    }
}

/// The phases of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The table is empty, and the attacker must open the round.
    AttackOpen,
    /// The defender must beat the open attack, or take the table.
    DefenseOpen,
    /// Every attack is beaten. The attacker may throw in, or declare the round done.
    AttackerDeciding,
    /// The round is being resolved. Never observed between actions.
    RoundOver,
    /// The game has ended.
    GameOver,
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::AttackOpen => "attack",
            Phase::DefenseOpen => "defense",
            Phase::AttackerDeciding => "throw-in",
            Phase::RoundOver => "round over",
            Phase::GameOver => "game over",
        })
    }
}

/// The outcome of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The side emptied its hand first.
    Winner(Side),
    /// Both sides emptied their hands at once.
    Draw,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(side) => write!(f, "{side} wins"),
            Outcome::Draw => f.write_str("draw"),
        }
    }
}

/// Initial conditions for a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    /// Each side's hand, as dealt.
    hands: HashMap<Side, Vec<Card>>,
    /// The undealt cards, bottom first.
    deck: Vec<Card>,
    /// The upturned trump card.
    trump: Card,
}

impl Distribution<Deal> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Deal {
        Deal::new(rng.gen()).expect("deck is valid")
    }
}

impl Deal {
    /// Deals from the top of the specified deck: six cards to each side in turn, human first,
    /// and then the trump card, which goes to the bottom of the deck.
    pub fn new(mut deck: Deck) -> Result<Self, GameError> {
        if deck.len() <= 2 * HAND_SIZE {
            return Err(GameError::IncompleteDeck);
        }
        let mut hands: HashMap<Side, Vec<Card>> = HashMap::new();
        for _ in 0..HAND_SIZE {
            for &side in Side::all_sides() {
                let card = deck.draw().expect("deck has enough cards");
                hands.entry(side).or_default().push(card);
            }
        }
        let trump = deck.draw().expect("deck has enough cards");
        deck.put_bottom(trump);
        let mut deal = Self {
            hands,
            deck: deck.into(),
            trump,
        };
        deal.validate()?;
        deal.canonicalize();
        Ok(deal)
    }

    /// Creates an arbitrary position. The deck is listed bottom first. The trump card only names
    /// the trump suit; it need not be in the deck.
    pub fn custom(
        human: Vec<Card>,
        bot: Vec<Card>,
        deck: Vec<Card>,
        trump: Card,
    ) -> Result<Self, GameError> {
        let hands = [(Side::Human, human), (Side::Bot, bot)].into_iter().collect();
        let mut deal = Self { hands, deck, trump };
        deal.validate()?;
        deal.canonicalize();
        Ok(deal)
    }

    /// Creates a [`Deal`] from a shuffled deck.
    pub fn random() -> Self {
        rand::random()
    }

    /// Creates a [`Deal`] from a deck shuffled with a seeded generator.
    pub fn seeded(seed: u64) -> Self {
        StdRng::seed_from_u64(seed).gen()
    }

    /// The specified side's hand, as dealt.
    pub fn hand(&self, side: Side) -> &[Card] {
        self.hands
            .get(&side)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The undealt cards, bottom first.
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// The upturned trump card.
    pub fn trump(&self) -> Card {
        self.trump
    }

    /// The number of cards in play.
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.hands.values().map(Vec::len).sum::<usize>()
    }

    /// Checks that no card appears twice.
    pub fn validate(&self) -> Result<(), GameError> {
        let mut seen = HashSet::with_capacity(self.card_count());
        let all = self.hands.values().flatten().chain(&self.deck);
        for &card in all {
            if !seen.insert(card) {
                return Err(GameError::DuplicateCard(card));
            }
        }
        Ok(())
    }

    /// Sorts each hand by suit, then rank.
    pub fn canonicalize(&mut self) {
        for hand in self.hands.values_mut() {
            card::sort_cards(hand);
        }
    }

    pub(crate) fn into_parts(mut self) -> (HashMap<Side, Vec<Card>>, Deck, Card) {
        for &side in Side::all_sides() {
            self.hands.entry(side).or_default();
        }
        (self.hands, self.deck.into_iter().collect(), self.trump)
    }
}

/// The state visible to a particular side.
#[derive(Debug)]
pub struct PlayerState<'a> {
    /// The side that has access to this state.
    pub side: Side,
    /// The upturned trump card.
    pub trump: Card,
    /// The current attacker and defender.
    pub role: TurnRole,
    /// The current phase.
    pub phase: Phase,
    /// The side's hand, sorted by suit and rank.
    pub hand: &'a [Card],
    /// The number of cards in the opponent's hand.
    pub opponent_hand_size: usize,
    /// The number of cards left in the deck, including the trump card.
    pub deck_len: usize,
    /// The cards on the table.
    pub table: &'a Table,
}

impl<'a> PlayerState<'a> {
    /// The trump suit.
    pub fn trump_suit(&self) -> Suit {
        self.trump.suit
    }

    /// The number of cards in the defender's hand.
    pub fn defender_hand_size(&self) -> usize {
        if self.role.defender == self.side {
            self.hand.len()
        } else {
            self.opponent_hand_size
        }
    }
}

/// A copy of the game state, as seen by the human player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub human_hand: Vec<Card>,
    pub bot_hand_size: usize,
    pub table: Table,
    pub deck_len: usize,
    pub trump: Card,
    pub role: TurnRole,
    pub phase: Phase,
    pub outcome: Option<Outcome>,
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;
    use maplit::hashmap;

    use super::*;
    use crate::card::{card, cards};

    #[test]
    fn test_deal() {
        let deck: Deck = Deck::default();
        let top: Vec<_> = deck.as_slice().iter().rev().copied().collect();
        let deal = Deal::new(deck).unwrap();

        let mut human: Vec<_> = top.iter().step_by(2).take(6).copied().collect();
        let mut bot: Vec<_> = top.iter().skip(1).step_by(2).take(6).copied().collect();
        card::sort_cards(&mut human);
        card::sort_cards(&mut bot);
        assert_eq!(deal.hand(Side::Human), human.as_slice());
        assert_eq!(deal.hand(Side::Bot), bot.as_slice());

        assert_eq!(deal.trump(), top[12]);
        assert_eq!(deal.deck().len(), 24);
        assert_eq!(deal.deck()[0], deal.trump());
        assert_eq!(deal.card_count(), 36);
    }

    #[test]
    fn test_seeded_deal() {
        assert_eq!(Deal::seeded(42), Deal::seeded(42));
        assert_eq!(Deal::seeded(42).card_count(), 36);
    }

    #[test]
    fn test_deal_errors() {
        let short: Deck = cards(&["6s", "7s", "8s"]).into_iter().collect();
        assert_matches!(Deal::new(short), Err(GameError::IncompleteDeck));

        let dup = Deal::custom(cards(&["6s"]), cards(&["6s"]), vec![], card("6h"));
        assert_matches!(dup, Err(GameError::DuplicateCard(c)) if c == card("6s"));
    }

    #[test]
    fn test_custom_deal() {
        let deal = Deal::custom(
            cards(&["9s", "ac", "6s"]),
            vec![],
            cards(&["6c", "7d"]),
            card("6c"),
        )
        .unwrap();
        assert_eq!(deal.card_count(), 5);

        let (hands, deck, trump) = deal.into_parts();
        assert_eq!(
            hands,
            hashmap! {
                Side::Human => cards(&["6s", "9s", "ac"]),
                Side::Bot => vec![],
            }
        );
        assert_eq!(deck.as_slice(), cards(&["6c", "7d"]).as_slice());
        assert_eq!(trump, card("6c"));
    }

    #[test]
    fn test_deal_serde() {
        let deal = Deal::seeded(3);
        let json = serde_json::to_string(&deal).unwrap();
        let back: Deal = serde_json::from_str(&json).unwrap();
        assert_eq!(deal, back);
    }
}
