//! Base game.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, info};

use super::{Deal, Game, Outcome, Phase, PlayerState, Snapshot};
use crate::rules::{self, HAND_SIZE};
use crate::{
    card, Action, ActionData, ActionType, Card, Deck, Event, ExpectAction, GameError, Rejection,
    Side, Table, TurnRole,
};

/// The main state machine for the game.
///
/// A new game starts in `AttackOpen`, with the human attacking. An attack moves the game to
/// `DefenseOpen`; a successful defence moves it to `AttackerDeciding`, from which the attacker
/// either throws in (back to `DefenseOpen`) or declares the round done. Declaring done, or the
/// defender taking the table, passes through `RoundOver` and lands in `AttackOpen` for the next
/// round, or in `GameOver`.
#[derive(Debug)]
pub struct BaseGame {
    trump: Card,
    deck: Deck,
    hands: HashMap<Side, Vec<Card>>,
    table: Table,
    discard: Vec<Card>,
    role: TurnRole,
    phase: Phase,
    outcome: Option<Outcome>,
    events: VecDeque<Event>,
}

impl From<Deal> for BaseGame {
    fn from(deal: Deal) -> Self {
        let (hands, deck, trump) = deal.into_parts();
        let mut game = BaseGame {
            trump,
            deck,
            hands,
            table: Table::default(),
            discard: vec![],
            role: TurnRole::attacked_by(Side::Human),
            phase: Phase::AttackOpen,
            outcome: None,
            events: [Event::Deal(trump)].into(),
        };
        game.check_outcome();
        game
    }
}

impl Game for BaseGame {
    fn trump(&self) -> Card {
        self.trump
    }

    fn role(&self) -> TurnRole {
        self.role
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn next_action(&self) -> Option<ExpectAction> {
        let TurnRole { attacker, defender } = self.role;
        match self.phase {
            Phase::AttackOpen => Some(ExpectAction::new(attacker, ActionType::Attack)),
            Phase::DefenseOpen => Some(ExpectAction::new(defender, ActionType::Defend)),
            Phase::AttackerDeciding => Some(ExpectAction::new(attacker, ActionType::ThrowIn)),
            Phase::RoundOver | Phase::GameOver => None,
        }
    }

    fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn player_state(&self, side: Side) -> PlayerState<'_> {
        PlayerState {
            side,
            trump: self.trump,
            role: self.role,
            phase: self.phase,
            hand: self.hand(side),
            opponent_hand_size: self.hand(side.other()).len(),
            deck_len: self.deck.len(),
            table: &self.table,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            human_hand: self.hand(Side::Human).to_vec(),
            bot_hand_size: self.hand(Side::Bot).len(),
            table: self.table.clone(),
            deck_len: self.deck.len(),
            trump: self.trump,
            role: self.role,
            phase: self.phase,
            outcome: self.outcome,
        }
    }

    fn apply_action(&mut self, Action { side, data }: Action) -> Result<(), GameError> {
        match data {
            ActionData::Attack { card } => self.attack(side, card)?,
            ActionData::Defend { card } => self.defend(side, card)?,
            ActionData::Done => self.declare_done(side)?,
            ActionData::Take => self.take_cards(side)?,
        }
        Ok(())
    }

    fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }
}

impl BaseGame {
    /// Creates a new game from a shuffled deck.
    pub fn random() -> Self {
        Deal::random().into()
    }

    /// The specified side's hand, sorted by suit and rank.
    pub fn hand(&self, side: Side) -> &[Card] {
        self.hands.get(&side).expect("hands populated")
    }

    /// The cards on the table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The number of cards left in the deck.
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Cards beaten in earlier rounds.
    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    /// Plays an attack card: either the first card of a round, or a throw-in.
    pub fn attack(&mut self, side: Side, card: Card) -> Result<(), Rejection> {
        self.ensure_playing()?;
        if side != self.role.attacker || self.phase == Phase::DefenseOpen {
            return Err(Rejection::NotYourTurn(side));
        }
        let index = self.find_card(side, card)?;
        if !rules::is_throw_in_legal(card, &self.table) {
            return Err(Rejection::IllegalThrowIn(card));
        }
        let defender_hand_size = self.hand(self.role.defender).len();
        if !rules::has_attack_slot(&self.table, defender_hand_size) {
            let limit = rules::max_attacks(&self.table, defender_hand_size);
            return Err(Rejection::ThrowInLimitExceeded(limit));
        }

        self.hand_mut(side).remove(index);
        self.table.push(card);
        self.phase = Phase::DefenseOpen;
        self.events.push_back(Event::Attack(side, card));
        debug!(%side, %card, table = %self.table, "attack");
        Ok(())
    }

    /// Beats the open attack.
    pub fn defend(&mut self, side: Side, card: Card) -> Result<(), Rejection> {
        self.ensure_playing()?;
        if side != self.role.defender {
            return Err(Rejection::NotYourTurn(side));
        }
        let attack = match self.table.open_move() {
            Some(open) => open.attack,
            None if self.table.is_empty() => return Err(Rejection::NoCardsOnTable),
            None => return Err(Rejection::NotYourTurn(side)),
        };
        let index = self.find_card(side, card)?;
        if !rules::can_beat(attack, card, self.trump.suit) {
            return Err(Rejection::CannotBeat {
                attack,
                defense: card,
            });
        }

        self.hand_mut(side).remove(index);
        self.table.beat(card);
        self.phase = Phase::AttackerDeciding;
        self.events.push_back(Event::Defend(side, card));
        debug!(%side, %card, table = %self.table, "defend");

        // With the deck gone, an empty hand means nothing else can be played this round.
        if self.deck.is_empty() && self.hands.values().any(Vec::is_empty) {
            self.conclude_round(false);
        }
        Ok(())
    }

    /// The attacker is finished with the round. Beaten cards are discarded, and the roles swap.
    pub fn declare_done(&mut self, side: Side) -> Result<(), Rejection> {
        self.ensure_playing()?;
        if side != self.role.attacker {
            return Err(Rejection::NotYourTurn(side));
        }
        if self.table.is_empty() {
            return Err(Rejection::NoCardsOnTable);
        }
        if !self.table.is_fully_defended() {
            return Err(Rejection::NotYourTurn(side));
        }
        self.conclude_round(false);
        Ok(())
    }

    /// The defender gives up, and takes every card on the table. The roles stay the same.
    pub fn take_cards(&mut self, side: Side) -> Result<(), Rejection> {
        self.ensure_playing()?;
        if side != self.role.defender {
            return Err(Rejection::NotYourTurn(side));
        }
        if self.table.is_empty() {
            return Err(Rejection::NoCardsOnTable);
        }
        if self.table.is_fully_defended() {
            return Err(Rejection::NotYourTurn(side));
        }
        self.conclude_round(true);
        Ok(())
    }

    fn ensure_playing(&self) -> Result<(), Rejection> {
        if self.phase == Phase::GameOver {
            Err(Rejection::GameOver)
        } else {
            Ok(())
        }
    }

    fn find_card(&self, side: Side, card: Card) -> Result<usize, Rejection> {
        self.hand(side)
            .iter()
            .position(|c| *c == card)
            .ok_or(Rejection::CardNotInHand(side, card))
    }

    fn hand_mut(&mut self, side: Side) -> &mut Vec<Card> {
        self.hands.get_mut(&side).expect("hands populated")
    }

    fn conclude_round(&mut self, taken: bool) {
        self.phase = Phase::RoundOver;
        let cards = self.table.clear();
        if taken {
            let defender = self.role.defender;
            debug!(side = %defender, count = cards.len(), "take");
            self.events.push_back(Event::Take(defender, cards.clone()));
            let hand = self.hand_mut(defender);
            hand.extend(cards);
            card::sort_cards(hand);
        } else {
            debug!(count = cards.len(), "discard");
            self.events.push_back(Event::Discard(cards.clone()));
            self.discard.extend(cards);
        }

        self.replenish(self.role.attacker);
        self.replenish(self.role.defender);

        if !taken {
            self.role = self.role.swapped();
        }
        self.events.push_back(Event::RoundOver(self.role));

        if !self.check_outcome() {
            self.phase = Phase::AttackOpen;
        }
    }

    fn replenish(&mut self, side: Side) {
        let need = HAND_SIZE.saturating_sub(self.hand(side).len());
        let drawn = self.deck.take(need);
        if drawn.is_empty() {
            return;
        }
        let count = drawn.len();
        let hand = self.hand_mut(side);
        hand.extend(drawn);
        card::sort_cards(hand);
        debug!(%side, count, deck = self.deck.len(), "draw");
        self.events.push_back(Event::Draw(side, count));
    }

    /// Ends the game if the deck is exhausted and a hand is empty. Returns true if the game is
    /// over.
    fn check_outcome(&mut self) -> bool {
        if !self.deck.is_empty() {
            return false;
        }
        let human_out = self.hand(Side::Human).is_empty();
        let bot_out = self.hand(Side::Bot).is_empty();
        let outcome = match (human_out, bot_out) {
            (true, true) => Outcome::Draw,
            (true, false) => Outcome::Winner(Side::Human),
            (false, true) => Outcome::Winner(Side::Bot),
            (false, false) => return false,
        };
        info!(%outcome, "game over");
        self.phase = Phase::GameOver;
        self.outcome = Some(outcome);
        self.events.push_back(Event::GameOver(outcome));
        true
    }
}
