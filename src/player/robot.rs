//! Robot player

use std::sync::Arc;

use tracing::debug;

use super::{Player, SharedPlayer};
use crate::game::PlayerState;
use crate::rules;
use crate::{ActionData, ActionType, Card, Event, Rejection, Suit};

/// A greedy robot. It never looks ahead, and never models its opponent.
///
/// - When opening a round, it plays its lowest trump if it holds one, and otherwise its lowest
///   card.
/// - When every attack on the table is beaten, it throws in the first card in its hand whose
///   rank is on the table, while the defender can still be asked to face more attacks.
///   Otherwise, it declares the round done.
/// - When defending, it plays the first card in its hand that beats the open attack, or takes
///   the table if it has none.
///
/// Hands are kept sorted by suit and rank, so "first" is deterministic.
#[derive(Debug, Default)]
pub struct Robot;

impl Player for Robot {
    fn take_action(&self, state: PlayerState, action: ActionType) -> ActionData {
        let data = match action {
            ActionType::Attack => attack(&state),
            ActionType::ThrowIn => throw_in(&state),
            ActionType::Defend => defend(&state),
        };
        debug_assert!(data.answers(action));
        debug!(side = %state.side, %action, %data, "robot decided");
        data
    }

    fn notify(&self, _: PlayerState, _: &Event) {}

    fn handle_error(&self, _: Rejection) -> bool {
        false
    }
}

impl Robot {
    pub fn into_player(self) -> SharedPlayer {
        Arc::new(self)
    }
}

fn attack(state: &PlayerState) -> ActionData {
    let card = opening_card(state.hand, state.trump_suit());
    ActionData::Attack { card }
}

fn throw_in(state: &PlayerState) -> ActionData {
    if !rules::has_attack_slot(state.table, state.defender_hand_size()) {
        return ActionData::Done;
    }
    let ranks = state.table.ranks_on_table();
    match state.hand.iter().find(|c| ranks.contains(&c.rank)) {
        Some(&card) => ActionData::Attack { card },
        None => ActionData::Done,
    }
}

fn defend(state: &PlayerState) -> ActionData {
    let attack = state
        .table
        .open_move()
        .expect("an open move is required to defend")
        .attack;
    let trump = state.trump_suit();
    match state
        .hand
        .iter()
        .find(|&&c| rules::can_beat(attack, c, trump))
    {
        Some(&card) => ActionData::Defend { card },
        None => ActionData::Take,
    }
}

/// The lowest trump in the hand, or the lowest card if there are no trumps.
fn opening_card(hand: &[Card], trump: Suit) -> Card {
    let lowest_trump = hand
        .iter()
        .filter(|c| c.is_trump(trump))
        .min_by_key(|c| c.rank);
    lowest_trump
        .or_else(|| hand.iter().min_by_key(|c| c.rank))
        .copied()
        .expect("attacker holds cards")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::card::{card, cards};
    use crate::game::{Deal, Game, LoggingGame, Phase};
    use crate::{Action, Side, Table, TurnRole};

    fn game(human: &[&str], bot: &[&str], deck: &[&str], trump: &str) -> LoggingGame {
        Deal::custom(cards(human), cards(bot), cards(deck), card(trump))
            .unwrap()
            .into()
    }

    fn decide(game: &LoggingGame) -> ActionData {
        let expect = game.next_action().unwrap();
        assert_eq!(expect.side, Side::Bot);
        Robot.take_action(game.player_state(Side::Bot), expect.action)
    }

    fn play(game: &mut LoggingGame, side: Side, data: ActionData) {
        game.apply_action(Action::new(side, data)).unwrap();
    }

    fn attack(c: &str) -> ActionData {
        ActionData::Attack { card: card(c) }
    }

    fn defend(c: &str) -> ActionData {
        ActionData::Defend { card: card(c) }
    }

    /// Plays one round where the human attacks with 7♠ and the robot beats it with 8♠, so that
    /// the robot attacks next.
    fn robot_to_attack(bot: &[&str]) -> LoggingGame {
        let mut g = game(&["7s", "8d"], bot, &["9h", "6d", "7c"], "6c");
        play(&mut g, Side::Human, attack("7s"));
        play(&mut g, Side::Bot, defend("8s"));
        play(&mut g, Side::Human, ActionData::Done);
        assert_eq!(g.role(), TurnRole::attacked_by(Side::Bot));
        assert_eq!(g.phase(), Phase::AttackOpen);
        g
    }

    #[test]
    fn test_opening_card() {
        struct Case {
            hand: &'static [&'static str],
            expect: &'static str,
        }

        // Clubs are trump.
        let cases = [
            Case {
                hand: &["9s", "7h", "jc", "8c"],
                expect: "8c",
            },
            Case {
                hand: &["9s", "7h", "6d"],
                expect: "6d",
            },
            Case {
                hand: &["9s", "7h", "7d"],
                expect: "7h",
            },
            Case {
                hand: &["ac"],
                expect: "ac",
            },
        ];
        for case in cases {
            let mut hand = cards(case.hand);
            crate::card::sort_cards(&mut hand);
            assert_eq!(opening_card(&hand, Suit::Club), card(case.expect));
        }
    }

    #[test]
    fn test_opens_with_lowest_trump() {
        let g = robot_to_attack(&["8s", "qc", "8c"]);
        assert_eq!(decide(&g), attack("8c"));
    }

    #[test]
    fn test_defends_with_first_beating_card() {
        // Hearts are trump; the first card in hand order that beats 7♠ is 9♠.
        let mut g = game(&["7s"], &["6s", "9s", "as", "6h"], &["6c", "7c"], "6h");
        play(&mut g, Side::Human, attack("7s"));
        assert_eq!(decide(&g), defend("9s"));
    }

    #[test]
    fn test_takes_when_unable_to_beat() {
        let mut g = game(&["as"], &["6s", "9d"], &["6c", "7c"], "6h");
        play(&mut g, Side::Human, attack("as"));
        assert_eq!(decide(&g), ActionData::Take);
    }

    #[test]
    fn test_throws_in_matching_rank() {
        let mut g = robot_to_attack(&["8s", "7h", "9s"]);
        assert_eq!(decide(&g), attack("7h"));
        play(&mut g, Side::Bot, attack("7h"));
        play(&mut g, Side::Human, defend("9h"));
        assert_eq!(decide(&g), attack("9s"));
    }

    #[test]
    fn test_done_when_nothing_matches() {
        let mut g = robot_to_attack(&["8s", "7h", "ks"]);
        play(&mut g, Side::Bot, attack("7h"));
        play(&mut g, Side::Human, defend("9h"));
        assert_eq!(decide(&g), ActionData::Done);
    }

    #[test]
    fn test_done_when_limit_reached() {
        let mut table = Table::default();
        table.push(card("7s"));
        table.beat(card("8s"));
        let hand = cards(&["7h", "8d"]);
        let state = PlayerState {
            side: Side::Bot,
            trump: card("6c"),
            role: TurnRole::attacked_by(Side::Bot),
            phase: Phase::AttackerDeciding,
            hand: &hand,
            opponent_hand_size: 0,
            deck_len: 4,
            table: &table,
        };
        assert_eq!(
            Robot.take_action(state, ActionType::ThrowIn),
            ActionData::Done
        );
    }
}
