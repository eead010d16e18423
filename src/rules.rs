//! Rule predicates.

use crate::{Card, Suit, Table};

/// Each side is replenished up to this many cards after a round.
pub const HAND_SIZE: usize = 6;

/// The most attack cards a defender can face in one round.
pub const MAX_ATTACKS: usize = 6;

/// Returns true if `defense` beats `attack`: a higher card of the same suit, or any trump against
/// a non-trump.
pub fn can_beat(attack: Card, defense: Card, trump: Suit) -> bool {
    if attack.suit == defense.suit {
        defense.rank > attack.rank
    } else {
        defense.suit == trump && attack.suit != trump
    }
}

/// Returns true if `card` may be added to the table. Any card opens a round; after that, only
/// ranks already on the table may be thrown in.
pub fn is_throw_in_legal(card: Card, table: &Table) -> bool {
    table.is_empty() || table.cards().any(|c| c.rank == card.rank)
}

/// The number of attack cards the defender can be asked to face this round, given the number of
/// cards currently in the defender's hand.
///
/// Cards the defender has already played this round still count towards the bound, so this is
/// the defender's hand size at the start of the round, capped at [`MAX_ATTACKS`].
pub fn max_attacks(table: &Table, defender_hand_size: usize) -> usize {
    MAX_ATTACKS.min(defender_hand_size + table.defended_count())
}

/// Returns true if one more attack card fits under [`max_attacks`].
pub fn has_attack_slot(table: &Table, defender_hand_size: usize) -> bool {
    table.attack_count() < max_attacks(table, defender_hand_size)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::card::card;
    use crate::{Deck, Rank};

    #[test]
    fn test_can_beat() {
        struct Case {
            attack: &'static str,
            defense: &'static str,
            expect: bool,
        }

        fn case(attack: &'static str, defense: &'static str, expect: bool) -> Case {
            Case {
                attack,
                defense,
                expect,
            }
        }

        // Hearts are trump.
        let cases = [
            case("7s", "8s", true),
            case("8s", "7s", false),
            case("8s", "8s", false),
            case("as", "6h", true),
            case("6h", "as", false),
            case("7h", "8h", true),
            case("8h", "7h", false),
            case("7s", "8d", false),
            case("6c", "ac", true),
        ];
        for case in cases {
            let (attack, defense) = (card(case.attack), card(case.defense));
            println!("{attack} vs {defense} -> {}", case.expect);
            assert_eq!(case.expect, can_beat(attack, defense, Suit::Heart));
        }
    }

    #[test]
    fn test_can_beat_exhaustive() {
        let deck = Deck::default();
        for &trump in Suit::all_suits() {
            for &a in deck.as_slice() {
                for &d in deck.as_slice() {
                    let expect = (a.suit == d.suit && d.rank > a.rank)
                        || (d.suit == trump && a.suit != trump);
                    assert_eq!(expect, can_beat(a, d, trump), "{a} vs {d}, trump {trump}");
                }
            }
        }
    }

    #[test]
    fn test_throw_in() {
        let mut table = Table::default();
        for &c in Deck::default().as_slice() {
            assert!(is_throw_in_legal(c, &table));
        }

        table.push(card("7s"));
        for &c in Deck::default().as_slice() {
            assert_eq!(is_throw_in_legal(c, &table), c.rank == Rank::Seven);
        }

        table.beat(card("qs"));
        assert!(is_throw_in_legal(card("qd"), &table));
        assert!(is_throw_in_legal(card("7c"), &table));
        assert!(!is_throw_in_legal(card("9d"), &table));
    }

    #[test]
    fn test_max_attacks() {
        let mut table = Table::default();
        assert_eq!(max_attacks(&table, 10), 6);
        assert_eq!(max_attacks(&table, 2), 2);
        assert!(!has_attack_slot(&table, 0));

        table.push(card("7s"));
        table.beat(card("8s"));
        // The defender started with two cards, and has one left.
        assert_eq!(max_attacks(&table, 1), 2);
        assert!(has_attack_slot(&table, 1));

        table.push(card("7h"));
        table.beat(card("8h"));
        assert!(!has_attack_slot(&table, 0));
    }
}
