//! Sides of the table.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// One of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Human,
    Bot,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Human => "Human",
            Side::Bot => "Bot",
        })
    }
}

impl Side {
    /// Both sides, in dealing order.
    pub fn all_sides() -> &'static [Side; 2] {
        static SIDES: [Side; 2] = [Side::Human, Side::Bot];
        &SIDES
    }

    /// The opposing side.
    pub fn other(self) -> Side {
        match self {
            Side::Human => Side::Bot,
            Side::Bot => Side::Human,
        }
    }
}

/// Who attacks and who defends in the active round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRole {
    pub attacker: Side,
    pub defender: Side,
}

impl TurnRole {
    /// Creates a role assignment with the specified attacker.
    pub fn attacked_by(attacker: Side) -> Self {
        Self {
            attacker,
            defender: attacker.other(),
        }
    }

    /// The roles for the following round, with attacker and defender exchanged.
    pub fn swapped(self) -> Self {
        Self {
            attacker: self.defender,
            defender: self.attacker,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_roles() {
        let role = TurnRole::attacked_by(Side::Human);
        assert_eq!(role.defender, Side::Bot);
        assert_eq!(role.swapped(), TurnRole::attacked_by(Side::Bot));
        assert_eq!(role.swapped().swapped(), role);
    }
}
