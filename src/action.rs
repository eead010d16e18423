//! Actions

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Card, Side};

/// Types of actions that the game can expect from a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    /// Open a round with any card.
    Attack,
    /// Add a card whose rank is already on the table, or finish the round.
    ThrowIn,
    /// Beat the open attack, or take the table.
    Defend,
}

impl Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ActionType::Attack => "attack",
            ActionType::ThrowIn => "throw in",
            ActionType::Defend => "defend",
        })
    }
}

/// The payload of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionData {
    /// Play an attack card, either to open the round or as a throw-in.
    Attack { card: Card },
    /// Beat the open attack with a card.
    Defend { card: Card },
    /// The attacker is finished; beaten cards are discarded.
    Done,
    /// The defender gives up and takes every card on the table.
    Take,
}

impl ActionData {
    /// Returns true if this payload answers the specified type of action.
    pub fn answers(self, action: ActionType) -> bool {
        matches!(
            (action, self),
            (ActionType::Attack, ActionData::Attack { .. })
                | (ActionType::ThrowIn, ActionData::Attack { .. } | ActionData::Done)
                | (ActionType::Defend, ActionData::Defend { .. } | ActionData::Take)
        )
    }
}

impl Display for ActionData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionData::Attack { card } => write!(f, "attack {card}"),
            ActionData::Defend { card } => write!(f, "defend {card}"),
            ActionData::Done => f.write_str("done"),
            ActionData::Take => f.write_str("take"),
        }
    }
}

/// The action that the game's state machine expects to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectAction {
    /// The side expected to take the action.
    pub side: Side,
    /// The type of action.
    pub action: ActionType,
}

impl ExpectAction {
    /// Create a new [`ExpectAction`].
    pub fn new(side: Side, action: ActionType) -> Self {
        Self { side, action }
    }

    /// Bind in a payload to create an [`Action`].
    pub fn with_data(self, data: ActionData) -> Action {
        Action::new(self.side, data)
    }
}

/// An action taken by a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The side taking the action.
    pub side: Side,
    /// The action payload.
    pub data: ActionData,
}

impl Action {
    /// Create a new [`Action`].
    pub fn new(side: Side, data: ActionData) -> Self {
        Self { side, data }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.side, self.data)
    }
}
