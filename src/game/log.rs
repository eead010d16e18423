//! Log of actions taken during a game.

use serde::{Deserialize, Serialize};

use super::Deal;
use crate::{Action, GameError};

/// The initial deal, and every action accepted since. Replaying the actions against the deal
/// reproduces the game exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    /// The initial conditions.
    deal: Deal,
    /// Accepted actions, in order.
    actions: Vec<Action>,
}

impl Log {
    /// Creates a new, empty [`Log`] for the specified deal.
    pub fn new(deal: Deal) -> Self {
        Self {
            deal,
            actions: vec![],
        }
    }

    /// Returns an immutable reference to the initial deal.
    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    /// The number of actions in the log.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if no actions have been logged.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Records an action taken after the first `at` actions, discarding any later actions.
    pub fn insert(&mut self, at: usize, action: Action) {
        assert!(at <= self.actions.len());
        self.actions.truncate(at);
        self.actions.push(action);
    }

    /// Returns the first `n` actions.
    pub fn prefix(&self, n: usize) -> Result<&[Action], GameError> {
        self.actions.get(..n).ok_or(GameError::InvalidLogIndex(n))
    }

    /// Returns every action in the log.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}
