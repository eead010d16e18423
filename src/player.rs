//! Players

use std::sync::Arc;

use crate::game::PlayerState;
use crate::{ActionData, ActionType, Event, Rejection};

mod console;
mod robot;
#[cfg(test)]
mod scripted;
pub use console::Console;
pub use robot::Robot;
#[cfg(test)]
pub use scripted::Scripted;

/// A trait that implements a durak player.
pub trait Player {
    /// Chooses the payload for the action the game expects from this player.
    fn take_action(&self, state: PlayerState, action: ActionType) -> ActionData;

    /// A notification of an event that all players can see.
    fn notify(&self, state: PlayerState, event: &Event);

    /// Indicates that the player's action was rejected.
    ///
    /// The implementation may return true, if a retry is desired. Otherwise, the rejection will
    /// be converted into a fatal error.
    fn handle_error(&self, err: Rejection) -> bool;
}

/// A shared, dynamically dispatched player.
pub type SharedPlayer = Arc<dyn Player>;
