//! A game that maintains a log of actions taken.

use delegate::delegate;

use crate::game::{BaseGame, Deal, Game, Log, Outcome, Phase, PlayerState, Snapshot};
use crate::{Action, Card, Event, ExpectAction, GameError, Side, TurnRole};

/// A [`Game`] implementation that maintains a [`Log`] of all accepted actions.
#[derive(Debug)]
pub struct LoggingGame {
    game: BaseGame,
    log: Log,
    cursor: usize,
}

impl From<Deal> for LoggingGame {
    fn from(deal: Deal) -> Self {
        Self {
            log: Log::new(deal.clone()),
            game: deal.into(),
            cursor: 0,
        }
    }
}

impl From<LoggingGame> for Log {
    fn from(value: LoggingGame) -> Self {
        value.log
    }
}

impl TryFrom<Log> for LoggingGame {
    type Error = GameError;

    /// Replays the whole log.
    fn try_from(log: Log) -> Result<Self, Self::Error> {
        let mut game = Self {
            game: log.deal().clone().into(),
            log,
            cursor: 0,
        };
        game.seek(game.log.len())?;
        Ok(game)
    }
}

impl Game for LoggingGame {
    delegate! {
        to self.game {
            fn trump(&self) -> Card;
            fn role(&self) -> TurnRole;
            fn phase(&self) -> Phase;
            fn next_action(&self) -> Option<ExpectAction>;
            fn outcome(&self) -> Option<Outcome>;
            fn player_state(&self, side: Side) -> PlayerState<'_>;
            fn snapshot(&self) -> Snapshot;
            fn pop_event(&mut self) -> Option<Event>;
        }
    }

    fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        self.game.apply_action(action)?;
        self.log.insert(self.cursor, action);
        self.cursor += 1;
        Ok(())
    }
}

impl LoggingGame {
    /// Creates a new random [`LoggingGame`].
    pub fn random() -> Self {
        Deal::random().into()
    }

    /// The number of logged actions applied to the current state.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns an immutable reference to the log.
    pub fn log(&self) -> &Log {
        &self.log
    }

    /// Returns an immutable reference to the underlying state machine.
    pub fn base(&self) -> &BaseGame {
        &self.game
    }

    /// Restarts the game from the initial deal. The log is kept, so the game can be replayed
    /// with [`seek`](`LoggingGame::seek`).
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.game = BaseGame::from(self.log.deal().clone());
    }

    /// Replays the first `n` logged actions from the initial deal. Applying a new action
    /// afterwards discards the rest of the log.
    pub fn seek(&mut self, n: usize) -> Result<(), GameError> {
        let actions = self.log.prefix(n)?.to_vec();
        self.restart();
        for action in actions {
            self.game.apply_action(action)?;
            self.cursor += 1;
        }
        Ok(())
    }

    /// Steps back one action.
    pub fn undo(&mut self) -> Result<(), GameError> {
        match self.cursor.checked_sub(1) {
            Some(n) => self.seek(n),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::*;
    use crate::card::{card, cards};
    use crate::ActionData;

    fn fixture() -> LoggingGame {
        Deal::custom(
            cards(&["7s", "7h", "9d"]),
            cards(&["8s", "6d"]),
            cards(&["6c", "7c", "8c"]),
            card("6c"),
        )
        .unwrap()
        .into()
    }

    fn attack(c: &str) -> Action {
        Action::new(Side::Human, ActionData::Attack { card: card(c) })
    }

    fn defend(c: &str) -> Action {
        Action::new(Side::Bot, ActionData::Defend { card: card(c) })
    }

    #[test]
    fn test_rejected_actions_are_not_logged() {
        let mut game = fixture();
        game.apply_action(attack("7s")).unwrap();
        assert_matches!(game.apply_action(defend("6d")), Err(GameError::Rejected(_)));
        game.apply_action(defend("8s")).unwrap();
        assert_eq!(game.log().actions(), &[attack("7s"), defend("8s")]);
        assert_eq!(game.cursor(), 2);
    }

    #[test]
    fn test_seek_and_replay() {
        let mut game = fixture();
        game.apply_action(attack("7s")).unwrap();
        game.apply_action(defend("8s")).unwrap();
        let end = game.snapshot();

        game.undo().unwrap();
        assert_eq!(game.phase(), Phase::DefenseOpen);
        assert_eq!(game.cursor(), 1);
        assert_eq!(game.log().len(), 2);

        game.seek(2).unwrap();
        assert_eq!(game.snapshot(), end);
        assert_matches!(game.seek(3), Err(GameError::InvalidLogIndex(3)));

        let replayed = LoggingGame::try_from(Log::from(game)).unwrap();
        assert_eq!(replayed.snapshot(), end);
    }

    #[test]
    fn test_new_branch_discards_future() {
        let mut game = fixture();
        game.apply_action(attack("7s")).unwrap();
        game.seek(0).unwrap();
        game.apply_action(attack("7h")).unwrap();
        assert_eq!(game.log().actions(), &[attack("7h")]);
    }
}
