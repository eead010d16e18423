//! A session between a human and the robot.
//!
//! The session owns the only copy of the game state. A front end reads [`Snapshot`]s and
//! [`Event`]s, and submits the human's intents. Whenever the robot is due to act, the session
//! hands out a [`BotTurn`] ticket; the front end waits for the ticket's delay and passes it back
//! to [`Session::play_bot_turn`]. Tickets are tied to a game generation and to the number of
//! actions taken, so a ticket issued before a [`Session::new_game`] (or before any other
//! action) is ignored.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, warn};

use crate::game::{Deal, Game, LoggingGame, PlayerState, Snapshot};
use crate::player::{Robot, SharedPlayer};
use crate::{
    Action, ActionData, Card, CardId, Config, Event, ExpectAction, GameError, Side,
};

/// A scheduled robot action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotTurn {
    /// The game this ticket belongs to.
    pub generation: u64,
    /// The number of actions taken in that game when the ticket was issued.
    pub step: u64,
    /// How long to wait before playing the ticket.
    pub delay: Duration,
}

/// Owns a game, the robot that plays against the human, and the scheduling of the robot's
/// turns.
pub struct Session {
    config: Config,
    rng: StdRng,
    game: LoggingGame,
    robot: SharedPlayer,
    generation: u64,
    step: u64,
}

impl Session {
    /// Creates a session, and deals the first game.
    pub fn new(config: Config) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let deal: Deal = rng.gen();
        let mut session = Self {
            config,
            rng,
            game: deal.clone().into(),
            robot: Robot.into_player(),
            generation: 0,
            step: 0,
        };
        session.start(deal);
        session
    }

    /// Replaces the robot.
    pub fn with_robot(mut self, robot: SharedPlayer) -> Self {
        self.robot = robot;
        self
    }

    /// Replaces the current game with one from the specified deal.
    pub fn with_deal(mut self, deal: Deal) -> Self {
        self.start(deal);
        self
    }

    /// Abandons the current game, and deals a new one. Outstanding [`BotTurn`]s become stale.
    pub fn new_game(&mut self) {
        let deal = self.rng.gen();
        self.start(deal);
    }

    fn start(&mut self, deal: Deal) {
        self.generation += 1;
        self.step = 0;
        self.game = deal.into();
        info!(
            generation = self.generation,
            trump = %self.game.trump(),
            "new game"
        );
    }

    /// The session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current game.
    pub fn game(&self) -> &LoggingGame {
        &self.game
    }

    /// Identifies the current game. Incremented by every new game.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the state the human may see.
    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot()
    }

    /// Returns the action the game expects next.
    pub fn next_action(&self) -> Option<ExpectAction> {
        self.game.next_action()
    }

    /// Returns the state visible to the specified side.
    pub fn player_state(&self, side: Side) -> PlayerState<'_> {
        self.game.player_state(side)
    }

    /// Pops the oldest event, after passing it on to the robot.
    pub fn pop_event(&mut self) -> Option<Event> {
        let event = self.game.pop_event()?;
        self.robot
            .notify(self.game.player_state(Side::Bot), &event);
        Some(event)
    }

    /// Plays an attack card, either to open a round or to throw in.
    pub fn attack_card(&mut self, side: Side, id: CardId) -> Result<(), GameError> {
        let card = card_by_id(id)?;
        self.apply(Action::new(side, ActionData::Attack { card }))
    }

    /// Beats the open attack.
    pub fn defend_card(&mut self, side: Side, id: CardId) -> Result<(), GameError> {
        let card = card_by_id(id)?;
        self.apply(Action::new(side, ActionData::Defend { card }))
    }

    /// The attacker finishes the round.
    pub fn declare_done(&mut self, side: Side) -> Result<(), GameError> {
        self.apply(Action::new(side, ActionData::Done))
    }

    /// The defender takes the table.
    pub fn take_cards(&mut self, side: Side) -> Result<(), GameError> {
        self.apply(Action::new(side, ActionData::Take))
    }

    /// Applies an action. Rejected actions leave the game untouched.
    pub fn apply(&mut self, action: Action) -> Result<(), GameError> {
        if let Err(err) = self.game.apply_action(action) {
            debug!(%action, %err, "rejected");
            return Err(err);
        }
        self.step += 1;
        Ok(())
    }

    /// Returns a ticket for the robot's next action, if the robot is due to act.
    pub fn pending_bot_turn(&self) -> Option<BotTurn> {
        let expect = self.game.next_action()?;
        (expect.side == Side::Bot).then(|| BotTurn {
            generation: self.generation,
            step: self.step,
            delay: self.config.bot_delay(),
        })
    }

    /// Lets the robot act on a ticket from [`pending_bot_turn`](`Session::pending_bot_turn`).
    ///
    /// Returns false, without touching the game, if the ticket is stale. A robot action that
    /// breaks the rules is a bug in the robot, and is returned as an error.
    pub fn play_bot_turn(&mut self, turn: BotTurn) -> Result<bool, GameError> {
        if turn.generation != self.generation || turn.step != self.step {
            warn!(
                ?turn,
                generation = self.generation,
                step = self.step,
                "ignoring stale robot turn"
            );
            return Ok(false);
        }
        let Some(expect) = self.game.next_action().filter(|e| e.side == Side::Bot) else {
            return Ok(false);
        };
        let data = self
            .robot
            .take_action(self.game.player_state(Side::Bot), expect.action);
        match self.apply(expect.with_data(data)) {
            Ok(()) => Ok(true),
            Err(GameError::Rejected(err)) if self.robot.handle_error(err.clone()) => Ok(false),
            Err(err) => {
                error!(%err, "robot broke the rules");
                Err(err)
            }
        }
    }
}

fn card_by_id(id: CardId) -> Result<Card, GameError> {
    Card::from_id(id).ok_or(GameError::InvalidCardId(id))
}
