//! A scripted player, for testing.

use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::Mutex;

use super::Player;
use crate::game::PlayerState;
use crate::{ActionData, ActionType, Card, Event, Rejection};

#[derive(Debug, Default)]
struct Inner {
    actions: VecDeque<ActionData>,
    events: Vec<Event>,
    errors: Vec<Rejection>,
}

/// Plays a fixed sequence of actions, and records what it is told.
#[derive(Debug, Default)]
pub struct Scripted(Mutex<Inner>);

impl Player for Scripted {
    fn take_action(&self, _: PlayerState, action: ActionType) -> ActionData {
        let mut inner = self.0.lock().unwrap();
        let data = inner.actions.pop_front().expect("script exhausted");
        assert!(data.answers(action), "scripted {data} cannot {action}");
        data
    }

    fn notify(&self, _: PlayerState, event: &Event) {
        let mut inner = self.0.lock().unwrap();
        inner.events.push(event.clone());
    }

    fn handle_error(&self, err: Rejection) -> bool {
        let mut inner = self.0.lock().unwrap();
        inner.errors.push(err);
        false
    }
}

impl Scripted {
    fn push(self, data: ActionData) -> Self {
        self.0.lock().unwrap().actions.push_back(data);
        self
    }

    pub fn attacks(self, card: &str) -> Self {
        let card = Card::from_str(card).unwrap();
        self.push(ActionData::Attack { card })
    }

    pub fn defends(self, card: &str) -> Self {
        let card = Card::from_str(card).unwrap();
        self.push(ActionData::Defend { card })
    }

    pub fn done(self) -> Self {
        self.push(ActionData::Done)
    }

    pub fn takes(self) -> Self {
        self.push(ActionData::Take)
    }

    /// The number of actions not yet played.
    pub fn remaining(&self) -> usize {
        self.0.lock().unwrap().actions.len()
    }

    /// Events seen so far.
    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().events.clone()
    }

    /// Rejections reported so far.
    pub fn errors(&self) -> Vec<Rejection> {
        self.0.lock().unwrap().errors.clone()
    }
}
