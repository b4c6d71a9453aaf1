use lifesweeper_core::{AiMove, CellCount, Coord2, Difficulty, Hint};
use serde::{Deserialize, Serialize};

use crate::{GameState, Millis};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameResult {
    Win,
    Lose,
}

/// Finished game as seen by record keeping.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub difficulty: Difficulty,
    pub result: GameResult,
    pub time_seconds: f64,
    pub lives: u8,
    pub assists: u32,
    pub auto_solve_used: bool,
    pub probability_assist_used: bool,
    pub finished_at: Millis,
}

impl GameSummary {
    pub(crate) fn of(state: &GameState, result: GameResult, finished_at: Millis) -> Self {
        Self {
            difficulty: state.difficulty,
            result,
            time_seconds: state.timer_seconds,
            lives: state.lives,
            assists: state.assist_count,
            auto_solve_used: state.auto_solve_used,
            probability_assist_used: state.probability_assist_used,
            finished_at,
        }
    }
}

/// Discrete transitions reported to observers after an action completes.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// First open of a game; mines are now placed.
    Started { coords: Coord2 },
    Opened { coords: Coord2, revealed: CellCount },
    Flagged { coords: Coord2 },
    Unflagged { coords: Coord2 },
    Exploded { coords: Coord2, lives_left: u8 },
    Won(GameSummary),
    Lost(GameSummary),
    Paused,
    Resumed,
    Undone,
    HintShown(Hint),
    Reset { abandoned: bool, previous: Difficulty, difficulty: Difficulty },
    AssistToggled(bool),
    AssistMoved(AiMove),
}

/// Side effects such as sound or record keeping hook in here rather than into the session itself.
pub trait SessionObserver {
    fn on_event(&mut self, state: &GameState, event: &SessionEvent);
}

/// Collects every event; handy for tests and replays.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<SessionEvent>,
}

impl SessionObserver for EventLog {
    fn on_event(&mut self, _state: &GameState, event: &SessionEvent) {
        self.events.push(event.clone());
    }
}

impl<T: SessionObserver + ?Sized> SessionObserver for std::rc::Rc<std::cell::RefCell<T>> {
    fn on_event(&mut self, state: &GameState, event: &SessionEvent) {
        self.borrow_mut().on_event(state, event);
    }
}
