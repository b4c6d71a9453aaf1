use lifesweeper_core::*;
use serde::{Deserialize, Serialize};

use crate::{Millis, Preferences};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    #[default]
    Idle,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Per-game fields an undo restores verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UndoSnapshot {
    pub board: Board,
    pub status: GameStatus,
    pub lives: u8,
    pub timer_seconds: f64,
    pub remaining_mines: i32,
    pub hint_cell: Option<Coord2>,
    pub hint_confidence: Option<u8>,
    pub exploded_cell: Option<Coord2>,
    pub started_at: Option<Millis>,
}

/// Everything a frontend needs to render a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub status: GameStatus,
    pub paused: bool,
    pub lives: u8,
    /// Mines not yet accounted for by a flag or a detonation; negative when over-flagged.
    pub remaining_mines: i32,
    pub timer_seconds: f64,
    pub started_at: Option<Millis>,
    pub paused_at: Option<Millis>,
    pub difficulty: Difficulty,
    pub auto_solve_used: bool,
    pub probability_assist_used: bool,
    pub assist_count: u32,
    pub hint_cell: Option<Coord2>,
    pub hint_confidence: Option<u8>,
    pub exploded_cell: Option<Coord2>,
    pub preferences: Preferences,
    pub undo_stack: Vec<UndoSnapshot>,
}

impl GameState {
    /// Fresh idle game with a closed, mine-free board.
    pub fn new(difficulty: Difficulty, lives: u8, preferences: Preferences) -> Self {
        let config = difficulty.config();
        Self {
            board: Board::empty(config),
            status: GameStatus::Idle,
            paused: false,
            lives,
            remaining_mines: i32::from(config.mine_count),
            timer_seconds: 0.0,
            started_at: None,
            paused_at: None,
            difficulty,
            auto_solve_used: false,
            probability_assist_used: false,
            assist_count: 0,
            hint_cell: None,
            hint_confidence: None,
            exploded_cell: None,
            preferences,
            undo_stack: Vec::new(),
        }
    }

    /// Mines in play; before the first open the board is still empty so the difficulty decides.
    pub fn total_mines(&self) -> CellCount {
        match self.status {
            GameStatus::Idle => self.difficulty.config().mine_count,
            _ => self.board.mine_count(),
        }
    }

    pub fn count_remaining_mines(&self) -> i32 {
        i32::from(self.total_mines())
            - i32::from(self.board.flag_count())
            - i32::from(self.board.detonated_count())
    }

    /// Board actions are accepted.
    pub fn is_interactive(&self) -> bool {
        !self.paused && !self.status.is_finished()
    }

    pub fn can_undo(&self) -> bool {
        !self.paused && !self.undo_stack.is_empty()
    }

    /// Seconds of unpaused play as of `now`.
    pub fn elapsed_at(&self, now: Millis) -> f64 {
        let until = self.paused_at.unwrap_or(now);
        self.started_at
            .map_or(0.0, |started| until.saturating_sub(started) as f64 / 1000.0)
    }

    pub fn snapshot(&self) -> UndoSnapshot {
        UndoSnapshot {
            board: self.board.clone(),
            status: self.status,
            lives: self.lives,
            timer_seconds: self.timer_seconds,
            remaining_mines: self.remaining_mines,
            hint_cell: self.hint_cell,
            hint_confidence: self.hint_confidence,
            exploded_cell: self.exploded_cell,
            started_at: self.started_at,
        }
    }

    pub fn restore(&mut self, snapshot: UndoSnapshot) {
        self.board = snapshot.board;
        self.status = snapshot.status;
        self.lives = snapshot.lives;
        self.timer_seconds = snapshot.timer_seconds;
        self.remaining_mines = snapshot.remaining_mines;
        self.hint_cell = snapshot.hint_cell;
        self.hint_confidence = snapshot.hint_confidence;
        self.exploded_cell = snapshot.exploded_cell;
        self.started_at = snapshot.started_at;
    }

    pub(crate) fn clear_hint(&mut self) {
        self.hint_cell = None;
        self.hint_confidence = None;
    }
}
