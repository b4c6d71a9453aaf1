use lifesweeper_core::{
    CellCount, Coord2, Difficulty, MinePlacer, MoveKind, ProbabilityMap, RandomMinePlacer, assist_move,
    probability_map, uncertain_hint,
};
use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// Owns the authoritative [`GameState`] and applies one [`Action`] at a time to it.
pub struct Session<C: Clock = SystemClock> {
    state: GameState,
    config: SessionConfig,
    clock: C,
    seeds: SmallRng,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl<C: Clock> Session<C> {
    pub fn new(config: SessionConfig, clock: C) -> Result<Self, ConfigError> {
        let state = GameState::new(config.difficulty, config.lives, Preferences::default());
        Self::from_state(config, clock, state)
    }

    /// Resumes a previously saved game.
    pub fn from_state(config: SessionConfig, clock: C, state: GameState) -> Result<Self, ConfigError> {
        config.validate()?;
        let seeds = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Ok(Self {
            state,
            config,
            clock,
            seeds,
            observers: Vec::new(),
        })
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.state.preferences = preferences;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now(&self) -> Millis {
        self.clock.now_millis()
    }

    pub fn observe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Probability overlay, when the player has it switched on.
    pub fn overlay(&self) -> Option<ProbabilityMap> {
        self.state
            .preferences
            .show_probabilities
            .then(|| probability_map(&self.state.board))
    }

    /// Processes `action` to completion, notifies observers and returns what happened.
    pub fn dispatch(&mut self, action: Action) -> Vec<SessionEvent> {
        log::trace!("Dispatching {action:?}");
        let now = self.clock.now_millis();
        let mut events = Vec::new();

        match action {
            Action::Open(coords) => {
                self.apply_open(coords, now, &mut events);
            }
            Action::ToggleFlag(coords) => {
                self.apply_flag(coords, now, &mut events);
            }
            Action::Reset(difficulty) => self.apply_reset(difficulty, &mut events),
            Action::SetDifficulty(difficulty) => self.apply_reset(Some(difficulty), &mut events),
            Action::Tick => {
                if self.state.status == GameStatus::Playing && !self.state.paused {
                    self.state.timer_seconds = self.state.elapsed_at(now);
                }
            }
            Action::TogglePause => self.apply_pause(now, &mut events),
            Action::Undo => self.apply_undo(&mut events),
            Action::Hint => self.apply_hint(&mut events),
            Action::ToggleAutoAssist => {
                let enabled = !self.state.preferences.auto_assist;
                self.state.preferences.auto_assist = enabled;
                events.push(SessionEvent::AssistToggled(enabled));
            }
            Action::AssistStep => self.apply_assist(now, &mut events),
            Action::SetAssistSpeed(speed) => self.state.preferences.assist_speed = speed,
            Action::SetShowProbabilities(show) => {
                self.state.preferences.show_probabilities = show;
                if show && !self.state.status.is_finished() {
                    self.state.probability_assist_used = true;
                }
            }
            Action::SetTheme(theme) => self.state.preferences.theme = theme,
            Action::SetSoundEnabled(enabled) => self.state.preferences.sound_enabled = enabled,
            Action::SetSoundVolume(volume) => self.state.preferences.set_sound_volume(volume),
            Action::SetSoundPreset(preset) => self.state.preferences.sound_preset = preset,
            Action::SetCellSize(size) => self.state.preferences.set_cell_size(size),
        }

        for event in &events {
            log::debug!("{event:?}");
            for observer in self.observers.iter_mut() {
                observer.on_event(&self.state, event);
            }
        }
        events
    }

    pub fn open(&mut self, coords: Coord2) -> Vec<SessionEvent> {
        self.dispatch(Action::Open(coords))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Vec<SessionEvent> {
        self.dispatch(Action::ToggleFlag(coords))
    }

    pub fn reset(&mut self, difficulty: Option<Difficulty>) -> Vec<SessionEvent> {
        self.dispatch(Action::Reset(difficulty))
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Vec<SessionEvent> {
        self.dispatch(Action::SetDifficulty(difficulty))
    }

    pub fn tick(&mut self) -> Vec<SessionEvent> {
        self.dispatch(Action::Tick)
    }

    pub fn toggle_pause(&mut self) -> Vec<SessionEvent> {
        self.dispatch(Action::TogglePause)
    }

    pub fn undo(&mut self) -> Vec<SessionEvent> {
        self.dispatch(Action::Undo)
    }

    pub fn hint(&mut self) -> Vec<SessionEvent> {
        self.dispatch(Action::Hint)
    }

    pub fn toggle_auto_assist(&mut self) -> Vec<SessionEvent> {
        self.dispatch(Action::ToggleAutoAssist)
    }

    pub fn assist_step(&mut self) -> Vec<SessionEvent> {
        self.dispatch(Action::AssistStep)
    }

    pub fn set_show_probabilities(&mut self, show: bool) -> Vec<SessionEvent> {
        self.dispatch(Action::SetShowProbabilities(show))
    }

    /// Returns whether the game changed.
    fn apply_open(&mut self, coords: Coord2, now: Millis, events: &mut Vec<SessionEvent>) -> bool {
        if !self.state.is_interactive() {
            log::trace!("Ignoring open at {coords:?} while {:?}", self.state.status);
            return false;
        }
        let Some(&target) = self.state.board.get(coords) else {
            return false;
        };
        if target.is_flagged {
            return false;
        }

        let before = self.state.snapshot();
        if self.state.status == GameStatus::Idle {
            self.start(coords, now);
            events.push(SessionEvent::Started { coords });
        }

        let previous = &self.state.board;
        let next = if target.is_open {
            previous.open_from_number(coords)
        } else {
            previous.open_cell(coords)
        };
        if next == *previous && before.status != GameStatus::Idle {
            return false;
        }

        let opened: Vec<Coord2> = next
            .coords()
            .filter(|&pos| next[pos].is_open && !previous[pos].is_open)
            .collect();
        let flagged: Vec<Coord2> = next
            .coords()
            .filter(|&pos| next[pos].is_flagged && !previous[pos].is_flagged)
            .collect();
        let exploded: Vec<Coord2> = opened
            .iter()
            .copied()
            .filter(|&pos| next[pos].is_mine)
            .collect();

        self.state.board = next.with_exploded(&exploded);
        self.state.clear_hint();

        if !opened.is_empty() {
            events.push(SessionEvent::Opened {
                coords,
                revealed: opened.len().try_into().unwrap_or(CellCount::MAX),
            });
        }
        events.extend(flagged.into_iter().map(|coords| SessionEvent::Flagged { coords }));

        if let Some(&first) = exploded.first() {
            self.state.lives = self.state.lives.saturating_sub(1);
            self.state.exploded_cell = Some(first);
            log::info!("Mine hit at {first:?}, {} lives left", self.state.lives);
            events.push(SessionEvent::Exploded {
                coords: first,
                lives_left: self.state.lives,
            });
        }

        self.settle(now, events);
        self.push_undo(before);
        true
    }

    fn apply_flag(&mut self, coords: Coord2, now: Millis, events: &mut Vec<SessionEvent>) -> bool {
        if !self.state.is_interactive() {
            log::trace!("Ignoring flag at {coords:?} while {:?}", self.state.status);
            return false;
        }
        match self.state.board.get(coords) {
            Some(cell) if !cell.is_open => {}
            _ => return false,
        }

        let before = self.state.snapshot();
        self.state.board = self.state.board.toggle_flag(coords);
        events.push(if self.state.board[coords].is_flagged {
            SessionEvent::Flagged { coords }
        } else {
            SessionEvent::Unflagged { coords }
        });

        self.settle(now, events);
        self.push_undo(before);
        true
    }

    fn start(&mut self, safe: Coord2, now: Millis) {
        let config = self.state.difficulty.config();
        let placer = RandomMinePlacer::new(self.seeds.next_u64());
        self.state.board = placer.place(&self.state.board, config.mine_count, safe);
        self.state.status = GameStatus::Playing;
        self.state.started_at = Some(now);
        self.state.timer_seconds = 0.0;
        if self.state.preferences.show_probabilities {
            self.state.probability_assist_used = true;
        }
        log::info!(
            "Started {} game at {safe:?} with {} mines",
            self.state.difficulty,
            self.state.board.mine_count()
        );
    }

    /// Recomputes the mine counter and resolves win or loss.
    fn settle(&mut self, now: Millis, events: &mut Vec<SessionEvent>) {
        self.state.remaining_mines = self.state.count_remaining_mines();
        if self.state.status != GameStatus::Playing {
            return;
        }

        if self.state.lives == 0 {
            self.state.board = self.state.board.reveal_all_mines();
            self.state.status = GameStatus::Lost;
            events.push(SessionEvent::Lost(self.finish(GameResult::Lose, now)));
        } else if self.state.board.check_win() {
            self.state.status = GameStatus::Won;
            events.push(SessionEvent::Won(self.finish(GameResult::Win, now)));
        }
    }

    fn finish(&mut self, result: GameResult, now: Millis) -> GameSummary {
        self.state.timer_seconds = self.state.elapsed_at(now);
        self.state.clear_hint();
        log::info!(
            "Game over ({result:?}) on {} after {:.2}s",
            self.state.difficulty,
            self.state.timer_seconds
        );
        GameSummary::of(&self.state, result, now)
    }

    fn push_undo(&mut self, snapshot: UndoSnapshot) {
        let stack = &mut self.state.undo_stack;
        stack.push(snapshot);
        if let Some(limit) = self.config.undo_limit {
            let excess = stack.len().saturating_sub(limit);
            stack.drain(..excess);
        }
    }

    fn apply_reset(&mut self, difficulty: Option<Difficulty>, events: &mut Vec<SessionEvent>) {
        let previous = self.state.difficulty;
        let difficulty = difficulty.unwrap_or(previous);
        let abandoned = self.state.status == GameStatus::Playing;

        self.state = GameState::new(difficulty, self.config.lives, self.state.preferences);
        events.push(SessionEvent::Reset {
            abandoned,
            previous,
            difficulty,
        });
    }

    fn apply_pause(&mut self, now: Millis, events: &mut Vec<SessionEvent>) {
        if self.state.paused {
            let paused_at = self.state.paused_at.take().unwrap_or(now);
            let paused_for = now.saturating_sub(paused_at);
            self.state.started_at = self.state.started_at.map(|started| started.saturating_add(paused_for));
            self.state.paused = false;
            self.state.timer_seconds = self.state.elapsed_at(now);
            events.push(SessionEvent::Resumed);
        } else if self.state.status == GameStatus::Playing {
            self.state.timer_seconds = self.state.elapsed_at(now);
            self.state.paused = true;
            self.state.paused_at = Some(now);
            events.push(SessionEvent::Paused);
        }
    }

    fn apply_undo(&mut self, events: &mut Vec<SessionEvent>) {
        if self.state.paused {
            return;
        }
        if let Some(snapshot) = self.state.undo_stack.pop() {
            self.state.restore(snapshot);
            events.push(SessionEvent::Undone);
        }
    }

    fn apply_hint(&mut self, events: &mut Vec<SessionEvent>) {
        if self.state.status != GameStatus::Playing || self.state.paused {
            return;
        }
        let Some(hint) = uncertain_hint(&self.state.board) else {
            return;
        };

        self.state.hint_cell = Some(hint.coords);
        self.state.hint_confidence = Some(hint.confidence());
        self.state.probability_assist_used = true;
        events.push(SessionEvent::HintShown(hint));
    }

    fn apply_assist(&mut self, now: Millis, events: &mut Vec<SessionEvent>) {
        if !self.state.preferences.auto_assist
            || self.state.status != GameStatus::Playing
            || self.state.paused
        {
            return;
        }
        let Some(ai_move) = assist_move(&self.state.board, self.config.heuristic_assist) else {
            log::trace!("Assist found no move");
            return;
        };

        self.state.assist_count += 1;
        self.state.auto_solve_used = true;
        events.push(SessionEvent::AssistMoved(ai_move));
        match ai_move.kind {
            MoveKind::Open => self.apply_open(ai_move.coords, now, events),
            MoveKind::Flag => self.apply_flag(ai_move.coords, now, events),
        };
    }
}
