use anyhow::Result;
use lifesweeper_core::{Coord2, uncertain_hint};
use lifesweeper_session::*;
use std::fmt;

use crate::store::FileRecords;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub won: u32,
    pub lost: u32,
    /// Times the assist ran out of moves and a guess was made.
    pub stalls: u32,
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let played = self.won + self.lost;
        let rate = if played == 0 {
            0.0
        } else {
            f64::from(self.won) * 100.0 / f64::from(played)
        };
        write!(
            f,
            "won {}, lost {} ({rate:.1}% wins), {} stalls",
            self.won, self.lost, self.stalls
        )
    }
}

/// Lowest-risk inferred cell, or the first closed cell when nothing is inferred.
fn guess(state: &GameState) -> Option<Coord2> {
    uncertain_hint(&state.board).map(|hint| hint.coords).or_else(|| {
        state
            .board
            .iter()
            .find(|(_, cell)| cell.is_unopened())
            .map(|(coords, _)| coords)
    })
}

/// Plays one game to the end with auto-assist, returning stalls.
fn play_one(session: &mut Session<ManualClock>) -> u32 {
    let (width, height) = session.state().board.size();
    let period = Driver::assist_period(session.state().preferences.assist_speed);
    let mut stalls = 0;

    session.open((width / 2, height / 2));
    while !session.state().status.is_finished() {
        session.clock().advance(period);
        session.tick();
        if !session.assist_step().is_empty() {
            continue;
        }

        stalls += 1;
        let Some(coords) = guess(session.state()) else {
            log::warn!("Nothing left to open on an unfinished board");
            break;
        };
        log::debug!("Guessing {coords:?}");
        session.open(coords);
    }
    stalls
}

pub fn run(config: SessionConfig, games: u32, records: Option<FileRecords>) -> Result<Tally> {
    let mut session = Session::new(config, ManualClock::new(0))?;
    if let Some(records) = records {
        session.observe(records);
    }
    session.toggle_auto_assist();

    let mut tally = Tally::default();
    for game in 0..games {
        session.reset(None);
        tally.stalls += play_one(&mut session);
        match session.state().status {
            GameStatus::Won => tally.won += 1,
            GameStatus::Lost => tally.lost += 1,
            _ => {}
        }
        log::info!("Game {game}: {:?}", session.state().status);
    }
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifesweeper_core::Difficulty;

    #[test]
    fn every_game_finishes() {
        let config = SessionConfig {
            seed: Some(21),
            difficulty: Difficulty::Easy,
            ..SessionConfig::default()
        };

        let tally = run(config, 12, None).unwrap();

        assert_eq!(tally.won + tally.lost, 12);
    }

    #[test]
    fn seeded_runs_repeat() {
        let config = SessionConfig {
            seed: Some(4),
            heuristic_assist: true,
            ..SessionConfig::default()
        };

        assert_eq!(run(config.clone(), 5, None).unwrap(), run(config, 5, None).unwrap());
    }

    #[test]
    fn guess_prefers_hint_then_first_closed_cell() {
        let mut state = GameState::new(Difficulty::Easy, 3, Preferences::default());
        assert_eq!(guess(&state), Some((0, 0)));

        state.board = lifesweeper_core::Board::from_mine_coords((3, 1), &[(0, 0)])
            .unwrap()
            .open_cell((1, 0))
            .toggle_flag((0, 0));
        assert_eq!(guess(&state), Some((2, 0)));
    }

    #[test]
    fn tally_reports_win_rate() {
        let tally = Tally {
            won: 3,
            lost: 1,
            stalls: 7,
        };

        assert_eq!(tally.to_string(), "won 3, lost 1 (75.0% wins), 7 stalls");
    }
}
