use lifesweeper_core::*;
use lifesweeper_session::*;
use std::fmt;

/// Text for one cell, at most three characters wide.
fn cell_text(coords: Coord2, cell: Cell, state: &GameState, overlay: Option<&ProbabilityMap>) -> String {
    if cell.is_flagged {
        return "F".into();
    }
    if cell.is_open {
        return match cell.adjacent_mines {
            _ if cell.is_exploded => "X".into(),
            _ if cell.is_mine => "*".into(),
            0 => ".".into(),
            count => count.to_string(),
        };
    }
    if state.hint_cell == Some(coords) {
        return "?".into();
    }
    match overlay.and_then(|map| map.get(coords)) {
        Some(percent) => format!("{percent}%"),
        None => "#".into(),
    }
}

fn status_text(state: &GameState) -> &'static str {
    match state.status {
        _ if state.paused => "paused",
        GameStatus::Idle => "ready",
        GameStatus::Playing => "playing",
        GameStatus::Won => "won",
        GameStatus::Lost => "lost",
    }
}

/// Status line followed by the grid, `x` across and `y` down.
pub struct Screen<'a> {
    state: &'a GameState,
    overlay: Option<&'a ProbabilityMap>,
}

pub fn render<'a>(state: &'a GameState, overlay: Option<&'a ProbabilityMap>) -> Screen<'a> {
    Screen { state, overlay }
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;
        let (width, height) = state.board.size();

        write!(
            f,
            "{} | {} | lives {} | mines {} | {:.1}s",
            state.difficulty,
            status_text(state),
            state.lives,
            state.remaining_mines,
            state.timer_seconds,
        )?;
        if let (Some(coords), Some(confidence)) = (state.hint_cell, state.hint_confidence) {
            write!(f, " | hint {coords:?} {confidence}% safe")?;
        }
        writeln!(f)?;

        f.write_str("   ")?;
        for x in 0..width {
            write!(f, "{x:>4}")?;
        }
        writeln!(f)?;

        for y in 0..height {
            write!(f, "{y:>3}")?;
            for x in 0..width {
                let cell = state.board[(x, y)];
                write!(f, "{:>4}", cell_text((x, y), cell, state, self.overlay))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(board: Board) -> GameState {
        let mut state = GameState::new(Difficulty::Easy, 3, Preferences::default());
        state.board = board;
        state.status = GameStatus::Playing;
        state.remaining_mines = state.count_remaining_mines();
        state
    }

    #[test]
    fn draws_numbers_flags_and_closed_cells() {
        let board = Board::from_mine_coords((3, 2), &[(0, 0)])
            .unwrap()
            .open_cell((2, 1))
            .toggle_flag((0, 0));

        let text = render(&state(board), None).to_string();
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows[0], "easy | playing | lives 3 | mines 0 | 0.0s");
        assert_eq!(rows[1], "      0   1   2");
        assert_eq!(rows[2], "  0   F   1   .");
        assert_eq!(rows[3], "  1   #   1   .");
    }

    #[test]
    fn overlay_and_hint_replace_closed_cells() {
        let board = Board::from_mine_coords((3, 1), &[(0, 0)])
            .unwrap()
            .open_cell((1, 0));
        let mut state = state(board);
        let map = probability_map(&state.board);

        let text = render(&state, Some(&map)).to_string();
        assert!(text.ends_with("  0 50%   1 50%\n"));

        state.hint_cell = Some((2, 0));
        state.hint_confidence = Some(50);
        let text = render(&state, Some(&map)).to_string();
        assert!(text.contains("hint (2, 0) 50% safe"));
        assert!(text.ends_with("  0 50%   1   ?\n"));
    }

    #[test]
    fn lost_board_shows_explosion_and_mines() {
        let board = Board::from_mine_coords((2, 1), &[(0, 0), (1, 0)])
            .unwrap()
            .open_cell((0, 0))
            .with_exploded(&[(0, 0)])
            .reveal_all_mines();
        let mut state = state(board);
        state.status = GameStatus::Lost;

        let text = render(&state, None).to_string();

        assert!(text.contains("| lost |"));
        assert!(text.ends_with("  0   X   *\n"));
    }
}
