use crate::*;

/// Observer that turns finished and abandoned games into leaderboard entries and streak updates.
///
/// Store failures are logged and dropped; record keeping never interrupts play.
#[derive(Clone, Debug, Default)]
pub struct RecordKeeper<L, S> {
    pub leaderboard: L,
    pub streaks: S,
}

impl<L: LeaderboardStore, S: StreakStore> RecordKeeper<L, S> {
    pub fn new(leaderboard: L, streaks: S) -> Self {
        Self { leaderboard, streaks }
    }

    pub fn record(&mut self, event: &SessionEvent) -> Result<(), StoreError> {
        match event {
            SessionEvent::Won(summary) => {
                let appended = self.leaderboard.append(LeaderboardEntry::from_summary(summary));
                let updated = self.streaks.update(summary.difficulty, GameResult::Win);
                appended?;
                updated?;
            }
            SessionEvent::Lost(summary) => {
                self.streaks.update(summary.difficulty, GameResult::Lose)?;
            }
            SessionEvent::Reset {
                abandoned: true,
                previous,
                ..
            } => {
                self.streaks.break_win_streak(*previous)?;
            }
            _ => {}
        }
        Ok(())
    }
}

impl<L: LeaderboardStore, S: StreakStore> SessionObserver for RecordKeeper<L, S> {
    fn on_event(&mut self, _state: &GameState, event: &SessionEvent) {
        if let Err(err) = self.record(event) {
            log::warn!("Failed to save records: {err}");
        }
    }
}
