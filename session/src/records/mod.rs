//! Leaderboard and streak bookkeeping, kept behind store traits so hosts choose where records live.

pub use keeper::*;
pub use leaderboard::*;
pub use streaks::*;

mod keeper;
mod leaderboard;
mod streaks;
