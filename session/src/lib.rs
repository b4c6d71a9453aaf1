//! Game session for [`lifesweeper_core`]: a single-threaded state machine over one board with lives, pause, undo,
//! hints and auto-assist, plus the record keeping that observes it.

pub use action::*;
pub use clock::*;
pub use config::*;
pub use driver::*;
pub use error::*;
pub use events::*;
pub use preferences::*;
pub use records::*;
pub use session::*;
pub use state::*;

mod action;
mod clock;
mod config;
mod driver;
mod error;
mod events;
mod preferences;
mod records;
mod session;
mod state;
