#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use difficulty::*;
pub use error::*;
pub use generator::*;
pub use inference::*;
pub use types::*;

mod board;
mod cell;
mod difficulty;
mod error;
mod generator;
mod inference;
mod reveal;
mod types;
