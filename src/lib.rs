//! Turn-based maze survival: a run of procedurally carved days, a depleting
//! food supply, greedy chasing enemies, and an exit to find before the food
//! runs out. The simulation here is synchronous and renderer-agnostic; the
//! `maze-days` binary drives it from a terminal.

pub mod enemy;
pub mod error;
pub mod game;
pub mod maze;
pub mod rules;
pub mod spawn;

pub use error::GameError;
pub use game::{DayPlan, Game, LevelComplete, TurnResult};
pub use maze::{Dir, Maze, Pos, START};
pub use rules::Rules;
