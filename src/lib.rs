//! Arcade - Grid Minigame Engines
//!
//! Pure state machines for Minesweeper and a lane defense game. Nothing here
//! renders or reads input; a front end owns the RNG and the clock and feeds
//! each snapshot into the next transition.

pub mod challenges;
pub mod error;

pub use challenges::minesweeper::{Board, Cell, MinesweeperDifficulty};
pub use challenges::pvz::{EntityId, PlantType, PvzConfig, PvzGame};
pub use challenges::GameStatus;
pub use error::{GameError, Result};
