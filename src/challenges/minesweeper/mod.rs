//! Minesweeper minigame.
//!
//! Boards are immutable snapshots: every move borrows the current board and
//! returns the next one, leaving the caller's copy intact for undo or replay.

pub mod generation;
pub mod logic;
pub mod types;

pub use generation::{create_game, create_game_with_first_click_safe, start_game};
pub use logic::{
    activate_cheat_mode, reveal, reveal_adjacent, toggle_flag, use_cheat,
};
pub use types::*;
