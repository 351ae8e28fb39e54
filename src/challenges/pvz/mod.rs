//! Lane defense minigame (Plants vs. Zombies style).
//!
//! Zombies walk in from the right edge of a rows x cols lawn. The player
//! spends sun on plants that shoot, produce more sun, or soak up bites.
//! Every tick and every player action borrows the current game and returns
//! the next snapshot.

pub mod economy;
pub mod logic;
pub mod types;

pub use economy::{collect_sunshine, place_plant, remove_plant};
pub use logic::tick;
pub use types::*;
