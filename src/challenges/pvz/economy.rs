//! Player actions that spend or earn sun.

use super::types::*;

/// Plant `plant_type` at (row, col).
///
/// Returns the game unchanged unless it is still playing, the cell is on the
/// lawn and empty, the player can pay for the plant, and the type is off its
/// placement cooldown.
pub fn place_plant(game: &PvzGame, row: usize, col: usize, plant_type: PlantType) -> PvzGame {
    if !game.state.is_playing()
        || !game.in_bounds(row, col)
        || game.is_occupied(row, col)
        || !game.can_afford(plant_type)
        || game.cooldown_remaining(plant_type) > 0
    {
        return game.clone();
    }

    let mut next = game.clone();
    next.sun -= plant_type.cost();
    next.placement_cooldowns
        .insert(plant_type, plant_type.placement_cooldown());
    let id = next.allocate_id();
    next.plants.push(Plant::new(id, row, col, plant_type));
    next
}

/// Pick up a sunshine, falling or resting, and add its value to the bank.
pub fn collect_sunshine(game: &PvzGame, id: EntityId) -> PvzGame {
    if !game.state.is_playing() {
        return game.clone();
    }
    let Some(index) = game.sunshines.iter().position(|s| s.id == id) else {
        return game.clone();
    };

    let mut next = game.clone();
    let sunshine = next.sunshines.remove(index);
    next.sun = next.sun.saturating_add(sunshine.value);
    next
}

/// Dig up the plant at (row, col). No sun is refunded.
pub fn remove_plant(game: &PvzGame, row: usize, col: usize) -> PvzGame {
    if !game.state.is_playing() || !game.is_occupied(row, col) {
        return game.clone();
    }

    let mut next = game.clone();
    next.plants.retain(|p| !(p.row == row && p.col == col));
    next
}
