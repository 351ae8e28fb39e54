//! Game logic for lane defense: one simulation tick.
//!
//! The caller owns the clock; each `tick` call advances the world by one
//! fixed step in this order:
//!
//! 1. tick counter
//! 2. placement cooldowns
//! 3. sky sunshine
//! 4. zombie wave spawn
//! 5. plant actions (shoot / produce)
//! 6. projectile movement
//! 7. zombie movement (blocked while eating)
//! 8. falling sunshine
//! 9. projectile hits
//! 10. cleanup of spent projectiles and dead zombies
//! 11. plant eating
//! 12. sunshine expiry
//! 13. win / loss

use rand::Rng;

use super::types::*;
use crate::challenges::GameStatus;

/// Advance the game by one tick. Finished games are returned unchanged.
pub fn tick<R: Rng>(game: &PvzGame, rng: &mut R) -> PvzGame {
    if !game.state.is_playing() {
        return game.clone();
    }

    let mut next = game.clone();
    next.tick_count += 1;

    decrement_placement_cooldowns(&mut next);
    spawn_sky_sunshine(&mut next, rng);
    spawn_wave_zombie(&mut next, rng);
    run_plants(&mut next);
    move_projectiles(&mut next);
    move_zombies(&mut next);
    drop_sunshine(&mut next);
    resolve_hits(&mut next);
    remove_spent(&mut next);
    eat_plants(&mut next);
    expire_sunshine(&mut next);
    update_status(&mut next);

    log::trace!(
        "tick {}: {} zombies, {} projectiles, {} sun",
        next.tick_count,
        next.zombies.len(),
        next.projectiles.len(),
        next.sun
    );
    next
}

fn decrement_placement_cooldowns(game: &mut PvzGame) {
    for remaining in game.placement_cooldowns.values_mut() {
        *remaining = remaining.saturating_sub(1);
    }
}

fn spawn_sky_sunshine<R: Rng>(game: &mut PvzGame, rng: &mut R) {
    if !game.tick_count.is_multiple_of(SKY_SUN_INTERVAL) || game.rows == 0 || game.cols == 0 {
        return;
    }

    let id = game.allocate_id();
    let target_row = rng.gen_range(0..game.rows);
    let col = rng.gen_range(0..game.cols);
    game.sunshines.push(Sunshine {
        id,
        row: target_row,
        col,
        value: SUNSHINE_VALUE,
        created_tick: game.tick_count,
        motion: SunshineMotion::Falling {
            y: 0.0,
            target_row,
            speed: SUN_FALL_SPEED,
        },
    });
}

fn spawn_wave_zombie<R: Rng>(game: &mut PvzGame, rng: &mut R) {
    if !game.tick_count.is_multiple_of(ZOMBIE_SPAWN_INTERVAL)
        || game.wave_spawned >= game.wave_total
        || game.rows == 0
    {
        return;
    }

    let lane = rng.gen_range(0..game.rows);
    let id = game.allocate_id();
    game.zombies.push(Zombie::new(id, lane, game.cols));
    game.wave_spawned += 1;
    log::debug!(
        "Zombie {}/{} enters lane {}",
        game.wave_spawned,
        game.wave_total,
        lane
    );
}

/// Peashooters fire at zombies in their lane; sunflowers drop sunshine.
fn run_plants(game: &mut PvzGame) {
    let mut plants = std::mem::take(&mut game.plants);

    for plant in &mut plants {
        match &mut plant.kind {
            PlantKind::Peashooter { cooldown } => {
                if *cooldown > 0 {
                    *cooldown -= 1;
                    continue;
                }
                let col = plant.col as f64;
                let target_ahead = game
                    .zombies
                    .iter()
                    .any(|z| z.row == plant.row && z.x >= col);
                if target_ahead {
                    let id = game.allocate_id();
                    game.projectiles
                        .push(Projectile::pea(id, plant.row, plant.col));
                    *cooldown = PEASHOOTER_FIRE_COOLDOWN;
                }
            }
            PlantKind::Sunflower { sun_timer } => {
                *sun_timer = sun_timer.saturating_sub(1);
                if *sun_timer == 0 {
                    let id = game.allocate_id();
                    game.sunshines.push(Sunshine {
                        id,
                        row: plant.row,
                        col: plant.col,
                        value: SUNSHINE_VALUE,
                        created_tick: game.tick_count,
                        motion: SunshineMotion::Resting,
                    });
                    *sun_timer = SUNFLOWER_PRODUCTION_TICKS;
                }
            }
            PlantKind::Wallnut => {}
        }
    }

    game.plants = plants;
}

fn move_projectiles(game: &mut PvzGame) {
    for projectile in &mut game.projectiles {
        projectile.x += projectile.speed;
    }
    let limit = game.cols as f64;
    game.projectiles.retain(|p| p.x < limit);
}

/// Zombies walk left unless a plant stands in their cell.
fn move_zombies(game: &mut PvzGame) {
    let plants = &game.plants;
    for zombie in &mut game.zombies {
        let eating = plants.iter().any(|p| zombie.occupies(p.row, p.col));
        if !eating {
            zombie.x -= zombie.speed;
        }
    }
}

fn drop_sunshine(game: &mut PvzGame) {
    for sunshine in &mut game.sunshines {
        if let SunshineMotion::Falling {
            y,
            target_row,
            speed,
        } = sunshine.motion
        {
            let y = y + speed;
            sunshine.motion = if y >= target_row as f64 {
                SunshineMotion::Resting
            } else {
                SunshineMotion::Falling {
                    y,
                    target_row,
                    speed,
                }
            };
        }
    }
}

/// Each projectile damages the first zombie in its lane within
/// [`HIT_DISTANCE`], then is spent. Zombies already at 0 hp still absorb hits this tick.
fn resolve_hits(game: &mut PvzGame) {
    let limit = game.cols as f64;
    for projectile in &mut game.projectiles {
        for zombie in &mut game.zombies {
            if zombie.row == projectile.row && (zombie.x - projectile.x).abs() < HIT_DISTANCE {
                zombie.hp = zombie.hp.saturating_sub(projectile.damage);
                projectile.x = limit + 1.0;
                break;
            }
        }
    }
}

fn remove_spent(game: &mut PvzGame) {
    let limit = game.cols as f64;
    game.projectiles.retain(|p| p.x < limit);

    let before = game.zombies.len();
    game.zombies.retain(|z| !z.is_dead());
    if game.zombies.len() < before {
        log::debug!("{} zombie(s) defeated", before - game.zombies.len());
    }
}

/// Zombies standing in a plant's cell bite it; plants at 0 hp are removed.
fn eat_plants(game: &mut PvzGame) {
    let zombies = &game.zombies;
    for plant in &mut game.plants {
        let biters = zombies
            .iter()
            .filter(|z| z.occupies(plant.row, plant.col))
            .count() as u32;
        plant.hp = plant.hp.saturating_sub(biters * ZOMBIE_BITE_DAMAGE);
    }
    game.plants.retain(|p| p.hp > 0);
}

fn expire_sunshine(game: &mut PvzGame) {
    let now = game.tick_count;
    game.sunshines.retain(|s| !s.is_expired(now));
}

/// A zombie past the left edge loses the level; that check wins over victory.
fn update_status(game: &mut PvzGame) {
    if game.zombies.iter().any(|z| z.x < 0.0) {
        game.state = GameStatus::Lost;
        log::debug!("Zombies broke through on tick {}", game.tick_count);
    } else if game.wave_spawned >= game.wave_total && game.zombies.is_empty() {
        game.state = GameStatus::Won;
        log::debug!("All waves cleared on tick {}", game.tick_count);
    }
}
