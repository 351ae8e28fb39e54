//! Lane defense data structures.
//!
//! Plants hold a grid of lanes against zombies walking in from the right.
//! Positions along a lane are continuous (`x`, in cells from the left edge);
//! rows and plant columns are whole cells.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::challenges::GameStatus;

/// Default lawn dimensions.
pub const DEFAULT_ROWS: usize = 5;
pub const DEFAULT_COLS: usize = 9;

/// Zombies per level unless configured otherwise.
pub const DEFAULT_WAVE_TOTAL: u32 = 10;

/// Sun available at the start of a level.
pub const STARTING_SUN: u32 = 150;

// Zombies
pub const ZOMBIE_SPAWN_INTERVAL: u64 = 20;
pub const ZOMBIE_HP: u32 = 3;
pub const ZOMBIE_SPEED: f64 = 0.1;
/// Damage a zombie deals per tick to the plant in its cell.
pub const ZOMBIE_BITE_DAMAGE: u32 = 1;

// Projectiles
pub const PROJECTILE_SPEED: f64 = 0.3;
pub const PROJECTILE_DAMAGE: u32 = 1;
/// A projectile hits a zombie in its lane closer than this (in cells).
pub const HIT_DISTANCE: f64 = 0.4;

// Plants
/// Ticks between peashooter shots.
pub const PEASHOOTER_FIRE_COOLDOWN: u32 = 6;
/// Ticks between sunflower sun drops.
pub const SUNFLOWER_PRODUCTION_TICKS: u32 = 120;
/// Hit points for plants without their own armour.
pub const PLANT_BASE_HP: u32 = 30;
pub const WALLNUT_HP: u32 = 300;

// Sunshine
pub const SUNSHINE_VALUE: u32 = 25;
/// Ticks between sunshine drops from the sky.
pub const SKY_SUN_INTERVAL: u64 = 50;
/// Rows per tick for falling sunshine.
pub const SUN_FALL_SPEED: f64 = 0.25;
/// Ticks a resting sunshine stays collectable.
pub const SUNSHINE_LIFETIME: u64 = 100;

/// Identifier unique among all entities of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Plant species a player can place.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum PlantType {
    #[default]
    Peashooter,
    Sunflower,
    Wallnut,
}

impl PlantType {
    pub const ALL: [PlantType; 3] = [Self::Peashooter, Self::Sunflower, Self::Wallnut];

    /// Sun spent to place one.
    pub fn cost(&self) -> u32 {
        match self {
            Self::Peashooter => 100,
            Self::Sunflower => 50,
            Self::Wallnut => 50,
        }
    }

    /// Ticks before another plant of this type can be placed.
    pub fn placement_cooldown(&self) -> u32 {
        match self {
            Self::Peashooter => 15,
            Self::Sunflower => 15,
            Self::Wallnut => 60,
        }
    }

    pub fn starting_hp(&self) -> u32 {
        match self {
            Self::Wallnut => WALLNUT_HP,
            Self::Peashooter | Self::Sunflower => PLANT_BASE_HP,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Peashooter => "Peashooter",
            Self::Sunflower => "Sunflower",
            Self::Wallnut => "Wall-nut",
        }
    }
}

/// Per-species plant state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantKind {
    /// Ticks until the next shot is allowed.
    Peashooter { cooldown: u32 },
    /// Ticks until the next sunshine drop.
    Sunflower { sun_timer: u32 },
    Wallnut,
}

impl PlantKind {
    pub fn new(plant_type: PlantType) -> Self {
        match plant_type {
            PlantType::Peashooter => Self::Peashooter { cooldown: 0 },
            PlantType::Sunflower => Self::Sunflower {
                sun_timer: SUNFLOWER_PRODUCTION_TICKS,
            },
            PlantType::Wallnut => Self::Wallnut,
        }
    }

    pub fn plant_type(&self) -> PlantType {
        match self {
            Self::Peashooter { .. } => PlantType::Peashooter,
            Self::Sunflower { .. } => PlantType::Sunflower,
            Self::Wallnut => PlantType::Wallnut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    pub id: EntityId,
    pub row: usize,
    pub col: usize,
    pub hp: u32,
    pub kind: PlantKind,
}

impl Plant {
    pub fn new(id: EntityId, row: usize, col: usize, plant_type: PlantType) -> Self {
        Self {
            id,
            row,
            col,
            hp: plant_type.starting_hp(),
            kind: PlantKind::new(plant_type),
        }
    }

    pub fn plant_type(&self) -> PlantType {
        self.kind.plant_type()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zombie {
    pub id: EntityId,
    pub row: usize,
    /// Distance from the left edge in cells. Negative once it breaks through.
    pub x: f64,
    pub hp: u32,
    /// Cells per tick.
    pub speed: f64,
}

impl Zombie {
    /// Standard zombie entering at the right edge of `row`.
    pub fn new(id: EntityId, row: usize, cols: usize) -> Self {
        Self {
            id,
            row,
            x: cols as f64 - 0.5,
            hp: ZOMBIE_HP,
            speed: ZOMBIE_SPEED,
        }
    }

    /// Column of the cell the zombie stands in, `None` past the left edge.
    pub fn column(&self) -> Option<usize> {
        (self.x >= 0.0).then(|| self.x.floor() as usize)
    }

    pub fn occupies(&self, row: usize, col: usize) -> bool {
        self.row == row && self.column() == Some(col)
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub row: usize,
    pub x: f64,
    pub speed: f64,
    pub damage: u32,
}

impl Projectile {
    /// Pea leaving a peashooter at (row, col).
    pub fn pea(id: EntityId, row: usize, col: usize) -> Self {
        Self {
            id,
            row,
            x: col as f64 + 0.5,
            speed: PROJECTILE_SPEED,
            damage: PROJECTILE_DAMAGE,
        }
    }
}

/// How a sunshine pickup is moving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SunshineMotion {
    /// Dropping from the sky; `y` is the current row position.
    Falling { y: f64, target_row: usize, speed: f64 },
    /// On the lawn, waiting to be collected.
    Resting,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sunshine {
    pub id: EntityId,
    /// Row the pickup is drawn on: the landing row while falling.
    pub row: usize,
    pub col: usize,
    pub value: u32,
    /// Tick the pickup was spawned on. Once resting it expires
    /// [`SUNSHINE_LIFETIME`] ticks after this.
    pub created_tick: u64,
    pub motion: SunshineMotion,
}

impl Sunshine {
    pub fn is_falling(&self) -> bool {
        matches!(self.motion, SunshineMotion::Falling { .. })
    }

    /// Resting pickups expire by age; falling ones never do.
    pub fn is_expired(&self, now: u64) -> bool {
        !self.is_falling() && now.saturating_sub(self.created_tick) >= SUNSHINE_LIFETIME
    }
}

/// Level setup for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvzConfig {
    pub rows: usize,
    pub cols: usize,
    pub wave_total: u32,
    pub starting_sun: u32,
}

impl Default for PvzConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            wave_total: DEFAULT_WAVE_TOTAL,
            starting_sun: STARTING_SUN,
        }
    }
}

/// Main game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvzGame {
    pub rows: usize,
    pub cols: usize,
    pub plants: Vec<Plant>,
    pub zombies: Vec<Zombie>,
    pub projectiles: Vec<Projectile>,
    pub sunshines: Vec<Sunshine>,
    pub sun: u32,
    pub state: GameStatus,
    pub wave_spawned: u32,
    pub wave_total: u32,
    pub tick_count: u64,
    /// Remaining placement cooldown per plant type.
    pub placement_cooldowns: BTreeMap<PlantType, u32>,
    /// Next value handed out by [`PvzGame::allocate_id`].
    next_id: u64,
}

impl PvzGame {
    pub fn new(config: PvzConfig) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            plants: Vec::new(),
            zombies: Vec::new(),
            projectiles: Vec::new(),
            sunshines: Vec::new(),
            sun: config.starting_sun,
            state: GameStatus::Playing,
            wave_spawned: 0,
            wave_total: config.wave_total,
            tick_count: 0,
            placement_cooldowns: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Hand out a fresh entity id. Ids only grow, so every entity ever added
    /// to this game (or to snapshots derived from it) gets a distinct one.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn plant_at(&self, row: usize, col: usize) -> Option<&Plant> {
        self.plants.iter().find(|p| p.row == row && p.col == col)
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.plant_at(row, col).is_some()
    }

    pub fn cooldown_remaining(&self, plant_type: PlantType) -> u32 {
        self.placement_cooldowns
            .get(&plant_type)
            .copied()
            .unwrap_or(0)
    }

    pub fn can_afford(&self, plant_type: PlantType) -> bool {
        self.sun >= plant_type.cost()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn waves_remaining(&self) -> u32 {
        self.wave_total.saturating_sub(self.wave_spawned)
    }
}

/// Start a level on a `rows` x `cols` lawn with default waves and sun.
pub fn create_pvz_game(rows: usize, cols: usize) -> PvzGame {
    PvzGame::new(PvzConfig {
        rows,
        cols,
        ..PvzConfig::default()
    })
}
