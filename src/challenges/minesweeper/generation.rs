//! Mine placement and board construction.
//!
//! Mines are drawn without replacement from a shuffled candidate pool. The
//! first-click variant removes the clicked cell from the pool up front and,
//! when a numbered start is wanted, seeds one mine among its neighbours before
//! drawing the rest, so no post-generation fix-up is needed.

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::{get_neighbors, Board, BoardConfig, MinesweeperDifficulty};
use crate::error::{GameError, Result};

/// Constraints on where mines may go, derived from the player's first click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FirstClick {
    row: usize,
    col: usize,
    ensure_numbered: bool,
}

/// Create a board with `mine_count` mines placed uniformly at random.
pub fn create_game<R: Rng>(
    rows: usize,
    cols: usize,
    mine_count: usize,
    rng: &mut R,
) -> Result<Board> {
    let config = BoardConfig::new(rows, cols, mine_count)?;
    Ok(generate(config, None, rng))
}

/// Create a board whose (first_row, first_col) cell never holds a mine.
///
/// With `ensure_numbered`, one of the cell's neighbours is guaranteed to be a
/// mine so the first reveal shows a number instead of opening a clearing.
/// The guarantee is dropped (with a warning) when there is no neighbour to
/// hold the mine or no mine to place.
pub fn create_game_with_first_click_safe<R: Rng>(
    rows: usize,
    cols: usize,
    mine_count: usize,
    first_row: usize,
    first_col: usize,
    ensure_numbered: bool,
    rng: &mut R,
) -> Result<Board> {
    let config = BoardConfig::new(rows, cols, mine_count)?;
    config.validate_coords(first_row, first_col)?;

    let available = config.total_cells() - 1;
    if mine_count > available {
        return Err(GameError::TooManyMines {
            requested: mine_count,
            available,
        });
    }

    let first_click = FirstClick {
        row: first_row,
        col: first_col,
        ensure_numbered,
    };
    Ok(generate(config, Some(first_click), rng))
}

/// Start a fresh board for one of the preset difficulties.
pub fn start_game<R: Rng>(difficulty: MinesweeperDifficulty, rng: &mut R) -> Board {
    generate(difficulty.config(), None, rng)
}

/// Place mines for an already validated configuration.
fn generate<R: Rng>(config: BoardConfig, first_click: Option<FirstClick>, rng: &mut R) -> Board {
    let total = config.total_cells();
    let mut mines = vec![false; total];
    let mut remaining = config.mine_count;

    let excluded = first_click.map(|click| click.row * config.cols + click.col);

    if let Some(click) = first_click.filter(|click| click.ensure_numbered) {
        match seed_neighbor_mine(config, click, rng) {
            Some(id) => {
                mines[id] = true;
                remaining -= 1;
            }
            None => log::warn!(
                "Cannot make first click ({}, {}) numbered, fallback to simple safe",
                click.row,
                click.col
            ),
        }
    }

    let mut candidates: Vec<usize> = (0..total)
        .filter(|&id| Some(id) != excluded && !mines[id])
        .collect();
    candidates.shuffle(rng);

    for &id in candidates.iter().take(remaining) {
        mines[id] = true;
    }

    let board = Board::from_mine_mask(config, &mines);
    if board.mine_count != config.mine_count {
        log::warn!(
            "Generated board mine count mismatch, actual: {}, requested: {}",
            board.mine_count,
            config.mine_count
        );
    }
    board
}

/// Pick a random neighbour of the first click to hold a mine.
fn seed_neighbor_mine<R: Rng>(
    config: BoardConfig,
    click: FirstClick,
    rng: &mut R,
) -> Option<usize> {
    if config.mine_count == 0 {
        return None;
    }
    get_neighbors(click.row, click.col, config.rows, config.cols)
        .choose(rng)
        .map(|&(row, col)| row * config.cols + col)
}
