//! Minesweeper minigame data structures.
//!
//! Classic minesweeper with variable grid sizes and mine counts.

use serde::{Deserialize, Serialize};

use crate::challenges::GameStatus;
use crate::error::{GameError, Result};

/// Difficulty levels for Minesweeper with varying grid sizes and mine counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinesweeperDifficulty {
    Novice,     // 9x9, 10 mines
    Apprentice, // 12x12, 25 mines
    Journeyman, // 16x16, 40 mines
    Master,     // 16x20, 60 mines
}

difficulty_enum_impl!(MinesweeperDifficulty);

impl MinesweeperDifficulty {
    /// Returns (rows, cols) for the grid.
    pub fn grid_size(&self) -> (usize, usize) {
        match self {
            Self::Novice => (9, 9),
            Self::Apprentice => (12, 12),
            Self::Journeyman => (16, 16),
            Self::Master => (16, 20),
        }
    }

    /// Returns the number of mines for this difficulty.
    pub fn mine_count(&self) -> usize {
        match self {
            Self::Novice => 10,
            Self::Apprentice => 25,
            Self::Journeyman => 40,
            Self::Master => 60,
        }
    }

    pub fn config(&self) -> BoardConfig {
        let (rows, cols) = self.grid_size();
        BoardConfig {
            rows,
            cols,
            mine_count: self.mine_count(),
        }
    }
}

/// Validated board dimensions and mine count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub mine_count: usize,
}

impl BoardConfig {
    /// Checks that the board has cells and room for every mine.
    pub fn new(rows: usize, cols: usize, mine_count: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        let available = rows
            .checked_mul(cols)
            .ok_or(GameError::BoardTooLarge { rows, cols })?;
        if mine_count > available {
            return Err(GameError::TooManyMines {
                requested: mine_count,
                available,
            });
        }
        Ok(Self {
            rows,
            cols,
            mine_count,
        })
    }

    pub const fn total_cells(&self) -> usize {
        self.rows * self.cols
    }

    pub fn validate_coords(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(GameError::InvalidCoords { row, col })
        }
    }
}

/// Represents a single cell in the minesweeper grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Flat row-major index (`row * cols + col`).
    pub id: usize,
    pub row: usize,
    pub col: usize,
    /// Whether this cell contains a mine.
    pub has_mine: bool,
    /// Whether this cell has been revealed.
    pub revealed: bool,
    /// Whether this cell has been flagged by the player.
    pub flagged: bool,
    /// Number of adjacent mines (0-8).
    pub adjacent_mines: u8,
    /// Mine exposed by the one-shot cheat. Presentation hint only: it never
    /// counts as a reveal.
    pub cheat_revealed: bool,
}

impl Cell {
    pub fn new(id: usize, row: usize, col: usize) -> Self {
        Self {
            id,
            row,
            col,
            ..Default::default()
        }
    }

    pub fn is_numbered(&self) -> bool {
        !self.has_mine && self.adjacent_mines > 0
    }
}

/// A minesweeper board snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub rows: usize,
    pub cols: usize,
    /// Total number of mines in the grid.
    pub mine_count: usize,
    /// Row-major cells, `rows * cols` long.
    pub cells: Vec<Cell>,
    pub state: GameStatus,
    /// Number of cells with `revealed == true`.
    pub revealed_count: usize,
    pub cheat_mode_active: bool,
    /// Set once the cheat has been spent; never cleared for this board.
    pub cheat_used: bool,
}

impl Board {
    /// Builds a playing board from a mine mask, computing adjacency counts.
    pub(crate) fn from_mine_mask(config: BoardConfig, mines: &[bool]) -> Self {
        let mut cells: Vec<Cell> = (0..config.total_cells())
            .map(|id| {
                let mut cell = Cell::new(id, id / config.cols, id % config.cols);
                cell.has_mine = mines.get(id).copied().unwrap_or(false);
                cell
            })
            .collect();

        for id in 0..cells.len() {
            let (row, col) = (cells[id].row, cells[id].col);
            let count = get_neighbors(row, col, config.rows, config.cols)
                .into_iter()
                .filter(|&(n_row, n_col)| cells[n_row * config.cols + n_col].has_mine)
                .count();
            cells[id].adjacent_mines = count as u8;
        }

        Self {
            rows: config.rows,
            cols: config.cols,
            mine_count: mines.iter().filter(|&&m| m).count(),
            cells,
            state: GameStatus::Playing,
            revealed_count: 0,
            cheat_mode_active: false,
            cheat_used: false,
        }
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig {
            rows: self.rows,
            cols: self.cols,
            mine_count: self.mine_count,
        }
    }

    /// Flat index for (row, col), or `None` when outside the grid.
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index_of(row, col).and_then(|idx| self.cells.get(idx))
    }

    pub fn safe_cell_count(&self) -> usize {
        (self.rows * self.cols).saturating_sub(self.mine_count)
    }

    pub fn flags_placed(&self) -> usize {
        self.cells.iter().filter(|cell| cell.flagged).count()
    }

    /// Returns the number of mines remaining (total mines - flags placed).
    /// Can be negative if player has placed more flags than mines.
    pub fn mines_remaining(&self) -> i64 {
        self.mine_count as i64 - self.flags_placed() as i64
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Flat indices of the Moore neighbours of (row, col).
    pub fn neighbor_indices(&self, row: usize, col: usize) -> Vec<usize> {
        get_neighbors(row, col, self.rows, self.cols)
            .into_iter()
            .map(|(n_row, n_col)| n_row * self.cols + n_col)
            .collect()
    }
}

/// Get valid neighbor coordinates for a cell.
///
/// Returns a vector of (row, col) tuples for all valid neighbors (up to 8 directions).
pub fn get_neighbors(row: usize, col: usize, rows: usize, cols: usize) -> Vec<(usize, usize)> {
    let mut neighbors = Vec::with_capacity(8);

    for d_row in -1i64..=1 {
        for d_col in -1i64..=1 {
            // Skip the cell itself
            if d_row == 0 && d_col == 0 {
                continue;
            }

            let new_row = row as i64 + d_row;
            let new_col = col as i64 + d_col;

            // Check bounds
            if new_row >= 0 && new_row < rows as i64 && new_col >= 0 && new_col < cols as i64 {
                neighbors.push((new_row as usize, new_col as usize));
            }
        }
    }

    neighbors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_neighbors_center() {
        let neighbors = get_neighbors(4, 4, 9, 9);
        assert_eq!(neighbors.len(), 8);

        let expected = vec![
            (3, 3),
            (3, 4),
            (3, 5),
            (4, 3),
            (4, 5),
            (5, 3),
            (5, 4),
            (5, 5),
        ];
        assert_eq!(neighbors, expected);
    }

    #[test]
    fn test_get_neighbors_corner() {
        let neighbors = get_neighbors(0, 0, 9, 9);
        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.contains(&(0, 1)));
        assert!(neighbors.contains(&(1, 0)));
        assert!(neighbors.contains(&(1, 1)));

        let neighbors = get_neighbors(8, 8, 9, 9);
        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.contains(&(7, 7)));
        assert!(neighbors.contains(&(7, 8)));
        assert!(neighbors.contains(&(8, 7)));
    }

    #[test]
    fn test_get_neighbors_edge() {
        assert_eq!(get_neighbors(0, 4, 9, 9).len(), 5);
        assert_eq!(get_neighbors(4, 0, 9, 9).len(), 5);
    }

    #[test]
    fn test_get_neighbors_single_cell_board() {
        assert!(get_neighbors(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_board_config_rejects_empty_board() {
        assert_eq!(BoardConfig::new(0, 5, 0), Err(GameError::EmptyBoard));
        assert_eq!(BoardConfig::new(5, 0, 0), Err(GameError::EmptyBoard));
    }

    #[test]
    fn test_board_config_rejects_too_many_mines() {
        assert_eq!(
            BoardConfig::new(2, 2, 5),
            Err(GameError::TooManyMines {
                requested: 5,
                available: 4
            })
        );
        assert!(BoardConfig::new(2, 2, 4).is_ok());
    }

    #[test]
    fn test_board_config_rejects_overflowing_size() {
        assert_eq!(
            BoardConfig::new(usize::MAX / 2, 3, 1),
            Err(GameError::BoardTooLarge {
                rows: usize::MAX / 2,
                cols: 3
            })
        );
    }

    #[test]
    fn test_difficulty_grid_sizes() {
        assert_eq!(MinesweeperDifficulty::Novice.grid_size(), (9, 9));
        assert_eq!(MinesweeperDifficulty::Novice.mine_count(), 10);
        assert_eq!(MinesweeperDifficulty::Apprentice.grid_size(), (12, 12));
        assert_eq!(MinesweeperDifficulty::Apprentice.mine_count(), 25);
        assert_eq!(MinesweeperDifficulty::Journeyman.grid_size(), (16, 16));
        assert_eq!(MinesweeperDifficulty::Journeyman.mine_count(), 40);
        assert_eq!(MinesweeperDifficulty::Master.grid_size(), (16, 20));
        assert_eq!(MinesweeperDifficulty::Master.mine_count(), 60);
    }

    #[test]
    fn test_difficulty_configs_are_valid() {
        for difficulty in MinesweeperDifficulty::ALL {
            let config = difficulty.config();
            assert_eq!(
                BoardConfig::new(config.rows, config.cols, config.mine_count),
                Ok(config)
            );
        }
    }

    #[test]
    fn test_difficulty_from_index() {
        assert_eq!(
            MinesweeperDifficulty::from_index(3),
            MinesweeperDifficulty::Master
        );
        assert_eq!(
            MinesweeperDifficulty::from_index(99),
            MinesweeperDifficulty::Novice
        );
        assert_eq!(MinesweeperDifficulty::Journeyman.name(), "Journeyman");
    }

    #[test]
    fn test_from_mine_mask_counts_adjacency() {
        let config = BoardConfig::new(3, 3, 1).unwrap();
        let mut mines = vec![false; 9];
        mines[0] = true;
        let board = Board::from_mine_mask(config, &mines);

        assert_eq!(board.cells.len(), 9);
        assert_eq!(board.mine_count, 1);
        assert_eq!(board.cells[1].adjacent_mines, 1);
        assert_eq!(board.cells[3].adjacent_mines, 1);
        assert_eq!(board.cells[4].adjacent_mines, 1);
        assert_eq!(board.cells[8].adjacent_mines, 0);
        assert_eq!(board.cells[5].row, 1);
        assert_eq!(board.cells[5].col, 2);
        assert_eq!(board.state, GameStatus::Playing);
    }

    #[test]
    fn test_mines_remaining_can_go_negative() {
        let config = BoardConfig::new(2, 2, 1).unwrap();
        let mut board = Board::from_mine_mask(config, &[true, false, false, false]);
        assert_eq!(board.mines_remaining(), 1);

        board.cells[1].flagged = true;
        board.cells[2].flagged = true;
        assert_eq!(board.flags_placed(), 2);
        assert_eq!(board.mines_remaining(), -1);
    }

    #[test]
    fn test_cell_lookup_out_of_bounds() {
        let config = BoardConfig::new(2, 3, 0).unwrap();
        let board = Board::from_mine_mask(config, &[false; 6]);
        assert_eq!(board.index_of(1, 2), Some(5));
        assert!(board.cell(2, 0).is_none());
        assert!(board.cell(0, 3).is_none());
    }
}
