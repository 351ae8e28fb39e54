//! Minesweeper moves: reveal, flood fill, chord, flags and the one-shot cheat.
//!
//! Every move borrows a board and returns the next snapshot. Disallowed moves
//! (finished game, coordinates off the grid, revealing a flag, ...) return an
//! unchanged copy.

use std::collections::VecDeque;

use rand::Rng;

use super::generation::create_game_with_first_click_safe;
use super::types::Board;
use crate::challenges::GameStatus;

/// Reveal a cell at the given position.
///
/// - If the game is over, the cell is flagged or already revealed, no action is taken.
/// - On the first click the board is regenerated around the clicked cell so it
///   cannot be a mine; it stays numbered if it was numbered before.
/// - If the cell has a mine, the game ends in a loss.
/// - If the cell has 0 adjacent mines, flood-fill reveals neighboring cells.
pub fn reveal<R: Rng>(
    board: &Board,
    row: usize,
    col: usize,
    is_first_click: bool,
    rng: &mut R,
) -> Board {
    let Some(idx) = board.index_of(row, col) else {
        return board.clone();
    };
    let cell = board.cells[idx];

    if board.state.is_finished() || cell.revealed || cell.flagged {
        return board.clone();
    }

    if is_first_click {
        return reveal_first_click(board, row, col, rng);
    }

    let mut next = board.clone();
    reveal_from(&mut next, idx);
    next
}

/// Regenerate the board with (row, col) safe, then reveal from it.
fn reveal_first_click<R: Rng>(board: &Board, row: usize, col: usize, rng: &mut R) -> Board {
    let ensure_numbered = board.cell(row, col).is_some_and(|cell| cell.adjacent_mines > 0);

    match create_game_with_first_click_safe(
        board.rows,
        board.cols,
        board.mine_count,
        row,
        col,
        ensure_numbered,
        rng,
    ) {
        Ok(mut next) => {
            let idx = row * next.cols + col;
            reveal_from(&mut next, idx);
            next
        }
        Err(err) => {
            log::warn!("Cannot regenerate board for first click: {err}");
            board.clone()
        }
    }
}

/// Reveal `idx` in place, flood filling from blanks and settling win/loss.
fn reveal_from(board: &mut Board, idx: usize) {
    board.cells[idx].revealed = true;
    board.revealed_count += 1;

    if board.cells[idx].has_mine {
        board.state = GameStatus::Lost;
        log::debug!("Mine hit at ({}, {})", board.cells[idx].row, board.cells[idx].col);
        return;
    }

    if board.cells[idx].adjacent_mines == 0 {
        flood_fill_reveal(board, idx);
    }

    check_win_condition(board);
}

/// Flood-fill reveal cells starting from a cell with 0 adjacent mines.
///
/// Breadth-first: each dequeued cell reveals all of its unrevealed, unflagged,
/// mine-free neighbours, and neighbours that are themselves blank are queued.
/// Numbered cells are revealed but never expanded.
fn flood_fill_reveal(board: &mut Board, start: usize) {
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let (row, col) = (board.cells[current].row, board.cells[current].col);

        for n_idx in board.neighbor_indices(row, col) {
            let neighbor = &mut board.cells[n_idx];
            // Skip revealed, flagged, and mine cells
            if neighbor.revealed || neighbor.flagged || neighbor.has_mine {
                continue;
            }

            neighbor.revealed = true;
            board.revealed_count += 1;

            // Blank neighbours keep the fill going
            if neighbor.adjacent_mines == 0 {
                queue.push_back(n_idx);
            }
        }
    }
}

/// Win condition: every non-mine cell is revealed.
fn check_win_condition(board: &mut Board) {
    if board.state.is_playing() && board.revealed_count >= board.safe_cell_count() {
        board.state = GameStatus::Won;
        log::debug!("Board cleared with {} cells revealed", board.revealed_count);
    }
}

/// Chord reveal around a revealed, numbered cell.
///
/// Only fires when the number of flagged neighbours equals the cell's count;
/// then every unflagged neighbour is revealed, one level deep. A wrong flag
/// means a mine gets revealed and the game is lost.
pub fn reveal_adjacent(board: &Board, row: usize, col: usize) -> Board {
    let Some(idx) = board.index_of(row, col) else {
        return board.clone();
    };
    let cell = board.cells[idx];

    if board.state.is_finished() || !cell.revealed || cell.adjacent_mines == 0 {
        return board.clone();
    }

    let neighbors = board.neighbor_indices(row, col);
    let flagged = neighbors
        .iter()
        .filter(|&&n_idx| board.cells[n_idx].flagged)
        .count();
    if flagged != cell.adjacent_mines as usize {
        return board.clone();
    }

    let mut next = board.clone();
    let mut hit_mine = false;
    for n_idx in neighbors {
        let neighbor = &mut next.cells[n_idx];
        // Flags are trusted; only hidden unflagged cells open
        if neighbor.revealed || neighbor.flagged {
            continue;
        }
        neighbor.revealed = true;
        next.revealed_count += 1;
        hit_mine |= neighbor.has_mine;
    }

    if hit_mine {
        next.state = GameStatus::Lost;
        log::debug!("Chord at ({row}, {col}) revealed a mine");
    } else {
        check_win_condition(&mut next);
    }
    next
}

/// Toggle flag on a cell.
///
/// Revealed cells cannot be flagged, and flags are frozen once the game ends.
pub fn toggle_flag(board: &Board, row: usize, col: usize) -> Board {
    let mut next = board.clone();
    let Some(idx) = board.index_of(row, col) else {
        return next;
    };

    if board.state.is_finished() || board.cells[idx].revealed {
        return next;
    }

    next.cells[idx].flagged = !next.cells[idx].flagged;
    next
}

/// Arm the one-shot cheat. Ignored once the cheat has been spent.
pub fn activate_cheat_mode(board: &Board) -> Board {
    let mut next = board.clone();
    if board.cheat_used || !board.state.is_playing() {
        return next;
    }
    next.cheat_mode_active = true;
    next
}

/// Spend the cheat on a revealed numbered cell, marking the hidden mines
/// around it with `cheat_revealed`. Does not reveal anything.
pub fn use_cheat(board: &Board, row: usize, col: usize) -> Board {
    if !board.cheat_mode_active || board.cheat_used || !board.state.is_playing() {
        return board.clone();
    }

    let Some(cell) = board.cell(row, col).copied() else {
        return board.clone();
    };
    if !cell.revealed || !cell.is_numbered() {
        return board.clone();
    }

    let mut next = board.clone();
    next.cheat_mode_active = false;
    next.cheat_used = true;

    for n_idx in board.neighbor_indices(row, col) {
        let neighbor = &mut next.cells[n_idx];
        if neighbor.has_mine && !neighbor.revealed {
            neighbor.cheat_revealed = true;
        }
    }
    next
}
