//! Core grid engine for the 2048 puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Grid`: the NxN board of tile values, the score, and the per-turn move flags.
//! - `Direction`: the four sliding directions, each described as an orientation
//!   (a short list of `Transform`s) around a single left-oriented compress+merge routine.
//! - `MoveFlags`: what happened during the current turn (compression, merge, movement).
//!
//! Every directional move is built from three primitives: `transpose`, `reverse_rows`
//! and `compress_left` + `merge_left`. The merge rule therefore lives in exactly one place.
use crate::error::GameError;
use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Default width and height of the board.
pub const DEFAULT_SIZE: usize = 4;

/// Smallest board that still has neighbours to merge with.
pub const MIN_SIZE: usize = 2;

/// Tile value that wins the game.
pub const DEFAULT_TARGET: u32 = 2048;

/// Probability that a freshly spawned tile is a 2 rather than a 4.
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Largest tile a `u32` cell can hold. Tiles of this value never merge.
pub const MAX_TILE: u32 = 1 << 31;

/// Returns `true` for values that may legally occupy a cell: 0 (empty) or a power of two
/// between 2 and `MAX_TILE`.
pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

/// Returns `true` if two equal neighbours holding `value` would combine.
fn mergeable(value: u32) -> bool {
    value != 0 && value < MAX_TILE
}

/// The four directions tiles can slide in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A self-inverse rearrangement of the grid used to orient a move towards the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Swap the grid across its main diagonal, turning columns into rows.
    Transpose,
    /// Reverse the order of the cells inside every row.
    ReverseRows,
}

impl Direction {
    /// All four directions, in the order the auto player cycles through them.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];

    /// Returns the transforms that turn this direction into a left move.
    ///
    /// The grid is oriented by applying these in order, compressed and merged to the left,
    /// and then restored by applying the same transforms in reverse order. Both transforms
    /// are their own inverse, so no separate "undo" list is needed.
    ///
    /// # Examples
    /// ```
    /// use tile2048::engine::{Direction, Transform};
    /// assert!(Direction::Left.orientation().is_empty());
    /// assert_eq!(
    ///     Direction::Down.orientation(),
    ///     &[Transform::Transpose, Transform::ReverseRows]
    /// );
    /// ```
    pub fn orientation(self) -> &'static [Transform] {
        match self {
            Direction::Left => &[],
            Direction::Right => &[Transform::ReverseRows],
            Direction::Up => &[Transform::Transpose],
            Direction::Down => &[Transform::Transpose, Transform::ReverseRows],
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Transient flags describing the current turn. Cleared at the start of every turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags {
    /// At least one tile changed position during the last compress.
    pub compressed: bool,
    /// At least one pair of tiles was combined during the last merge.
    pub merged: bool,
    /// The move changed the board. Captured after the first compress+merge of a move.
    pub moved: bool,
}

/// The 2048 board: an NxN grid of tile values plus the running score.
///
/// Cells hold 0 for an empty position or a power of two >= 2. The size is fixed at
/// construction. The grid owns its random number generator so that seeded games are
/// reproducible from start to finish.
///
/// # Examples
/// ```
/// use tile2048::engine::{Direction, Grid};
/// let mut grid = Grid::from_cells(vec![
///     vec![2, 2, 0, 0],
///     vec![0, 0, 0, 0],
///     vec![0, 0, 0, 0],
///     vec![0, 0, 0, 0],
/// ]).unwrap();
/// let flags = grid.apply_move(Direction::Left);
/// assert!(flags.moved);
/// assert_eq!(grid.get(0, 0), 4);
/// assert_eq!(grid.score(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Vec<u32>>,
    size: usize,
    flags: MoveFlags,
    score: u32,
    rng: SmallRng,
}

impl Grid {
    /// Creates an empty `size` x `size` grid whose tile spawns are seeded from system entropy.
    ///
    /// # Errors
    /// Returns `GameError::InvalidSize` if `size` is smaller than `MIN_SIZE`.
    pub fn new(size: usize) -> Result<Self, GameError> {
        Self::with_rng(size, SmallRng::from_entropy())
    }

    /// Creates an empty grid whose tile spawns are fully determined by `seed`.
    ///
    /// Two grids built with the same size and seed spawn identical tiles in identical
    /// positions as long as they receive the same moves.
    pub fn with_seed(size: usize, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(size, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(size: usize, rng: SmallRng) -> Result<Self, GameError> {
        if size < MIN_SIZE {
            return Err(GameError::InvalidSize {
                size,
                min: MIN_SIZE,
            });
        }
        Ok(Grid {
            cells: Self::empty_cells_box(size),
            size,
            flags: MoveFlags::default(),
            score: 0,
            rng,
        })
    }

    /// Creates a grid from explicit rows of cell values, with a zero score.
    ///
    /// # Arguments
    /// * `cells`: The rows of the board, top row first. The number of rows fixes the size.
    ///
    /// # Errors
    /// * `GameError::InvalidSize` if fewer than `MIN_SIZE` rows are given.
    /// * `GameError::RaggedGrid` if any row's length differs from the number of rows.
    /// * `GameError::InvalidTile` if a cell is neither 0 nor a power of two >= 2.
    pub fn from_cells(cells: Vec<Vec<u32>>) -> Result<Self, GameError> {
        let size = cells.len();
        let mut grid = Self::new(size)?;
        for (r, row) in cells.iter().enumerate() {
            if row.len() != size {
                return Err(GameError::RaggedGrid {
                    row: r,
                    len: row.len(),
                    expected: size,
                });
            }
            if let Some(c) = row.iter().position(|&v| !is_valid_tile(v)) {
                return Err(GameError::InvalidTile {
                    row: r,
                    col: c,
                    value: row[c],
                });
            }
        }
        grid.cells = cells;
        Ok(grid)
    }

    /// Replaces the tile spawn generator with one seeded from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    fn empty_cells_box(size: usize) -> Vec<Vec<u32>> {
        vec![vec![0; size]; size]
    }

    /// Width (and height) of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total value of every merge performed on this grid so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Flags describing the most recent move.
    pub fn flags(&self) -> MoveFlags {
        self.flags
    }

    /// Read-only view of the rows, top row first.
    pub fn cells(&self) -> &[Vec<u32>] {
        &self.cells
    }

    /// Returns the value at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the grid.
    pub fn get(&self, r: usize, c: usize) -> u32 {
        self.cells[r][c]
    }

    /// Largest tile currently on the board (0 for an empty board).
    pub fn max_tile(&self) -> u32 {
        self.cells
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut empty = Vec::new();
        for r in 0..self.size {
            for c in 0..self.size {
                if self.cells[r][c] == 0 {
                    empty.push((r, c));
                }
            }
        }
        empty
    }

    /// Places a new tile on a uniformly chosen empty cell.
    ///
    /// The new tile is a 2 with probability `SPAWN_TWO_PROBABILITY`, otherwise a 4.
    /// Exactly one cell is mutated.
    ///
    /// # Returns
    /// The `(row, col)` of the spawned tile.
    ///
    /// # Errors
    /// Returns `GameError::NoEmptyCell` if the grid is full; the grid is left untouched.
    pub fn spawn_random_tile(&mut self) -> Result<(usize, usize), GameError> {
        let empty = self.empty_cells();
        let Some(&(r, c)) = empty.choose(&mut self.rng) else {
            warn!("Tile spawn requested on a full {}x{} grid", self.size, self.size);
            return Err(GameError::NoEmptyCell);
        };
        let value = if self.rng.gen_bool(SPAWN_TWO_PROBABILITY) {
            2
        } else {
            4
        };
        self.cells[r][c] = value;
        debug!("Spawned {} at ({}, {})", value, r, c);
        Ok((r, c))
    }

    /// Swaps the grid across its main diagonal (`cells[i][j] <-> cells[j][i]`).
    pub fn transpose(&mut self) {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let upper = self.cells[i][j];
                self.cells[i][j] = self.cells[j][i];
                self.cells[j][i] = upper;
            }
        }
    }

    /// Reverses the order of the cells within each row.
    pub fn reverse_rows(&mut self) {
        for row in &mut self.cells {
            row.reverse();
        }
    }

    /// Applies one orienting transform.
    pub fn apply_transform(&mut self, transform: Transform) {
        match transform {
            Transform::Transpose => self.transpose(),
            Transform::ReverseRows => self.reverse_rows(),
        }
    }

    /// Resets the per-turn flags.
    pub fn clear_flags(&mut self) {
        self.flags = MoveFlags::default();
    }

    /// Slides every non-zero tile of each row towards index 0, keeping their order.
    ///
    /// Sets `compressed` if any tile changed position, and clears it otherwise. It is run
    /// both before and after `merge_left`, since a merge leaves a gap behind it.
    pub fn compress_left(&mut self) {
        self.flags.compressed = false;
        for row in &mut self.cells {
            let mut write = 0;
            for read in 0..row.len() {
                if row[read] != 0 {
                    if read != write {
                        row[write] = row[read];
                        row[read] = 0;
                        self.flags.compressed = true;
                    }
                    write += 1;
                }
            }
        }
    }

    /// Combines equal neighbours in a single left-to-right pass over each row.
    ///
    /// When two adjacent non-zero cells are equal the left one doubles, the right one
    /// becomes empty and the score grows by the doubled value. The emptied cell ends the
    /// pair, so a freshly merged tile is never merged again in the same pass:
    /// `2 2 2 2` becomes `4 0 4 0`, not `8 0 0 0`.
    ///
    /// Pairs of `MAX_TILE` stay apart, and the score stops growing at `u32::MAX`.
    pub fn merge_left(&mut self) {
        self.flags.merged = false;
        for row in &mut self.cells {
            for j in 0..row.len() - 1 {
                if mergeable(row[j]) && row[j] == row[j + 1] {
                    row[j] *= 2;
                    row[j + 1] = 0;
                    self.score = self.score.saturating_add(row[j]);
                    self.flags.merged = true;
                }
            }
        }
    }

    /// Slides and merges every tile towards `direction`.
    ///
    /// The grid is oriented with `Direction::orientation`, compressed, merged, compressed
    /// again to close the gaps left by merging, and finally restored. `moved` is taken
    /// from the first compress+merge pair; the closing compress never decides whether the
    /// move happened.
    ///
    /// # Returns
    /// A copy of the flags after the move.
    pub fn apply_move(&mut self, direction: Direction) -> MoveFlags {
        let orientation = direction.orientation();
        for &transform in orientation {
            self.apply_transform(transform);
        }

        self.compress_left();
        self.merge_left();
        self.flags.moved = self.flags.compressed || self.flags.merged;
        self.compress_left();

        for &transform in orientation.iter().rev() {
            self.apply_transform(transform);
        }

        debug!(
            "Move {}: moved={} merged={} score={}",
            direction, self.flags.moved, self.flags.merged, self.score
        );
        self.flags
    }

    /// Returns `true` if any cell is empty.
    pub fn has_empty_cells(&self) -> bool {
        self.cells.iter().any(|row| row.contains(&0))
    }

    /// Returns `true` if any horizontally or vertically adjacent pair holds equal values.
    ///
    /// The comparison is plain equality, so two neighbouring empty cells count as a pair.
    /// Terminal detection always asks `has_empty_cells` as well, which already covers
    /// every board where that matters. Neighbouring `MAX_TILE`s are not a pair.
    pub fn can_merge(&self) -> bool {
        let pairs = |a: u32, b: u32| a == b && a != MAX_TILE;
        let horizontal = self
            .cells
            .iter()
            .any(|row| row.windows(2).any(|pair| pairs(pair[0], pair[1])));
        if horizontal {
            return true;
        }
        for c in 0..self.size {
            for r in 0..self.size - 1 {
                if pairs(self.cells[r][c], self.cells[r + 1][c]) {
                    return true;
                }
            }
        }
        false
    }

    /// Returns `true` while at least one direction can still change the board.
    pub fn can_move(&self) -> bool {
        self.has_empty_cells() || self.can_merge()
    }

    /// Returns `true` if any tile has reached `threshold`.
    pub fn found_target(&self, threshold: u32) -> bool {
        self.cells
            .iter()
            .any(|row| row.iter().any(|&v| v >= threshold))
    }
}

impl fmt::Display for Grid {
    /// One row per line, cells separated by tabs, framed by dashed rules.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(40);
        writeln!(f, "{}", rule)?;
        for row in &self.cells {
            for value in row {
                write!(f, "{}\t", value)?;
            }
            writeln!(f)?;
        }
        write!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[u32]]) -> Grid {
        Grid::from_cells(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn locked_grid() -> Grid {
        grid(&[
            &[2, 4, 2, 4],
            &[4, 2, 4, 2],
            &[2, 4, 2, 4],
            &[4, 2, 4, 2],
        ])
    }

    fn sample_grid() -> Grid {
        grid(&[
            &[0, 2, 0, 4],
            &[2, 0, 0, 0],
            &[8, 16, 32, 64],
            &[4, 4, 0, 2],
        ])
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::with_seed(DEFAULT_SIZE, 7).unwrap();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.score(), 0);
        assert_eq!(grid.flags(), MoveFlags::default());
        assert!(grid.cells().iter().all(|row| row.iter().all(|&v| v == 0)));
        assert_eq!(grid.empty_cells().len(), 16);
    }

    #[test]
    fn test_new_grid_rejects_tiny_sizes() {
        assert_eq!(
            Grid::new(1).unwrap_err(),
            GameError::InvalidSize { size: 1, min: 2 }
        );
        assert!(Grid::with_seed(0, 1).is_err());
        assert!(Grid::new(5).is_ok());
    }

    #[test]
    fn test_from_cells_validation() {
        let ragged = Grid::from_cells(vec![vec![2, 0], vec![0]]);
        assert_eq!(
            ragged.unwrap_err(),
            GameError::RaggedGrid {
                row: 1,
                len: 1,
                expected: 2
            }
        );

        let odd = Grid::from_cells(vec![vec![2, 3], vec![0, 0]]);
        assert_eq!(
            odd.unwrap_err(),
            GameError::InvalidTile {
                row: 0,
                col: 1,
                value: 3
            }
        );

        let one = Grid::from_cells(vec![vec![0, 0], vec![1, 0]]);
        assert!(matches!(one, Err(GameError::InvalidTile { value: 1, .. })));

        assert!(Grid::from_cells(Vec::new()).is_err());
    }

    #[test]
    fn test_is_valid_tile() {
        assert!(is_valid_tile(0));
        assert!(is_valid_tile(2));
        assert!(is_valid_tile(4096));
        assert!(!is_valid_tile(1));
        assert!(!is_valid_tile(6));
        assert!(is_valid_tile(MAX_TILE));
        assert!(!is_valid_tile(u32::MAX));
    }

    #[test]
    fn test_largest_tiles_do_not_merge() {
        let mut g = grid(&[&[MAX_TILE, MAX_TILE], &[0, 0]]);
        for direction in Direction::ALL {
            g.clear_flags();
            let flags = g.apply_move(direction);
            assert!(!flags.merged, "{} merged two largest tiles", direction);
            assert_eq!(g.score(), 0);
            assert!(g
                .cells()
                .iter()
                .all(|row| row.iter().all(|&v| is_valid_tile(v))));
        }
        assert_eq!(g.max_tile(), MAX_TILE);

        let locked = grid(&[&[MAX_TILE, MAX_TILE], &[2, 4]]);
        assert!(!locked.can_merge());
        assert!(!locked.can_move());
    }

    #[test]
    fn test_score_saturates_instead_of_overflowing() {
        let half = MAX_TILE / 2;
        let mut g = grid(&[&[half, half], &[half, half]]);
        let flags = g.apply_move(Direction::Left);
        assert!(flags.merged);
        assert_eq!(g.cells(), &[vec![MAX_TILE, 0], vec![MAX_TILE, 0]]);
        assert_eq!(g.score(), u32::MAX);

        g.clear_flags();
        let flags = g.apply_move(Direction::Up);
        assert!(!flags.moved);
        assert_eq!(g.cells(), &[vec![MAX_TILE, 0], vec![MAX_TILE, 0]]);
        assert_eq!(g.score(), u32::MAX);
    }

    #[test]
    fn test_transpose() {
        let mut g = grid(&[&[2, 4], &[8, 16]]);
        g.transpose();
        assert_eq!(g.cells(), &[vec![2, 8], vec![4, 16]]);
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let mut g = sample_grid();
        let before = g.cells().to_vec();
        g.transpose();
        assert_ne!(g.cells(), before.as_slice());
        g.transpose();
        assert_eq!(g.cells(), before.as_slice());
    }

    #[test]
    fn test_reverse_rows_twice_is_identity() {
        let mut g = sample_grid();
        let before = g.cells().to_vec();
        g.reverse_rows();
        assert_eq!(g.cells()[2], vec![64, 32, 16, 8]);
        g.reverse_rows();
        assert_eq!(g.cells(), before.as_slice());
    }

    #[test]
    fn test_compress_left() {
        let mut g = sample_grid();
        g.compress_left();
        assert!(g.flags().compressed);
        assert_eq!(
            g.cells(),
            &[
                vec![2, 4, 0, 0],
                vec![2, 0, 0, 0],
                vec![8, 16, 32, 64],
                vec![4, 4, 2, 0],
            ]
        );
        // Compressing never merges.
        assert_eq!(g.score(), 0);
    }

    #[test]
    fn test_compress_left_is_idempotent() {
        let mut g = sample_grid();
        g.compress_left();
        let once = g.cells().to_vec();
        g.compress_left();
        assert_eq!(g.cells(), once.as_slice());
        assert!(!g.flags().compressed);
    }

    #[test]
    fn test_merge_left_single_pass() {
        let mut g = grid(&[&[2, 2, 2, 2], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        g.merge_left();
        assert_eq!(g.cells()[0], vec![4, 0, 4, 0]);
        assert_eq!(g.score(), 8);
        assert!(g.flags().merged);
    }

    #[test]
    fn test_merge_left_ignores_empty_pairs() {
        let mut g = grid(&[&[0, 0, 2, 4], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        g.merge_left();
        assert_eq!(g.cells()[0], vec![0, 0, 2, 4]);
        assert_eq!(g.score(), 0);
        assert!(!g.flags().merged);
    }

    #[test]
    fn test_move_left_adjacent_pair() {
        let mut g = grid(&[&[2, 2, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        let flags = g.apply_move(Direction::Left);
        assert_eq!(g.cells()[0], vec![4, 0, 0, 0]);
        assert!(flags.moved);
        assert!(flags.merged);
        assert_eq!(g.score(), 4);
    }

    #[test]
    fn test_move_left_pair_with_gap() {
        let mut g = grid(&[&[2, 0, 2, 0], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        let flags = g.apply_move(Direction::Left);
        assert_eq!(g.cells()[0], vec![4, 0, 0, 0]);
        assert!(flags.moved);
        assert_eq!(g.score(), 4);
    }

    #[test]
    fn test_move_left_closing_compress_does_not_remerge() {
        let mut g = grid(&[&[2, 2, 4, 0], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        let flags = g.apply_move(Direction::Left);
        // The merged 4 slides next to the old 4 but they stay separate this turn.
        assert_eq!(g.cells()[0], vec![4, 4, 0, 0]);
        assert!(flags.moved);
        assert!(flags.merged);
        assert_eq!(g.score(), 4);
    }

    #[test]
    fn test_move_right() {
        let mut g = grid(&[
            &[2, 2, 2, 2],
            &[0, 0, 0, 0],
            &[4, 0, 0, 4],
            &[2, 4, 8, 16],
        ]);
        let flags = g.apply_move(Direction::Right);
        assert!(flags.moved);
        assert_eq!(
            g.cells(),
            &[
                vec![0, 0, 4, 4],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 8],
                vec![2, 4, 8, 16],
            ]
        );
        assert_eq!(g.score(), 16);
    }

    #[test]
    fn test_move_up_and_down() {
        let column = grid(&[&[2, 0, 0, 0], &[2, 0, 0, 0], &[4, 0, 0, 0], &[4, 0, 0, 0]]);

        let mut up = column.clone();
        up.apply_move(Direction::Up);
        assert_eq!(
            up.cells(),
            &[
                vec![4, 0, 0, 0],
                vec![8, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ]
        );
        assert_eq!(up.score(), 12);

        let mut down = column;
        down.apply_move(Direction::Down);
        assert_eq!(
            down.cells(),
            &[
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![4, 0, 0, 0],
                vec![8, 0, 0, 0],
            ]
        );
        assert_eq!(down.score(), 12);
    }

    #[test]
    fn test_move_without_change_is_not_moved() {
        let mut g = grid(&[&[2, 4, 0, 0], &[8, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        let flags = g.apply_move(Direction::Left);
        assert!(!flags.moved);
        assert!(!flags.merged);
        assert_eq!(g.cells()[0], vec![2, 4, 0, 0]);
    }

    #[test]
    fn test_locked_grid_never_moves() {
        for direction in Direction::ALL {
            let mut g = locked_grid();
            let before = g.cells().to_vec();
            let flags = g.apply_move(direction);
            assert!(!flags.moved, "{} should not move a locked grid", direction);
            assert_eq!(g.cells(), before.as_slice());
            assert_eq!(g.score(), 0);
        }
        let g = locked_grid();
        assert!(!g.has_empty_cells());
        assert!(!g.can_merge());
        assert!(!g.can_move());
    }

    #[test]
    fn test_can_merge() {
        assert!(grid(&[&[2, 2], &[4, 8]]).can_merge());
        assert!(grid(&[&[2, 4], &[2, 8]]).can_merge());
        assert!(!grid(&[&[2, 4], &[4, 2]]).can_merge());
        // Two empty neighbours compare equal.
        assert!(grid(&[&[0, 0], &[2, 4]]).can_merge());
    }

    #[test]
    fn test_found_target() {
        let g = grid(&[&[1024, 0], &[0, 0]]);
        assert!(!g.found_target(DEFAULT_TARGET));
        assert!(g.found_target(1024));
        assert!(grid(&[&[0, 0], &[0, 4096]]).found_target(DEFAULT_TARGET));
    }

    #[test]
    fn test_clear_flags() {
        let mut g = grid(&[&[2, 2], &[0, 0]]);
        g.apply_move(Direction::Left);
        assert!(g.flags().moved);
        g.clear_flags();
        assert_eq!(g.flags(), MoveFlags::default());
    }

    #[test]
    fn test_spawn_fills_the_only_empty_cell() {
        for seed in 0..50 {
            let mut g = grid(&[
                &[2, 4, 2, 4],
                &[4, 2, 4, 2],
                &[2, 0, 2, 4],
                &[4, 2, 4, 2],
            ]);
            g.reseed(seed);
            assert_eq!(g.spawn_random_tile().unwrap(), (2, 1));
            let value = g.get(2, 1);
            assert!(value == 2 || value == 4, "unexpected spawn value {}", value);
            assert!(!g.has_empty_cells());
        }
    }

    #[test]
    fn test_spawn_on_full_grid_fails() {
        let mut g = locked_grid();
        let before = g.cells().to_vec();
        assert_eq!(g.spawn_random_tile(), Err(GameError::NoEmptyCell));
        assert_eq!(g.cells(), before.as_slice());
    }

    #[test]
    fn test_spawn_value_distribution() {
        let mut g = Grid::with_seed(DEFAULT_SIZE, 2048).unwrap();
        let mut fours = 0;
        let samples = 2000;
        for _ in 0..samples {
            let (r, c) = g.spawn_random_tile().unwrap();
            if g.get(r, c) == 4 {
                fours += 1;
            }
            g.cells[r][c] = 0;
        }
        assert!(
            fours > samples / 20 && fours < samples * 3 / 20,
            "{} fours out of {}",
            fours,
            samples
        );
    }

    #[test]
    fn test_seeded_spawns_are_deterministic() {
        let mut a = Grid::with_seed(DEFAULT_SIZE, 99).unwrap();
        let mut b = Grid::with_seed(DEFAULT_SIZE, 99).unwrap();
        for _ in 0..8 {
            assert_eq!(a.spawn_random_tile(), b.spawn_random_tile());
        }
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn test_score_is_monotonic_and_tiles_stay_valid() {
        let mut g = Grid::with_seed(DEFAULT_SIZE, 5).unwrap();
        g.spawn_random_tile().unwrap();
        g.spawn_random_tile().unwrap();
        let mut previous = g.score();
        for step in 0..400 {
            g.clear_flags();
            let flags = g.apply_move(Direction::ALL[step % 4]);
            assert!(g.score() >= previous);
            previous = g.score();
            assert!(g
                .cells()
                .iter()
                .all(|row| row.iter().all(|&v| is_valid_tile(v))));
            if flags.moved {
                g.spawn_random_tile().unwrap();
            }
            if !g.can_move() {
                break;
            }
        }
    }

    #[test]
    fn test_max_tile() {
        assert_eq!(sample_grid().max_tile(), 64);
        assert_eq!(Grid::with_seed(3, 1).unwrap().max_tile(), 0);
    }

    #[test]
    fn test_display_grid_formatting() {
        let g = grid(&[&[2, 0], &[0, 4]]);
        let text = g.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "-".repeat(40));
        assert_eq!(lines[1], "2\t0\t");
        assert_eq!(lines[2], "0\t4\t");
        assert_eq!(lines[3], "-".repeat(40));
    }
}
