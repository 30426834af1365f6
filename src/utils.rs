use crate::engine::Grid;
use crate::error::GameError;

/// Builds a `Grid` from a text board, one line per row, top row first.
///
/// Cells are numbers separated by any run of whitespace; `.` and `0` both mean an empty
/// cell. The board is square, so the line count sets the size and each line must hold
/// that many cells. The returned grid starts with a score of zero.
///
/// Fails with `GameError::InvalidToken` for anything that is not a number or `.`,
/// `GameError::InvalidTile` for a number that is not a power of two of at least 2,
/// `GameError::RaggedGrid` for a line of the wrong length, and `GameError::InvalidSize`
/// for fewer than two lines.
///
/// # Examples
/// ```
/// use tile2048::utils::grid_from_str_array;
///
/// let grid = grid_from_str_array(&[
///     "2 . . 4",
///     ". . . .",
///     ". 8 . .",
///     ". . . 2048",
/// ]).unwrap();
/// assert_eq!(grid.size(), 4);
/// assert_eq!(grid.get(0, 3), 4);
/// assert_eq!(grid.get(3, 3), 2048);
/// assert!(grid_from_str_array(&["2 3", ". ."]).is_err());
/// ```
pub fn grid_from_str_array(s: &[&str]) -> Result<Grid, GameError> {
    let mut cells = Vec::with_capacity(s.len());
    for (r, row_str) in s.iter().enumerate() {
        let mut row = Vec::new();
        for (c, token) in row_str.split_whitespace().enumerate() {
            let value = match token {
                "." => 0,
                _ => token.parse::<u32>().map_err(|_| GameError::InvalidToken {
                    row: r,
                    col: c,
                    token: token.to_string(),
                })?,
            };
            row.push(value);
        }
        cells.push(row);
    }
    // Size, squareness and tile values are all checked by the grid itself.
    Grid::from_cells(cells)
}
