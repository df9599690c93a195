use crate::board::{Board, Color, Layout};
use crate::error::BoardParseError;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row of the grid, starting from row 0, and each character
/// is one cell's color letter (see `Color::to_char`):
/// - 'R': `Color::Red`
/// - 'G': `Color::Green`
/// - 'B': `Color::Blue`
/// - 'Y': `Color::Yellow`
/// - 'O': `Color::Orange`
/// - 'P': `Color::Purple`
/// - 'C': `Color::Cyan`
/// - 'K': `Color::Pink`
///
/// The board is square: its grid size is the number of rows, and every row must have
/// exactly that many characters. Markers are positioned with `layout` and start
/// unconnected.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(BoardParseError)` if there are no rows, a row has the wrong length, or an
///   unrecognized character is encountered.
///
/// # Examples
/// ```
/// use connect_dots::board::{Color, Layout, MarkerId};
/// use connect_dots::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["RGB", "BGR", "YYY"], Layout::default()).unwrap();
/// assert_eq!(board.grid_size(), 3);
/// assert_eq!(board.marker(MarkerId::new(0, 1)).unwrap().color, Color::Green);
/// assert_eq!(board.marker(MarkerId::new(2, 2)).unwrap().color, Color::Yellow);
///
/// assert!(board_from_str_array(&["RX", "GG"], Layout::default()).is_err());
/// assert!(board_from_str_array(&["RGB", "GR"], Layout::default()).is_err());
/// ```
pub fn board_from_str_array(s: &[&str], layout: Layout) -> Result<Board, BoardParseError> {
    if s.is_empty() {
        return Err(BoardParseError::Empty);
    }
    let grid_size = s.len();

    let mut colors = Vec::with_capacity(grid_size * grid_size);
    for (row, row_str) in s.iter().enumerate() {
        let found = row_str.chars().count();
        if found != grid_size {
            return Err(BoardParseError::RowLength {
                row,
                expected: grid_size,
                found,
            });
        }

        for (col, c) in row_str.chars().enumerate() {
            let color = Color::from_char(c)
                .ok_or(BoardParseError::UnrecognizedChar { found: c, row, col })?;
            colors.push(color);
        }
    }

    Ok(Board::from_colors(grid_size, layout, colors))
}

/// Renders a board's colors back into the text form read by `board_from_str_array`.
pub fn board_to_str_array(board: &Board) -> Vec<String> {
    board
        .markers()
        .chunks(board.grid_size().max(1))
        .map(|row| row.iter().map(|m| m.color.to_char()).collect())
        .collect()
}
