//! Board model and board generation for the connect-dots puzzle.
//!
//! This module defines the data every other component works on:
//! - `Color`: the finite palette markers are drawn from.
//! - `Layout`: cell and marker sizes used to place markers in board coordinates.
//! - `Marker` / `MarkerId`: a colored grid occupant and its row/column identity.
//! - `Connection` / `ConnectionId`: a committed pairing between two markers.
//! - `Board`: the ordered (row-major) marker list for one level.
//!
//! `generate_board` is the board generator: it seeds every usable color as a pair,
//! fills the remainder with random pairs, shuffles and lays the colors out row by row.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// The color of a marker.
///
/// The first five variants form the default palette, in the order the generator
/// consumes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// A red marker.
    Red,
    /// A green marker.
    Green,
    /// A blue marker.
    Blue,
    /// A yellow marker.
    Yellow,
    /// An orange marker.
    Orange,
    /// A purple marker.
    Purple,
    /// A cyan marker.
    Cyan,
    /// A pink marker.
    Pink,
}

/// The palette used when no other palette is configured.
pub const DEFAULT_PALETTE: [Color; 5] = [
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::Orange,
];

impl Color {
    /// Converts the color to its single-letter representation.
    ///
    /// This is the letter used by the text board format in `utils`.
    ///
    /// # Examples
    ///
    /// ```
    /// use connect_dots::board::Color;
    /// assert_eq!(Color::Red.to_char(), 'R');
    /// assert_eq!(Color::Pink.to_char(), 'K');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::Orange => 'O',
            Color::Purple => 'P',
            Color::Cyan => 'C',
            Color::Pink => 'K',
        }
    }

    /// Parses a color from its single-letter representation.
    ///
    /// Returns `None` for any letter that is not produced by `to_char`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            'Y' => Some(Color::Yellow),
            'O' => Some(Color::Orange),
            'P' => Some(Color::Purple),
            'C' => Some(Color::Cyan),
            'K' => Some(Color::Pink),
            _ => None,
        }
    }

    /// Returns the ANSI background color sequence for terminal output.
    fn to_ansi_color_code(&self) -> &'static str {
        match self {
            Color::Red => "41",
            Color::Green => "42",
            Color::Yellow => "43",
            Color::Blue => "44",
            Color::Purple => "45",
            Color::Cyan => "46",
            Color::Orange => "48;5;208",
            Color::Pink => "48;5;218",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Purple => "purple",
            Color::Cyan => "cyan",
            Color::Pink => "pink",
        };
        f.write_str(name)
    }
}

/// A point in board coordinates (pixels, origin at the top-left corner of the board).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Position { x, y }
    }

    /// Euclidean distance between two points.
    pub fn distance_to(&self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Sizes used to turn grid cells into board coordinates.
///
/// A marker's `position` is the top-left corner of its square, so the marker is
/// centered in its cell when `position = cell_origin + cell_size / 2 - marker_size / 2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Side length of one grid cell.
    pub cell_size: f32,
    /// Side length (diameter) of a marker. Also the diameter of its hit circle.
    pub marker_size: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            cell_size: 80.0,
            marker_size: 40.0,
        }
    }
}

impl Layout {
    /// Computes the position of the marker in cell (`row`, `col`).
    ///
    /// # Examples
    ///
    /// ```
    /// use connect_dots::board::{Layout, Position};
    /// let layout = Layout::default(); // 80px cells, 40px markers
    /// assert_eq!(layout.marker_position(1, 2), Position::new(180.0, 100.0));
    /// ```
    pub fn marker_position(&self, row: usize, col: usize) -> Position {
        let offset = self.cell_size / 2.0 - self.marker_size / 2.0;
        Position {
            x: col as f32 * self.cell_size + offset,
            y: row as f32 * self.cell_size + offset,
        }
    }

    /// Returns the center of a marker placed at `position`.
    pub fn marker_center(&self, position: Position) -> Position {
        Position {
            x: position.x + self.marker_size / 2.0,
            y: position.y + self.marker_size / 2.0,
        }
    }

    /// Radius of the circle around a marker's center that counts as "on" the marker.
    pub fn hit_radius(&self) -> f32 {
        self.marker_size / 2.0
    }
}

/// Identifies a marker by its grid cell. Unique within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId {
    pub row: usize,
    pub col: usize,
}

impl MarkerId {
    pub fn new(row: usize, col: usize) -> Self {
        MarkerId { row, col }
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// A colored occupant of one grid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub color: Color,
    /// Top-left corner of the marker in board coordinates.
    pub position: Position,
    /// Set once the marker is an endpoint of a committed connection.
    pub connected: bool,
}

/// Identifies a connection by its endpoints, in drag order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionId {
    pub start: MarkerId,
    pub end: MarkerId,
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A committed pairing between two same-colored markers.
///
/// `start` and `end` are copies of the endpoint positions taken when the
/// connection was made, not references to the markers.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub start: Position,
    pub end: Position,
    pub color: Color,
}

impl Connection {
    /// Builds the connection from the drag's start marker to the accepted target.
    pub(crate) fn between(start: &Marker, end: &Marker) -> Self {
        Connection {
            id: ConnectionId {
                start: start.id,
                end: end.id,
            },
            start: start.position,
            end: end.position,
            color: start.color,
        }
    }

    /// Returns the segment a renderer should draw: marker center to marker center.
    pub fn line(&self, layout: &Layout) -> (Position, Position) {
        (layout.marker_center(self.start), layout.marker_center(self.end))
    }
}

/// The markers of one level, in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    grid_size: usize,
    layout: Layout,
    markers: Vec<Marker>,
}

impl Board {
    /// Lays `colors` out over a `grid_size` x `grid_size` grid in row-major order.
    ///
    /// Every marker starts unconnected. If fewer colors than cells are supplied, the
    /// trailing cells are left without a marker; extra colors are ignored.
    pub fn from_colors(grid_size: usize, layout: Layout, colors: Vec<Color>) -> Self {
        let cells = (0..grid_size).flat_map(|row| (0..grid_size).map(move |col| (row, col)));
        let markers = cells
            .zip(colors)
            .map(|((row, col), color)| Marker {
                id: MarkerId::new(row, col),
                color,
                position: layout.marker_position(row, col),
                connected: false,
            })
            .collect();
        Board {
            grid_size,
            layout,
            markers,
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// All markers, row-major.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub(crate) fn markers_mut(&mut self) -> &mut [Marker] {
        &mut self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Returns the index of the marker with the given id, if it exists.
    pub fn index_of(&self, id: MarkerId) -> Option<usize> {
        if id.row >= self.grid_size || id.col >= self.grid_size {
            return None;
        }
        let index = id.row * self.grid_size + id.col;
        self.markers
            .get(index)
            .filter(|marker| marker.id == id)
            .map(|_| index)
    }

    /// Looks up a marker by id. Unknown ids are a plain miss.
    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.index_of(id).map(|index| &self.markers[index])
    }

    /// Number of markers currently connected.
    pub fn connected_count(&self) -> usize {
        self.markers.iter().filter(|m| m.connected).count()
    }

    /// Clears every marker's `connected` flag. Colors and positions are untouched.
    pub(crate) fn disconnect_all(&mut self) {
        for marker in &mut self.markers {
            marker.connected = false;
        }
    }

    /// Counts how many markers carry each color.
    pub fn color_counts(&self) -> BTreeMap<Color, usize> {
        let mut counts = BTreeMap::new();
        for marker in &self.markers {
            *counts.entry(marker.color).or_insert(0) += 1;
        }
        counts
    }

    /// Renders the board for a terminal, with row/column headers and ANSI colors.
    ///
    /// Connected markers are drawn as `..`; the marker at `highlight` (the drag start,
    /// typically) is drawn as `<>`.
    pub fn to_string_with_highlight(&self, highlight: Option<MarkerId>) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for col in 0..self.grid_size {
            output.push_str(&format!("{:<2}", col));
        }

        for row in 0..self.grid_size {
            output.push('\n');
            output.push_str(&format!("{:<2}", row));
            for col in 0..self.grid_size {
                let id = MarkerId::new(row, col);
                match self.marker(id) {
                    Some(marker) => {
                        let content = if highlight == Some(id) {
                            "<>"
                        } else if marker.connected {
                            ".."
                        } else {
                            "  "
                        };
                        output.push_str(&format!(
                            "\x1b[1;{};m{}\x1b[m",
                            marker.color.to_ansi_color_code(),
                            content
                        ));
                    }
                    None => output.push_str("  "),
                }
            }
        }

        output
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

fn random_usable_color<R: Rng + ?Sized>(usable: &[Color], rng: &mut R) -> Color {
    usable[rng.gen_range(0..usable.len())]
}

/// Generates a shuffled board of `grid_size` x `grid_size` markers.
///
/// 1. The first `min(palette.len(), cells / 2)` palette colors are usable.
/// 2. Each usable color is placed twice.
/// 3. While two or more cells remain, a random usable color is added as another pair.
///    A single remaining cell (odd cell count) gets one random usable color.
/// 4. The color list is shuffled (Fisher-Yates) and assigned to cells row by row.
///
/// Every color therefore appears at least twice and an even number of times, except
/// for exactly one color when the cell count is odd. That color can never be fully
/// paired; see `CompletionRule` for how completion treats the leftover marker.
///
/// If no color is usable (empty palette, or fewer than two cells) the board is empty.
///
/// # Examples
///
/// ```
/// use connect_dots::board::{generate_board, Layout, DEFAULT_PALETTE};
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let board = generate_board(4, &DEFAULT_PALETTE, Layout::default(), &mut rng);
/// assert_eq!(board.len(), 16);
/// assert!(board.color_counts().values().all(|&n| n >= 2 && n % 2 == 0));
/// ```
pub fn generate_board<R: Rng + ?Sized>(
    grid_size: usize,
    palette: &[Color],
    layout: Layout,
    rng: &mut R,
) -> Board {
    let total_cells = grid_size * grid_size;
    let usable = &palette[..palette.len().min(total_cells / 2)];
    if usable.is_empty() {
        warn!(
            grid_size,
            palette_len = palette.len(),
            "no usable colors, generating an empty board"
        );
        return Board::from_colors(grid_size, layout, Vec::new());
    }

    let mut colors = Vec::with_capacity(total_cells);
    for &color in usable {
        colors.push(color);
        colors.push(color);
    }
    while total_cells - colors.len() >= 2 {
        let color = random_usable_color(usable, rng);
        colors.push(color);
        colors.push(color);
    }
    if colors.len() < total_cells {
        colors.push(random_usable_color(usable, rng));
    }

    colors.shuffle(rng);

    debug!(
        grid_size,
        usable_colors = usable.len(),
        "generated board"
    );
    Board::from_colors(grid_size, layout, colors)
}

/// Generates a board from a seeded `SmallRng`, so the same seed always yields the same board.
pub fn generate_board_with_seed(
    grid_size: usize,
    palette: &[Color],
    layout: Layout,
    seed: u64,
) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    generate_board(grid_size, palette, layout, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn colors_of(board: &Board) -> Vec<Color> {
        board.markers().iter().map(|m| m.color).collect()
    }

    #[test]
    fn test_color_char_round_trip_covers_every_letter() {
        for c in "RGBYOPCK".chars() {
            let color = Color::from_char(c).unwrap();
            assert_eq!(color.to_char(), c);
        }
        assert_eq!(Color::from_char('.'), None);
        assert_eq!(Color::from_char('r'), None);
    }

    #[test]
    fn test_marker_positions_are_centered_in_cells() {
        let layout = Layout::default();
        assert_eq!(layout.marker_position(0, 0), Position::new(20.0, 20.0));
        assert_eq!(layout.marker_position(2, 1), Position::new(100.0, 180.0));
        assert_eq!(
            layout.marker_center(layout.marker_position(0, 0)),
            Position::new(40.0, 40.0)
        );
        assert_eq!(layout.hit_radius(), 20.0);
    }

    #[test]
    fn test_generate_board_size_and_pair_counts() {
        let mut rng = SmallRng::seed_from_u64(42);
        for grid_size in 2..=6 {
            for _ in 0..50 {
                let board = generate_board(grid_size, &DEFAULT_PALETTE, Layout::default(), &mut rng);
                let total = grid_size * grid_size;
                assert_eq!(board.len(), total);

                let counts = board.color_counts();
                let odd = counts.values().filter(|&&n| n % 2 == 1).count();
                assert!(counts.values().all(|&n| n >= 2), "{:?}", counts);
                assert_eq!(odd, total % 2, "grid {} counts {:?}", grid_size, counts);
            }
        }
    }

    #[test]
    fn test_generate_board_uses_palette_prefix() {
        let mut rng = SmallRng::seed_from_u64(1);
        // 3x3 -> floor(9 / 2) = 4 usable colors out of the default five.
        let board = generate_board(3, &DEFAULT_PALETTE, Layout::default(), &mut rng);
        let counts = board.color_counts();
        assert_eq!(counts.len(), 4);
        assert!(!counts.contains_key(&Color::Orange));

        // 2x2 -> 2 usable colors, each exactly one pair.
        let board = generate_board(2, &DEFAULT_PALETTE, Layout::default(), &mut rng);
        let counts = board.color_counts();
        assert_eq!(counts.get(&Color::Red), Some(&2));
        assert_eq!(counts.get(&Color::Green), Some(&2));
    }

    #[test]
    fn test_generate_board_small_palette_absorbs_remainder() {
        let palette = [Color::Red, Color::Green, Color::Blue];
        let mut rng = SmallRng::seed_from_u64(9);
        let board = generate_board(3, &palette, Layout::default(), &mut rng);
        let counts = board.color_counts();
        assert_eq!(counts.values().sum::<usize>(), 9);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.values().filter(|&&n| n % 2 == 1).count(), 1);
        assert!(counts.values().any(|&n| n >= 3));
    }

    #[test]
    fn test_generate_board_assigns_row_major_ids_and_positions() {
        let layout = Layout {
            cell_size: 50.0,
            marker_size: 10.0,
        };
        let board = generate_board_with_seed(4, &DEFAULT_PALETTE, layout, 3);
        for (index, marker) in board.markers().iter().enumerate() {
            let expected = MarkerId::new(index / 4, index % 4);
            assert_eq!(marker.id, expected);
            assert_eq!(marker.position, layout.marker_position(expected.row, expected.col));
            assert!(!marker.connected);
        }
    }

    #[test]
    fn test_generate_board_with_seed_determinism() {
        let board1 = generate_board_with_seed(4, &DEFAULT_PALETTE, Layout::default(), 514514);
        let board2 = generate_board_with_seed(4, &DEFAULT_PALETTE, Layout::default(), 514514);
        assert_eq!(board1, board2, "Boards with the same seed must be identical.");

        let differs = (0..10u64).any(|seed| {
            colors_of(&generate_board_with_seed(4, &DEFAULT_PALETTE, Layout::default(), seed))
                != colors_of(&board1)
        });
        assert!(differs, "Different seeds should produce different boards.");
    }

    #[test]
    fn test_generate_board_without_usable_colors_is_empty() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(generate_board(3, &[], Layout::default(), &mut rng).is_empty());
        assert!(generate_board(1, &DEFAULT_PALETTE, Layout::default(), &mut rng).is_empty());
        assert!(generate_board(0, &DEFAULT_PALETTE, Layout::default(), &mut rng).is_empty());
    }

    #[test]
    fn test_marker_lookup_misses_unknown_ids() {
        let board = board_from_str_array(&["RG", "GR"], Layout::default()).unwrap();
        assert_eq!(board.marker(MarkerId::new(1, 0)).map(|m| m.color), Some(Color::Green));
        assert!(board.marker(MarkerId::new(2, 0)).is_none());
        assert!(board.marker(MarkerId::new(0, 2)).is_none());
    }

    #[test]
    fn test_connection_snapshot_and_line() {
        let board = board_from_str_array(&["RR", "GG"], Layout::default()).unwrap();
        let markers = board.markers();
        let connection = Connection::between(&markers[1], &markers[0]);
        assert_eq!(connection.id.to_string(), "0-1-0-0");
        assert_eq!(connection.color, Color::Red);
        assert_eq!(connection.start, Position::new(100.0, 20.0));
        assert_eq!(
            connection.line(board.layout()),
            (Position::new(120.0, 40.0), Position::new(40.0, 40.0))
        );
    }

    #[test]
    fn test_display_board_formatting() {
        let mut board = board_from_str_array(&["RG", "GR"], Layout::default()).unwrap();
        board.markers_mut()[0].connected = true;
        let text = board.to_string_with_highlight(Some(MarkerId::new(1, 1)));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "  0 1 ");
        assert!(lines[1].starts_with("0 \x1b[1;41;m..\x1b[m"));
        assert!(lines[2].ends_with("\x1b[1;41;m<>\x1b[m"));
    }

    #[test]
    fn test_disconnect_all_keeps_colors_and_positions() {
        let mut board = generate_board_with_seed(3, &DEFAULT_PALETTE, Layout::default(), 5);
        let before = board.clone();
        for marker in board.markers_mut() {
            marker.connected = true;
        }
        assert_eq!(board.connected_count(), 9);
        board.disconnect_all();
        assert_eq!(board, before);
    }
}
