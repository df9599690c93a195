//! Connection engine: turns pointer input into committed connections.
//!
//! The engine owns the board for the current level, the list of committed
//! connections, the running score and the drag in progress. Every input is either
//! applied or silently ignored; nothing here returns an error. Invalid attempts
//! (wrong color, an already connected marker, the drag start itself, an unknown id)
//! are logged at `trace` level and leave all state untouched.
use crate::board::{Board, Connection, Marker, MarkerId, Position};
use tracing::{debug, info, trace};

/// Points awarded for each committed connection unless configured otherwise.
pub const DEFAULT_REWARD: u32 = 10;

/// A pointer input delivered by the host, in delivery order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed on a marker.
    Down(MarkerId),
    /// Pointer entered a marker's area while possibly dragging.
    Enter(MarkerId),
    /// Pointer moved to a point in board coordinates.
    Move(Position),
    /// Pointer released.
    Up,
    /// Pointer left the board; cancels the drag like `Up`.
    LeaveBoard,
}

/// Returns `true` if `point` lies within the hit circle of a marker.
///
/// `marker_position` is the marker's top-left corner and `marker_size` its diameter;
/// the circle is centered on the marker with radius `marker_size / 2`. Points on the
/// boundary count as inside.
///
/// # Examples
/// ```
/// use connect_dots::board::Position;
/// use connect_dots::engine::point_in_marker_radius;
///
/// let marker = Position::new(20.0, 20.0); // center (40, 40) for a 40px marker
/// assert!(point_in_marker_radius(Position::new(40.0, 40.0), marker, 40.0));
/// assert!(point_in_marker_radius(Position::new(60.0, 40.0), marker, 40.0));
/// assert!(!point_in_marker_radius(Position::new(60.0, 60.0), marker, 40.0));
/// ```
pub fn point_in_marker_radius(point: Position, marker_position: Position, marker_size: f32) -> bool {
    let radius = marker_size / 2.0;
    let center = Position::new(marker_position.x + radius, marker_position.y + radius);
    point.distance_to(center) <= radius
}

/// Drag tracking and connection bookkeeping for one level.
///
/// # Examples
/// ```
/// use connect_dots::board::{Layout, MarkerId};
/// use connect_dots::engine::{ConnectionEngine, PointerEvent, DEFAULT_REWARD};
/// use connect_dots::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["RG", "GR"], Layout::default()).unwrap();
/// let mut engine = ConnectionEngine::new(board, DEFAULT_REWARD);
///
/// engine.handle_event(PointerEvent::Down(MarkerId::new(0, 0)));
/// assert!(engine.handle_event(PointerEvent::Enter(MarkerId::new(1, 1))));
/// assert_eq!(engine.score(), 10);
/// assert_eq!(engine.connections().len(), 1);
/// assert!(!engine.is_dragging());
/// ```
#[derive(Clone, Debug)]
pub struct ConnectionEngine {
    board: Board,
    connections: Vec<Connection>,
    drag_start: Option<MarkerId>,
    score: u32,
    reward: u32,
}

impl ConnectionEngine {
    /// Creates an engine for `board` with no connections, no drag and a zero score.
    pub fn new(board: Board, reward: u32) -> Self {
        ConnectionEngine {
            board,
            connections: Vec::new(),
            drag_start: None,
            score: 0,
            reward,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn markers(&self) -> &[Marker] {
        self.board.markers()
    }

    /// Committed connections, oldest first.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn reward(&self) -> u32 {
        self.reward
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    /// The marker the current drag started on, if a drag is in progress.
    pub fn drag_start(&self) -> Option<&Marker> {
        self.drag_start.and_then(|id| self.board.marker(id))
    }

    /// Starts a drag on the marker `id`.
    ///
    /// Returns `false` (and leaves any current drag as it was) if the marker does not
    /// exist or is already connected.
    pub fn begin_drag(&mut self, id: MarkerId) -> bool {
        match self.board.marker(id) {
            Some(marker) if !marker.connected => {
                trace!(marker = %id, "drag started");
                self.drag_start = Some(id);
                true
            }
            Some(_) => {
                trace!(marker = %id, "ignored drag on connected marker");
                false
            }
            None => {
                trace!(marker = %id, "ignored drag on unknown marker");
                false
            }
        }
    }

    /// Offers the marker `id` as the end of the current drag.
    ///
    /// The target is accepted iff a drag is in progress, the target is not the drag
    /// start, the target is not connected and it has the start's color. Acceptance
    /// records a connection from the start to the target, marks both markers
    /// connected, adds the reward to the score and ends the drag.
    ///
    /// Returns the new connection, or `None` if the target was ignored.
    pub fn consider_target(&mut self, id: MarkerId) -> Option<&Connection> {
        let start_id = self.drag_start?;
        if start_id == id {
            return None;
        }
        let (Some(start_index), Some(target_index)) =
            (self.board.index_of(start_id), self.board.index_of(id))
        else {
            trace!(target = %id, "ignored unknown target");
            return None;
        };

        let markers = self.board.markers();
        let (start, target) = (&markers[start_index], &markers[target_index]);
        if start.connected || target.connected || start.color != target.color {
            trace!(
                start = %start_id,
                target = %id,
                target_connected = target.connected,
                "ignored target"
            );
            return None;
        }

        let connection = Connection::between(start, target);
        let markers = self.board.markers_mut();
        markers[start_index].connected = true;
        markers[target_index].connected = true;
        self.score = self.score.saturating_add(self.reward);
        self.drag_start = None;

        info!(
            connection = %connection.id,
            color = %connection.color,
            score = self.score,
            "connection made"
        );
        self.connections.push(connection);
        self.connections.last()
    }

    /// Handles pointer movement to `point` during a drag.
    ///
    /// The first marker in row-major order that is a valid target and whose hit circle
    /// contains `point` is offered to `consider_target`. Without a drag, or with no
    /// such marker under the pointer, nothing happens.
    pub fn pointer_move(&mut self, point: Position) -> Option<&Connection> {
        let start = self.drag_start()?;
        let (start_id, start_color) = (start.id, start.color);
        let marker_size = self.board.layout().marker_size;

        let target = self
            .board
            .markers()
            .iter()
            .find(|m| {
                m.id != start_id
                    && !m.connected
                    && m.color == start_color
                    && point_in_marker_radius(point, m.position, marker_size)
            })?
            .id;
        self.consider_target(target)
    }

    /// Cancels the drag in progress. Calling it without a drag is a no-op.
    pub fn end_drag(&mut self) {
        if let Some(id) = self.drag_start.take() {
            trace!(marker = %id, "drag ended");
        }
    }

    /// Dispatches one pointer event. Returns `true` if it committed a connection.
    pub fn handle_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down(id) => {
                self.begin_drag(id);
                false
            }
            PointerEvent::Enter(id) => self.consider_target(id).is_some(),
            PointerEvent::Move(point) => self.pointer_move(point).is_some(),
            PointerEvent::Up | PointerEvent::LeaveBoard => {
                self.end_drag();
                false
            }
        }
    }

    /// Clears all connections and connected flags, zeroes the score and cancels the
    /// drag. Marker colors and positions are kept.
    pub fn reset(&mut self) {
        self.board.disconnect_all();
        self.connections.clear();
        self.drag_start = None;
        self.score = 0;
        debug!(markers = self.board.len(), "connections reset");
    }

    /// Replaces the board (on a level change) and resets everything else.
    pub fn replace_board(&mut self, board: Board) {
        self.board = board;
        self.reset();
    }
}
