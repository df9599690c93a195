use crate::board::{Board, Color, MarkerId};
use crate::engine::PointerEvent;
use crate::session::GameSession;
use rand::Rng;
use std::collections::BTreeMap;

/// A way to connect every pairable marker on a board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    /// (drag start, drag target) pairs, grouped by color.
    pub pairs: Vec<(MarkerId, MarkerId)>,
    /// Unconnected markers left without a partner of their color.
    pub leftover: Vec<MarkerId>,
}

impl Plan {
    /// Points earned by playing every pair of the plan. Saturates like the engine's score.
    pub fn expected_score(&self, reward: u32) -> u32 {
        u32::try_from(self.pairs.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(reward)
    }
}

/// Plans connections for all unconnected markers of `board`.
///
/// Markers are grouped by color and paired in row-major order; a color with an odd
/// number of unconnected markers leaves its last one in `leftover`. Since any two
/// same-colored markers may connect, this pairs the maximum possible number.
///
/// # Examples
/// ```
/// use connect_dots::board::{Layout, MarkerId};
/// use connect_dots::solver::plan_connections;
/// use connect_dots::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["RGR", "GBB", "RRR"], Layout::default()).unwrap();
/// let plan = plan_connections(&board);
/// assert_eq!(plan.pairs.len(), 4);
/// assert_eq!(plan.leftover, vec![MarkerId::new(2, 2)]);
/// assert_eq!(plan.expected_score(10), 40);
/// ```
pub fn plan_connections(board: &Board) -> Plan {
    let mut by_color: BTreeMap<Color, Vec<MarkerId>> = BTreeMap::new();
    for marker in board.markers().iter().filter(|m| !m.connected) {
        by_color.entry(marker.color).or_default().push(marker.id);
    }

    let mut plan = Plan::default();
    for ids in by_color.values() {
        let mut chunks = ids.chunks_exact(2);
        for pair in &mut chunks {
            plan.pairs.push((pair[0], pair[1]));
        }
        plan.leftover.extend_from_slice(chunks.remainder());
    }
    plan
}

/// Plays `plan` through `session` the way a pointer would: press on the start
/// marker, move to the center of the target, release.
///
/// Returns the number of connections committed. Pairs that no longer apply (for
/// example because the board changed) are skipped by the engine.
pub fn play_plan<R: Rng>(session: &mut GameSession<R>, plan: &Plan) -> usize {
    let mut committed = 0;
    for &(start, target) in &plan.pairs {
        let Some(target_center) = session
            .board()
            .marker(target)
            .map(|m| session.board().layout().marker_center(m.position))
        else {
            continue;
        };

        session.handle_pointer(PointerEvent::Down(start));
        if session.handle_pointer(PointerEvent::Move(target_center)) {
            committed += 1;
        }
        session.handle_pointer(PointerEvent::Up);
    }
    committed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Layout;
    use crate::config::GameConfig;
    use crate::utils::board_from_str_array;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_plan_even_board() {
        let board = board_from_str_array(&["RG", "GR"], Layout::default()).unwrap();
        let plan = plan_connections(&board);
        assert_eq!(
            plan.pairs,
            vec![
                (MarkerId::new(0, 0), MarkerId::new(1, 1)),
                (MarkerId::new(0, 1), MarkerId::new(1, 0)),
            ]
        );
        assert!(plan.leftover.is_empty());
    }

    #[test]
    fn test_expected_score_saturates() {
        let board = board_from_str_array(&["RG", "GR"], Layout::default()).unwrap();
        let plan = plan_connections(&board);
        assert_eq!(plan.expected_score(10), 20);
        assert_eq!(plan.expected_score(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_plan_skips_connected_markers() {
        let mut session =
            GameSession::with_rng(GameConfig::default(), SmallRng::seed_from_u64(11)).unwrap();
        let board = board_from_str_array(&["RRG", "GBB", "YYR"], Layout::default()).unwrap();
        session.install_board(board);

        session.handle_pointer(PointerEvent::Down(MarkerId::new(1, 1)));
        session.handle_pointer(PointerEvent::Enter(MarkerId::new(1, 2)));

        let plan = plan_connections(session.board());
        assert_eq!(plan.pairs.len(), 3);
        assert!(plan
            .pairs
            .iter()
            .all(|&(a, b)| a != MarkerId::new(1, 1) && b != MarkerId::new(1, 2)));
        assert_eq!(plan.leftover, vec![MarkerId::new(2, 2)]);
    }

    #[test]
    fn test_play_plan_completes_generated_levels() {
        let config = GameConfig::default();
        let mut session = GameSession::with_rng(config, SmallRng::seed_from_u64(12)).unwrap();
        for level in 1..=6 {
            session.go_to_level(level);
            let plan = plan_connections(session.board());
            let committed = play_plan(&mut session, &plan);
            assert_eq!(committed, plan.pairs.len());
            assert_eq!(session.score(), plan.expected_score(10));
            assert!(session.is_complete(), "level {} not complete", level);
            assert!(!session.engine().is_dragging());
        }
    }

    #[test]
    fn test_play_plan_twice_commits_nothing_new() {
        let mut session =
            GameSession::with_rng(GameConfig::default(), SmallRng::seed_from_u64(13)).unwrap();
        let plan = plan_connections(session.board());
        play_plan(&mut session, &plan);
        let score = session.score();
        assert_eq!(play_plan(&mut session, &plan), 0);
        assert_eq!(session.score(), score);
    }
}
