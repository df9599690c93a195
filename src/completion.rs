//! Level completion, derived purely from marker state.
use crate::board::Marker;
use serde::{Deserialize, Serialize};

/// How a level with an odd number of markers is judged.
///
/// An odd-sized board always has one color with an odd count, so one marker can
/// never be paired. `Strict` keeps such levels unfinishable; `AllowOddLeftover`
/// accepts that single marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionRule {
    /// Complete only when every marker is connected.
    Strict,
    /// Complete when at most `markers.len() % 2` markers remain unconnected.
    #[default]
    AllowOddLeftover,
}

/// Connected/total marker counts, as shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub connected: usize,
    pub total: usize,
}

impl Progress {
    pub fn of(markers: &[Marker]) -> Self {
        Progress {
            connected: markers.iter().filter(|m| m.connected).count(),
            total: markers.len(),
        }
    }

    pub fn unconnected(&self) -> usize {
        self.total - self.connected
    }
}

/// Returns `true` if the level is complete under `rule`.
///
/// An empty marker list is never complete.
///
/// # Examples
/// ```
/// use connect_dots::completion::{is_complete, CompletionRule};
/// assert!(!is_complete(&[], CompletionRule::Strict));
/// assert!(!is_complete(&[], CompletionRule::AllowOddLeftover));
/// ```
pub fn is_complete(markers: &[Marker], rule: CompletionRule) -> bool {
    if markers.is_empty() {
        return false;
    }
    let progress = Progress::of(markers);
    match rule {
        CompletionRule::Strict => progress.unconnected() == 0,
        CompletionRule::AllowOddLeftover => progress.unconnected() <= markers.len() % 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Layout;
    use crate::utils::board_from_str_array;

    fn markers_with(rows: &[&str], connected: &[usize]) -> Vec<Marker> {
        let board = board_from_str_array(rows, Layout::default()).unwrap();
        let mut markers = board.markers().to_vec();
        for &index in connected {
            markers[index].connected = true;
        }
        markers
    }

    #[test]
    fn test_even_board_complete_only_when_all_connected() {
        let markers = markers_with(&["RG", "GR"], &[0, 3]);
        assert!(!is_complete(&markers, CompletionRule::Strict));
        assert!(!is_complete(&markers, CompletionRule::AllowOddLeftover));

        let markers = markers_with(&["RG", "GR"], &[0, 1, 2, 3]);
        assert!(is_complete(&markers, CompletionRule::Strict));
        assert!(is_complete(&markers, CompletionRule::AllowOddLeftover));
    }

    #[test]
    fn test_odd_board_leftover_rule() {
        // Red has three markers; one of them can never be paired.
        let rows = ["RRG", "GBB", "YYR"];
        let markers = markers_with(&rows, &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert!(!is_complete(&markers, CompletionRule::Strict));
        assert!(is_complete(&markers, CompletionRule::AllowOddLeftover));

        let markers = markers_with(&rows, &[0, 1, 2, 3, 4, 5]);
        assert!(!is_complete(&markers, CompletionRule::AllowOddLeftover));
    }

    #[test]
    fn test_progress_counts() {
        let markers = markers_with(&["RRG", "GBB", "YYR"], &[4, 5]);
        let progress = Progress::of(&markers);
        assert_eq!(progress, Progress { connected: 2, total: 9 });
        assert_eq!(progress.unconnected(), 7);
    }
}
