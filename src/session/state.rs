//! Session state types.

use crate::runtime::TimerHandle;

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Intro sequence running (or the placeholder still loading). Clicks are ignored.
    Priming,
    /// No tile selected.
    Idle,
    /// One tile face up, waiting for its partner.
    OneSelected,
    /// Two tiles face up, the resolver timer is running.
    Pending,
}

/// What a click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClickOutcome {
    /// Not processed: the board is priming or the index is off the board.
    Ignored,
    /// Invalid move. The tile shook, nothing else changed.
    Rejected,
    /// The tile became the first selection.
    FirstSelected,
    /// The tile completed a pair. `matched` tells which resolver was scheduled.
    SecondSelected { matched: bool },
}

/// Selection slots. Each variant carries only the fields valid in it, so a
/// second slot without a first, or a timer without two tiles, cannot exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Selection {
    #[default]
    Empty,
    One {
        first: usize,
    },
    Pending {
        first: usize,
        second: usize,
        timer: TimerHandle,
    },
}

impl Selection {
    pub(crate) fn slots(self) -> (Option<usize>, Option<usize>) {
        match self {
            Selection::Empty => (None, None),
            Selection::One { first } => (Some(first), None),
            Selection::Pending { first, second, .. } => (Some(first), Some(second)),
        }
    }

    pub(crate) fn contains(self, index: usize) -> bool {
        let (first, second) = self.slots();
        first == Some(index) || second == Some(index)
    }

    pub(crate) fn phase(self) -> Phase {
        match self {
            Selection::Empty => Phase::Idle,
            Selection::One { .. } => Phase::OneSelected,
            Selection::Pending { .. } => Phase::Pending,
        }
    }
}
