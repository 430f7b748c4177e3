//! Workflow run phases
//!
//! A deliberately small machine: one linear path, no cycles, no re-entry.
//!
//! Resolve → Confirm → Escalate → Done
//!
//! The only branching in a run happens inside Escalate, and it selects an
//! outcome, not a different phase.

use serde::{Deserialize, Serialize};

/// Phases of one workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    /// Retrieval + summarization
    Resolve,

    /// Blocking user decisions
    Confirm,

    /// Conditional incident creation + notification
    Escalate,

    /// Terminal; final response ready
    Done,
}

impl RunPhase {
    /// Next phase on the linear path. `Done` is absorbing.
    pub fn advance(&self) -> RunPhase {
        match self {
            RunPhase::Resolve => RunPhase::Confirm,
            RunPhase::Confirm => RunPhase::Escalate,
            RunPhase::Escalate => RunPhase::Done,
            RunPhase::Done => RunPhase::Done,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Done)
    }

    /// Human-readable phase name
    pub fn display_name(&self) -> &'static str {
        match self {
            RunPhase::Resolve => "Resolving",
            RunPhase::Confirm => "Confirming",
            RunPhase::Escalate => "Escalating",
            RunPhase::Done => "Done",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_path() {
        assert_eq!(RunPhase::Resolve.advance(), RunPhase::Confirm);
        assert_eq!(RunPhase::Confirm.advance(), RunPhase::Escalate);
        assert_eq!(RunPhase::Escalate.advance(), RunPhase::Done);
    }

    #[test]
    fn test_done_is_absorbing() {
        assert_eq!(RunPhase::Done.advance(), RunPhase::Done);
    }

    #[test]
    fn test_terminal_states() {
        assert!(RunPhase::Done.is_terminal());
        assert!(!RunPhase::Resolve.is_terminal());
        assert!(!RunPhase::Confirm.is_terminal());
        assert!(!RunPhase::Escalate.is_terminal());
    }

    #[test]
    fn test_every_phase_reaches_done() {
        for start in [RunPhase::Resolve, RunPhase::Confirm, RunPhase::Escalate] {
            let mut phase = start;
            let mut steps = 0;
            while !phase.is_terminal() {
                phase = phase.advance();
                steps += 1;
                assert!(steps <= 3, "no progress from {:?}", start);
            }
        }
    }
}
