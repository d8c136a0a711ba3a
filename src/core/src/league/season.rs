use serde::Serialize;

/// Season progression is an explicit finite-state machine over the gameweek
/// pointer. Guarded transitions replace scattered played flags: an
/// operation either matches the current stage or fails with a typed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeasonStage {
    /// Fixtures of this gameweek are still being resolved.
    AwaitingResults(u32),
    /// Every fixture of this gameweek is played; only advancing is legal.
    ReadyToAdvance(u32),
    /// No scheduled gameweek remains.
    SeasonComplete,
}

impl SeasonStage {
    pub fn gameweek(&self) -> Option<u32> {
        match self {
            SeasonStage::AwaitingResults(gameweek) | SeasonStage::ReadyToAdvance(gameweek) => {
                Some(*gameweek)
            }
            SeasonStage::SeasonComplete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SeasonStage::SeasonComplete)
    }
}

/// What `advance_gameweek` moved the season to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    NextGameweek(u32),
    SeasonComplete,
}
