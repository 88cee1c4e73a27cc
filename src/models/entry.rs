//! Seeded team entries handed from advancement calculators to bracket builders.

use serde::{Deserialize, Serialize};

/// Opaque team identifier (name or external id).
pub type TeamId = String;

/// Opaque tournament identifier, passed through to every generated match.
pub type TournamentId = String;

/// One advancing team with its seed for the next stage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub team: TeamId,
    /// 1 = best.
    pub seed: u32,
    pub bracket_position: u32,
    /// Why the team got this seed ("Pool Winner", "Wildcard", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeding_justification: Option<String>,
}

impl TeamEntry {
    pub fn new(team: impl Into<TeamId>, seed: u32) -> Self {
        Self {
            team: team.into(),
            seed,
            bracket_position: seed,
            seeding_justification: None,
        }
    }

    pub fn with_justification(mut self, justification: impl Into<String>) -> Self {
        self.seeding_justification = Some(justification.into());
        self
    }

    /// Build a seeding order from team ids already ranked best-first.
    pub fn from_ranked<I, T>(teams: I) -> Vec<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<TeamId>,
    {
        teams
            .into_iter()
            .enumerate()
            .map(|(i, team)| Self::new(team, i as u32 + 1))
            .collect()
    }
}
