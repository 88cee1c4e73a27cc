//! Generated bracket matches and the structure handed to the persistence layer.

use crate::models::entry::{TeamId, TournamentId};
use crate::models::transition::AdvancementResult;
use serde::{Deserialize, Serialize};

/// Lifecycle of a match. Builders only ever produce `Upcoming`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    #[default]
    Upcoming,
    InProgress,
    Completed,
}

/// Which part of a double-elimination bracket a match belongs to.
/// Each segment numbers its rounds independently from 1.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BracketSegment {
    Winners,
    Losers,
    Championship,
}

/// Topology of a generated stage.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BracketFormat {
    #[default]
    SingleElimination,
    DoubleElimination,
    RoundRobin,
    Swiss,
}

impl BracketFormat {
    /// Elimination topology actually built for this format: anything that is
    /// not double elimination is built as single elimination.
    pub fn elimination(self) -> Self {
        match self {
            BracketFormat::DoubleElimination => BracketFormat::DoubleElimination,
            _ => BracketFormat::SingleElimination,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BracketFormat::SingleElimination => "single-elimination",
            BracketFormat::DoubleElimination => "double-elimination",
            BracketFormat::RoundRobin => "round-robin",
            BracketFormat::Swiss => "swiss",
        }
    }
}

impl std::fmt::Display for BracketFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seed provenance for a first-round match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeedInfo {
    pub team1_seed: Option<u32>,
    pub team2_seed: Option<u32>,
    pub team1_origin: Option<String>,
    pub team2_origin: Option<String>,
}

/// One scheduled contest.
///
/// `team1`/`team2` of `None` is a bye in round 1 and a not-yet-determined
/// participant in later rounds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: String,
    pub tournament_id: TournamentId,
    /// 1-based, per segment.
    pub round: u32,
    /// 1-based slot within the round.
    pub position: u32,
    pub team1: Option<TeamId>,
    pub team2: Option<TeamId>,
    pub team1_score: u32,
    pub team2_score: u32,
    /// Set at generation time only for walkovers.
    pub winner: Option<TeamId>,
    pub status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bracket: Option<BracketSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_info: Option<SeedInfo>,
}

impl BracketMatch {
    /// A placeholder match with no participants yet.
    pub fn placeholder(
        id: String,
        tournament_id: &str,
        round: u32,
        position: u32,
        bracket: Option<BracketSegment>,
    ) -> Self {
        Self {
            id,
            tournament_id: tournament_id.to_string(),
            round,
            position,
            team1: None,
            team2: None,
            team1_score: 0,
            team2_score: 0,
            winner: None,
            status: MatchStatus::Upcoming,
            bracket,
            seed_info: None,
        }
    }

    /// True when exactly one side has a team.
    pub fn is_bye(&self) -> bool {
        self.team1.is_some() != self.team2.is_some()
    }
}

/// How the teams of a generated stage were seeded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeedingInfo {
    pub seeding_method: String,
    pub advancement_source: String,
    pub cross_pool_seeding: bool,
}

/// Result of one bracket generation call. Never persisted by this crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BracketStructure {
    pub matches: Vec<BracketMatch>,
    pub total_rounds: u32,
    pub total_matches: usize,
    pub format: BracketFormat,
    pub seeding_info: SeedingInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advancement_results: Option<AdvancementResult>,
}

impl BracketStructure {
    /// Matches of one round (and segment, for double elimination).
    pub fn round(&self, segment: Option<BracketSegment>, round: u32) -> Vec<&BracketMatch> {
        self.matches
            .iter()
            .filter(|m| m.bracket == segment && m.round == round)
            .collect()
    }
}
