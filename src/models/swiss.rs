//! Swiss-system rounds, records and advancement criteria.

use crate::models::entry::TeamId;
use serde::{Deserialize, Serialize};

/// Reported result of a Swiss pairing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwissResult {
    Team1Wins,
    Team2Wins,
    Draw,
    /// Neither team showed; both take a loss.
    DoubleForfeit,
}

/// One pairing of a Swiss round.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SwissPairing {
    #[serde(default)]
    pub match_id: String,
    pub team1: TeamId,
    pub team2: TeamId,
    /// `None` until the pairing has been played.
    #[serde(default)]
    pub result: Option<SwissResult>,
    #[serde(default)]
    pub actual_score1: Option<u32>,
    #[serde(default)]
    pub actual_score2: Option<u32>,
}

/// A Swiss round. Only complete rounds count towards standings.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SwissRound {
    pub round_number: u32,
    pub pairings: Vec<SwissPairing>,
    #[serde(default)]
    pub is_complete: bool,
}

/// Outcome of one match from a single team's point of view.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchOutcome {
    Win,
    Loss,
    Draw,
}

impl MatchOutcome {
    /// Swiss points for this outcome.
    pub fn points(self) -> f64 {
        match self {
            MatchOutcome::Win => 1.0,
            MatchOutcome::Draw => 0.5,
            MatchOutcome::Loss => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwissMatchRecord {
    pub round: u32,
    pub opponent: TeamId,
    pub result: MatchOutcome,
    pub game_points: u32,
    pub opponent_points: u32,
}

/// A team's Swiss record with its tiebreak values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SwissTeamRecord {
    pub team: TeamId,
    /// 1 per win, 0.5 per draw.
    pub tournament_points: f64,
    pub game_points: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Buchholz: sum of opponents' tournament points.
    pub opponent_points: f64,
    pub sonneborn_berger: f64,
    /// Sum of the running score after each round.
    pub cumulative: f64,
    pub strength_of_schedule: f64,
    pub performance: f64,
    pub match_history: Vec<SwissMatchRecord>,
}

impl SwissTeamRecord {
    pub fn new(team: impl Into<TeamId>) -> Self {
        Self {
            team: team.into(),
            performance: 1000.0,
            ..Self::default()
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Win percentage in 0..=100.
    pub fn win_percentage(&self) -> f64 {
        match self.games_played() {
            0 => 0.0,
            n => f64::from(self.wins) / f64::from(n) * 100.0,
        }
    }

    pub fn has_played(&self, opponent: &str) -> bool {
        self.match_history.iter().any(|m| m.opponent == opponent)
    }
}

/// Swiss tiebreakers applied after tournament points.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwissTiebreaker {
    Buchholz,
    SonnebornBerger,
    Cumulative,
    DirectEncounter,
}

/// Who advances out of a Swiss stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwissAdvancementCriteria {
    pub total_teams_advancing: usize,
    #[serde(default)]
    pub points_threshold: Option<f64>,
    /// Percentage in 0..=100.
    #[serde(default)]
    pub minimum_win_percentage: Option<f64>,
    #[serde(default)]
    pub performance_threshold: Option<f64>,
    /// Top N teams advance regardless of the thresholds.
    #[serde(default)]
    pub guaranteed_slots: Option<usize>,
    #[serde(default = "default_swiss_tiebreakers")]
    pub tiebreakers: Vec<SwissTiebreaker>,
}

fn default_swiss_tiebreakers() -> Vec<SwissTiebreaker> {
    vec![SwissTiebreaker::Buchholz, SwissTiebreaker::SonnebornBerger]
}

impl SwissAdvancementCriteria {
    pub fn top(total_teams_advancing: usize) -> Self {
        Self {
            total_teams_advancing,
            points_threshold: None,
            minimum_win_percentage: None,
            performance_threshold: None,
            guaranteed_slots: None,
            tiebreakers: default_swiss_tiebreakers(),
        }
    }
}

/// Pairing method for the next Swiss round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairingMethod {
    #[default]
    Swiss,
    /// Top half against bottom half by performance in rounds 1 and 2.
    Accelerated,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SwissPairingOptions {
    #[serde(default)]
    pub pairing_method: PairingMethod,
    #[serde(default = "default_avoid_rematches")]
    pub avoid_rematches: bool,
}

fn default_avoid_rematches() -> bool {
    true
}

impl Default for SwissPairingOptions {
    fn default() -> Self {
        Self {
            pairing_method: PairingMethod::Swiss,
            avoid_rematches: true,
        }
    }
}

/// A planned pairing for the next round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlannedPairing {
    pub team1: TeamId,
    pub team2: TeamId,
    pub table_number: u32,
}

/// Pairings for one round plus the team sitting out, if the field is odd.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SwissPairings {
    pub pairings: Vec<PlannedPairing>,
    pub bye: Option<TeamId>,
}
