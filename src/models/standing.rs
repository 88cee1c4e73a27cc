//! Pool-play inputs and the standings computed from them.

use crate::models::entry::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One pool-play match as reported by the standings provider.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PoolMatch {
    #[serde(default)]
    pub match_id: String,
    pub team1: TeamId,
    pub team2: TeamId,
    #[serde(default)]
    pub team1_score: Option<u32>,
    #[serde(default)]
    pub team2_score: Option<u32>,
    #[serde(default)]
    pub winner: Option<TeamId>,
    #[serde(default)]
    pub is_draw: bool,
    #[serde(default = "default_round")]
    pub round: u32,
    /// Only completed matches count towards standings.
    #[serde(default)]
    pub completed: bool,
}

fn default_round() -> u32 {
    1
}

/// Points awarded per result inside a pool.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PoolSettings {
    #[serde(default = "default_points_per_win")]
    pub points_per_win: u32,
    #[serde(default = "default_points_per_draw")]
    pub points_per_draw: u32,
}

fn default_points_per_win() -> u32 {
    3
}

fn default_points_per_draw() -> u32 {
    1
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            points_per_win: default_points_per_win(),
            points_per_draw: default_points_per_draw(),
        }
    }
}

/// A pool (group) of teams and the matches played in it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub pool_id: String,
    #[serde(default)]
    pub pool_name: String,
    #[serde(default)]
    pub pool_index: usize,
    pub teams: Vec<TeamId>,
    #[serde(default)]
    pub matches: Vec<PoolMatch>,
    #[serde(default)]
    pub settings: PoolSettings,
}

/// Record of one team against one opponent.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub wins: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
}

/// A team's record within a pool-play stage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team: TeamId,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Tournament points (3 per win and 1 per draw by default).
    pub points: u32,
    /// Game points scored.
    pub game_points: u32,
    pub points_allowed: u32,
    pub point_differential: i64,
    pub win_percentage: f64,
    /// Mean pool win percentage of the opponents faced.
    pub strength_of_schedule: f64,
    pub head_to_head: BTreeMap<TeamId, HeadToHead>,
    pub matches_played: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<String>,
    /// 1-based rank inside the team's pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_placement: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advancement_reason: Option<String>,
}

impl TeamStanding {
    pub fn new(team: impl Into<TeamId>) -> Self {
        Self {
            team: team.into(),
            ..Self::default()
        }
    }
}

/// Tiebreak methods for pool standings, applied after tournament points.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tiebreaker {
    HeadToHeadRecord,
    PointDifferential,
    TotalPointsScored,
    /// Lower is better.
    TotalPointsAllowed,
    WinsVsCommonOpponents,
    StrengthOfSchedule,
    /// Seeded draw; deterministic for a given draw seed.
    #[serde(alias = "coin-flip")]
    RandomDraw,
}

/// A tiebreaker with its priority (lower runs first).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TiebreakerRule {
    pub method: Tiebreaker,
    pub priority: u32,
}

impl TiebreakerRule {
    pub fn new(method: Tiebreaker, priority: u32) -> Self {
        Self { method, priority }
    }
}
