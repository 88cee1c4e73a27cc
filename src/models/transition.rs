//! Stage transition configuration and advancement results.

use crate::models::bracket::BracketFormat;
use crate::models::entry::{TeamEntry, TeamId};
use crate::models::standing::{TeamStanding, Tiebreaker, TiebreakerRule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How teams are picked out of pool play.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvancementType {
    #[default]
    TopNPerPool,
    TopNOverall,
    /// Top half of all teams.
    Percentage,
}

/// Ranking used to fill wildcard spots.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WildcardCriteria {
    #[default]
    #[serde(alias = "best-losing-record", alias = "head-to-head-performance")]
    BestRecord,
    #[serde(alias = "highest-point-differential")]
    BestPointDifferential,
    #[serde(alias = "strength-of-schedule")]
    BestStrengthOfSchedule,
}

/// Advancement policy handed to the pool advancement calculator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdvancementPolicy {
    #[serde(default)]
    pub advancement_type: AdvancementType,
    #[serde(default = "default_teams_advancing_per_pool")]
    pub teams_advancing_per_pool: usize,
    #[serde(default = "default_total_teams_advancing")]
    pub total_teams_advancing: usize,
    #[serde(default)]
    pub wildcard_spots: usize,
    #[serde(default)]
    pub wildcard_criteria: WildcardCriteria,
    #[serde(default)]
    pub tiebreakers: Vec<TiebreakerRule>,
    /// Seed for `random-draw` tiebreaks.
    #[serde(default)]
    pub draw_seed: u64,
}

fn default_teams_advancing_per_pool() -> usize {
    2
}

fn default_total_teams_advancing() -> usize {
    8
}

impl Default for AdvancementPolicy {
    fn default() -> Self {
        Self {
            advancement_type: AdvancementType::TopNPerPool,
            teams_advancing_per_pool: default_teams_advancing_per_pool(),
            total_teams_advancing: default_total_teams_advancing(),
            wildcard_spots: 0,
            wildcard_criteria: WildcardCriteria::BestRecord,
            tiebreakers: Vec::new(),
            draw_seed: 0,
        }
    }
}

/// Output of the pool advancement calculator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancementResult {
    pub advancing_teams: Vec<TeamStanding>,
    pub eliminated_teams: Vec<TeamStanding>,
    /// Sorted by seed, 1 first.
    pub seeding_order: Vec<TeamEntry>,
    pub tiebreakers_used: Vec<Tiebreaker>,
    #[serde(default)]
    pub wildcard_selections: Vec<TeamStanding>,
}

/// Seeding method configured for a stage transition.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedingMethod {
    #[default]
    PoolRankings,
    OverallRecord,
    CrossPoolComparison,
    SwissRankings,
    PerformanceRating,
    ManualSeeding,
}

impl SeedingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SeedingMethod::PoolRankings => "pool-rankings",
            SeedingMethod::OverallRecord => "overall-record",
            SeedingMethod::CrossPoolComparison => "cross-pool-comparison",
            SeedingMethod::SwissRankings => "swiss-rankings",
            SeedingMethod::PerformanceRating => "performance-rating",
            SeedingMethod::ManualSeeding => "manual-seeding",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WildcardSeeding {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub wildcard_count: usize,
    #[serde(default)]
    pub wildcard_criteria: WildcardCriteria,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeedingRules {
    #[serde(default)]
    pub method: SeedingMethod,
    #[serde(default = "default_cross_pool_seeding")]
    pub cross_pool_seeding: bool,
    #[serde(default)]
    pub wildcard: WildcardSeeding,
}

fn default_cross_pool_seeding() -> bool {
    true
}

impl Default for SeedingRules {
    fn default() -> Self {
        Self {
            method: SeedingMethod::PoolRankings,
            cross_pool_seeding: default_cross_pool_seeding(),
            wildcard: WildcardSeeding::default(),
        }
    }
}

/// Configuration for moving from one stage to the next.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageTransition {
    #[serde(default)]
    pub seeding_rules: SeedingRules,
    #[serde(default)]
    pub bracket_type: BracketFormat,
    #[serde(default = "default_teams_advancing_per_pool")]
    pub teams_advancing_per_pool: usize,
    #[serde(default = "default_total_teams_advancing")]
    pub total_teams_advancing: usize,
    #[serde(default)]
    pub tiebreakers: Vec<TiebreakerRule>,
    #[serde(default)]
    pub draw_seed: u64,
}

impl Default for StageTransition {
    fn default() -> Self {
        Self {
            seeding_rules: SeedingRules::default(),
            bracket_type: BracketFormat::SingleElimination,
            teams_advancing_per_pool: default_teams_advancing_per_pool(),
            total_teams_advancing: default_total_teams_advancing(),
            tiebreakers: Vec::new(),
            draw_seed: 0,
        }
    }
}

impl StageTransition {
    /// Advancement policy implied by this transition: pool rankings advance
    /// per pool, every other method ranks all teams together.
    pub fn advancement_policy(&self) -> AdvancementPolicy {
        let rules = &self.seeding_rules;
        AdvancementPolicy {
            advancement_type: match rules.method {
                SeedingMethod::PoolRankings => AdvancementType::TopNPerPool,
                _ => AdvancementType::TopNOverall,
            },
            teams_advancing_per_pool: self.teams_advancing_per_pool,
            total_teams_advancing: self.total_teams_advancing,
            wildcard_spots: if rules.wildcard.enabled {
                rules.wildcard.wildcard_count
            } else {
                0
            },
            wildcard_criteria: rules.wildcard.wildcard_criteria,
            tiebreakers: self.tiebreakers.clone(),
            draw_seed: self.draw_seed,
        }
    }
}

/// How a team earned its place in the next stage.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvancementMethod {
    PoolWinner,
    /// Any other placement-based qualifier out of pool play.
    RunnerUp,
    Wildcard,
    /// Inside the guaranteed Swiss slots.
    Automatic,
    /// Met the Swiss thresholds and made the cut.
    PointsThreshold,
}

/// Win/loss record in a stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_matches: u32,
    /// 0..=100.
    pub win_percentage: f64,
}

impl StageRecord {
    pub fn new(wins: u32, losses: u32, draws: u32) -> Self {
        let total_matches = wins + losses + draws;
        Self {
            wins,
            losses,
            draws,
            total_matches,
            win_percentage: if total_matches > 0 {
                f64::from(wins) / f64::from(total_matches) * 100.0
            } else {
                0.0
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StageScoring {
    pub tournament_points: f64,
    pub game_points_for: u32,
    pub game_points_against: u32,
    pub point_differential: i64,
    /// Game points per match played.
    pub average_score: f64,
}

impl StageScoring {
    pub fn new(
        tournament_points: f64,
        game_points_for: u32,
        game_points_against: u32,
        matches: u32,
    ) -> Self {
        Self {
            tournament_points,
            game_points_for,
            game_points_against,
            point_differential: i64::from(game_points_for) - i64::from(game_points_against),
            average_score: if matches > 0 {
                f64::from(game_points_for) / f64::from(matches)
            } else {
                0.0
            },
        }
    }
}

/// One team's line in the stage results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamStageResult {
    pub team: TeamId,
    /// 1-based final rank in the stage.
    pub final_placement: u32,
    pub record: StageRecord,
    pub scoring: StageScoring,
    pub strength_of_schedule: f64,
    pub qualified: bool,
    /// `None` for teams that did not qualify.
    pub advancement_method: Option<AdvancementMethod>,
    pub seed_for_next_stage: Option<u32>,
    pub next_stage_bracket_position: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancementSummary {
    pub total_teams_advancing: usize,
    pub advancement_by_method: BTreeMap<AdvancementMethod, usize>,
    pub tiebreakers_required: bool,
}

impl AdvancementSummary {
    /// Count the qualified teams of `results` per advancement method.
    pub fn from_results(results: &[TeamStageResult], tiebreakers_required: bool) -> Self {
        let mut advancement_by_method = BTreeMap::new();
        for method in results.iter().filter_map(|r| r.advancement_method) {
            *advancement_by_method.entry(method).or_insert(0) += 1;
        }
        Self {
            total_teams_advancing: results.iter().filter(|r| r.qualified).count(),
            advancement_by_method,
            tiebreakers_required,
        }
    }
}

/// Summary of a finished stage and the seeding for the next one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageResults {
    pub stage_number: u32,
    pub stage_name: String,
    pub stage_type: String,
    /// Every team of the stage, best first.
    pub results: Vec<TeamStageResult>,
    pub advancement_summary: AdvancementSummary,
    pub advancing_teams: Vec<TeamId>,
    pub eliminated_teams: Vec<TeamId>,
    pub next_stage_seeding: Vec<TeamEntry>,
    pub completed_at: DateTime<Utc>,
}

impl StageResults {
    /// Human-readable transition report.
    pub fn report(&self) -> String {
        let mut lines = vec![format!(
            "{} teams advanced to the next stage",
            self.advancing_teams.len()
        )];
        for entry in &self.next_stage_seeding {
            let why = entry.seeding_justification.as_deref().unwrap_or("Advanced");
            lines.push(format!("{}. {} ({})", entry.seed, entry.team, why));
        }
        lines.join("\n")
    }
}
