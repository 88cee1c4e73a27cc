//! Multi-stage tournament brackets: library with models and generation logic.
//!
//! Pool-play or Swiss results go in, advancing teams are ranked and seeded,
//! and a single-elimination, double-elimination or round-robin match list
//! comes out. Everything here is pure and synchronous; persisting matches and
//! recording results is up to the caller.

pub mod logic;
pub mod models;

pub use logic::{
    bracket_positions, bracket_size, calculate_pool_advancement, calculate_pool_standings,
    calculate_swiss_standings, elimination_rounds, execute_pool_transition,
    execute_swiss_to_elimination, generate_double_elimination_bracket,
    generate_round_robin_matches, generate_seeded_elimination_bracket,
    generate_single_elimination_bracket, generate_swiss_pairings, losers_matches_in_round,
    losers_rounds, rank_standings, rank_swiss_standings, seeding_order, total_rounds,
    validate_bracket_generation, BracketGenerator, MatchIdGenerator, SequentialIds, UuidIds,
    DEFAULT_MAX_BRACKET_SIZE,
};
pub use models::{
    AdvancementMethod, AdvancementPolicy, AdvancementResult, AdvancementSummary, AdvancementType,
    BracketError, BracketFormat, BracketMatch, BracketSegment, BracketStructure, MatchStatus, Pool,
    PoolMatch, SeedInfo, SeedingMethod, StageResults, StageTransition, SwissAdvancementCriteria,
    SwissResult, SwissRound, SwissTeamRecord, TeamEntry, TeamId, TeamStageResult, TeamStanding,
    Tiebreaker, TiebreakerRule, TournamentId, ValidationIssue, ValidationReport, WildcardCriteria,
};
