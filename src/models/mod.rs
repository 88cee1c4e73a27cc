//! Data structures for bracket generation: seeded entries, standings, Swiss records, matches.

mod bracket;
mod entry;
mod error;
mod standing;
mod swiss;
mod transition;

pub use bracket::{
    BracketFormat, BracketMatch, BracketSegment, BracketStructure, MatchStatus, SeedInfo,
    SeedingInfo,
};
pub use entry::{TeamEntry, TeamId, TournamentId};
pub use error::{BracketError, ValidationIssue, ValidationReport};
pub use standing::{HeadToHead, Pool, PoolMatch, PoolSettings, TeamStanding, Tiebreaker, TiebreakerRule};
pub use swiss::{
    MatchOutcome, PairingMethod, PlannedPairing, SwissAdvancementCriteria, SwissMatchRecord,
    SwissPairing, SwissPairingOptions, SwissPairings, SwissResult, SwissRound, SwissTeamRecord,
    SwissTiebreaker,
};
pub use transition::{
    AdvancementMethod, AdvancementPolicy, AdvancementResult, AdvancementSummary, AdvancementType,
    SeedingMethod, SeedingRules, StageRecord, StageResults, StageScoring, StageTransition,
    TeamStageResult, WildcardCriteria, WildcardSeeding,
};
