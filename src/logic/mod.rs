//! Bracket business logic: advancement, seeding, bracket builders, validation.

mod double_elimination;
mod generator;
mod ids;
mod pool_advancement;
mod ranking;
mod round_robin;
mod seeding;
mod single_elimination;
mod swiss;
mod validation;

pub use double_elimination::{
    generate_double_elimination_bracket, losers_matches_in_round, losers_rounds,
    MIN_DOUBLE_ELIMINATION_TEAMS,
};
pub use generator::{elimination_rounds, generate_seeded_elimination_bracket, BracketGenerator};
pub use ids::{MatchIdGenerator, SequentialIds, UuidIds};
pub use pool_advancement::{
    calculate_pool_advancement, calculate_pool_standings, execute_pool_transition, ordinal,
    rank_standings,
};
pub use round_robin::generate_round_robin_matches;
pub use seeding::{bracket_positions, bracket_size, mirrored_position, seeding_order, total_rounds};
pub use single_elimination::generate_single_elimination_bracket;
pub use swiss::{
    calculate_swiss_standings, execute_swiss_to_elimination, generate_swiss_pairings,
    rank_swiss_standings,
};
pub use validation::{validate_bracket_generation, DEFAULT_MAX_BRACKET_SIZE};
