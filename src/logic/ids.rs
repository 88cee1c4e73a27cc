//! Match id generation, injected into every builder.

use uuid::Uuid;

/// Source of match ids. `prefix` names the bracket segment ("bracket",
/// "winners", "losers", "championship", "championship-reset", "rr").
pub trait MatchIdGenerator {
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Per-call counter shared by all segments: `winners-1`, ..., `losers-8`.
/// Deterministic, but only unique within one generation call.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchIdGenerator for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{}-{}", prefix, self.next);
        self.next += 1;
        id
    }
}

/// Random v4 ids, unique across calls (e.g. when a bracket is regenerated).
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIds;

impl MatchIdGenerator for UuidIds {
    fn next_id(&mut self, prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4())
    }
}
