//! Award rules, keyed by award id.
//!
//! Each rule is a pure predicate over `InteractionStats`. Award ids with no
//! entry in the table are never granted automatically.

use crate::models::interaction::InteractionStats;

pub type AwardRule = fn(&InteractionStats) -> bool;

pub const FIRST_DECISION: i32 = 1;
pub const HUNDRED_DECISIONS: i32 = 2;
pub const HUNDRED_LIKES: i32 = 3;
pub const BALANCED_READER: i32 = 5;

const RULES: &[(i32, AwardRule)] = &[
    (FIRST_DECISION, first_decision),
    (HUNDRED_DECISIONS, hundred_decisions),
    (HUNDRED_LIKES, hundred_likes),
    (BALANCED_READER, balanced_reader),
];

fn first_decision(stats: &InteractionStats) -> bool {
    stats.total >= 1
}

fn hundred_decisions(stats: &InteractionStats) -> bool {
    stats.total >= 100
}

fn hundred_likes(stats: &InteractionStats) -> bool {
    stats.liked >= 100
}

// Holds for an empty history too (0 == 0).
fn balanced_reader(stats: &InteractionStats) -> bool {
    stats.liked == stats.disliked
}

pub fn rule_for(award_id: i32) -> Option<AwardRule> {
    RULES
        .iter()
        .find(|(id, _)| *id == award_id)
        .map(|(_, rule)| *rule)
}

pub fn qualifies(award_id: i32, stats: &InteractionStats) -> bool {
    rule_for(award_id).is_some_and(|rule| rule(stats))
}
