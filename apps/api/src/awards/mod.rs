// Awards: rule-based grants evaluated against a user's aggregate history.
// Grants are append-only; (user_id, award_id) is unique at the storage layer.

pub mod evaluator;
pub mod handlers;
pub mod rules;
pub mod store;

pub use store::{AwardStore, PgAwardStore};
